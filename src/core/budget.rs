use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::BudgetItem;

/// Pairs grouped by how much one pip on one standard lot is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairClass {
    Metal,
    YenQuoted,
    CadQuoted,
    GbpQuoted,
    Standard,
}

impl PairClass {
    /// Metal is recognised by an `XAU` prefix, the rest by quote suffix.
    pub fn of(symbol: &str) -> PairClass {
        let s = symbol.trim().to_ascii_uppercase();
        if s.starts_with("XAU") {
            PairClass::Metal
        } else if s.ends_with("JPY") {
            PairClass::YenQuoted
        } else if s.ends_with("CAD") {
            PairClass::CadQuoted
        } else if s.ends_with("GBP") {
            PairClass::GbpQuoted
        } else {
            PairClass::Standard
        }
    }
}

impl fmt::Display for PairClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairClass::Metal => write!(f, "metal"),
            PairClass::YenQuoted => write!(f, "yen_quoted"),
            PairClass::CadQuoted => write!(f, "cad_quoted"),
            PairClass::GbpQuoted => write!(f, "gbp_quoted"),
            PairClass::Standard => write!(f, "standard"),
        }
    }
}

/// Monetary value of one pip on one standard lot, per pair class. These are
/// fixed approximations, not derived from live rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipValueTable {
    pub metal: f64,
    pub yen_quoted: f64,
    pub cad_quoted: f64,
    pub gbp_quoted: f64,
    pub standard: f64,
}

impl PipValueTable {
    /// 100,000-unit lot at a 0.0001 tick.
    pub const STANDARD_PIP_VALUE: f64 = 10.0;

    pub const APPROXIMATE: PipValueTable = PipValueTable {
        // $0.10 per pip per ounce on a 100 oz lot.
        metal: 10.0,
        yen_quoted: 9.3,
        cad_quoted: 7.3,
        gbp_quoted: 12.5,
        standard: Self::STANDARD_PIP_VALUE,
    };

    pub const FLAT: PipValueTable = PipValueTable {
        metal: Self::STANDARD_PIP_VALUE,
        yen_quoted: Self::STANDARD_PIP_VALUE,
        cad_quoted: Self::STANDARD_PIP_VALUE,
        gbp_quoted: Self::STANDARD_PIP_VALUE,
        standard: Self::STANDARD_PIP_VALUE,
    };

    pub fn value_for(&self, class: PairClass) -> f64 {
        match class {
            PairClass::Metal => self.metal,
            PairClass::YenQuoted => self.yen_quoted,
            PairClass::CadQuoted => self.cad_quoted,
            PairClass::GbpQuoted => self.gbp_quoted,
            PairClass::Standard => self.standard,
        }
    }
}

/// Named pip-value schemes selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipProfile {
    /// Per-class approximations.
    Approximate,
    /// The standard value for every pair.
    Flat,
    Custom(PipValueTable),
}

impl PipProfile {
    pub fn table(&self) -> PipValueTable {
        match self {
            PipProfile::Approximate => PipValueTable::APPROXIMATE,
            PipProfile::Flat => PipValueTable::FLAT,
            PipProfile::Custom(table) => *table,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PipProfile::Approximate => "approximate",
            PipProfile::Flat => "flat",
            PipProfile::Custom(_) => "custom",
        }
    }
}

/// Risk and reward of one budget item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemExposure {
    pub pair: String,
    pub class: PairClass,
    pub risk: f64,
    pub reward: f64,
    /// Reward over risk; zero when there is no risk.
    pub reward_to_risk: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BudgetSummary {
    pub total_risk: f64,
    pub total_reward: f64,
    pub risk_pct: f64,
    pub reward_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetCalculator {
    table: PipValueTable,
}

impl BudgetCalculator {
    pub fn new(profile: PipProfile) -> Self {
        Self {
            table: profile.table(),
        }
    }

    pub fn table(&self) -> &PipValueTable {
        &self.table
    }

    pub fn value_per_pip_per_lot(&self, pair: &str) -> f64 {
        self.table.value_for(PairClass::of(pair))
    }

    /// Monetary value of `pips` on `lot_size` lots. Unrounded.
    pub fn pip_value(&self, pair: &str, lot_size: f64, pips: f64) -> f64 {
        if pips == 0.0 || lot_size == 0.0 {
            return 0.0;
        }
        pips * self.value_per_pip_per_lot(pair) * lot_size
    }

    pub fn exposure(&self, item: &BudgetItem) -> ItemExposure {
        let risk = self.pip_value(&item.pair, item.lot_size, item.stop_loss);
        let reward = self.pip_value(&item.pair, item.lot_size, item.take_profit);
        ItemExposure {
            pair: item.pair.clone(),
            class: PairClass::of(&item.pair),
            risk,
            reward,
            reward_to_risk: if risk > 0.0 { reward / risk } else { 0.0 },
        }
    }

    /// Totals over `items` and their share of `capital`. Percentages are zero
    /// unless capital is positive.
    pub fn summarize<'a, I>(&self, items: I, capital: f64) -> BudgetSummary
    where
        I: IntoIterator<Item = &'a BudgetItem>,
    {
        let (total_risk, total_reward) = items.into_iter().fold((0.0, 0.0), |(risk, reward), item| {
            (
                risk + self.pip_value(&item.pair, item.lot_size, item.stop_loss),
                reward + self.pip_value(&item.pair, item.lot_size, item.take_profit),
            )
        });

        let pct = |total: f64| {
            if capital > 0.0 {
                total / capital * 100.0
            } else {
                0.0
            }
        };

        BudgetSummary {
            total_risk,
            total_reward,
            risk_pct: pct(total_risk),
            reward_pct: pct(total_reward),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{all_pairs, Action};

    fn approx() -> BudgetCalculator {
        BudgetCalculator::new(PipProfile::Approximate)
    }

    fn item(pair: &str, lot: f64, sl: f64, tp: f64) -> BudgetItem {
        BudgetItem {
            pair: pair.to_string(),
            action: Action::Buy,
            lot_size: lot,
            stop_loss: sl,
            take_profit: tp,
            news_risk: false,
        }
    }

    #[test]
    fn pair_classes() {
        assert_eq!(PairClass::of("XAUUSD"), PairClass::Metal);
        assert_eq!(PairClass::of("usdjpy"), PairClass::YenQuoted);
        assert_eq!(PairClass::of("AUDCAD"), PairClass::CadQuoted);
        assert_eq!(PairClass::of("EURGBP"), PairClass::GbpQuoted);
        assert_eq!(PairClass::of("GBPUSD"), PairClass::Standard);
        assert_eq!(PairClass::of("EURNZD"), PairClass::Standard);
    }

    #[test]
    fn zero_short_circuits() {
        let calc = approx();
        for p in all_pairs() {
            assert_eq!(calc.pip_value(p.symbol, 0.0, 35.0), 0.0);
            assert_eq!(calc.pip_value(p.symbol, 2.0, 0.0), 0.0);
        }
    }

    #[test]
    fn per_class_values() {
        let calc = approx();
        assert!((calc.pip_value("EURUSD", 1.0, 20.0) - 200.0).abs() < 1e-9);
        assert!((calc.pip_value("XAUUSD", 1.0, 20.0) - 200.0).abs() < 1e-9);
        assert!((calc.pip_value("GBPJPY", 1.0, 10.0) - 93.0).abs() < 1e-9);
        assert!((calc.pip_value("USDCAD", 0.5, 10.0) - 36.5).abs() < 1e-9);
        assert!((calc.pip_value("EURGBP", 0.1, 10.0) - 12.5).abs() < 1e-9);
    }

    #[test]
    fn flat_profile_ignores_class() {
        let calc = BudgetCalculator::new(PipProfile::Flat);
        assert!((calc.pip_value("GBPJPY", 1.0, 10.0) - 100.0).abs() < 1e-9);
        assert!((calc.pip_value("USDCAD", 1.0, 10.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn custom_profile_is_used_verbatim() {
        let table = PipValueTable {
            metal: 1.0,
            yen_quoted: 2.0,
            cad_quoted: 3.0,
            gbp_quoted: 4.0,
            standard: 5.0,
        };
        let calc = BudgetCalculator::new(PipProfile::Custom(table));
        assert!((calc.pip_value("XAUUSD", 1.0, 1.0) - 1.0).abs() < 1e-9);
        assert!((calc.pip_value("NZDUSD", 2.0, 3.0) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn no_rounding_inside_pip_value() {
        let calc = approx();
        let v = calc.pip_value("EURJPY", 0.01, 7.0);
        assert!((v - 0.651).abs() < 1e-12);
    }

    #[test]
    fn summary_eurusd_scenario() {
        let calc = approx();
        let items = [item("EURUSD", 1.0, 20.0, 40.0)];
        assert!((calc.pip_value("EURUSD", 1.0, 20.0) - 200.0).abs() < 1e-9);
        assert!((calc.pip_value("EURUSD", 1.0, 40.0) - 400.0).abs() < 1e-9);

        let s = calc.summarize(&items, 1000.0);
        assert!((s.total_risk - 200.0).abs() < 1e-9);
        assert!((s.total_reward - 400.0).abs() < 1e-9);
        assert!((s.risk_pct - 20.0).abs() < 1e-9);
        assert!((s.reward_pct - 40.0).abs() < 1e-9);
    }

    #[test]
    fn summary_zero_capital_is_safe() {
        let calc = approx();
        let items = [item("EURUSD", 1.0, 20.0, 40.0)];
        let s = calc.summarize(&items, 0.0);
        assert!(s.total_risk > 0.0);
        assert_eq!(s.risk_pct, 0.0);
        assert_eq!(s.reward_pct, 0.0);

        let s = calc.summarize(&items, -50.0);
        assert_eq!(s.risk_pct, 0.0);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        let s = approx().summarize(std::iter::empty(), 1000.0);
        assert_eq!(s, BudgetSummary::default());
    }

    #[test]
    fn summary_sums_across_classes() {
        let calc = approx();
        let items = [
            item("EURUSD", 1.0, 20.0, 40.0),
            item("USDJPY", 0.5, 30.0, 60.0),
        ];
        let s = calc.summarize(&items, 2000.0);
        // 200 + 0.5*30*9.3 = 339.5 ; 400 + 0.5*60*9.3 = 679
        assert!((s.total_risk - 339.5).abs() < 1e-9);
        assert!((s.total_reward - 679.0).abs() < 1e-9);
        assert!((s.risk_pct - 16.975).abs() < 1e-9);
    }

    #[test]
    fn exposure_ratio() {
        let e = approx().exposure(&item("AUDUSD", 1.0, 20.0, 50.0));
        assert!((e.reward_to_risk - 2.5).abs() < 1e-9);
        let e = approx().exposure(&item("AUDUSD", 1.0, 0.0, 50.0));
        assert_eq!(e.reward_to_risk, 0.0);
    }
}
