use std::fmt::Write;

use crate::core::aggregator::{ClassifiedCurrency, ResolvedGroup};
use crate::core::budget::{BudgetCalculator, BudgetSummary, ItemExposure};
use crate::core::sessions::SessionSnapshot;
use crate::models::{BudgetSet, Recommendation};

const RULE: &str = "  ───────────────────────────────────";

fn banner(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", "=".repeat(70));
    let _ = writeln!(out, "  {}", title);
    let _ = writeln!(out, "{}", "=".repeat(70));
}

pub fn render_correlations(rows: &[&ClassifiedCurrency]) -> String {
    let mut out = String::new();
    banner(&mut out, "CORRELATION INDEX");
    let _ = writeln!(
        out,
        "  {:<6} {:>7} {:>7} {:>7} {:>8}  {}",
        "Index", "D1", "4H", "1H", "T", "S"
    );
    let _ = writeln!(out, "{}", RULE);
    for c in rows {
        let _ = writeln!(
            out,
            "  {:<6} {:>7} {:>7} {:>7} {:>8}  {}",
            c.id, c.d1, c.h4, c.h1, c.total, c.label
        );
    }
    out
}

pub fn render_trade_plan(groups: &[ResolvedGroup], budget: &BudgetSet) -> String {
    let mut out = String::new();
    banner(&mut out, "TRADE PLAN");
    if groups.is_empty() {
        let _ = writeln!(out, "  No pairs match the current filter.");
    }
    for group in groups {
        let _ = writeln!(out);
        let _ = writeln!(out, "  {}", group.index);
        let _ = writeln!(out, "{}", RULE);
        for p in &group.pairs {
            let marker = if budget.contains(p.symbol) { "*" } else { " " };
            let _ = writeln!(
                out,
                " {}{:<8} {:>7}  conf {:>6.2}  ({} / {})",
                marker, p.symbol, p.bias, p.confidence, p.base_label, p.quote_label
            );
        }
    }
    out
}

pub fn render_recommendations(recs: Option<&[Recommendation]>) -> String {
    let mut out = String::new();
    banner(&mut out, "INSIGHTS");
    match recs {
        None => {
            let _ = writeln!(out, "  No insights yet. Run `insights` to request them.");
        }
        Some(recs) => {
            for (i, r) in recs.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {}. {:<8} {:<5} (conf {:.2})",
                    i + 1,
                    r.pair,
                    r.action,
                    r.confidence
                );
                let _ = writeln!(out, "     {}", r.reasoning);
            }
        }
    }
    out
}

/// Per-item exposures plus totals for one capital figure.
#[derive(Debug, Clone)]
pub struct BudgetReport {
    pub capital: f64,
    pub exposures: Vec<ItemExposure>,
    pub summary: BudgetSummary,
    pub news_warning: bool,
}

impl BudgetReport {
    pub fn build(calc: &BudgetCalculator, budget: &BudgetSet, capital: f64) -> Self {
        Self {
            capital,
            exposures: budget.iter().map(|item| calc.exposure(item)).collect(),
            summary: calc.summarize(budget.iter(), capital),
            news_warning: budget.has_news_risk(),
        }
    }

    pub fn render(&self, budget: &BudgetSet) -> String {
        let mut out = String::new();
        banner(&mut out, "BUDGET");
        let _ = writeln!(out, "  Capital:     ${:.2}", self.capital);
        let _ = writeln!(out);
        let _ = writeln!(out, "  POSITIONS");
        let _ = writeln!(out, "{}", RULE);
        if self.exposures.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for (item, e) in budget.iter().zip(&self.exposures) {
            let _ = writeln!(
                out,
                "  {:<8} {:<4} lot {:>5.2} | SL {:>5.1} (${:.2}) | TP {:>5.1} (${:.2}) | R:R {:.2}{}",
                item.pair,
                item.action,
                item.lot_size,
                item.stop_loss,
                e.risk,
                item.take_profit,
                e.reward,
                e.reward_to_risk,
                if item.news_risk { " | NEWS" } else { "" }
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "  TOTALS");
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(
            out,
            "  Risk:        ${:.2} ({:.1}%)",
            self.summary.total_risk, self.summary.risk_pct
        );
        let _ = writeln!(
            out,
            "  Reward:      ${:.2} ({:.1}%)",
            self.summary.total_reward, self.summary.reward_pct
        );
        if self.news_warning {
            let _ = writeln!(out, "  WARNING: upcoming news on a budgeted pair");
        }
        out
    }
}

pub fn render_sessions(snap: &SessionSnapshot) -> String {
    let mut out = String::new();
    banner(&mut out, "SESSIONS");
    let _ = writeln!(out, "  UTC:         {}", snap.utc.format("%Y-%m-%d %H:%M"));
    let _ = writeln!(
        out,
        "  Local:       {} ({:.0}% of day)",
        snap.local_time, snap.day_progress_pct
    );
    let _ = writeln!(
        out,
        "  Active:      {}",
        if snap.active.is_empty() {
            "none".to_string()
        } else {
            snap.active.join(", ")
        }
    );
    for (a, b) in &snap.overlaps {
        let _ = writeln!(out, "  Overlap:     {} / {}", a, b);
    }
    if snap.news_warning {
        let _ = writeln!(out, "  WARNING: upcoming news on a budgeted pair");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::budget::PipProfile;
    use crate::models::{Action, BudgetEdit};

    #[test]
    fn budget_report_matches_summary() {
        let calc = BudgetCalculator::new(PipProfile::Approximate);
        let mut budget = BudgetSet::new();
        budget.toggle("EURUSD", Action::Buy).unwrap();
        budget.update("EURUSD", BudgetEdit::LotSize(1.0)).unwrap();
        budget.update("EURUSD", BudgetEdit::StopLoss(20.0)).unwrap();
        budget.update("EURUSD", BudgetEdit::TakeProfit(40.0)).unwrap();

        let report = BudgetReport::build(&calc, &budget, 1000.0);
        assert_eq!(report.exposures.len(), 1);
        assert!((report.summary.total_risk - 200.0).abs() < 1e-9);

        let text = report.render(&budget);
        assert!(text.contains("EURUSD"));
        assert!(text.contains("$200.00 (20.0%)"));
        assert!(text.contains("$400.00 (40.0%)"));
        assert!(!text.contains("WARNING"));
    }

    #[test]
    fn empty_recommendations_hint() {
        let text = render_recommendations(None);
        assert!(text.contains("No insights yet"));
    }
}
