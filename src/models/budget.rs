use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{PlannerError, Result};

use super::pair::find_pair;
use super::recommendation::Recommendation;
use super::signal::{Action, Bias};

pub const DEFAULT_LOT_SIZE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub pair: String,
    pub action: Action,
    pub lot_size: f64,
    /// Stop-loss distance in pips.
    pub stop_loss: f64,
    /// Take-profit distance in pips.
    pub take_profit: f64,
    #[serde(default)]
    pub news_risk: bool,
}

impl BudgetItem {
    pub fn new(pair: &str, action: Action) -> Self {
        Self {
            pair: pair.to_string(),
            action,
            lot_size: DEFAULT_LOT_SIZE,
            stop_loss: 0.0,
            take_profit: 0.0,
            news_risk: false,
        }
    }
}

/// A single numeric or flag edit applied to an existing item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetEdit {
    Action(Action),
    LotSize(f64),
    StopLoss(f64),
    TakeProfit(f64),
    NewsRisk(bool),
}

/// Set of budget items keyed by canonical pair symbol. Stored as a list and
/// rebuilt through `insert` on load, so saved items get the same checks as
/// edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BudgetItem>", into = "Vec<BudgetItem>")]
pub struct BudgetSet {
    items: BTreeMap<String, BudgetItem>,
}

impl BudgetSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, pair: &str) -> bool {
        find_pair(pair).is_some_and(|p| self.items.contains_key(p.symbol))
    }

    pub fn get(&self, pair: &str) -> Option<&BudgetItem> {
        find_pair(pair).and_then(|p| self.items.get(p.symbol))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BudgetItem> {
        self.items.values()
    }

    /// Insert or replace the item for its pair.
    pub fn insert(&mut self, mut item: BudgetItem) -> Result<()> {
        let pair = find_pair(&item.pair).ok_or_else(|| PlannerError::UnknownPair(item.pair.clone()))?;
        validate("lot size", item.lot_size)?;
        validate("stop loss", item.stop_loss)?;
        validate("take profit", item.take_profit)?;
        item.pair = pair.symbol.to_string();
        self.items.insert(item.pair.clone(), item);
        Ok(())
    }

    pub fn remove(&mut self, pair: &str) -> Option<BudgetItem> {
        let pair = find_pair(pair)?;
        self.items.remove(pair.symbol)
    }

    /// Mark or unmark a pair. Returns whether the pair is budgeted afterwards.
    pub fn toggle(&mut self, pair: &str, action: Action) -> Result<bool> {
        let symbol = find_pair(pair)
            .ok_or_else(|| PlannerError::UnknownPair(pair.to_string()))?
            .symbol;
        if self.items.remove(symbol).is_some() {
            return Ok(false);
        }
        self.items
            .insert(symbol.to_string(), BudgetItem::new(symbol, action));
        Ok(true)
    }

    /// Toggle a pair from the trade plan. Only BUY and SELL pairs can be added;
    /// removal works whatever the bias.
    pub fn toggle_bias(&mut self, pair: &str, bias: Bias) -> Result<bool> {
        if self.contains(pair) {
            return self.toggle(pair, Action::Hold);
        }
        let action = bias
            .to_action()
            .ok_or_else(|| PlannerError::NotActionable(pair.to_string()))?;
        self.toggle(pair, action)
    }

    /// Budget a recommended pair with its suggested action. An existing item
    /// keeps its sizes and only takes the new action.
    pub fn adopt(&mut self, rec: &Recommendation) -> Result<&BudgetItem> {
        let symbol = find_pair(&rec.pair)
            .ok_or_else(|| PlannerError::UnknownPair(rec.pair.clone()))?
            .symbol;
        let item = self
            .items
            .entry(symbol.to_string())
            .or_insert_with(|| BudgetItem::new(symbol, rec.action));
        item.action = rec.action;
        Ok(item)
    }

    /// Apply an edit. Invalid values leave the item unchanged.
    pub fn update(&mut self, pair: &str, edit: BudgetEdit) -> Result<&BudgetItem> {
        let symbol = find_pair(pair)
            .ok_or_else(|| PlannerError::UnknownPair(pair.to_string()))?
            .symbol;
        let item = self
            .items
            .get_mut(symbol)
            .ok_or_else(|| PlannerError::UnknownPair(format!("{} is not budgeted", symbol)))?;

        match edit {
            BudgetEdit::Action(a) => item.action = a,
            BudgetEdit::LotSize(v) => item.lot_size = validate("lot size", v)?,
            BudgetEdit::StopLoss(v) => item.stop_loss = validate("stop loss", v)?,
            BudgetEdit::TakeProfit(v) => item.take_profit = validate("take profit", v)?,
            BudgetEdit::NewsRisk(flag) => item.news_risk = flag,
        }
        Ok(item)
    }

    pub fn has_news_risk(&self) -> bool {
        self.items.values().any(|i| i.news_risk)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl TryFrom<Vec<BudgetItem>> for BudgetSet {
    type Error = PlannerError;

    fn try_from(items: Vec<BudgetItem>) -> Result<Self> {
        let mut set = BudgetSet::new();
        for item in items {
            if set.contains(&item.pair) {
                return Err(PlannerError::DuplicateEntry(item.pair));
            }
            set.insert(item)?;
        }
        Ok(set)
    }
}

impl From<BudgetSet> for Vec<BudgetItem> {
    fn from(set: BudgetSet) -> Self {
        set.items.into_values().collect()
    }
}

fn validate(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PlannerError::InvalidBudgetValue { field, value })
    }
}
