use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::{PlannerError, Result};

use super::currency::Currency;
use super::timeframe::Timeframe;

/// One currency's three timeframe readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationInput {
    pub id: Currency,
    pub d1: f64,
    #[serde(rename = "4h")]
    pub h4: f64,
    #[serde(rename = "1h")]
    pub h1: f64,
}

impl CorrelationInput {
    pub fn zero(id: Currency) -> Self {
        Self {
            id,
            d1: 0.0,
            h4: 0.0,
            h1: 0.0,
        }
    }

    pub fn new(id: Currency, d1: f64, h4: f64, h1: f64) -> Self {
        Self { id, d1, h4, h1 }
    }

    /// Strength score T, recomputed on every read.
    pub fn total(&self) -> f64 {
        self.d1 + self.h4 + self.h1
    }

    pub fn get(&self, tf: Timeframe) -> f64 {
        match tf {
            Timeframe::D1 => self.d1,
            Timeframe::H4 => self.h4,
            Timeframe::H1 => self.h1,
        }
    }

    fn set(&mut self, tf: Timeframe, value: f64) {
        match tf {
            Timeframe::D1 => self.d1 = value,
            Timeframe::H4 => self.h4 = value,
            Timeframe::H1 => self.h1 = value,
        }
    }

    /// Every reading and their sum must be finite.
    fn is_finite(&self) -> bool {
        self.d1.is_finite() && self.h4.is_finite() && self.h1.is_finite() && self.total().is_finite()
    }
}

/// Exactly one `CorrelationInput` per `Currency`, kept in `Currency::ALL` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CorrelationInput>", into = "Vec<CorrelationInput>")]
pub struct CorrelationSet {
    rows: Vec<CorrelationInput>,
}

impl Default for CorrelationSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CorrelationSet {
    pub fn new() -> Self {
        Self {
            rows: Currency::ALL.iter().map(|&c| CorrelationInput::zero(c)).collect(),
        }
    }

    /// Build a full set from a partial list. Currencies not listed start at zero;
    /// a currency listed twice or a non-finite reading is an error.
    pub fn from_inputs(inputs: Vec<CorrelationInput>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut set = Self::new();
        for input in inputs {
            if !seen.insert(input.id) {
                return Err(PlannerError::DuplicateEntry(input.id.to_string()));
            }
            if !input.is_finite() {
                return Err(PlannerError::NonFiniteScore {
                    value: input.total(),
                });
            }
            *set.row_mut(input.id) = input;
        }
        Ok(set)
    }

    pub fn get(&self, currency: Currency) -> &CorrelationInput {
        &self.rows[Self::slot(currency)]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CorrelationInput> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[CorrelationInput] {
        &self.rows
    }

    /// Direct edit of one reading. Non-finite values are refused and leave the
    /// set untouched.
    pub fn set(&mut self, currency: Currency, tf: Timeframe, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(PlannerError::NonFiniteScore { value });
        }
        let mut row = *self.get(currency);
        row.set(tf, value);
        if !row.is_finite() {
            return Err(PlannerError::NonFiniteScore { value: row.total() });
        }
        *self.row_mut(currency) = row;
        Ok(())
    }

    /// Overwrite all three readings at once.
    pub fn set_all(&mut self, currency: Currency, d1: f64, h4: f64, h1: f64) -> Result<()> {
        let input = CorrelationInput::new(currency, d1, h4, h1);
        if !input.is_finite() {
            return Err(PlannerError::NonFiniteScore {
                value: input.total(),
            });
        }
        *self.row_mut(currency) = input;
        Ok(())
    }

    pub fn reset(&mut self, currency: Currency) {
        *self.row_mut(currency) = CorrelationInput::zero(currency);
    }

    pub fn reset_all(&mut self) {
        *self = Self::new();
    }

    fn row_mut(&mut self, currency: Currency) -> &mut CorrelationInput {
        &mut self.rows[Self::slot(currency)]
    }

    fn slot(currency: Currency) -> usize {
        // Currency::ALL is declared in enum order.
        currency as usize
    }
}

impl TryFrom<Vec<CorrelationInput>> for CorrelationSet {
    type Error = PlannerError;

    fn try_from(inputs: Vec<CorrelationInput>) -> Result<Self> {
        Self::from_inputs(inputs)
    }
}

impl From<CorrelationSet> for Vec<CorrelationInput> {
    fn from(set: CorrelationSet) -> Self {
        set.rows
    }
}

impl<'a> IntoIterator for &'a CorrelationSet {
    type Item = &'a CorrelationInput;
    type IntoIter = std::slice::Iter<'a, CorrelationInput>;
    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
