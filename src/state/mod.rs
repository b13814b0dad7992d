pub mod paste;
pub mod portable;
pub mod store;

pub use paste::{import_paste, PasteReport};
pub use portable::{export_portable, parse_portable};
pub use store::SessionStore;

use serde::{Deserialize, Serialize};

use crate::models::{BudgetSet, CorrelationSet, Recommendation};

/// Everything a planning session owns. Core functions borrow pieces of this;
/// only `SessionStore` reads or writes it as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub correlations: CorrelationSet,
    #[serde(default)]
    pub budget: BudgetSet,
    #[serde(default)]
    pub capital: f64,
    #[serde(default)]
    pub recommendations: Option<Vec<Recommendation>>,
}

impl SessionState {
    pub fn new(capital: f64) -> Self {
        Self {
            correlations: CorrelationSet::new(),
            budget: BudgetSet::new(),
            capital,
            recommendations: None,
        }
    }
}
