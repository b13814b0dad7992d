use serde::{Deserialize, Serialize};

use super::signal::Action;

/// A validated entry from the insight service. `pair` is always a known
/// taxonomy symbol in canonical upper case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub pair: String,
    pub action: Action,
    pub reasoning: String,
    pub confidence: f64,
}
