use thiserror::Error;

/// Typed error hierarchy for the planner library.
///
/// Binaries wrap these with `anyhow::Context` at the process edge.
#[derive(Error, Debug)]
pub enum PlannerError {
    // -- Input validation ---------------------------------------------------
    #[error("strength score is not a finite number: {value}")]
    NonFiniteScore { value: f64 },

    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("unknown pair: {0}")]
    UnknownPair(String),

    #[error("duplicate entry for {0}")]
    DuplicateEntry(String),

    #[error("invalid {field}: {value} (must be finite and non-negative)")]
    InvalidBudgetValue { field: &'static str, value: f64 },

    #[error("{0} has no BUY or SELL bias")]
    NotActionable(String),

    #[error("invalid portable payload: {reason}")]
    InvalidPortablePayload { reason: String },

    // -- Insight service ----------------------------------------------------
    #[error("insight service is not configured")]
    InsightServiceDisabled,

    #[error("insight service failed: {reason}")]
    InsightService { reason: String },

    #[error("insight response rejected: {0}")]
    InvalidInsightResponse(#[from] ResponseValidationError),

    // -- Configuration ------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),

    // -- Forwarded errors ---------------------------------------------------
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why a batch of recommendations was refused. The batch is accepted or
/// rejected as a whole.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResponseValidationError {
    #[error("expected a list of recommendations")]
    NotASequence,

    #[error("expected {expected} recommendations, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("entry {index} is not an object")]
    NotAnObject { index: usize },

    #[error("entry {index} is missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("entry {index} has malformed field `{field}`")]
    MalformedField { index: usize, field: &'static str },

    #[error("entry {index} names unknown pair {pair}")]
    UnknownPair { index: usize, pair: String },

    #[error("entry {index} repeats pair {pair}")]
    DuplicatePair { index: usize, pair: String },
}

pub type Result<T> = std::result::Result<T, PlannerError>;
