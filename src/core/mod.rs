pub mod aggregator;
pub mod bias;
pub mod budget;
pub mod classifier;
pub mod confidence;
pub mod sessions;

pub use aggregator::{
    classify_currencies, filter_currencies, has_correlation_values, resolve_pairs, BiasFilter,
    ClassifiedCurrency, PairFilter, ResolvedGroup, ResolvedPair, TradePlan,
};
pub use bias::resolve_bias;
pub use budget::{BudgetCalculator, BudgetSummary, ItemExposure, PairClass, PipProfile, PipValueTable};
pub use classifier::{StrengthClassifier, StrengthProfile, StrengthThresholds};
