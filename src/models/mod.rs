pub mod budget;
pub mod correlation;
pub mod currency;
pub mod pair;
pub mod recommendation;
pub mod signal;
pub mod timeframe;

pub use budget::{BudgetEdit, BudgetItem, BudgetSet};
pub use correlation::{CorrelationInput, CorrelationSet};
pub use currency::Currency;
pub use pair::{all_pairs, find_pair, GroupIndex, PairGroup, TradePair, PAIR_GROUPS};
pub use recommendation::Recommendation;
pub use signal::{Action, Bias, StrengthLabel};
pub use timeframe::Timeframe;
