use crate::models::{Bias, StrengthLabel};

/// Directional bias for a pair from its two legs' labels.
///
/// Strong base against weak quote buys, weak base against strong quote sells.
/// Anything involving Neutral, or both legs on the same side, is Neutral.
pub fn resolve_bias(base: StrengthLabel, quote: StrengthLabel) -> Bias {
    if base.is_strong() && quote.is_weak() {
        Bias::Buy
    } else if base.is_weak() && quote.is_strong() {
        Bias::Sell
    } else {
        Bias::Neutral
    }
}
