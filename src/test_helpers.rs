use crate::config::Config;
use crate::models::{CorrelationSet, Currency};

pub fn default_test_config() -> Config {
    Config::default()
}

/// Readings with a spread of bands so that both BUY and SELL pairs appear.
///
/// Totals: EUR 7, USD -4, JPY -3, GBP 2, NZD -1, AUD 0, CAD -5, GOLD 4.
pub fn sample_correlations() -> CorrelationSet {
    let mut set = CorrelationSet::new();
    for (currency, d1, h4, h1) in [
        (Currency::Eur, 3.0, 2.0, 2.0),
        (Currency::Usd, -2.0, -1.0, -1.0),
        (Currency::Jpy, -1.0, -1.0, -1.0),
        (Currency::Gbp, 1.0, 1.0, 0.0),
        (Currency::Nzd, -1.0, 0.0, 0.0),
        (Currency::Aud, 0.0, 0.0, 0.0),
        (Currency::Cad, -2.0, -2.0, -1.0),
        (Currency::Gold, 2.0, 1.0, 1.0),
    ] {
        set.set_all(currency, d1, h4, h1)
            .expect("sample readings are finite");
    }
    set
}
