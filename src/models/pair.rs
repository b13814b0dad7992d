use serde::Serialize;
use std::fmt;

use super::currency::Currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TradePair {
    pub symbol: &'static str,
    pub base: Currency,
    pub quote: Currency,
}

/// The organizing currency of a pair group. Gold pairs live under `XAU`
/// rather than `GOLD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GroupIndex {
    Currency(Currency),
    Xau,
}

impl GroupIndex {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupIndex::Currency(c) => c.as_str(),
            GroupIndex::Xau => "XAU",
        }
    }
}

impl fmt::Display for GroupIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PairGroup {
    pub index: GroupIndex,
    pub pairs: &'static [TradePair],
}

const fn pair(symbol: &'static str, base: Currency, quote: Currency) -> TradePair {
    TradePair {
        symbol,
        base,
        quote,
    }
}

use Currency::{Aud, Cad, Eur, Gbp, Gold, Jpy, Nzd, Usd};

pub static PAIR_GROUPS: &[PairGroup] = &[
    PairGroup {
        index: GroupIndex::Currency(Eur),
        pairs: &[
            pair("EURUSD", Eur, Usd),
            pair("EURJPY", Eur, Jpy),
            pair("EURGBP", Eur, Gbp),
            pair("EURNZD", Eur, Nzd),
            pair("EURCAD", Eur, Cad),
            pair("EURAUD", Eur, Aud),
        ],
    },
    PairGroup {
        index: GroupIndex::Currency(Gbp),
        pairs: &[
            pair("GBPUSD", Gbp, Usd),
            pair("GBPJPY", Gbp, Jpy),
            pair("GBPNZD", Gbp, Nzd),
            pair("GBPCAD", Gbp, Cad),
            pair("GBPAUD", Gbp, Aud),
        ],
    },
    PairGroup {
        index: GroupIndex::Currency(Usd),
        pairs: &[pair("USDJPY", Usd, Jpy), pair("USDCAD", Usd, Cad)],
    },
    PairGroup {
        index: GroupIndex::Currency(Aud),
        pairs: &[
            pair("AUDJPY", Aud, Jpy),
            pair("AUDNZD", Aud, Nzd),
            pair("AUDCAD", Aud, Cad),
            pair("AUDUSD", Aud, Usd),
        ],
    },
    PairGroup {
        index: GroupIndex::Currency(Nzd),
        pairs: &[
            pair("NZDCAD", Nzd, Cad),
            pair("NZDUSD", Nzd, Usd),
            pair("NZDJPY", Nzd, Jpy),
        ],
    },
    PairGroup {
        index: GroupIndex::Xau,
        pairs: &[pair("XAUUSD", Gold, Usd)],
    },
];

pub fn all_pairs() -> impl Iterator<Item = &'static TradePair> {
    PAIR_GROUPS.iter().flat_map(|g| g.pairs.iter())
}

pub fn find_pair(symbol: &str) -> Option<&'static TradePair> {
    let symbol = symbol.trim();
    all_pairs().find(|p| p.symbol.eq_ignore_ascii_case(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn taxonomy_has_21_unique_symbols() {
        let symbols: HashSet<&str> = all_pairs().map(|p| p.symbol).collect();
        assert_eq!(all_pairs().count(), 21);
        assert_eq!(symbols.len(), 21);
    }

    #[test]
    fn symbol_is_base_then_quote() {
        for p in all_pairs() {
            if p.base == Gold {
                assert!(p.symbol.starts_with("XAU"));
            } else {
                assert!(p.symbol.starts_with(p.base.as_str()), "{}", p.symbol);
            }
            assert!(p.symbol.ends_with(p.quote.as_str()), "{}", p.symbol);
        }
    }

    #[test]
    fn find_pair_is_case_insensitive() {
        let p = find_pair("eurusd").unwrap();
        assert_eq!(p.base, Eur);
        assert_eq!(p.quote, Usd);
        assert!(find_pair("USDCHF").is_none());
    }
}
