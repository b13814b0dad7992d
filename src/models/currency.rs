use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of instruments the planner tracks. `Gold` stands in for the
/// metal index and is the base of the `XAU` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
    Jpy,
    Gbp,
    Nzd,
    Aud,
    Cad,
    Gold,
}

impl Currency {
    pub const ALL: [Currency; 8] = [
        Currency::Eur,
        Currency::Usd,
        Currency::Jpy,
        Currency::Gbp,
        Currency::Nzd,
        Currency::Aud,
        Currency::Cad,
        Currency::Gold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Jpy => "JPY",
            Currency::Gbp => "GBP",
            Currency::Nzd => "NZD",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
            Currency::Gold => "GOLD",
        }
    }

    /// Case-insensitive, whitespace-tolerant lookup used by the paste and
    /// portable importers.
    pub fn from_str_loose(s: &str) -> Option<Currency> {
        let s = s.trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
