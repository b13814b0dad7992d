use serde::{Deserialize, Serialize};
use std::fmt;

/// The three readings recorded per currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "d1")]
    D1,
    #[serde(rename = "4h")]
    H4,
    #[serde(rename = "1h")]
    H1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::D1, Timeframe::H4, Timeframe::H1];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::D1 => "d1",
            Timeframe::H4 => "4h",
            Timeframe::H1 => "1h",
        }
    }

    /// Column header used in the correlation table and paste format.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::D1 => "D1",
            Timeframe::H4 => "4H",
            Timeframe::H1 => "1H",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Timeframe> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d1" | "1d" | "daily" => Some(Timeframe::D1),
            "4h" | "h4" => Some(Timeframe::H4),
            "1h" | "h1" => Some(Timeframe::H1),
            _ => None,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_parse_accepts_both_orders() {
        assert_eq!(Timeframe::from_str_loose("D1"), Some(Timeframe::D1));
        assert_eq!(Timeframe::from_str_loose("h4"), Some(Timeframe::H4));
        assert_eq!(Timeframe::from_str_loose("1H"), Some(Timeframe::H1));
        assert_eq!(Timeframe::from_str_loose("15m"), None);
    }
}
