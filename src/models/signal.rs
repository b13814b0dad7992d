use serde::{Deserialize, Serialize};
use std::fmt;

/// Five ordered strength bands. Variant order is weakest to strongest so the
/// derived `Ord` matches `ExtremeStrong > Strong > Neutral > Weak > ExtremeWeak`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum StrengthLabel {
    #[serde(rename = "Extreme Weak")]
    ExtremeWeak,
    #[serde(rename = "Weak")]
    Weak,
    #[default]
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Strong")]
    Strong,
    #[serde(rename = "Extreme Strong")]
    ExtremeStrong,
}

impl StrengthLabel {
    pub const ALL: [StrengthLabel; 5] = [
        StrengthLabel::ExtremeWeak,
        StrengthLabel::Weak,
        StrengthLabel::Neutral,
        StrengthLabel::Strong,
        StrengthLabel::ExtremeStrong,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::ExtremeWeak => "Extreme Weak",
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Neutral => "Neutral",
            StrengthLabel::Strong => "Strong",
            StrengthLabel::ExtremeStrong => "Extreme Strong",
        }
    }

    pub fn is_strong(self) -> bool {
        matches!(self, StrengthLabel::Strong | StrengthLabel::ExtremeStrong)
    }

    pub fn is_weak(self) -> bool {
        matches!(self, StrengthLabel::Weak | StrengthLabel::ExtremeWeak)
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Bias {
    Buy,
    Sell,
    Neutral,
}

impl Bias {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bias::Buy => "BUY",
            Bias::Sell => "SELL",
            Bias::Neutral => "NEUTRAL",
        }
    }

    pub fn is_actionable(self) -> bool {
        !matches!(self, Bias::Neutral)
    }

    pub fn to_action(self) -> Option<Action> {
        match self {
            Bias::Buy => Some(Action::Buy),
            Bias::Sell => Some(Action::Sell),
            Bias::Neutral => None,
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// What a recommendation or budget item says to do with a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
        }
    }

    /// Exact, case-sensitive match on the wire spelling.
    pub fn from_wire(s: &str) -> Option<Action> {
        match s {
            "BUY" => Some(Action::Buy),
            "SELL" => Some(Action::Sell),
            "HOLD" => Some(Action::Hold),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_label_is_neutral() {
        assert_eq!(StrengthLabel::default(), StrengthLabel::Neutral);
    }

    #[test]
    fn labels_order_strongest_highest() {
        assert!(StrengthLabel::ExtremeStrong > StrengthLabel::Strong);
        assert!(StrengthLabel::Strong > StrengthLabel::Neutral);
        assert!(StrengthLabel::Neutral > StrengthLabel::Weak);
        assert!(StrengthLabel::Weak > StrengthLabel::ExtremeWeak);
    }

    #[test]
    fn label_families() {
        assert!(StrengthLabel::ExtremeStrong.is_strong());
        assert!(!StrengthLabel::Neutral.is_strong());
        assert!(!StrengthLabel::Neutral.is_weak());
        assert!(StrengthLabel::ExtremeWeak.is_weak());
    }

    #[test]
    fn label_serde_uses_display_names() {
        let json = serde_json::to_string(&StrengthLabel::ExtremeStrong).unwrap();
        assert_eq!(json, "\"Extreme Strong\"");
    }

    #[test]
    fn bias_maps_to_action() {
        assert_eq!(Bias::Buy.to_action(), Some(Action::Buy));
        assert_eq!(Bias::Sell.to_action(), Some(Action::Sell));
        assert_eq!(Bias::Neutral.to_action(), None);
    }

    #[test]
    fn action_wire_parse_is_strict() {
        assert_eq!(Action::from_wire("HOLD"), Some(Action::Hold));
        assert_eq!(Action::from_wire("hold"), None);
        assert_eq!(Action::from_wire("NEUTRAL"), None);
    }
}
