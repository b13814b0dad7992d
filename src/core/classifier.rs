use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{PlannerError, Result};
use crate::models::StrengthLabel;

/// Lower edge of a band. `inclusive` decides whether a score sitting exactly
/// on the edge belongs to the band above it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub value: f64,
    pub inclusive: bool,
}

impl Bound {
    pub const fn at_least(value: f64) -> Self {
        Self {
            value,
            inclusive: true,
        }
    }

    pub const fn above(value: f64) -> Self {
        Self {
            value,
            inclusive: false,
        }
    }

    fn admits(&self, t: f64) -> bool {
        if self.inclusive {
            t >= self.value
        } else {
            t > self.value
        }
    }
}

/// Lower edges of the four upper bands. Anything below `weak` is ExtremeWeak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthThresholds {
    pub extreme_strong: Bound,
    pub strong: Bound,
    pub neutral: Bound,
    pub weak: Bound,
}

/// Named threshold tables. Both have been used by the dashboard; the choice is
/// made once in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthProfile {
    /// -1 is Weak, not Neutral: the Neutral band is (-1, 1).
    Narrow,
    Wide,
}

impl StrengthProfile {
    pub fn thresholds(&self) -> StrengthThresholds {
        match self {
            StrengthProfile::Narrow => StrengthThresholds {
                extreme_strong: Bound::at_least(3.0),
                strong: Bound::at_least(1.0),
                neutral: Bound::above(-1.0),
                weak: Bound::at_least(-3.0),
            },
            StrengthProfile::Wide => StrengthThresholds {
                extreme_strong: Bound::at_least(8.0),
                strong: Bound::at_least(6.0),
                neutral: Bound::at_least(-5.0),
                weak: Bound::at_least(-8.0),
            },
        }
    }

    pub fn from_str_loose(s: &str) -> Option<StrengthProfile> {
        match s.trim().to_ascii_lowercase().as_str() {
            "narrow" => Some(StrengthProfile::Narrow),
            "wide" => Some(StrengthProfile::Wide),
            _ => None,
        }
    }
}

impl fmt::Display for StrengthProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrengthProfile::Narrow => write!(f, "narrow"),
            StrengthProfile::Wide => write!(f, "wide"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthClassifier {
    thresholds: StrengthThresholds,
}

impl StrengthClassifier {
    pub fn new(profile: StrengthProfile) -> Self {
        Self {
            thresholds: profile.thresholds(),
        }
    }

    pub fn with_thresholds(thresholds: StrengthThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &StrengthThresholds {
        &self.thresholds
    }

    /// Band a strength score. NaN and infinities are refused.
    pub fn classify(&self, t: f64) -> Result<StrengthLabel> {
        if !t.is_finite() {
            return Err(PlannerError::NonFiniteScore { value: t });
        }

        let th = &self.thresholds;
        let label = if th.extreme_strong.admits(t) {
            StrengthLabel::ExtremeStrong
        } else if th.strong.admits(t) {
            StrengthLabel::Strong
        } else if th.neutral.admits(t) {
            StrengthLabel::Neutral
        } else if th.weak.admits(t) {
            StrengthLabel::Weak
        } else {
            StrengthLabel::ExtremeWeak
        };
        Ok(label)
    }
}
