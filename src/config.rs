use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::budget::{PipProfile, PipValueTable};
use crate::core::classifier::StrengthProfile;

/// A trading session window in UTC, `(hour, minute)` pairs. End is exclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTime {
    pub start: (u32, u32),
    pub end: (u32, u32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Endpoint of the recommendation service. Insights are disabled when unset.
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub top_n: usize,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Signal derivation
    pub strength_profile: StrengthProfile,
    pub pip_profile: PipProfile,

    // Budget
    pub default_capital: f64,

    // Insight service
    pub insight: InsightConfig,

    // Sessions (UTC), in display order
    pub sessions: Vec<(String, SessionTime)>,
    pub display_timezone: String,

    // Persistence
    pub state_file: String,

    // Logging
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            strength_profile: StrengthProfile::Narrow,
            pip_profile: PipProfile::Approximate,
            default_capital: 1000.0,
            insight: InsightConfig {
                url: None,
                api_key: None,
                top_n: 5,
                timeout_ms: 30_000,
            },
            sessions: default_sessions(),
            display_timezone: "Asia/Manila".to_string(),
            state_file: "data/session.json".to_string(),
            log_level: "INFO".to_string(),
        }
    }
}

fn default_sessions() -> Vec<(String, SessionTime)> {
    vec![
        (
            "Tokyo".to_string(),
            SessionTime {
                start: (0, 0),
                end: (9, 0),
            },
        ),
        (
            "London".to_string(),
            SessionTime {
                start: (8, 0),
                end: (17, 0),
            },
        ),
        (
            "New York".to_string(),
            SessionTime {
                start: (13, 0),
                end: (22, 0),
            },
        ),
    ]
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };
        let opt_env = |key: &str| -> Option<String> {
            std::env::var(key).ok().filter(|v| !v.trim().is_empty())
        };

        let defaults = Config::default();

        let strength_raw = env("STRENGTH_PROFILE", "narrow");
        let strength_profile = StrengthProfile::from_str_loose(&strength_raw).unwrap_or_else(|| {
            warn!("Unknown STRENGTH_PROFILE '{}', using narrow", strength_raw);
            StrengthProfile::Narrow
        });

        let base = PipValueTable::APPROXIMATE;
        let pip_value = |key: &str, default: f64| -> f64 {
            env(key, &default.to_string()).parse().unwrap_or(default)
        };
        let pip_profile = match env("PIP_PROFILE", "approximate").to_lowercase().as_str() {
            "approximate" => PipProfile::Approximate,
            "flat" => PipProfile::Flat,
            "custom" => PipProfile::Custom(PipValueTable {
                metal: pip_value("PIP_VALUE_METAL", base.metal),
                yen_quoted: pip_value("PIP_VALUE_YEN", base.yen_quoted),
                cad_quoted: pip_value("PIP_VALUE_CAD", base.cad_quoted),
                gbp_quoted: pip_value("PIP_VALUE_GBP", base.gbp_quoted),
                standard: pip_value("PIP_VALUE_STANDARD", base.standard),
            }),
            other => {
                warn!("Unknown PIP_PROFILE '{}', using approximate", other);
                PipProfile::Approximate
            }
        };

        Config {
            strength_profile,
            pip_profile,
            default_capital: env("DEFAULT_CAPITAL", "1000")
                .parse()
                .unwrap_or(defaults.default_capital),
            insight: InsightConfig {
                url: opt_env("INSIGHT_URL"),
                api_key: opt_env("INSIGHT_API_KEY"),
                top_n: env("INSIGHT_TOP_N", "5")
                    .parse()
                    .unwrap_or(defaults.insight.top_n),
                timeout_ms: env("INSIGHT_TIMEOUT_MS", "30000")
                    .parse()
                    .unwrap_or(defaults.insight.timeout_ms),
            },
            sessions: defaults.sessions,
            display_timezone: env("DISPLAY_TIMEZONE", &defaults.display_timezone),
            state_file: env("STATE_FILE", &defaults.state_file),
            log_level: env("LOG_LEVEL", &defaults.log_level),
        }
    }

    /// Display zone for the session clock. Falls back to Manila when the
    /// configured name is not a known IANA zone.
    pub fn display_tz(&self) -> Tz {
        self.display_timezone
            .parse::<Tz>()
            .unwrap_or(chrono_tz::Asia::Manila)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard() {
        let cfg = Config::default();
        assert_eq!(cfg.strength_profile, StrengthProfile::Narrow);
        assert_eq!(cfg.pip_profile, PipProfile::Approximate);
        assert_eq!(cfg.insight.top_n, 5);
        assert!(cfg.insight.url.is_none());
        assert_eq!(cfg.sessions.len(), 3);
        assert_eq!(cfg.display_tz(), chrono_tz::Asia::Manila);
    }

    #[test]
    fn bad_timezone_falls_back() {
        let cfg = Config {
            display_timezone: "Mars/Olympus".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.display_tz(), chrono_tz::Asia::Manila);
    }

    #[test]
    fn round_trips_through_json() {
        let cfg = Config {
            pip_profile: PipProfile::Custom(PipValueTable::FLAT),
            ..Config::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pip_profile, cfg.pip_profile);
    }
}
