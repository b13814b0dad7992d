use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::config::{Config, SessionTime};
use crate::models::BudgetSet;

/// Where the trading day stands at a given instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub utc: DateTime<Utc>,
    /// Wall-clock time in the display zone, `HH:MM`.
    pub local_time: String,
    /// Position of the local time across the day, 0..100.
    pub day_progress_pct: f64,
    pub active: Vec<String>,
    pub overlaps: Vec<(String, String)>,
    pub news_warning: bool,
}

impl SessionSnapshot {
    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|s| s == name)
    }

    pub fn is_overlap(&self) -> bool {
        !self.overlaps.is_empty()
    }
}

pub struct SessionClock {
    sessions: Vec<(String, SessionTime)>,
    display_tz: Tz,
}

impl SessionClock {
    pub fn new(cfg: &Config) -> Self {
        Self {
            sessions: cfg.sessions.clone(),
            display_tz: cfg.display_tz(),
        }
    }

    pub fn snapshot(&self, utc_now: Option<DateTime<Utc>>, budget: &BudgetSet) -> SessionSnapshot {
        let utc_now = utc_now.unwrap_or_else(Utc::now);
        let current = utc_now.hour() * 60 + utc_now.minute();

        let active: Vec<String> = self
            .sessions
            .iter()
            .filter(|(_, times)| times.contains(current))
            .map(|(name, _)| name.clone())
            .collect();

        let mut overlaps = Vec::new();
        for (i, a) in active.iter().enumerate() {
            for b in &active[i + 1..] {
                overlaps.push((a.clone(), b.clone()));
            }
        }

        let local = utc_now.with_timezone(&self.display_tz);
        let local_minutes = local.hour() * 60 + local.minute();

        SessionSnapshot {
            utc: utc_now,
            local_time: local.format("%H:%M").to_string(),
            day_progress_pct: local_minutes as f64 / (24.0 * 60.0) * 100.0,
            active,
            overlaps,
            news_warning: budget.has_news_risk(),
        }
    }
}

impl SessionTime {
    fn contains(&self, minute_of_day: u32) -> bool {
        let start_min = self.start.0 * 60 + self.start.1;
        let end_min = self.end.0 * 60 + self.end.1;
        if start_min < end_min {
            minute_of_day >= start_min && minute_of_day < end_min
        } else {
            // Wraps midnight
            minute_of_day >= start_min || minute_of_day < end_min
        }
    }
}
