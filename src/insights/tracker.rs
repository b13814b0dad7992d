use tracing::{debug, info, warn};

use crate::errors::PlannerError;
use crate::models::Recommendation;

/// Identifies one insight request. Only the most recently issued ticket may
/// publish results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// What happened to a completed request.
#[derive(Debug)]
pub enum Completion {
    /// Recommendations replaced the previous set.
    Applied(usize),
    /// The request failed; previous recommendations are untouched.
    Failed(PlannerError),
    /// A newer request was issued meanwhile; the result was discarded.
    Stale,
}

/// Cancel-by-replacement bookkeeping for the insight call.
#[derive(Debug, Default)]
pub struct InsightTracker {
    issued: u64,
    in_flight: Option<Ticket>,
}

impl InsightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding any still in flight.
    pub fn begin(&mut self) -> Ticket {
        if let Some(prev) = self.in_flight {
            debug!("Insight request {} superseded", prev.id());
        }
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.in_flight = Some(ticket);
        ticket
    }

    pub fn in_flight(&self) -> Option<Ticket> {
        self.in_flight
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Publish the outcome of `ticket` into `target` if it is still current.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<Recommendation>, PlannerError>,
        target: &mut Option<Vec<Recommendation>>,
    ) -> Completion {
        if self.in_flight != Some(ticket) {
            debug!("Discarding stale insight result for request {}", ticket.id());
            return Completion::Stale;
        }
        self.in_flight = None;

        match outcome {
            Ok(recs) => {
                info!("Insight request {} returned {} recommendations", ticket.id(), recs.len());
                let n = recs.len();
                *target = Some(recs);
                Completion::Applied(n)
            }
            Err(e) => {
                warn!("Insight request {} failed: {}", ticket.id(), e);
                Completion::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Action;

    fn rec(pair: &str) -> Recommendation {
        Recommendation {
            pair: pair.to_string(),
            action: Action::Buy,
            reasoning: "test".to_string(),
            confidence: 5.0,
        }
    }

    #[test]
    fn latest_request_applies() {
        let mut tracker = InsightTracker::new();
        let mut recs = None;
        let t = tracker.begin();
        assert!(tracker.is_loading());
        let c = tracker.complete(t, Ok(vec![rec("EURUSD")]), &mut recs);
        assert!(matches!(c, Completion::Applied(1)));
        assert!(!tracker.is_loading());
        assert_eq!(recs.unwrap()[0].pair, "EURUSD");
    }

    #[test]
    fn superseded_request_is_stale() {
        let mut tracker = InsightTracker::new();
        let mut recs = None;
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(second > first);

        let c = tracker.complete(second, Ok(vec![rec("GBPUSD")]), &mut recs);
        assert!(matches!(c, Completion::Applied(_)));

        // The older response arrives late and must not overwrite.
        let c = tracker.complete(first, Ok(vec![rec("EURUSD")]), &mut recs);
        assert!(matches!(c, Completion::Stale));
        assert_eq!(recs.as_ref().unwrap()[0].pair, "GBPUSD");
    }

    #[test]
    fn stale_before_newer_completes() {
        let mut tracker = InsightTracker::new();
        let mut recs = None;
        let first = tracker.begin();
        let second = tracker.begin();
        let c = tracker.complete(first, Ok(vec![rec("EURUSD")]), &mut recs);
        assert!(matches!(c, Completion::Stale));
        assert!(recs.is_none());
        assert_eq!(tracker.in_flight(), Some(second));
    }

    #[test]
    fn failure_keeps_previous_recommendations() {
        let mut tracker = InsightTracker::new();
        let mut recs = Some(vec![rec("AUDUSD")]);
        let t = tracker.begin();
        let c = tracker.complete(
            t,
            Err(PlannerError::InsightService {
                reason: "timeout".into(),
            }),
            &mut recs,
        );
        assert!(matches!(c, Completion::Failed(_)));
        assert_eq!(recs.unwrap()[0].pair, "AUDUSD");
    }

    #[test]
    fn completing_twice_is_stale() {
        let mut tracker = InsightTracker::new();
        let mut recs = None;
        let t = tracker.begin();
        tracker.complete(t, Ok(vec![]), &mut recs);
        let c = tracker.complete(t, Ok(vec![rec("EURUSD")]), &mut recs);
        assert!(matches!(c, Completion::Stale));
        assert_eq!(recs.unwrap().len(), 0);
    }
}
