#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

use fx_trade_planner::errors::{PlannerError, Result};
use fx_trade_planner::insights::{InsightRequest, InsightService};
use fx_trade_planner::models::{CorrelationSet, Currency};

/// Readings that produce both BUY and SELL pairs under the narrow profile.
pub fn sample_correlations() -> CorrelationSet {
    let mut set = CorrelationSet::new();
    for (currency, d1, h4, h1) in [
        (Currency::Eur, 3.0, 2.0, 2.0),
        (Currency::Usd, -2.0, -1.0, -1.0),
        (Currency::Jpy, -1.0, -1.0, -1.0),
        (Currency::Gbp, 1.0, 1.0, 0.0),
        (Currency::Cad, -2.0, -2.0, -1.0),
        (Currency::Gold, 2.0, 1.0, 1.0),
    ] {
        set.set_all(currency, d1, h4, h1).unwrap();
    }
    set
}

/// Scripted insight service.
pub enum MockInsightService {
    /// Echo the first `top_n` requested pairs back with their bias as action.
    Echo,
    /// Return this body verbatim.
    Fixed(Value),
    /// Fail as a network error would.
    Down,
}

#[async_trait]
impl InsightService for MockInsightService {
    async fn recommend(&self, request: &InsightRequest) -> Result<Value> {
        match self {
            MockInsightService::Echo => Ok(Value::Array(
                request
                    .pairs
                    .iter()
                    .take(request.top_n)
                    .map(|p| {
                        let action = p.bias.to_action().map_or("HOLD", |a| a.as_str());
                        json!({
                            "pair": p.pair,
                            "action": action,
                            "reasoning": format!("{} bias", p.bias),
                            "confidence": p.confidence,
                        })
                    })
                    .collect(),
            )),
            MockInsightService::Fixed(body) => Ok(body.clone()),
            MockInsightService::Down => Err(PlannerError::InsightService {
                reason: "connection refused".to_string(),
            }),
        }
    }
}

/// Counts calls, for asserting that nothing is retried.
pub struct CountingService<S> {
    pub inner: S,
    pub calls: AtomicUsize,
}

impl<S> CountingService<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<S: InsightService> InsightService for CountingService<S> {
    async fn recommend(&self, request: &InsightRequest) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.recommend(request).await
    }
}
