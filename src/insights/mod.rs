pub mod client;
pub mod request;
pub mod response;
pub mod tracker;

pub use client::HttpInsightClient;
pub use request::{build_request, InsightRequest, PairSignal};
pub use response::validate_response;
pub use tracker::{Completion, InsightTracker, Ticket};

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::Result;
use crate::models::Recommendation;

/// Anything that can turn a set of pair signals into recommendations:
/// an LLM endpoint, a rule engine, a canned fixture.
#[async_trait]
pub trait InsightService: Send + Sync {
    /// Return the raw, unvalidated response body.
    async fn recommend(&self, request: &InsightRequest) -> Result<Value>;
}

/// Call the service once and validate what comes back. Yields exactly one of
/// a full typed batch or an error.
pub async fn fetch_recommendations(
    service: &dyn InsightService,
    request: &InsightRequest,
) -> Result<Vec<Recommendation>> {
    let raw = service.recommend(request).await?;
    Ok(validate_response(&raw, request.expected_len())?)
}
