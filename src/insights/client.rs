use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::InsightConfig;
use crate::errors::{PlannerError, Result};
use crate::insights::request::InsightRequest;
use crate::insights::InsightService;

/// JSON-over-HTTP recommendation service.
///
/// POSTs the request body as-is and hands the decoded JSON back for
/// validation. Failures are reported, never retried.
pub struct HttpInsightClient {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HttpInsightClient {
    pub fn new(cfg: &InsightConfig) -> Result<Self> {
        let url = cfg.url.clone().ok_or(PlannerError::InsightServiceDisabled)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| PlannerError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url,
            api_key: cfg.api_key.clone(),
        })
    }
}

#[async_trait]
impl InsightService for HttpInsightClient {
    async fn recommend(&self, request: &InsightRequest) -> Result<Value> {
        debug!(
            "POST {} ({} pairs, top {})",
            self.url,
            request.pairs.len(),
            request.top_n
        );

        let mut req = self.client.post(&self.url).json(request);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PlannerError::InsightService {
                reason: format!("HTTP {}: {}", status, body),
            });
        }

        Ok(resp.json::<Value>().await?)
    }
}
