use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sysmon_core::config::{LATEST_PATH, METRICS_PATH};
use sysmon_core::{LatestSample, MetricsSummary, PollerConfig};
use tracing::{debug, instrument};

use crate::FetchError;

/// Where the poller reads its samples from
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn fetch_latest(&self) -> Result<LatestSample, FetchError>;

    async fn fetch_metrics(&self) -> Result<MetricsSummary, FetchError>;
}

/// Reads the two dashboard endpoints over HTTP
#[derive(Debug, Clone)]
pub struct HttpMetricsSource {
    latest_url: String,
    metrics_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpMetricsSource {
    pub fn new(config: &PollerConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            latest_url: config.endpoint(LATEST_PATH),
            metrics_url: config.endpoint(METRICS_PATH),
            timeout: config.request_timeout(),
            client,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let resp = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout)
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                endpoint: url.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        debug!(bytes = body.len(), "Received response body");

        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MetricsSource for HttpMetricsSource {
    #[instrument(skip(self), fields(url = %self.latest_url))]
    async fn fetch_latest(&self) -> Result<LatestSample, FetchError> {
        self.get_json(&self.latest_url).await
    }

    #[instrument(skip(self), fields(url = %self.metrics_url))]
    async fn fetch_metrics(&self) -> Result<MetricsSummary, FetchError> {
        self.get_json(&self.metrics_url).await
    }
}
