//! PostgREST client.
//!
//! - HTTP client tuning (pooling, timeouts)
//! - Exponential backoff with jitter
//! - Observability (tracing spans, metrics)

use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info_span, Instrument};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::metrics::record_request;
use crate::query::Query;
use crate::retry::{with_retry, with_retry_if};

/// Client for the store's REST interface.
#[derive(Clone)]
pub struct StoreClient {
    http: Client,
    config: StoreConfig,
    rest_url: String,
}

impl StoreClient {
    /// Create a new store client.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("talent-store/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StoreError::Network)?;

        let rest_url = format!("{}/rest/v1", config.url);

        Ok(Self {
            http,
            config,
            rest_url,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> StoreResult<Self> {
        Self::new(StoreConfig::from_env()?)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    /// Attach the project key as both `apikey` and bearer token.
    pub(crate) fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    // =========================================================================
    // CRUD Operations
    // =========================================================================

    /// Select rows matching `query`.
    pub async fn select<T: DeserializeOwned>(&self, table: &str, query: &Query) -> StoreResult<Vec<T>> {
        let url = self.table_url(table);

        self.execute_request("select", table, async {
            with_retry(&self.config.retry, "select", || async {
                let response = self
                    .authorized(self.http.get(&url))
                    .query(query.params())
                    .send()
                    .await?;
                Self::parse_rows(response, &url).await
            })
            .await
        })
        .await
    }

    /// First row matching `query`, if any.
    pub async fn select_one<T: DeserializeOwned>(&self, table: &str, query: &Query) -> StoreResult<Option<T>> {
        let query = query.clone().limit(1);
        let rows: Vec<T> = self.select(table, &query).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert one row and return it as stored.
    pub async fn insert<B, T>(&self, table: &str, body: &B) -> StoreResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.table_url(table);
        let body = serde_json::to_value(body)?;

        let rows: Vec<T> = self
            .execute_request("insert", table, async {
                let replay_safe = StoreError::is_safe_to_replay;
                with_retry_if(&self.config.retry, "insert", replay_safe, || async {
                    let response = self
                        .authorized(self.http.post(&url))
                        .header("Prefer", "return=representation")
                        .json(&body)
                        .send()
                        .await?;
                    Self::parse_rows(response, &url).await
                })
                .await
            })
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::InvalidResponse(format!("{table}: insert returned no row")))
    }

    /// Patch rows matching `query` and return them as stored.
    pub async fn update<B, T>(&self, table: &str, query: &Query, body: &B) -> StoreResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        if query.is_empty() {
            return Err(StoreError::BadRequest(format!(
                "{table}: refusing to update without a filter"
            )));
        }
        let url = self.table_url(table);
        let body = serde_json::to_value(body)?;

        self.execute_request("update", table, async {
            with_retry(&self.config.retry, "update", || async {
                let response = self
                    .authorized(self.http.patch(&url))
                    .header("Prefer", "return=representation")
                    .query(query.params())
                    .json(&body)
                    .send()
                    .await?;
                Self::parse_rows(response, &url).await
            })
            .await
        })
        .await
    }

    /// Delete rows matching `query`; returns how many were removed.
    pub async fn delete(&self, table: &str, query: &Query) -> StoreResult<usize> {
        if query.is_empty() {
            return Err(StoreError::BadRequest(format!(
                "{table}: refusing to delete without a filter"
            )));
        }
        let url = self.table_url(table);

        let rows: Vec<serde_json::Value> = self
            .execute_request("delete", table, async {
                with_retry(&self.config.retry, "delete", || async {
                    let response = self
                        .authorized(self.http.delete(&url))
                        .header("Prefer", "return=representation")
                        .query(query.params())
                        .send()
                        .await?;
                    Self::parse_rows(response, &url).await
                })
                .await
            })
            .await?;

        Ok(rows.len())
    }

    /// Check that the REST endpoint answers with the configured key.
    pub async fn health_check(&self) -> StoreResult<()> {
        let url = format!("{}/", self.rest_url);

        self.execute_request("health_check", "-", async {
            let response = self.authorized(self.http.get(&url)).send().await?;
            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                Err(Self::handle_error_response(status, &url, response).await)
            }
        })
        .await
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn parse_rows<T: DeserializeOwned>(response: Response, url: &str) -> StoreResult<Vec<T>> {
        let status = response.status();
        match status {
            StatusCode::OK | StatusCode::CREATED => Ok(response.json().await?),
            StatusCode::NO_CONTENT => Ok(Vec::new()),
            _ => Err(Self::handle_error_response(status, url, response).await),
        }
    }

    async fn execute_request<T, F>(&self, operation: &str, table: &str, fut: F) -> StoreResult<T>
    where
        F: std::future::Future<Output = StoreResult<T>>,
    {
        let span = info_span!("store_request", operation = %operation, table = %table);

        let start = Instant::now();
        let result = fut.instrument(span).await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.http_status().unwrap_or(500),
        };
        record_request(operation, table, status, latency_ms);
        debug!(operation, table, status, latency_ms, "Store request finished");

        result
    }

    pub(crate) async fn handle_error_response(status: StatusCode, url: &str, response: Response) -> StoreError {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let body = response.text().await.unwrap_or_default();

        match (status, retry_after) {
            (StatusCode::TOO_MANY_REQUESTS, Some(secs)) => StoreError::RateLimited(secs * 1000),
            _ => StoreError::from_http_status(status.as_u16(), format!("{} failed: {}", url, body)),
        }
    }
}

impl std::fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreClient")
            .field("rest_url", &self.rest_url)
            .finish()
    }
}
