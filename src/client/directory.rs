//! Directory API client implementation

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use tokio::sync::Mutex;

use super::ApiRead;
use super::rate_limit::{MIN_REQUEST_INTERVAL, Pacing, THROTTLE_STEP};
use crate::error::{ApiError, Result};

/// Header carrying the static API credential
const API_KEY_HEADER: &str = "x-api-key";

/// Attempts per logical request, the first one included
pub const MAX_ATTEMPTS: u32 = 5;

/// Rate-limited client for the directory API.
///
/// Issues single authenticated GET requests, self-throttling against the
/// API's fixed request cadence and its overload signal (HTTP 403). Pacing
/// state is shared across all calls on one instance, so behavior is
/// order-dependent: an overload observed during one call slows down the
/// first attempt of the next.
pub struct DirectoryClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
    pacing: Mutex<Pacing>,
}

impl DirectoryClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            pacing: Mutex::new(Pacing::new(MIN_REQUEST_INTERVAL, THROTTLE_STEP)),
        })
    }

    /// Shrink the pacing intervals so unit tests stay fast.
    #[cfg(test)]
    pub fn with_intervals(mut self, min_interval: Duration, throttle_step: Duration) -> Self {
        self.pacing = Mutex::new(Pacing::new(min_interval, throttle_step));
        self
    }

    /// GET `path` with `query`, retrying transient failures.
    ///
    /// A 200 stops the loop and clears the throttle; a 403 marks the API
    /// overloaded and retries under backoff; anything else (including
    /// transport errors) retries without touching the throttle. After
    /// `MAX_ATTEMPTS` the call fails carrying the last body observed.
    pub async fn read(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut pacing = self.pacing.lock().await;
        let mut last_body: Option<String> = None;

        for attempt in 1..=MAX_ATTEMPTS {
            pacing.wait_turn(attempt).await;

            debug!("GET {url} (attempt {attempt}/{MAX_ATTEMPTS})");
            let outcome = self
                .http
                .get(&url)
                .query(query)
                .header(API_KEY_HEADER, &self.api_key)
                .send()
                .await;
            pacing.record_sent();

            match outcome {
                Ok(response) => match response.status() {
                    StatusCode::OK => {
                        pacing.on_success();
                        let text = response.text().await.map_err(ApiError::from)?;
                        return serde_json::from_str(&text).map_err(|e| {
                            ApiError::InvalidResponse(format!("{e} in body: {text}")).into()
                        });
                    }
                    StatusCode::FORBIDDEN => {
                        warn!("API rate limit reached, throttling; request will be retried");
                        pacing.on_overload();
                        last_body = response.text().await.ok();
                    }
                    status => {
                        last_body = response.text().await.ok();
                        if attempt < MAX_ATTEMPTS {
                            warn!("API gave unexpected return ({status}); request will be retried");
                        } else {
                            warn!("API gave unexpected return ({status})");
                        }
                    }
                },
                Err(err) => {
                    warn!("API request failed: {err}");
                }
            }
        }

        Err(ApiError::RetriesExhausted { body: last_body }.into())
    }

    #[cfg(test)]
    pub(crate) async fn is_throttled(&self) -> bool {
        self.pacing.lock().await.is_throttled()
    }
}

#[async_trait]
impl ApiRead for DirectoryClient {
    async fn read(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        DirectoryClient::read(self, path, query).await
    }
}
