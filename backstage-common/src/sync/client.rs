//! HTTP client for the booking-event proxy
//!
//! One GET per sync, no retry. The credential travels in a header so it never
//! shows up in logged query strings.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::normalize::{normalize_all, RemoteEvent};
use super::window::SyncWindow;
use super::{EventSource, SyncError, EVENTS_ROUTE, TOKEN_HEADER};
use crate::model::{ExternalShow, IntegrationSettings};
use crate::time;

const USER_AGENT: &str = concat!("Backstage/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Error body produced by the proxy
#[derive(Debug, Deserialize)]
struct ProxyErrorBody {
    error: Option<String>,
}

/// Sync client talking to the proxy endpoint
#[derive(Debug, Clone)]
pub struct HttpSyncClient {
    http_client: reqwest::Client,
    proxy_url: String,
}

impl HttpSyncClient {
    /// `proxy_url` is the proxy origin, e.g. `http://127.0.0.1:5790`
    pub fn new(proxy_url: impl Into<String>) -> Result<Self, SyncError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        Ok(Self {
            http_client,
            proxy_url: proxy_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn events_url(&self) -> String {
        format!("{}{}", self.proxy_url, EVENTS_ROUTE)
    }

    /// Fetch raw events for `window`
    ///
    /// Returns an empty list without touching the network when the token or
    /// project id is missing.
    pub async fn fetch_events(
        &self,
        settings: &IntegrationSettings,
        window: SyncWindow,
    ) -> Result<Vec<RemoteEvent>, SyncError> {
        if !settings.is_configured() {
            debug!("Booking integration not configured; skipping fetch");
            return Ok(Vec::new());
        }

        let mut query = vec![
            ("accountType", settings.account_type.as_str().to_string()),
            ("projectId", settings.project_id.clone()),
            ("from", window.from_param()),
            ("to", window.to_param()),
        ];
        if !settings.agency_id.is_empty() {
            query.push(("agencyId", settings.agency_id.clone()));
        }

        let url = self.events_url();
        debug!(url = %url, from = %window.from, to = %window.to, "Requesting booking events");

        let response = self
            .http_client
            .get(&url)
            .query(&query)
            .header(TOKEN_HEADER, &settings.token)
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ProxyErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(SyncError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SyncError::Decode(e.to_string()))?;

        let serde_json::Value::Array(items) = body else {
            warn!("Booking events response is not a list; treating as empty");
            return Ok(Vec::new());
        };

        // Field decoding is lenient, so only non-object items are lost here
        let events: Vec<RemoteEvent> = items
            .into_iter()
            .filter_map(|item| {
                if !item.is_object() {
                    warn!(item = %item, "Skipping booking event that is not an object");
                    return None;
                }
                match serde_json::from_value(item) {
                    Ok(event) => Some(event),
                    Err(e) => {
                        warn!(error = %e, "Skipping malformed booking event");
                        None
                    }
                }
            })
            .collect();

        info!(count = events.len(), "Fetched booking events");
        Ok(events)
    }

    /// Fetch the current window and normalize it
    pub async fn sync(
        &self,
        settings: &IntegrationSettings,
    ) -> Result<Vec<ExternalShow>, SyncError> {
        let events = self
            .fetch_events(settings, SyncWindow::around(time::today()))
            .await?;
        Ok(normalize_all(events))
    }
}

#[async_trait]
impl EventSource for HttpSyncClient {
    async fn fetch_shows(
        &self,
        settings: &IntegrationSettings,
    ) -> Result<Vec<ExternalShow>, SyncError> {
        self.sync(settings).await
    }
}
