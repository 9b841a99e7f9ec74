//! Public-events forwarding endpoint
//!
//! GET /api/aboss attaches the caller's credential as a bearer token and
//! relays the booking API's answer. No retry, no caching.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use backstage_common::model::AccountType;
use backstage_common::sync::TOKEN_HEADER;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ProxyError;
use crate::upstream::EventsRequest;
use crate::AppState;

/// Query parameters for GET /api/aboss
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    pub account_type: Option<String>,
    pub project_id: Option<String>,
    pub agency_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Empty strings count as absent
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl EventsQuery {
    /// Combine with the token header; fails when either required input is missing
    pub fn into_request(self, token: Option<String>) -> Result<EventsRequest, ProxyError> {
        let (Some(token), Some(project_id)) = (present(token), present(self.project_id)) else {
            return Err(ProxyError::MissingInput);
        };

        let account_type = present(self.account_type)
            .and_then(|t| t.parse::<AccountType>().ok())
            .unwrap_or_default();

        Ok(EventsRequest {
            token,
            account_type,
            project_id,
            agency_id: present(self.agency_id),
            from: present(self.from),
            to: present(self.to),
        })
    }
}

/// GET /api/aboss
pub async fn get_public_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Value>, ProxyError> {
    let token = headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let request = query.into_request(token)?;

    let url = request.url(&state.upstream_url)?;
    debug!(url = %url, account_type = %request.account_type, "Forwarding public events request");

    let response = state
        .http_client
        .get(url)
        .bearer_auth(&request.token)
        .send()
        .await
        .map_err(|e| {
            warn!("Booking API unreachable: {}", e);
            ProxyError::from(e)
        })?;

    let status = response.status().as_u16();
    if !response.status().is_success() {
        warn!(status, "Booking API rejected request");
        let body = response.text().await.map_err(|e| {
            warn!("Booking API error body unreadable: {}", e);
            ProxyError::from(e)
        })?;
        return Err(ProxyError::Upstream {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            body,
        });
    }

    let data: Value = response.json().await?;
    Ok(Json(data))
}
