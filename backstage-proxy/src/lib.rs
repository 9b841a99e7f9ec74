//! backstage-proxy library - booking API forwarding service
//!
//! Keeps the booking API credential off the public network path: the
//! dashboard calls `/api/aboss` here and this service talks to the upstream.

use axum::Router;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod upstream;

pub use error::ProxyError;
pub use upstream::DEFAULT_UPSTREAM_URL;

const USER_AGENT: &str = concat!("backstage-proxy/", env!("CARGO_PKG_VERSION"));
const UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Outbound client; connection pool shared by all requests
    pub http_client: reqwest::Client,
    /// Booking API base, e.g. `https://data.a-boss.net/v1`
    pub upstream_url: String,
}

impl AppState {
    /// Create new application state
    pub fn new(upstream_url: impl Into<String>) -> Result<Self, ProxyError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            upstream_url: upstream_url.into(),
        })
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;
    use backstage_common::sync::EVENTS_ROUTE;

    Router::new()
        .route(EVENTS_ROUTE, get(api::get_public_events))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
