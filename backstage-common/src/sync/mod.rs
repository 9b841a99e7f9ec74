//! External sync: pulling booking events into the dashboard
//!
//! [`HttpSyncClient`] asks the proxy for a fixed [`SyncWindow`] of events and
//! [`normalize`] maps each one into an [`ExternalShow`](crate::model::ExternalShow).
//! The session talks to any [`EventSource`], which keeps it testable without
//! a network.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::model::{ExternalShow, IntegrationSettings};

mod client;
pub mod normalize;
mod window;

pub use client::HttpSyncClient;
pub use normalize::{normalize, normalize_all, RemoteEvent, RemoteId, RemoteLocation};
pub use window::SyncWindow;

/// Proxy route serving booking events
pub const EVENTS_ROUTE: &str = "/api/aboss";

/// Header carrying the booking-API credential to the proxy
pub const TOKEN_HEADER: &str = "x-aboss-token";

/// Sync failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Token or project id missing on an explicit sync
    #[error("token and project id are required")]
    NotConfigured,

    /// Another sync has not finished yet
    #[error("a sync is already running")]
    InProgress,

    /// Proxy unreachable or the connection broke
    #[error("{0}")]
    Transport(String),

    /// Proxy answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Success response that was not JSON
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Anything that can produce the current set of external shows
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_shows(
        &self,
        settings: &IntegrationSettings,
    ) -> Result<Vec<ExternalShow>, SyncError>;
}

#[async_trait]
impl<T: EventSource + ?Sized> EventSource for Arc<T> {
    async fn fetch_shows(
        &self,
        settings: &IntegrationSettings,
    ) -> Result<Vec<ExternalShow>, SyncError> {
        (**self).fetch_shows(settings).await
    }
}
