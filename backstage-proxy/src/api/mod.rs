//! HTTP API handlers for backstage-proxy

pub mod events;
pub mod health;

pub use events::get_public_events;
pub use health::health_routes;
