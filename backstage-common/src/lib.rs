//! # Backstage Common Library
//!
//! Shared code for the Backstage artist dashboard:
//! - Dashboard records (artists, releases, shows, posts, settings)
//! - Domain store and its reducer
//! - Best-effort snapshot persistence
//! - Booking-event sync client and normalization
//! - Session controller tying the above together
//! - Dashboard selectors
//! - Configuration loading

pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod persistence;
pub mod session;
pub mod store;
pub mod sync;
pub mod time;
pub mod views;

pub use error::{Error, Result};
pub use session::{ConnectionDetails, Session, SyncOutcome, SyncTrigger};
pub use store::{apply, Action, DashboardPatch, DashboardState};
