//! Dashboard records
//!
//! Plain serde records with string ids. JSON field names are camelCase so
//! snapshots stay readable by the web front end.

mod artist;
mod post;
mod release;
mod settings;
mod show;

pub use artist::{avatar_initial, Artist};
pub use post::{Platform, PostPatch, PostStatus, SocialPost};
pub use release::{Release, ReleaseStatus, ReleaseType};
pub use settings::{AccountType, IntegrationSettings, Settings};
pub use show::{ExternalShow, Show, ShowRef, ShowSource, ShowStatus};
