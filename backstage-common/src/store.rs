//! Domain store: dashboard collections and the reducer that changes them
//!
//! State changes only through [`apply`], a pure and total function of the
//! current state and one [`Action`]. No action validates field shape or
//! artist references; callers (forms, CLI) own validation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::model::{Artist, ExternalShow, PostPatch, Release, Show, SocialPost};

/// Every collection the dashboard tracks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardState {
    pub artists: Vec<Artist>,
    pub releases: Vec<Release>,
    pub shows: Vec<Show>,
    pub social_posts: Vec<SocialPost>,
    pub external_shows: Vec<ExternalShow>,
}

/// Partial snapshot used to hydrate the store
///
/// Each present collection replaces the current one wholesale; absent
/// collections are left as they are. Reading a snapshot drops individual
/// records it cannot decode and keeps the rest; a collection that is not a
/// list counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardPatch {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "records")]
    pub artists: Option<Vec<Artist>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "records")]
    pub releases: Option<Vec<Release>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "records")]
    pub shows: Option<Vec<Show>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "records")]
    pub social_posts: Option<Vec<SocialPost>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "records")]
    pub external_shows: Option<Vec<ExternalShow>>,
}

fn records<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(None),
        other => {
            warn!(found = %other, "Stored collection is not a list; ignoring it");
            return Ok(None);
        }
    };

    let records = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "Dropping unreadable stored record");
                None
            }
        })
        .collect();
    Ok(Some(records))
}

impl From<DashboardState> for DashboardPatch {
    fn from(state: DashboardState) -> Self {
        Self {
            artists: Some(state.artists),
            releases: Some(state.releases),
            shows: Some(state.shows),
            social_posts: Some(state.social_posts),
            external_shows: Some(state.external_shows),
        }
    }
}

/// Mutations accepted by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Shallow-merge a persisted snapshot over the current state
    Load(DashboardPatch),
    AddArtist(Artist),
    AddRelease(Release),
    AddShow(Show),
    AddPost(SocialPost),
    /// Merge fields into the post with `id`; no-op for an unknown id
    UpdatePost { id: String, patch: PostPatch },
    /// Replace every external show with the latest sync result
    SetExternalShows(Vec<ExternalShow>),
}

impl DashboardState {
    /// Apply one action and return the next state
    pub fn apply(mut self, action: Action) -> Self {
        match action {
            Action::Load(patch) => {
                if let Some(artists) = patch.artists {
                    self.artists = artists;
                }
                if let Some(releases) = patch.releases {
                    self.releases = releases;
                }
                if let Some(shows) = patch.shows {
                    self.shows = shows;
                }
                if let Some(posts) = patch.social_posts {
                    self.social_posts = posts;
                }
                if let Some(external) = patch.external_shows {
                    self.external_shows = external;
                }
            }
            Action::AddArtist(artist) => self.artists.push(artist),
            Action::AddRelease(release) => self.releases.push(release),
            Action::AddShow(show) => self.shows.push(show),
            Action::AddPost(post) => self.social_posts.push(post),
            Action::UpdatePost { id, patch } => {
                if let Some(post) = self.social_posts.iter_mut().find(|p| p.id == id) {
                    patch.apply_to(post);
                }
            }
            Action::SetExternalShows(shows) => self.external_shows = shows,
        }
        self
    }

    pub fn artist(&self, id: &str) -> Option<&Artist> {
        self.artists.iter().find(|a| a.id == id)
    }

    pub fn release(&self, id: &str) -> Option<&Release> {
        self.releases.iter().find(|r| r.id == id)
    }

    pub fn show(&self, id: &str) -> Option<&Show> {
        self.shows.iter().find(|s| s.id == id)
    }

    pub fn post(&self, id: &str) -> Option<&SocialPost> {
        self.social_posts.iter().find(|p| p.id == id)
    }
}

/// Reducer entry point: `apply(state, action) -> state'`
pub fn apply(state: DashboardState, action: Action) -> DashboardState {
    state.apply(action)
}
