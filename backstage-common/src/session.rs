//! Dashboard session: the single owner of store state and settings
//!
//! A session hydrates once from persistence, then mirrors every change back.
//! Syncs run behind a busy flag; while one waits on the network the store
//! stays writable, and the result lands as a single state transition.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::model::{AccountType, IntegrationSettings, Settings};
use crate::persistence::{KeyValueStore, Persistence, DATA_KEY, SETTINGS_KEY};
use crate::store::{Action, DashboardPatch, DashboardState};
use crate::sync::{EventSource, SyncError};
use crate::time;

/// Who asked for a sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTrigger {
    /// Background refresh; silently skipped while unconfigured
    Implicit,
    /// User action; refused while unconfigured
    Explicit,
}

/// Result of a sync request that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Integration not configured, nothing fetched
    Skipped,
    /// External shows replaced with `shows` records
    Synced { shows: usize },
}

/// Connection details entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionDetails {
    pub token: String,
    pub project_id: String,
    pub account_type: AccountType,
    pub agency_id: String,
}

/// Clears the busy flag on every exit path
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Session<K, S> {
    persistence: Persistence<K>,
    source: S,
    state: RwLock<DashboardState>,
    settings: RwLock<Settings>,
    sync_error: RwLock<Option<String>>,
    syncing: AtomicBool,
    loaded: AtomicBool,
}

impl<K: KeyValueStore, S: EventSource> Session<K, S> {
    /// Session with default state; nothing is written until [`hydrate`](Self::hydrate)
    pub fn new(store: K, source: S) -> Self {
        Self {
            persistence: Persistence::new(store),
            source,
            state: RwLock::new(DashboardState::default()),
            settings: RwLock::new(Settings::default()),
            sync_error: RwLock::new(None),
            syncing: AtomicBool::new(false),
            loaded: AtomicBool::new(false),
        }
    }

    /// Create and hydrate in one step
    pub async fn open(store: K, source: S) -> Self {
        let session = Self::new(store, source);
        session.hydrate().await;
        session
    }

    /// Load both snapshots and open the write gate; later calls do nothing
    pub async fn hydrate(&self) {
        if self.loaded.load(Ordering::Acquire) {
            return;
        }

        if let Some(patch) = self.persistence.load::<DashboardPatch>(DATA_KEY) {
            let mut state = self.state.write().await;
            *state = std::mem::take(&mut *state).apply(Action::Load(patch));
            debug!(
                artists = state.artists.len(),
                shows = state.shows.len(),
                external = state.external_shows.len(),
                "Dashboard data restored"
            );
        }

        if let Some(settings) = self.persistence.load::<Settings>(SETTINGS_KEY) {
            *self.settings.write().await = settings;
        }

        self.loaded.store(true, Ordering::Release);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::Acquire)
    }

    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    pub async fn settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Message from the last failed sync, cleared by the next success
    pub async fn sync_error(&self) -> Option<String> {
        self.sync_error.read().await.clone()
    }

    /// Explicit sync is available only with a token and project id
    pub async fn can_sync(&self) -> bool {
        self.settings.read().await.integration.is_configured() && !self.is_syncing()
    }

    /// Apply one store action and persist the result
    pub async fn dispatch(&self, action: Action) {
        let snapshot = {
            let mut state = self.state.write().await;
            *state = std::mem::take(&mut *state).apply(action);
            state.clone()
        };
        self.persist_data(&snapshot);
    }

    /// Save connection details; leaves `connected` and `last_sync` alone
    pub async fn configure_integration(&self, details: ConnectionDetails) {
        self.update_integration(|integration| {
            integration.token = details.token;
            integration.project_id = details.project_id;
            integration.account_type = details.account_type;
            integration.agency_id = details.agency_id;
        })
        .await;
    }

    /// Forget the connection entirely; external shows stay until the next sync
    pub async fn disconnect(&self) {
        self.update_integration(|integration| *integration = IntegrationSettings::default())
            .await;
    }

    async fn update_integration<F>(&self, f: F)
    where
        F: FnOnce(&mut IntegrationSettings),
    {
        let snapshot = {
            let mut settings = self.settings.write().await;
            f(&mut settings.integration);
            settings.clone()
        };
        self.persist_settings(&snapshot);
    }

    /// Pull external shows and replace the external collection
    pub async fn sync(&self, trigger: SyncTrigger) -> Result<SyncOutcome, SyncError> {
        let integration = self.settings.read().await.integration.clone();
        if !integration.is_configured() {
            return match trigger {
                SyncTrigger::Implicit => Ok(SyncOutcome::Skipped),
                SyncTrigger::Explicit => Err(SyncError::NotConfigured),
            };
        }

        let Some(_busy) = BusyGuard::acquire(&self.syncing) else {
            return Err(SyncError::InProgress);
        };
        *self.sync_error.write().await = None;

        // No lock is held across the fetch
        match self.source.fetch_shows(&integration).await {
            Ok(shows) => {
                let count = shows.len();
                let (data, settings) = {
                    let mut state = self.state.write().await;
                    let mut settings = self.settings.write().await;
                    *state = std::mem::take(&mut *state).apply(Action::SetExternalShows(shows));
                    settings.integration.connected = true;
                    settings.integration.last_sync = Some(time::now());
                    (state.clone(), settings.clone())
                };
                self.persist_data(&data);
                self.persist_settings(&settings);

                info!(shows = count, "Booking sync complete");
                Ok(SyncOutcome::Synced { shows: count })
            }
            Err(e) => {
                warn!(error = %e, "Booking sync failed");
                *self.sync_error.write().await = Some(format!("Connection failed: {}", e));
                Err(e)
            }
        }
    }

    fn persist_data(&self, state: &DashboardState) {
        if self.is_loaded() {
            self.persistence.save(DATA_KEY, state);
        } else {
            debug!("Skipping data save before hydration");
        }
    }

    fn persist_settings(&self, settings: &Settings) {
        if self.is_loaded() {
            self.persistence.save(SETTINGS_KEY, settings);
        } else {
            debug!("Skipping settings save before hydration");
        }
    }
}
