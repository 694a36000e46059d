use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::domain::MovieRecord;
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

use crate::{error::StoreError, remote_store::RemoteStore};

/// What the list area shows. The collection only exists once a fetch has
/// completed, and a populated list is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Loading,
    Populated(Vec<MovieRecord>),
    Empty,
}

impl SyncState {
    fn from_records(records: Vec<MovieRecord>) -> Self {
        if records.is_empty() {
            Self::Empty
        } else {
            Self::Populated(records)
        }
    }

    pub fn records(&self) -> &[MovieRecord] {
        match self {
            Self::Populated(records) => records,
            Self::Loading | Self::Empty => &[],
        }
    }
}

#[derive(Debug, Clone)]
pub enum SyncEvent {
    StateChanged(SyncState),
    RefreshFailed(String),
}

struct ListSyncState {
    state: SyncState,
    last_synced_at: Option<DateTime<Utc>>,
}

pub struct ListSyncController {
    store: Arc<dyn RemoteStore>,
    inner: Mutex<ListSyncState>,
    events: broadcast::Sender<SyncEvent>,
}

impl ListSyncController {
    pub fn new(store: Arc<dyn RemoteStore>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            store,
            inner: Mutex::new(ListSyncState {
                state: SyncState::Loading,
                last_synced_at: None,
            }),
            events,
        })
    }

    /// Initial load when the list first comes on screen.
    pub async fn mount(&self) -> Result<SyncState, StoreError> {
        info!("movies: mounting list");
        self.refresh().await
    }

    /// Replaces the held collection with whatever the backend returns. On
    /// failure the previous state stays as it was, including `Loading`.
    pub async fn refresh(&self) -> Result<SyncState, StoreError> {
        let records = match self.store.list_movies().await {
            Ok(records) => records,
            Err(err) => {
                warn!("movies: refresh failed: {err}");
                let _ = self.events.send(SyncEvent::RefreshFailed(err.to_string()));
                return Err(err);
            }
        };

        let count = records.len();
        let state = SyncState::from_records(records);
        {
            let mut inner = self.inner.lock().await;
            inner.state = state.clone();
            inner.last_synced_at = Some(Utc::now());
        }
        info!(count, "movies: list synchronized");
        let _ = self.events.send(SyncEvent::StateChanged(state.clone()));
        Ok(state)
    }

    pub async fn on_external_create_succeeded(&self) -> Result<SyncState, StoreError> {
        self.refresh().await
    }

    pub async fn state(&self) -> SyncState {
        self.inner.lock().await.state.clone()
    }

    pub async fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.inner.lock().await.last_synced_at
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/list_sync_tests.rs"]
mod tests;
