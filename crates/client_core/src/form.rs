use std::sync::Arc;

use shared::domain::{Draft, DraftField, FormVariant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{error::SubmitError, list_sync::ListSyncController, remote_store::RemoteStore};

/// Observational only; nothing is guarded on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPhase {
    Default,
    Editing,
}

struct FormState {
    draft: Draft,
    touched: bool,
}

pub struct FormController {
    store: Arc<dyn RemoteStore>,
    list: Arc<ListSyncController>,
    variant: FormVariant,
    inner: Mutex<FormState>,
}

impl FormController {
    pub fn new(store: Arc<dyn RemoteStore>, list: Arc<ListSyncController>) -> Self {
        Self::with_variant(store, list, FormVariant::Basic)
    }

    pub fn with_variant(
        store: Arc<dyn RemoteStore>,
        list: Arc<ListSyncController>,
        variant: FormVariant,
    ) -> Self {
        Self {
            store,
            list,
            variant,
            inner: Mutex::new(FormState {
                draft: Draft::default(),
                touched: false,
            }),
        }
    }

    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    /// Returns false when a year input was not a number and the old year was kept.
    pub async fn update_field(&self, field: DraftField, value: &str) -> bool {
        let mut inner = self.inner.lock().await;
        inner.touched = true;
        let accepted = inner.draft.apply(field, value);
        if !accepted {
            debug!(%field, value, year = inner.draft.year, "movies: ignored non-numeric year");
        }
        accepted
    }

    pub async fn draft(&self) -> Draft {
        self.inner.lock().await.draft.clone()
    }

    pub async fn phase(&self) -> DraftPhase {
        let inner = self.inner.lock().await;
        if inner.touched || !inner.draft.is_default() {
            DraftPhase::Editing
        } else {
            DraftPhase::Default
        }
    }

    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        inner.draft = Draft::default();
        inner.touched = false;
    }

    /// Creates the drafted movie, then clears the form and re-fetches the list.
    /// A rejected create leaves the draft exactly as it was so it can be retried.
    /// Edits made while the create is in flight are kept instead of cleared.
    /// A failed follow-up refresh is logged by the list controller and does not
    /// turn a successful create into an error.
    pub async fn submit(&self) -> Result<(), SubmitError> {
        let draft = self.draft().await;
        if let Err(err) = draft.validate(self.variant) {
            warn!("movies: submit blocked: {err}");
            return Err(err.into());
        }

        if let Err(err) = self.store.create_movie(&draft).await {
            warn!(
                status = ?err.rejected_status(),
                "movies: create failed, keeping draft: {err}"
            );
            return Err(SubmitError::Rejected(err));
        }

        info!(title = %draft.title, year = draft.year, "movies: created");
        {
            let mut inner = self.inner.lock().await;
            if inner.draft == draft {
                inner.draft = Draft::default();
                inner.touched = false;
            } else {
                info!("movies: draft edited while saving, keeping the newer edits");
            }
        }
        let _ = self.list.on_external_create_succeeded().await;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
