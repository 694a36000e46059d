//! Client-side synchronization between the movie list on screen and the
//! remote movies backend.

pub mod error;
pub mod form;
pub mod list_sync;
pub mod remote_store;
pub mod view;

pub use error::{EmbedError, StoreError, SubmitError};
pub use form::{DraftPhase, FormController};
pub use list_sync::{ListSyncController, SyncEvent, SyncState};
pub use remote_store::{HttpRemoteStore, RemoteStore, DEFAULT_API_URL};
pub use view::{EmbedTemplate, ListView, MovieCard, DEFAULT_EMBED_BASE_URL};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
