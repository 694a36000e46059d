//! Display-ready projection of the list state.

use shared::domain::{MovieId, MovieRecord};
use url::Url;

use crate::{error::EmbedError, list_sync::SyncState};

pub const DEFAULT_EMBED_BASE_URL: &str = "https://vidsrc.xyz";
pub const LOADING_MESSAGE: &str = "Loading movies...";
pub const EMPTY_MESSAGE: &str = "No movies yet.";

/// Builds `<base>/movie/<streaming id>` player addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedTemplate {
    base: Url,
}

impl EmbedTemplate {
    pub fn new(base: Url) -> Result<Self, EmbedError> {
        if base.cannot_be_a_base() {
            return Err(EmbedError::NotABase(base.to_string()));
        }
        Ok(Self { base })
    }

    pub fn parse(base: &str) -> Result<Self, EmbedError> {
        Self::new(Url::parse(base)?)
    }

    pub fn player_url(&self, streaming_id: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("movie").push(streaming_id);
        }
        url
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    pub id: MovieId,
    pub title: String,
    pub description: Option<String>,
    pub year_badge: String,
    pub poster_url: Option<String>,
    pub player_url: Option<Url>,
}

impl MovieCard {
    pub fn from_record(record: &MovieRecord, embed: &EmbedTemplate) -> Self {
        let description = record.description.trim();
        Self {
            id: record.id.clone(),
            title: record.display_title().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            year_badge: record.year_badge(),
            poster_url: record.image_url.clone().filter(|url| !url.trim().is_empty()),
            player_url: record.streaming_id().map(|id| embed.player_url(id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Empty,
    Movies(Vec<MovieCard>),
}

impl ListView {
    pub fn from_state(state: &SyncState, embed: &EmbedTemplate) -> Self {
        match state {
            SyncState::Loading => Self::Loading,
            SyncState::Empty => Self::Empty,
            SyncState::Populated(records) => Self::Movies(
                records
                    .iter()
                    .map(|record| MovieCard::from_record(record, embed))
                    .collect(),
            ),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn status_message(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some(LOADING_MESSAGE),
            Self::Empty => Some(EMPTY_MESSAGE),
            Self::Movies(_) => None,
        }
    }
}
