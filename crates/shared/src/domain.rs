use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DraftError;

/// Year a fresh draft starts with.
pub const DEFAULT_YEAR: i32 = 2024;

const UNTITLED: &str = "Untitled";
const UNKNOWN_YEAR_BADGE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub String);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A movie as held by the backend. Only records carrying a backend-assigned
/// id can be constructed, so anything in a list has an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub description: String,
    pub year: Option<i32>,
    pub streaming_id: Option<String>,
    pub image_url: Option<String>,
}

impl MovieRecord {
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            UNTITLED
        } else {
            title
        }
    }

    pub fn year_badge(&self) -> String {
        match self.year {
            Some(year) => year.to_string(),
            None => UNKNOWN_YEAR_BADGE.to_string(),
        }
    }

    /// The streaming identifier without surrounding whitespace, if the record
    /// carries a usable one.
    pub fn streaming_id(&self) -> Option<&str> {
        self.streaming_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Title,
    Description,
    Year,
    StreamingId,
}

impl DraftField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Year => "year",
            Self::StreamingId => "tmdbId",
        }
    }
}

impl FromStr for DraftField {
    type Err = DraftError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "year" => Ok(Self::Year),
            "tmdbId" | "tmdb_id" | "streamingId" | "streaming_id" => Ok(Self::StreamingId),
            other => Err(DraftError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which fields a form insists on before it will submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormVariant {
    /// Title only.
    #[default]
    Basic,
    /// Title and streaming id.
    Streaming,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub year: i32,
    pub streaming_id: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            year: DEFAULT_YEAR,
            streaming_id: String::new(),
        }
    }
}

impl Draft {
    /// Merges one raw input value into the draft. Streaming ids are stored
    /// trimmed. A year that does not parse as an integer leaves the previous
    /// year in place; the return value tells whether the input was accepted.
    pub fn apply(&mut self, field: DraftField, raw: &str) -> bool {
        match field {
            DraftField::Title => self.title = raw.to_string(),
            DraftField::Description => self.description = raw.to_string(),
            DraftField::StreamingId => self.streaming_id = raw.trim().to_string(),
            DraftField::Year => match raw.trim().parse::<i32>() {
                Ok(year) => self.year = year,
                Err(_) => return false,
            },
        }
        true
    }

    pub fn validate(&self, variant: FormVariant) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingTitle);
        }
        if variant == FormVariant::Streaming && self.streaming_id.trim().is_empty() {
            return Err(DraftError::MissingStreamingId);
        }
        Ok(())
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
