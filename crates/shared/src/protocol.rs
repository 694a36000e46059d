use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Draft, MovieId, MovieRecord};

/// One element of the `GET /api/movies` response array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDocument {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub tmdb_id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl MovieDocument {
    /// Documents without a backend id are not records yet and yield `None`.
    pub fn into_record(self) -> Option<MovieRecord> {
        let id = self.id.filter(|id| !id.is_empty())?;
        Some(MovieRecord {
            id: MovieId(id),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            year: self.year,
            streaming_id: self.tmdb_id,
            image_url: self.image_url,
        })
    }
}

/// Body of `POST /api/movies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    pub title: String,
    pub description: String,
    pub year: i32,
    pub tmdb_id: String,
}

impl From<&Draft> for CreateMovieRequest {
    fn from(draft: &Draft) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            year: draft.year,
            tmdb_id: draft.streaming_id.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearRepr {
    Int(i64),
    Float(f64),
    Text(String),
}

// Years arrive as integers, whole floats, numeric strings or null.
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<YearRepr>::deserialize(deserializer)?;
    Ok(repr.and_then(|repr| match repr {
        YearRepr::Int(value) => i32::try_from(value).ok(),
        YearRepr::Float(value) if value.is_finite() && value.fract() == 0.0 => {
            i32::try_from(value as i64).ok()
        }
        YearRepr::Float(_) => None,
        YearRepr::Text(text) => text.trim().parse().ok(),
    }))
}
