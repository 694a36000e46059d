use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{Draft, MovieRecord},
    protocol::{CreateMovieRequest, MovieDocument},
};
use tracing::{debug, warn};
use url::Url;

use crate::error::StoreError;

/// Collection endpoint of the hosted movies backend.
pub const DEFAULT_API_URL: &str = "https://movies-backend-api-t1sz.onrender.com/api/movies";

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Full collection in backend order.
    async fn list_movies(&self) -> Result<Vec<MovieRecord>, StoreError>;
    async fn create_movie(&self, draft: &Draft) -> Result<(), StoreError>;
}

pub struct HttpRemoteStore {
    http: Client,
    endpoint: Url,
}

impl HttpRemoteStore {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    pub fn parse(endpoint: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(endpoint)?))
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn list_movies(&self) -> Result<Vec<MovieRecord>, StoreError> {
        let documents: Vec<MovieDocument> = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|err| StoreError::Transport(err.to_string()))?
            .json()
            .await
            .map_err(|err| StoreError::Transport(format!("unreadable movie list: {err}")))?;

        let total = documents.len();
        let records: Vec<MovieRecord> = documents
            .into_iter()
            .filter_map(MovieDocument::into_record)
            .collect();
        if records.len() != total {
            warn!(
                "movies: dropped {} document(s) without _id from list response",
                total - records.len()
            );
        }
        debug!(count = records.len(), endpoint = %self.endpoint, "movies: list fetched");
        Ok(records)
    }

    async fn create_movie(&self, draft: &Draft) -> Result<(), StoreError> {
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(&CreateMovieRequest::from(draft))
            .send()
            .await
            .map_err(|err| StoreError::CreateRejected {
                status: None,
                reason: err.to_string(),
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(StoreError::CreateRejected {
                status: Some(status.as_u16()),
                reason: format!("backend answered {status}"),
            });
        }
        debug!(status = status.as_u16(), "movies: create accepted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/remote_store_tests.rs"]
mod tests;
