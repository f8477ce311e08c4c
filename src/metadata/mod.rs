//! Remote movie metadata lookup.

pub mod omdb;

use thiserror::Error;

use crate::domain::MovieDetails;

pub use omdb::OmdbClient;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("No API key configured")]
    MissingApiKey,
}

pub type MetadataResult<T> = Result<T, MetadataError>;

/// Provider of movie details keyed by title or provider id.
///
/// "Not found" is `Ok(None)` / an empty list; only transport or decoding
/// failures are errors.
pub trait MetadataClient: Send + Sync {
    fn find_by_title(&self, title: &str) -> MetadataResult<Option<MovieDetails>>;

    fn find_by_id(&self, id: &str) -> MetadataResult<Option<MovieDetails>>;

    fn search(&self, term: &str) -> MetadataResult<Vec<MovieDetails>>;
}
