use serde::Deserialize;
use tracing::{debug, warn};

use super::{MetadataClient, MetadataError, MetadataResult};
use crate::domain::MovieDetails;

pub const OMDB_API_URL: &str = "http://www.omdbapi.com/";

/// Blocking client for the OMDb HTTP API.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>) -> MetadataResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(MetadataError::MissingApiKey);
        }
        Ok(Self {
            client: reqwest::blocking::Client::new(),
            api_key,
            base_url: OMDB_API_URL.to_string(),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn fetch(&self, param: &str, value: &str) -> MetadataResult<String> {
        debug!(param, value, "querying OMDb");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), (param, value)])
            .send()?
            .error_for_status()?;
        Ok(response.text()?)
    }
}

impl MetadataClient for OmdbClient {
    fn find_by_title(&self, title: &str) -> MetadataResult<Option<MovieDetails>> {
        let body = self.fetch("t", title)?;
        decode_details(&body)
    }

    fn find_by_id(&self, id: &str) -> MetadataResult<Option<MovieDetails>> {
        let body = self.fetch("i", id)?;
        decode_details(&body)
    }

    fn search(&self, term: &str) -> MetadataResult<Vec<MovieDetails>> {
        let body = self.fetch("s", term)?;
        let mut results = Vec::new();
        for id in decode_search_ids(&body)? {
            match self.find_by_id(&id) {
                Ok(Some(details)) => results.push(details),
                Ok(None) => {}
                Err(err) => warn!(%id, error = %err, "skipping search hit"),
            }
        }
        Ok(results)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DetailPayload {
    response: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    year: String,
    #[serde(default, rename = "imdbRating")]
    imdb_rating: String,
    #[serde(default)]
    poster: String,
    #[serde(default)]
    plot: String,
    #[serde(default)]
    director: String,
    #[serde(default)]
    actors: String,
    #[serde(default)]
    genre: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchPayload {
    response: String,
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default, rename = "imdbID")]
    imdb_id: String,
}

/// Decodes a title/id lookup body. `Response: "False"` means not found.
pub fn decode_details(body: &str) -> MetadataResult<Option<MovieDetails>> {
    let payload: DetailPayload = serde_json::from_str(body)
        .map_err(|err| MetadataError::InvalidResponse(err.to_string()))?;
    if payload.response != "True" {
        return Ok(None);
    }
    Ok(Some(MovieDetails {
        year: parse_year(&payload.year),
        rating: parse_rating(&payload.imdb_rating),
        title: payload.title,
        poster: payload.poster,
        plot: payload.plot,
        director: payload.director,
        actors: payload.actors,
        genre: payload.genre,
    }))
}

/// Extracts the provider ids of a search body, skipping hits without one.
pub fn decode_search_ids(body: &str) -> MetadataResult<Vec<String>> {
    let payload: SearchPayload = serde_json::from_str(body)
        .map_err(|err| MetadataError::InvalidResponse(err.to_string()))?;
    if payload.response != "True" {
        return Ok(Vec::new());
    }
    Ok(payload
        .search
        .into_iter()
        .map(|hit| hit.imdb_id)
        .filter(|id| !id.is_empty())
        .collect())
}

// Ranges such as "2010–2014" and "N/A" fall back to 0.
fn parse_year(raw: &str) -> i32 {
    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        raw.parse().unwrap_or(0)
    } else {
        0
    }
}

fn parse_rating(raw: &str) -> f64 {
    let digits = raw.chars().filter(|c| *c != '.').count();
    if digits > 0 && raw.chars().all(|c| c.is_ascii_digit() || c == '.') {
        raw.parse().unwrap_or(0.0)
    } else {
        0.0
    }
}
