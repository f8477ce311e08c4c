use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, Titled};

/// Sentinel stored in the poster field when no image is available.
pub const POSTER_PLACEHOLDER: &str = "N/A";

/// A single entry in the movie collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub poster: String,
}

impl Movie {
    pub fn new(title: impl Into<String>, year: i32, rating: f64, poster: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year,
            rating,
            poster: poster.into(),
        }
    }

    /// False when the poster is blank or holds the placeholder sentinel.
    pub fn has_poster(&self) -> bool {
        let poster = self.poster.trim();
        !poster.is_empty() && poster != POSTER_PLACEHOLDER
    }
}

impl Titled for Movie {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Displayable for Movie {
    fn display_label(&self) -> String {
        format!("{} ({}): {}", self.title, self.year, self.rating)
    }
}

/// Record-shaped lookup result returned by a metadata provider.
///
/// Only `title`, `year`, `rating` and `poster` are persisted; the descriptive
/// fields are shown to the user before they decide to add the movie.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieDetails {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub poster: String,
    pub plot: String,
    pub director: String,
    pub actors: String,
    pub genre: String,
}

impl MovieDetails {
    /// Drops the descriptive fields, keeping only what the store persists.
    pub fn to_movie(&self) -> Movie {
        Movie::new(
            self.title.clone(),
            self.year,
            self.rating,
            self.poster.clone(),
        )
    }
}

impl Titled for MovieDetails {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Displayable for MovieDetails {
    fn display_label(&self) -> String {
        format!("{} ({}) rated {}", self.title, self.year, self.rating)
    }
}
