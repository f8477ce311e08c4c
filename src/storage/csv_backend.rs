//! Delimited-text backend.
//!
//! Layout: a fixed header row followed by one separator-joined row per
//! record. Field values are written verbatim with no quoting, so a title or
//! poster containing the separator (or a line break) produces a row that is
//! skipped on the next read. Malformed rows are dropped one at a time; the
//! rest of the file stays available. `list` only rewrites a file that is
//! missing, unreadable, or has no data lines below the header.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::Movie;

use super::{
    ensure_parent, insert_unique, read_contents, remove_title, set_rating, write_atomic,
    FileContents, MovieStore, StorageKind, StoreError, StoreResult,
};

pub const DEFAULT_SEPARATOR: &str = ",";
const HEADER_FIELDS: [&str; 4] = ["title", "year", "rating", "poster"];

#[derive(Debug, Clone)]
pub struct CsvStorage {
    path: PathBuf,
    separator: String,
}

impl CsvStorage {
    /// Opens the store, writing a header-only file when `path` does not exist.
    pub fn new(path: impl AsRef<Path>, separator: &str) -> StoreResult<Self> {
        if separator.is_empty() {
            return Err(StoreError::InvalidSeparator);
        }
        let storage = Self {
            path: path.as_ref().to_path_buf(),
            separator: separator.to_string(),
        };
        ensure_parent(&storage.path)?;
        if !storage.path.exists() {
            storage.write_movies(&[])?;
        }
        Ok(storage)
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    fn write_movies(&self, movies: &[Movie]) -> StoreResult<()> {
        write_atomic(&self.path, &encode(movies, &self.separator))?;
        debug!(path = %self.path.display(), count = movies.len(), "rewrote csv store");
        Ok(())
    }

    fn repair(&self) -> StoreResult<Vec<Movie>> {
        warn!(path = %self.path.display(), "resetting csv store to header-only form");
        self.write_movies(&[])?;
        Ok(Vec::new())
    }
}

impl MovieStore for CsvStorage {
    fn list(&self) -> StoreResult<Vec<Movie>> {
        let text = match read_contents(&self.path)? {
            FileContents::Text(text) => text,
            FileContents::Missing | FileContents::Unreadable => return self.repair(),
        };
        if !has_data_lines(&text) {
            if text != encode(&[], &self.separator) {
                return self.repair();
            }
            return Ok(Vec::new());
        }
        // Rows that fail to decode are skipped, never rewritten away here.
        Ok(decode(&text, &self.separator))
    }

    fn add(&self, movie: Movie) -> StoreResult<bool> {
        let mut movies = self.list()?;
        if !insert_unique(&mut movies, movie)? {
            return Ok(false);
        }
        self.write_movies(&movies)?;
        Ok(true)
    }

    fn delete(&self, title: &str) -> StoreResult<bool> {
        let mut movies = self.list()?;
        if !remove_title(&mut movies, title) {
            return Ok(false);
        }
        self.write_movies(&movies)?;
        Ok(true)
    }

    fn update(&self, title: &str, rating: f64) -> StoreResult<bool> {
        let mut movies = self.list()?;
        if !set_rating(&mut movies, title, rating)? {
            return Ok(false);
        }
        self.write_movies(&movies)?;
        Ok(true)
    }

    fn kind(&self) -> StorageKind {
        StorageKind::Csv
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Header row followed by one line per record, every line newline-terminated.
pub fn encode(movies: &[Movie], separator: &str) -> String {
    let mut out = HEADER_FIELDS.join(separator);
    out.push('\n');
    for movie in movies {
        let row = [
            movie.title.clone(),
            movie.year.to_string(),
            movie.rating.to_string(),
            movie.poster.clone(),
        ];
        out.push_str(&row.join(separator));
        out.push('\n');
    }
    out
}

/// Decodes every well-formed data row, skipping the header line.
pub fn decode(text: &str, separator: &str) -> Vec<Movie> {
    text.lines()
        .skip(1)
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let parsed = parse_row(line, separator);
            if parsed.is_none() {
                debug!(line = index + 2, "skipping malformed csv row");
            }
            parsed
        })
        .collect()
}

fn has_data_lines(text: &str) -> bool {
    text.lines().skip(1).any(|line| !line.trim().is_empty())
}

fn parse_row(line: &str, separator: &str) -> Option<Movie> {
    let fields: Vec<&str> = line.split(separator).collect();
    let [title, year, rating, poster] = fields.as_slice() else {
        return None;
    };
    let year = year.trim().parse::<i32>().ok()?;
    let rating = rating.trim().parse::<f64>().ok()?;
    Some(Movie::new(*title, year, rating, *poster))
}
