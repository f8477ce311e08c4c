//! Structured-text backend.
//!
//! The collection is one pretty-printed JSON array of objects with keys
//! `title`, `year`, `rating`, `poster`. Corruption is all-or-nothing: a
//! document that fails to decode as a whole is replaced by `[]`, unlike the
//! delimited backend which drops individual rows.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::Movie;

use super::{
    ensure_parent, insert_unique, read_contents, remove_title, set_rating, write_atomic,
    FileContents, MovieStore, StorageKind, StoreResult,
};

#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    /// Opens the store, writing an empty array when `path` does not exist.
    pub fn new(path: impl AsRef<Path>) -> StoreResult<Self> {
        let storage = Self {
            path: path.as_ref().to_path_buf(),
        };
        ensure_parent(&storage.path)?;
        if !storage.path.exists() {
            storage.write_movies(&[])?;
        }
        Ok(storage)
    }

    fn write_movies(&self, movies: &[Movie]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(movies)?;
        write_atomic(&self.path, &json)?;
        debug!(path = %self.path.display(), count = movies.len(), "rewrote json store");
        Ok(())
    }

    fn repair(&self) -> StoreResult<Vec<Movie>> {
        warn!(path = %self.path.display(), "resetting json store to an empty array");
        self.write_movies(&[])?;
        Ok(Vec::new())
    }
}

impl MovieStore for JsonStorage {
    fn list(&self) -> StoreResult<Vec<Movie>> {
        let text = match read_contents(&self.path)? {
            FileContents::Text(text) => text,
            FileContents::Missing | FileContents::Unreadable => return self.repair(),
        };
        match serde_json::from_str::<Vec<Movie>>(&text) {
            Ok(movies) => Ok(movies),
            Err(err) => {
                debug!(error = %err, "json store could not be decoded");
                self.repair()
            }
        }
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
        StorageKind::Json
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(temp.path().join("movies.json")).expect("json storage");
        (storage, temp)
    }

    #[test]
    fn new_file_holds_empty_array() {
        let (storage, _guard) = storage_with_temp_dir();
        assert_eq!(fs::read_to_string(storage.path()).expect("read"), "[]");
    }

    #[test]
    fn numbers_are_stored_as_numbers() {
        let (storage, _guard) = storage_with_temp_dir();
        storage
            .add(Movie::new("Inception", 2010, 8.8, "url1"))
            .expect("add");
        let raw = fs::read_to_string(storage.path()).expect("read");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(value[0]["year"], serde_json::json!(2010));
        assert_eq!(value[0]["rating"], serde_json::json!(8.8));
        assert!(raw.contains("\n  {"), "expected indented output, got {raw}");
    }

    #[test]
    fn wrong_top_level_shape_resets_document() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(storage.path(), r#"{"title": "Heat"}"#).expect("seed");
        assert!(storage.list().expect("list").is_empty());
        assert_eq!(fs::read_to_string(storage.path()).expect("read"), "[]");
    }

    #[test]
    fn one_bad_entry_discards_whole_document() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(
            storage.path(),
            r#"[{"title":"A","year":2000,"rating":5.0,"poster":"p"},
                {"title":"B","year":"2001","rating":5.0,"poster":"p"}]"#,
        )
        .expect("seed");
        assert!(storage.list().expect("list").is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(
            storage.path(),
            r#"[{"title":"A","year":2000,"rating":5,"poster":"p","plot":"x"}]"#,
        )
        .expect("seed");
        assert_eq!(
            storage.list().expect("list"),
            vec![Movie::new("A", 2000, 5.0, "p")]
        );
    }
}
