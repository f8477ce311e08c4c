//! Persistent record store for the movie collection.
//!
//! Every backend exposes the same four operations and rewrites its whole
//! backing file on each successful mutation. Business-rule failures (duplicate
//! title on `add`, unknown title on `delete`/`update`) are `Ok(false)`; only
//! filesystem failures surface as [`StoreError`].
//!
//! Single process, single user: there is no locking, so a second writer on
//! the same file can lose updates.

pub mod csv_backend;
pub mod json_backend;

use std::{
    fmt,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::domain::{Movie, Titled};
pub use crate::errors::{StoreError, StoreResult};

pub use csv_backend::{CsvStorage, DEFAULT_SEPARATOR};
pub use json_backend::JsonStorage;

const TMP_SUFFIX: &str = "tmp";

/// The contract the rest of the application programs against.
pub trait MovieStore: Send + Sync {
    /// Returns every well-formed record in file order.
    ///
    /// A missing or undecodable file is repaired to the canonical empty form
    /// and reported as an empty collection.
    fn list(&self) -> StoreResult<Vec<Movie>>;

    /// Appends `movie` unless a record with a case-insensitively equal title
    /// already exists.
    fn add(&self, movie: Movie) -> StoreResult<bool>;

    /// Removes the record whose title matches case-insensitively.
    fn delete(&self, title: &str) -> StoreResult<bool>;

    /// Replaces the rating of the record whose title matches case-insensitively.
    fn update(&self, title: &str, rating: f64) -> StoreResult<bool>;

    fn kind(&self) -> StorageKind;

    fn path(&self) -> &Path;
}

/// Available on-file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Csv,
    Json,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Csv => "csv",
            StorageKind::Json => "json",
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            StorageKind::Csv => "movies.csv",
            StorageKind::Json => "movies.json",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(StorageKind::Csv),
            "json" => Ok(StorageKind::Json),
            other => Err(format!("unknown storage type `{other}` (expected csv or json)")),
        }
    }
}

/// Explicit backend selection: encoding, target file, optional separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub kind: StorageKind,
    pub path: PathBuf,
    pub separator: Option<String>,
}

impl StorageConfig {
    pub fn new(kind: StorageKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
            separator: None,
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }
}

/// Constructs the backend described by `config`, creating its file when absent.
pub fn open_store(config: &StorageConfig) -> StoreResult<Box<dyn MovieStore>> {
    let store: Box<dyn MovieStore> = match config.kind {
        StorageKind::Csv => {
            let separator = config.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR);
            Box::new(CsvStorage::new(&config.path, separator)?)
        }
        StorageKind::Json => Box::new(JsonStorage::new(&config.path)?),
    };
    tracing::debug!(
        kind = %config.kind,
        path = %config.path.display(),
        "opened movie store"
    );
    Ok(store)
}

// --- Collection helpers shared by the backends ---

pub(crate) fn position_of(movies: &[Movie], title: &str) -> Option<usize> {
    movies.iter().position(|movie| movie.title_matches(title))
}

/// Appends `movie` when its title is not taken. Returns false on collision.
pub(crate) fn insert_unique(movies: &mut Vec<Movie>, movie: Movie) -> StoreResult<bool> {
    if movie.title.trim().is_empty() {
        return Err(StoreError::InvalidRecord("title must not be empty".into()));
    }
    check_rating(movie.rating)?;
    if position_of(movies, &movie.title).is_some() {
        return Ok(false);
    }
    movies.push(movie);
    Ok(true)
}

pub(crate) fn remove_title(movies: &mut Vec<Movie>, title: &str) -> bool {
    match position_of(movies, title) {
        Some(index) => {
            movies.remove(index);
            true
        }
        None => false,
    }
}

pub(crate) fn set_rating(movies: &mut [Movie], title: &str, rating: f64) -> StoreResult<bool> {
    check_rating(rating)?;
    match position_of(movies, title) {
        Some(index) => {
            movies[index].rating = rating;
            Ok(true)
        }
        None => Ok(false),
    }
}

// JSON has no encoding for NaN or infinities.
fn check_rating(rating: f64) -> StoreResult<()> {
    if rating.is_finite() {
        Ok(())
    } else {
        Err(StoreError::InvalidRecord(format!(
            "rating must be a finite number, got {rating}"
        )))
    }
}

// --- File primitives ---

/// Raw file contents as seen by a backend before decoding.
pub(crate) enum FileContents {
    Missing,
    Unreadable,
    Text(String),
}

pub(crate) fn read_contents(path: &Path) -> StoreResult<FileContents> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(FileContents::Text(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(FileContents::Missing),
        Err(err) if err.kind() == io::ErrorKind::InvalidData => Ok(FileContents::Unreadable),
        Err(err) => Err(err.into()),
    }
}

pub(crate) fn ensure_parent(path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Stages `data` next to `path` and renames it into place.
///
/// The target is either the old or the new content, never a partial write.
pub(crate) fn write_atomic(path: &Path, data: &str) -> StoreResult<()> {
    ensure_parent(path)?;
    let tmp = tmp_path(path);
    let staged = File::create(&tmp).and_then(|mut file| {
        file.write_all(data.as_bytes())?;
        file.sync_all()
    });
    if let Err(err) = staged {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Vec<Movie> {
        vec![
            Movie::new("Inception", 2010, 8.8, "a"),
            Movie::new("Heat", 1995, 8.3, "b"),
        ]
    }

    #[test]
    fn insert_unique_rejects_case_insensitive_collision() {
        let mut movies = sample();
        let added = insert_unique(&mut movies, Movie::new("INCEPTION", 2011, 1.0, "x"))
            .expect("insert");
        assert!(!added);
        assert_eq!(movies.len(), 2);
    }

    #[test]
    fn insert_unique_rejects_blank_title() {
        let mut movies = sample();
        let err = insert_unique(&mut movies, Movie::new("  ", 2011, 1.0, "x"))
            .expect_err("blank title");
        assert!(matches!(err, StoreError::InvalidRecord(_)));
    }

    #[test]
    fn remove_and_rate_locate_by_title_key() {
        let mut movies = sample();
        assert!(set_rating(&mut movies, "heat", 9.1).expect("rate"));
        assert_eq!(movies[1].rating, 9.1);
        assert!(remove_title(&mut movies, "hEaT"));
        assert!(!remove_title(&mut movies, "heat"));
        assert_eq!(movies.len(), 1);
    }

    #[test]
    fn non_finite_ratings_are_rejected() {
        let mut movies = sample();
        for rating in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = insert_unique(&mut movies, Movie::new("Alien", 1979, rating, "x"))
                .expect_err("non-finite insert");
            assert!(matches!(err, StoreError::InvalidRecord(_)));
            let err = set_rating(&mut movies, "heat", rating).expect_err("non-finite rating");
            assert!(matches!(err, StoreError::InvalidRecord(_)));
        }
        assert_eq!(movies, sample());
    }

    #[test]
    fn storage_kind_parses_case_insensitively() {
        assert_eq!("JSON".parse::<StorageKind>(), Ok(StorageKind::Json));
        assert_eq!(" csv ".parse::<StorageKind>(), Ok(StorageKind::Csv));
        assert!("xml".parse::<StorageKind>().is_err());
    }

    #[test]
    fn tmp_path_appends_suffix_to_extension() {
        assert_eq!(
            tmp_path(Path::new("/data/movies.csv")),
            PathBuf::from("/data/movies.csv.tmp")
        );
        assert_eq!(tmp_path(Path::new("movies")), PathBuf::from("movies.tmp"));
    }

    #[test]
    fn write_atomic_leaves_no_staging_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("movies.json");
        write_atomic(&path, "[]").expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "[]");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn open_store_selects_backend_from_config() {
        let dir = tempdir().expect("tempdir");
        let csv = open_store(&StorageConfig::new(
            StorageKind::Csv,
            dir.path().join("movies.csv"),
        ))
        .expect("csv store");
        let json = open_store(&StorageConfig::new(
            StorageKind::Json,
            dir.path().join("movies.json"),
        ))
        .expect("json store");
        assert_eq!(csv.kind(), StorageKind::Csv);
        assert_eq!(json.kind(), StorageKind::Json);
        assert!(csv.path().exists());
        assert!(json.path().exists());
    }
}
