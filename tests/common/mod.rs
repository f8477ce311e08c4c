#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use movie_core::{
    domain::Movie,
    storage::{CsvStorage, JsonStorage, MovieStore, StorageKind},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that is removed when the test binary exits.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .push(temp);
    base
}

pub fn store_path(base: &Path, kind: StorageKind) -> PathBuf {
    base.join(kind.default_file_name())
}

pub fn open_store(kind: StorageKind, path: &Path) -> Box<dyn MovieStore> {
    match kind {
        StorageKind::Csv => Box::new(CsvStorage::new(path, ",").expect("open csv store")),
        StorageKind::Json => Box::new(JsonStorage::new(path).expect("open json store")),
    }
}

/// Same path with `.tmp` appended to the extension, where staged writes go.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".tmp");
    PathBuf::from(staged)
}

pub fn sample_movies() -> Vec<Movie> {
    vec![
        Movie::new("Inception", 2010, 8.8, "https://img/inception.jpg"),
        Movie::new("The Godfather", 1972, 9.2, "N/A"),
        Movie::new("Heat", 1995, 8.3, "https://img/heat.jpg"),
    ]
}

pub fn seed(store: &dyn MovieStore, movies: &[Movie]) {
    for movie in movies {
        assert!(store.add(movie.clone()).expect("seed add"));
    }
}
