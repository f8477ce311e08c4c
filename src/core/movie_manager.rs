use std::path::Path;

use tracing::debug;

use crate::domain::Movie;
use crate::errors::StoreResult;
use crate::storage::{MovieStore, StorageKind};

/// Facade that pairs a record store with the last listed snapshot.
///
/// All mutations go through the store. The snapshot is refreshed after every
/// successful mutation and left as-is when the store reports a failure.
pub struct MovieManager {
    storage: Box<dyn MovieStore>,
    movies: Vec<Movie>,
}

impl MovieManager {
    /// Wraps `storage` and loads the initial snapshot.
    pub fn new(storage: Box<dyn MovieStore>) -> StoreResult<Self> {
        let mut manager = Self {
            storage,
            movies: Vec::new(),
        };
        manager.refresh()?;
        Ok(manager)
    }

    pub fn storage(&self) -> &dyn MovieStore {
        self.storage.as_ref()
    }

    pub fn kind(&self) -> StorageKind {
        self.storage.kind()
    }

    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    /// Cached snapshot from the most recent refresh.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn refresh(&mut self) -> StoreResult<()> {
        self.movies = self.storage.list()?;
        debug!(count = self.movies.len(), "refreshed movie cache");
        Ok(())
    }

    pub fn add(&mut self, movie: Movie) -> StoreResult<bool> {
        let added = self.storage.add(movie)?;
        if added {
            self.refresh()?;
        }
        Ok(added)
    }

    pub fn delete(&mut self, title: &str) -> StoreResult<bool> {
        let deleted = self.storage.delete(title)?;
        if deleted {
            self.refresh()?;
        }
        Ok(deleted)
    }

    pub fn update(&mut self, title: &str, rating: f64) -> StoreResult<bool> {
        let updated = self.storage.update(title, rating)?;
        if updated {
            self.refresh()?;
        }
        Ok(updated)
    }
}
