use uuid::Uuid;

use crate::domain::Movie;

/// Aggregate rating figures for a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionStats {
    pub count: usize,
    pub average: f64,
    pub median: f64,
    pub best: Movie,
    pub worst: Movie,
}

pub struct StatsService;

impl StatsService {
    /// Returns `None` for an empty collection.
    ///
    /// Ties for best/worst resolve to the earliest entry in list order.
    pub fn summarize(movies: &[Movie]) -> Option<CollectionStats> {
        let first = movies.first()?;
        let mut best = first;
        let mut worst = first;
        for movie in &movies[1..] {
            if movie.rating > best.rating {
                best = movie;
            }
            if movie.rating < worst.rating {
                worst = movie;
            }
        }

        let total: f64 = movies.iter().map(|movie| movie.rating).sum();
        let average = total / movies.len() as f64;

        Some(CollectionStats {
            count: movies.len(),
            average: round2(average),
            median: round2(median(movies)),
            best: best.clone(),
            worst: worst.clone(),
        })
    }

    /// Picks one entry uniformly at random.
    pub fn random_pick(movies: &[Movie]) -> Option<&Movie> {
        if movies.is_empty() {
            return None;
        }
        // The random bits of a v4 UUID serve as the entropy source.
        let index = (Uuid::new_v4().as_u128() % movies.len() as u128) as usize;
        movies.get(index)
    }
}

fn median(movies: &[Movie]) -> f64 {
    let mut ratings: Vec<f64> = movies.iter().map(|movie| movie.rating).collect();
    ratings.sort_by(|a, b| a.total_cmp(b));
    let mid = ratings.len() / 2;
    if ratings.len() % 2 == 0 {
        (ratings[mid - 1] + ratings[mid]) / 2.0
    } else {
        ratings[mid]
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
