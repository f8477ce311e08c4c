use std::cmp::Ordering;
use std::fmt;

use crate::domain::{title_key, Movie};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Optional bounds applied by [`QueryService::filter`]. `None` disables a bound.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovieFilter {
    pub min_rating: Option<f64>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl MovieFilter {
    pub fn matches(&self, movie: &Movie) -> bool {
        self.min_rating.map_or(true, |min| movie.rating >= min)
            && self.start_year.map_or(true, |start| movie.year >= start)
            && self.end_year.map_or(true, |end| movie.year <= end)
    }

    pub fn is_empty(&self) -> bool {
        self.min_rating.is_none() && self.start_year.is_none() && self.end_year.is_none()
    }
}

impl fmt::Display for MovieFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut criteria = Vec::new();
        if let Some(min) = self.min_rating {
            criteria.push(format!("rating >= {min}"));
        }
        if let Some(start) = self.start_year {
            criteria.push(format!("year >= {start}"));
        }
        if let Some(end) = self.end_year {
            criteria.push(format!("year <= {end}"));
        }
        if criteria.is_empty() {
            f.write_str("no filters")
        } else {
            f.write_str(&criteria.join(" and "))
        }
    }
}

pub struct QueryService;

impl QueryService {
    /// Case-insensitive substring match on the title.
    pub fn search<'a>(movies: &'a [Movie], query: &str) -> Vec<&'a Movie> {
        let needle = title_key(query.trim());
        movies
            .iter()
            .filter(|movie| title_key(&movie.title).contains(&needle))
            .collect()
    }

    /// Stable sort, so equal ratings keep their list order.
    pub fn sort_by_rating(movies: &[Movie], order: SortOrder) -> Vec<Movie> {
        let mut sorted = movies.to_vec();
        sorted.sort_by(|a, b| order.apply(a.rating.total_cmp(&b.rating)));
        sorted
    }

    pub fn sort_by_year(movies: &[Movie], order: SortOrder) -> Vec<Movie> {
        let mut sorted = movies.to_vec();
        sorted.sort_by(|a, b| order.apply(a.year.cmp(&b.year)));
        sorted
    }

    pub fn filter<'a>(movies: &'a [Movie], filter: &MovieFilter) -> Vec<&'a Movie> {
        movies.iter().filter(|movie| filter.matches(movie)).collect()
    }
}
