pub mod query_service;
pub mod stats_service;

pub use query_service::{MovieFilter, QueryService, SortOrder};
pub use stats_service::{CollectionStats, StatsService};

#[cfg(test)]
mod tests;
