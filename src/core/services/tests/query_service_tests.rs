use super::library;
use crate::core::services::{MovieFilter, QueryService, SortOrder};

fn titles<'a>(movies: impl IntoIterator<Item = &'a crate::domain::Movie>) -> Vec<&'a str> {
    movies.into_iter().map(|movie| movie.title.as_str()).collect()
}

#[test]
fn search_is_case_insensitive_substring() {
    let movies = library();
    assert_eq!(titles(QueryService::search(&movies, "THE")), vec!["The Godfather"]);
    assert_eq!(titles(QueryService::search(&movies, " ea ")), vec!["Heat"]);
    assert!(QueryService::search(&movies, "zzz").is_empty());
}

#[test]
fn sort_by_rating_honours_order() {
    let movies = library();
    let desc = QueryService::sort_by_rating(&movies, SortOrder::Descending);
    assert_eq!(
        titles(&desc),
        vec!["The Godfather", "Heat", "Inception", "Cats"]
    );
    let asc = QueryService::sort_by_rating(&movies, SortOrder::Ascending);
    assert_eq!(titles(&asc).first(), Some(&"Cats"));
}

#[test]
fn sort_by_year_newest_first() {
    let movies = library();
    let sorted = QueryService::sort_by_year(&movies, SortOrder::Descending);
    assert_eq!(
        titles(&sorted),
        vec!["Cats", "Inception", "Heat", "The Godfather"]
    );
}

#[test]
fn filter_combines_optional_bounds() {
    let movies = library();
    let filter = MovieFilter {
        min_rating: Some(8.0),
        start_year: Some(1990),
        end_year: None,
    };
    assert_eq!(
        titles(QueryService::filter(&movies, &filter)),
        vec!["Inception", "Heat"]
    );
    assert_eq!(filter.to_string(), "rating >= 8 and year >= 1990");

    let open = MovieFilter::default();
    assert!(open.is_empty());
    assert_eq!(QueryService::filter(&movies, &open).len(), movies.len());
    assert_eq!(open.to_string(), "no filters");
}

#[test]
fn filter_end_year_is_inclusive() {
    let movies = library();
    let filter = MovieFilter {
        end_year: Some(1995),
        ..MovieFilter::default()
    };
    assert_eq!(
        titles(QueryService::filter(&movies, &filter)),
        vec!["Heat", "The Godfather"]
    );
}
