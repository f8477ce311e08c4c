mod query_service_tests;

use crate::domain::Movie;

fn library() -> Vec<Movie> {
    vec![
        Movie::new("Inception", 2010, 8.0, "a"),
        Movie::new("Cats", 2019, 2.0, "b"),
        Movie::new("Heat", 1995, 8.5, "c"),
        Movie::new("The Godfather", 1972, 9.5, "d"),
    ]
}
