//! Behaviour every `MovieStore` backend must share.

mod common;

use std::fs;

use common::{open_store, sample_movies, seed, store_path, temp_base};
use movie_core::{
    domain::Movie,
    errors::StoreError,
    storage::{MovieStore, StorageKind},
};

macro_rules! store_contract {
    ($module:ident, $kind:expr) => {
        mod $module {
            use super::*;

            fn fresh() -> (std::path::PathBuf, Box<dyn MovieStore>) {
                let path = store_path(&temp_base(), $kind);
                let store = open_store($kind, &path);
                (path, store)
            }

            #[test]
            fn new_store_creates_file_and_lists_nothing() {
                let (path, store) = fresh();
                assert!(path.is_file());
                assert!(store.list().unwrap().is_empty());
                assert_eq!(store.kind(), $kind);
                assert_eq!(store.path(), path.as_path());
            }

            #[test]
            fn add_keeps_insertion_order() {
                let (_path, store) = fresh();
                seed(store.as_ref(), &sample_movies());
                assert_eq!(store.list().unwrap(), sample_movies());
            }

            #[test]
            fn titles_are_unique_ignoring_case() {
                let (_path, store) = fresh();
                assert!(store.add(Movie::new("Heat", 1995, 8.3, "p")).unwrap());
                assert!(!store.add(Movie::new("HEAT", 2020, 1.0, "q")).unwrap());
                assert!(!store.add(Movie::new("heat", 1995, 8.3, "p")).unwrap());
                assert_eq!(store.list().unwrap(), vec![Movie::new("Heat", 1995, 8.3, "p")]);
            }

            #[test]
            fn non_ascii_titles_compare_case_insensitively() {
                let (_path, store) = fresh();
                assert!(store.add(Movie::new("Amélie", 2001, 8.3, "p")).unwrap());
                assert!(!store.add(Movie::new("AMÉLIE", 2001, 8.3, "p")).unwrap());
                assert!(store.delete("amélie").unwrap());
            }

            #[test]
            fn blank_title_is_rejected() {
                let (_path, store) = fresh();
                let err = store.add(Movie::new("   ", 2000, 5.0, "p")).unwrap_err();
                assert!(matches!(err, StoreError::InvalidRecord(_)));
                assert!(store.list().unwrap().is_empty());
            }

            #[test]
            fn records_survive_a_fresh_instance() {
                let (path, store) = fresh();
                seed(store.as_ref(), &sample_movies());
                drop(store);

                let reopened = open_store($kind, &path);
                assert_eq!(reopened.list().unwrap(), sample_movies());
            }

            #[test]
            fn delete_is_case_insensitive_and_idempotent() {
                let (_path, store) = fresh();
                seed(store.as_ref(), &sample_movies());
                assert!(store.delete("the godfather").unwrap());
                assert!(!store.delete("The Godfather").unwrap());
                assert!(!store.delete("Never Added").unwrap());
                let titles: Vec<String> =
                    store.list().unwrap().into_iter().map(|m| m.title).collect();
                assert_eq!(titles, vec!["Inception", "Heat"]);
            }

            #[test]
            fn update_changes_only_the_rating_of_the_match() {
                let (_path, store) = fresh();
                seed(store.as_ref(), &sample_movies());
                assert!(store.update("INCEPTION", 9.5).unwrap());

                let mut expected = sample_movies();
                expected[0].rating = 9.5;
                assert_eq!(store.list().unwrap(), expected);
            }

            #[test]
            fn update_of_unknown_title_leaves_file_untouched() {
                let (path, store) = fresh();
                seed(store.as_ref(), &sample_movies());
                let before = fs::read(&path).unwrap();
                assert!(!store.update("Unknown", 1.0).unwrap());
                assert!(!store.delete("Unknown").unwrap());
                assert!(!store.add(Movie::new("heat", 1, 1.0, "x")).unwrap());
                assert_eq!(fs::read(&path).unwrap(), before);
            }

            #[test]
            fn non_finite_ratings_are_rejected_without_touching_the_file() {
                let (path, store) = fresh();
                seed(store.as_ref(), &sample_movies());
                let before = fs::read(&path).unwrap();

                for rating in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
                    let err = store.add(Movie::new("Alien", 1979, rating, "N/A")).unwrap_err();
                    assert!(matches!(err, StoreError::InvalidRecord(_)));
                    let err = store.update("Heat", rating).unwrap_err();
                    assert!(matches!(err, StoreError::InvalidRecord(_)));
                }

                assert_eq!(fs::read(&path).unwrap(), before);
                assert_eq!(store.list().unwrap(), sample_movies());
            }

            #[test]
            fn deleted_file_is_recreated_on_list() {
                let (path, store) = fresh();
                seed(store.as_ref(), &sample_movies());
                fs::remove_file(&path).unwrap();

                assert!(store.list().unwrap().is_empty());
                assert!(path.is_file());
                assert!(store.add(Movie::new("Heat", 1995, 8.3, "p")).unwrap());
                assert_eq!(store.list().unwrap().len(), 1);
            }

            #[test]
            fn garbage_file_is_repaired_to_empty() {
                let (path, store) = fresh();
                fs::write(&path, "\u{0}\u{1}not a movie file at all").unwrap();
                assert!(store.list().unwrap().is_empty());

                let repaired = fs::read_to_string(&path).unwrap();
                let reopened = open_store($kind, &path);
                assert!(reopened.list().unwrap().is_empty());
                assert_eq!(fs::read_to_string(&path).unwrap(), repaired);
            }

            #[test]
            fn invalid_utf8_counts_as_corruption() {
                let (path, store) = fresh();
                fs::write(&path, [0xff, 0xfe, 0xfd]).unwrap();
                assert!(store.list().unwrap().is_empty());
                assert!(fs::read_to_string(&path).is_ok());
            }

            #[test]
            fn no_staging_file_is_left_behind() {
                let (path, store) = fresh();
                seed(store.as_ref(), &sample_movies());
                assert!(store.delete("Heat").unwrap());
                assert!(!common::staging_path(&path).exists());
            }
        }
    };
}

store_contract!(csv_store, StorageKind::Csv);
store_contract!(json_store, StorageKind::Json);

#[test]
fn backends_agree_on_the_same_operation_sequence() {
    let base = temp_base();
    let stores: Vec<Box<dyn MovieStore>> = [StorageKind::Csv, StorageKind::Json]
        .into_iter()
        .map(|kind| open_store(kind, &store_path(&base, kind)))
        .collect();

    for store in &stores {
        seed(store.as_ref(), &sample_movies());
        assert!(store.update("heat", 7.0).unwrap());
        assert!(store.delete("Inception").unwrap());
        assert!(store.add(Movie::new("Alien", 1979, 8.5, "N/A")).unwrap());
    }

    let csv = stores[0].list().unwrap();
    let json = stores[1].list().unwrap();
    assert_eq!(csv, json);
    assert_eq!(
        csv,
        vec![
            Movie::new("The Godfather", 1972, 9.2, "N/A"),
            Movie::new("Heat", 1995, 7.0, "https://img/heat.jpg"),
            Movie::new("Alien", 1979, 8.5, "N/A"),
        ]
    );
}

#[test]
fn backends_return_identical_results_for_inception_sequence() {
    let base = temp_base();
    let mut outcomes = Vec::new();
    for kind in [StorageKind::Csv, StorageKind::Json] {
        let store = open_store(kind, &store_path(&base, kind));
        outcomes.push(vec![
            store.add(Movie::new("Inception", 2010, 8.8, "url1")).unwrap(),
            store.add(Movie::new("inception", 2011, 5.0, "url2")).unwrap(),
            store.update("Inception", 9.0).unwrap(),
            store.delete("Inception").unwrap(),
        ]);
        assert!(store.list().unwrap().is_empty(), "{kind} should end empty");
    }
    assert_eq!(outcomes[0], vec![true, false, true, true]);
    assert_eq!(outcomes[0], outcomes[1]);
}
