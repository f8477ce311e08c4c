//! Parsers for user-entered values. Each returns the message shown before
//! the prompt is repeated.

use std::str::FromStr;

use crate::core::services::SortOrder;

pub fn require_text(raw: &str) -> Result<String, String> {
    let value = raw.trim();
    if value.is_empty() {
        Err("Movie name must not be empty.".into())
    } else {
        Ok(value.to_string())
    }
}

pub fn parse_year(raw: &str) -> Result<i32, String> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| "Please enter a valid year".to_string())
}

pub fn parse_rating(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err("Please enter a valid rating".into()),
    }
}

/// Blank input or `-` means "no value".
pub fn parse_optional<T: FromStr>(raw: &str, error: &str) -> Result<Option<T>, String> {
    let value = raw.trim();
    if value.is_empty() || value == "-" {
        return Ok(None);
    }
    value.parse::<T>().map(Some).map_err(|_| error.to_string())
}

pub fn parse_yes_no(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err("Please enter \"Y\" or \"N\"".into()),
    }
}

/// Accepts `desc`/`asc` as well as a yes/no answer to "highest first?".
pub fn parse_order(raw: &str) -> Result<SortOrder, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "desc" | "descending" | "d" => Ok(SortOrder::Descending),
        "asc" | "ascending" | "a" => Ok(SortOrder::Ascending),
        other => parse_yes_no(other)
            .map(|descending| {
                if descending {
                    SortOrder::Descending
                } else {
                    SortOrder::Ascending
                }
            })
            .map_err(|_| "Please enter \"desc\" or \"asc\"".to_string()),
    }
}
