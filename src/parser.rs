//! Decoding of the JSON-encoded list columns (`genres`, `crew`, ...).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// `{"id": 28, "name": "Action"}` entries of the `genres` column.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Genre {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

/// Entries of the `keywords` column. Same shape as [`Genre`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Keyword {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CastMember {
    pub cast_id: i64,
    pub character: String,
    pub credit_id: String,
    pub gender: i64,
    pub id: i64,
    pub name: String,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CrewMember {
    pub credit_id: String,
    pub department: String,
    pub gender: i64,
    pub id: i64,
    pub job: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProductionCompany {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProductionCountry {
    #[serde(default)]
    pub iso_3166_1: String,
    pub name: String,
}

/// Decodes a JSON list column into typed entries.
///
/// This is best-effort by contract: a missing cell, malformed JSON, or a
/// value that is not a list of the expected objects all yield an empty
/// `Vec`. Use [`try_parse_list`] when the caller needs to know it happened.
pub fn parse_list<T: DeserializeOwned>(raw: Option<&str>) -> Vec<T> {
    try_parse_list(raw).unwrap_or_default()
}

/// Like [`parse_list`], but reports a decode failure as `None`.
///
/// A missing or blank cell is not a failure and decodes to an empty list.
pub fn try_parse_list<T: DeserializeOwned>(raw: Option<&str>) -> Option<Vec<T>> {
    let text = match raw.map(str::trim) {
        None | Some("") => return Some(Vec::new()),
        Some(text) => text,
    };

    match serde_json::from_str::<Vec<T>>(text) {
        Ok(items) => Some(items),
        Err(e) => {
            debug!(error = %e, "Structured field did not decode, using empty list");
            None
        }
    }
}

/// Returns the name of the first crew member whose job is exactly `Director`.
pub fn director(crew: &[CrewMember]) -> Option<String> {
    crew.iter()
        .find(|person| person.job == "Director")
        .map(|person| person.name.clone())
}

/// Flattens parsed genres into their names, preserving order.
pub fn genre_names(genres: &[Genre]) -> Vec<String> {
    genres.iter().map(|g| g.name.clone()).collect()
}
