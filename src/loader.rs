//! CSV readers for the TMDB movie and credits exports.
//!
//! Rows are deserialized straight into [`RawMovie`] / [`RawCredit`]. Columns
//! not named here are ignored and empty cells come through as `None`.
//! Structured columns stay as raw text; [`crate::parser`] decodes them later.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// A single row of `tmdb_5000_movies.csv`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMovie {
    pub id: i64,
    pub title: Option<String>,
    pub genres: Option<String>,
    pub keywords: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<f64>,
    pub budget: Option<f64>,
    pub revenue: Option<f64>,
    pub original_language: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<f64>,
    pub overview: Option<String>,
    pub production_companies: Option<String>,
    pub production_countries: Option<String>,
    pub popularity: Option<f64>,
}

/// A single row of `tmdb_5000_credits.csv`. Only the join key and the
/// people columns are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCredit {
    pub movie_id: i64,
    pub cast: Option<String>,
    pub crew: Option<String>,
}

/// Columns the movie metadata file must carry, in any order.
pub const MOVIE_COLUMNS: &[&str] = &[
    "id",
    "title",
    "genres",
    "keywords",
    "release_date",
    "runtime",
    "budget",
    "revenue",
    "original_language",
    "vote_average",
    "vote_count",
    "overview",
    "production_companies",
    "production_countries",
    "popularity",
];

/// Columns the credits file must carry.
pub const CREDIT_COLUMNS: &[&str] = &["movie_id", "cast", "crew"];

/// Reads every row of the movie metadata file.
///
/// # Errors
///
/// Fails if the file cannot be opened, the header lacks one of
/// [`MOVIE_COLUMNS`], or a row carries an unparseable numeric value.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_movies(path: impl AsRef<Path>) -> Result<Vec<RawMovie>> {
    let rows = read_rows(path.as_ref(), MOVIE_COLUMNS)?;
    info!(rows = rows.len(), "Movie metadata loaded");
    Ok(rows)
}

/// Reads every row of the credits file.
///
/// # Errors
///
/// Same failure modes as [`load_movies`], checked against [`CREDIT_COLUMNS`].
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_credits(path: impl AsRef<Path>) -> Result<Vec<RawCredit>> {
    let rows = read_rows(path.as_ref(), CREDIT_COLUMNS)?;
    info!(rows = rows.len(), "Credits loaded");
    Ok(rows)
}

fn read_rows<T: serde::de::DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file '{}'", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);

    // absent Option columns would otherwise deserialize as None on every row
    let headers = rdr
        .headers()
        .with_context(|| format!("Failed to read header of '{}'", path.display()))?;
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h.trim() == *column))
        .collect();
    if !missing.is_empty() {
        bail!(
            "Missing expected column(s) {} in '{}'",
            missing.join(", "),
            path.display()
        );
    }

    let mut rows = Vec::new();
    for (index, result) in rdr.deserialize().enumerate() {
        // 1-based, header excluded; quoted fields may span several lines
        let record: T = result.with_context(|| {
            format!("Malformed record {} in '{}'", index + 1, path.display())
        })?;
        rows.push(record);
    }

    debug!(rows = rows.len(), "Rows deserialized");
    Ok(rows)
}
