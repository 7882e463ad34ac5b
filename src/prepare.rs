//! Joins, cleans and enriches the raw TMDB rows into a [`MovieTable`].
//!
//! Steps, in order:
//! 1. inner-join movies with credits on `id == movie_id`,
//! 2. impute missing runtimes with the median of the joined rows,
//! 3. drop rows without a (parseable) release date,
//! 4. drop rows whose budget or revenue is at or below the validity floor,
//! 5. derive year/month, profit and ROI,
//! 6. decode the structured list columns, pick the director and genre names,
//! 7. drop films released before the year floor.

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::loader::{RawCredit, RawMovie, load_credits, load_movies};
use crate::parser::{
    CastMember, CrewMember, Genre, Keyword, ProductionCompany, ProductionCountry, director,
    genre_names, try_parse_list,
};
use crate::stats::{median, roi_pct};

/// One cleaned film.
#[derive(Debug, Clone, Serialize)]
pub struct Movie {
    pub id: i64,
    pub title: Option<String>,
    pub genres: Vec<Genre>,
    pub keywords: Vec<Keyword>,
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
    pub production_companies: Vec<ProductionCompany>,
    pub production_countries: Vec<ProductionCountry>,
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub runtime: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<f64>,
    pub popularity: Option<f64>,

    pub release_date: NaiveDate,
    pub release_year: i32,
    pub release_month: u32,

    pub budget: f64,
    pub revenue: f64,
    pub profit: f64,
    /// Percentage; `None` when undefined.
    pub roi: Option<f64>,

    pub director: Option<String>,
    pub genres_list: Vec<String>,
}

impl Movie {
    /// Builds a film with only the columns the analyses read. Profit, ROI and
    /// the date parts are derived the same way preparation derives them.
    #[cfg(test)]
    pub(crate) fn from_financials(
        id: i64,
        release_date: NaiveDate,
        budget: f64,
        revenue: f64,
        director: Option<&str>,
        genres: &[&str],
    ) -> Self {
        let genres: Vec<Genre> = genres
            .iter()
            .enumerate()
            .map(|(i, name)| Genre {
                id: i as i64,
                name: name.to_string(),
            })
            .collect();

        Movie {
            id,
            title: None,
            genres_list: genre_names(&genres),
            genres,
            keywords: Vec::new(),
            cast: Vec::new(),
            crew: Vec::new(),
            production_companies: Vec::new(),
            production_countries: Vec::new(),
            original_language: None,
            overview: None,
            runtime: None,
            vote_average: None,
            vote_count: None,
            popularity: None,
            release_date,
            release_year: release_date.year(),
            release_month: release_date.month(),
            budget,
            revenue,
            profit: revenue - budget,
            roi: roi_pct(budget, revenue),
            director: director.map(str::to_string),
        }
    }
}

/// The prepared dataset. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct MovieTable {
    rows: Vec<Movie>,
}

impl MovieTable {
    pub fn from_rows(rows: Vec<Movie>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Movie] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movie> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a MovieTable {
    type Item = &'a Movie;
    type IntoIter = std::slice::Iter<'a, Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// What preparation kept, dropped and patched up.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrepReport {
    pub movies_loaded: usize,
    pub credits_loaded: usize,
    pub joined_rows: usize,
    pub imputed_runtimes: usize,
    pub median_runtime: Option<f64>,
    pub dropped_missing_release_date: usize,
    pub dropped_invalid_release_date: usize,
    pub dropped_invalid_amounts: usize,
    pub dropped_before_min_year: usize,
    pub malformed_structured_fields: usize,
    pub retained_rows: usize,
}

/// Loads both input files and prepares them.
pub fn prepare_from_paths(
    movies_path: &Path,
    credits_path: &Path,
    config: &AnalysisConfig,
) -> Result<(MovieTable, PrepReport)> {
    let movies = load_movies(movies_path)?;
    let credits = load_credits(credits_path)?;
    Ok(prepare(movies, credits, config))
}

/// Runs the full cleaning pipeline over already-loaded rows.
#[tracing::instrument(skip_all, fields(movies = movies.len(), credits = credits.len()))]
pub fn prepare(
    movies: Vec<RawMovie>,
    credits: Vec<RawCredit>,
    config: &AnalysisConfig,
) -> (MovieTable, PrepReport) {
    let mut report = PrepReport {
        movies_loaded: movies.len(),
        credits_loaded: credits.len(),
        ..Default::default()
    };

    let mut joined = join(movies, credits);
    report.joined_rows = joined.len();

    let runtimes: Vec<f64> = joined.iter().filter_map(|(m, _)| m.runtime).collect();
    report.median_runtime = median(&runtimes);
    if let Some(median_runtime) = report.median_runtime {
        for (movie, _) in joined.iter_mut().filter(|(m, _)| m.runtime.is_none()) {
            movie.runtime = Some(median_runtime);
            report.imputed_runtimes += 1;
        }
    }

    let mut rows = Vec::with_capacity(joined.len());
    for (movie, credit) in joined {
        let release_date = match movie.release_date.as_deref().map(str::trim) {
            None | Some("") => {
                report.dropped_missing_release_date += 1;
                continue;
            }
            Some(text) => match parse_release_date(text) {
                Some(date) => date,
                None => {
                    debug!(id = movie.id, release_date = text, "Unparseable release date");
                    report.dropped_invalid_release_date += 1;
                    continue;
                }
            },
        };

        let (budget, revenue) = match (movie.budget, movie.revenue) {
            (Some(b), Some(r)) if b > config.min_valid_amount && r > config.min_valid_amount => {
                (b, r)
            }
            _ => {
                report.dropped_invalid_amounts += 1;
                continue;
            }
        };

        let release_year = release_date.year();
        if release_year < config.min_release_year {
            report.dropped_before_min_year += 1;
            continue;
        }

        let mut malformed = 0;
        let genres: Vec<Genre> = decode(movie.genres.as_deref(), &mut malformed);
        let keywords: Vec<Keyword> = decode(movie.keywords.as_deref(), &mut malformed);
        let cast: Vec<CastMember> = decode(credit.cast.as_deref(), &mut malformed);
        let crew: Vec<CrewMember> = decode(credit.crew.as_deref(), &mut malformed);
        let production_companies: Vec<ProductionCompany> =
            decode(movie.production_companies.as_deref(), &mut malformed);
        let production_countries: Vec<ProductionCountry> =
            decode(movie.production_countries.as_deref(), &mut malformed);
        if malformed > 0 {
            debug!(id = movie.id, malformed, "Structured fields fell back to empty lists");
            report.malformed_structured_fields += malformed;
        }

        rows.push(Movie {
            id: movie.id,
            title: movie.title,
            director: director(&crew),
            genres_list: genre_names(&genres),
            genres,
            keywords,
            cast,
            crew,
            production_companies,
            production_countries,
            original_language: movie.original_language,
            overview: movie.overview,
            runtime: movie.runtime,
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            popularity: movie.popularity,
            release_date,
            release_year,
            release_month: release_date.month(),
            budget,
            revenue,
            profit: revenue - budget,
            roi: roi_pct(budget, revenue),
        });
    }

    report.retained_rows = rows.len();
    info!(
        joined = report.joined_rows,
        retained = report.retained_rows,
        missing_date = report.dropped_missing_release_date,
        invalid_date = report.dropped_invalid_release_date,
        invalid_amounts = report.dropped_invalid_amounts,
        before_min_year = report.dropped_before_min_year,
        malformed_fields = report.malformed_structured_fields,
        "Preparation complete"
    );

    (MovieTable::from_rows(rows), report)
}

/// Inner join keeping movie order; a movie with several credit rows appears
/// once per match.
fn join(movies: Vec<RawMovie>, credits: Vec<RawCredit>) -> Vec<(RawMovie, RawCredit)> {
    let mut by_movie: HashMap<i64, Vec<RawCredit>> = HashMap::new();
    for credit in credits {
        by_movie.entry(credit.movie_id).or_default().push(credit);
    }

    let mut joined = Vec::with_capacity(movies.len());
    for movie in movies {
        let Some(matches) = by_movie.get(&movie.id) else {
            continue;
        };
        for credit in matches {
            joined.push((movie.clone(), credit.clone()));
        }
    }
    joined
}

/// Best-effort list decode that tallies fallbacks into `malformed`.
fn decode<T: DeserializeOwned>(raw: Option<&str>, malformed: &mut usize) -> Vec<T> {
    try_parse_list(raw).unwrap_or_else(|| {
        *malformed += 1;
        Vec::new()
    })
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

fn parse_release_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}
