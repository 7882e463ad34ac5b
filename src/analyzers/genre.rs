use std::collections::HashMap;

use crate::analyzers::types::GenreParticipation;
use crate::config::AnalysisConfig;
use crate::prepare::{Movie, MovieTable};
use crate::stats::pct;

/// Counts genre occurrences; a film with N genres adds to N counts.
pub fn genre_counts<'a>(movies: impl IntoIterator<Item = &'a Movie>) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for movie in movies {
        for genre in &movie.genres_list {
            *counts.entry(genre.as_str()).or_default() += 1;
        }
    }
    counts
}

/// Per genre, the share of mid-budget films whose ROI beats the cut.
///
/// Only genres with at least one high-ROI film are reported, most high-ROI
/// films first, ties broken by genre name.
pub fn genre_roi_participation(
    table: &MovieTable,
    config: &AnalysisConfig,
) -> Vec<GenreParticipation> {
    let in_band: Vec<&Movie> = table
        .iter()
        .filter(|m| {
            m.budget >= config.genre_band_min_budget && m.budget < config.genre_band_max_budget
        })
        .collect();

    let band_counts = genre_counts(in_band.iter().copied());
    let high_roi_counts = genre_counts(
        in_band
            .iter()
            .copied()
            .filter(|m| m.roi.is_some_and(|roi| roi > config.genre_min_roi)),
    );

    let mut participation: Vec<GenreParticipation> = high_roi_counts
        .into_iter()
        .map(|(genre, high_roi_films)| {
            let films_in_band = band_counts.get(genre).copied().unwrap_or(high_roi_films);
            GenreParticipation {
                genre: genre.to_string(),
                films_in_band,
                high_roi_films,
                percentage: pct(high_roi_films, films_in_band),
            }
        })
        .collect();

    participation.sort_by(|a, b| {
        b.high_roi_films
            .cmp(&a.high_roi_films)
            .then_with(|| a.genre.cmp(&b.genre))
    });
    participation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::film;

    fn find<'a>(rows: &'a [GenreParticipation], genre: &str) -> Option<&'a GenreParticipation> {
        rows.iter().find(|p| p.genre == genre)
    }

    #[test]
    fn test_participation_matches_manual_counts() {
        let table = MovieTable::from_rows(vec![
            // ROI 50%
            film(1, 2000, 40_000_000.0, 60_000_000.0, None, &["Action", "Comedy"]),
            // ROI 10%
            film(2, 2000, 50_000_000.0, 55_000_000.0, None, &["Action"]),
            // ROI 100%
            film(3, 2000, 30_000_000.0, 60_000_000.0, None, &["Comedy", "Drama"]),
            // ROI -50%
            film(4, 2000, 99_999_999.0, 49_999_999.5, None, &["Drama", "Action"]),
            // outside the band on both ends
            film(5, 2000, 29_999_999.0, 90_000_000.0, None, &["Horror"]),
            film(6, 2000, 100_000_000.0, 900_000_000.0, None, &["Action"]),
        ]);

        let rows = genre_roi_participation(&table, &AnalysisConfig::default());

        // Action: films 1, 2, 4 in band, only film 1 above 20%
        let action = find(&rows, "Action").unwrap();
        assert_eq!((action.films_in_band, action.high_roi_films), (3, 1));
        assert!((action.percentage - 100.0 / 3.0).abs() < 1e-9);

        // Comedy: films 1, 3 in band, both above 20%
        let comedy = find(&rows, "Comedy").unwrap();
        assert_eq!((comedy.films_in_band, comedy.high_roi_films), (2, 2));
        assert_eq!(comedy.percentage, 100.0);

        // Drama: films 3, 4 in band, film 3 above 20%
        let drama = find(&rows, "Drama").unwrap();
        assert_eq!((drama.films_in_band, drama.high_roi_films), (2, 1));
        assert_eq!(drama.percentage, 50.0);

        assert!(find(&rows, "Horror").is_none());

        let order: Vec<&str> = rows.iter().map(|p| p.genre.as_str()).collect();
        assert_eq!(order, vec!["Comedy", "Action", "Drama"]);
    }

    #[test]
    fn test_roi_exactly_at_cut_is_not_high() {
        let table = MovieTable::from_rows(vec![film(
            1,
            2000,
            50_000_000.0,
            60_000_000.0,
            None,
            &["Family"],
        )]);

        let rows = genre_roi_participation(&table, &AnalysisConfig::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_genre_counts_counts_each_genre() {
        let movies = vec![
            film(1, 2000, 1.0, 1.0, None, &["A", "B"]),
            film(2, 2000, 1.0, 1.0, None, &["B"]),
        ];
        let counts = genre_counts(&movies);
        assert_eq!(counts.get("A"), Some(&1));
        assert_eq!(counts.get("B"), Some(&2));
    }
}
