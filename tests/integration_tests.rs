use std::path::PathBuf;

use tmdb_roi::analyzers::analyzer::run_all;
use tmdb_roi::analyzers::types::DirectorGroup;
use tmdb_roi::config::AnalysisConfig;
use tmdb_roi::output::{write_json, write_report};
use tmdb_roi::prepare::{MovieTable, PrepReport, prepare_from_paths};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn prepared() -> (MovieTable, PrepReport) {
    prepare_from_paths(
        &fixture("movies.csv"),
        &fixture("credits.csv"),
        &AnalysisConfig::default(),
    )
    .expect("Failed to prepare fixtures")
}

#[test]
fn test_preparation_on_fixtures() {
    let (table, report) = prepared();

    assert_eq!(report.movies_loaded, 11);
    assert_eq!(report.credits_loaded, 11);
    assert_eq!(report.joined_rows, 10);
    assert_eq!(report.median_runtime, Some(105.0));
    assert_eq!(report.imputed_runtimes, 1);
    assert_eq!(report.dropped_missing_release_date, 1);
    assert_eq!(report.dropped_invalid_release_date, 0);
    assert_eq!(report.dropped_invalid_amounts, 1);
    assert_eq!(report.dropped_before_min_year, 1);
    assert_eq!(report.malformed_structured_fields, 1);
    assert_eq!(report.retained_rows, 7);

    let ids: Vec<i64> = table.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![101, 102, 103, 104, 105, 106, 110]);

    for m in &table {
        assert!(m.budget > 1000.0 && m.revenue > 1000.0);
        assert!(m.release_year >= 1960);
        assert_eq!(m.profit, m.revenue - m.budget);
        assert!(m.roi.is_some_and(f64::is_finite));
        assert!(m.runtime.is_some());
    }

    let small = &table.rows()[1];
    assert_eq!(small.title.as_deref(), Some("Small Wonder"));
    assert_eq!(small.runtime, Some(105.0));
    assert_eq!(small.director.as_deref(), Some("Bob Indie"));
    assert_eq!(small.cast[0].name, "Actor 102");
    assert_eq!(small.production_countries[0].iso_3166_1, "US");

    let broken = table.iter().find(|m| m.id == 110).unwrap();
    assert!(broken.genres_list.is_empty());
    assert_eq!(broken.director.as_deref(), Some("Eve Broken"));
}

#[test]
fn test_full_report_on_fixtures() {
    let (table, _) = prepared();
    let report = run_all(&table, &AnalysisConfig::default());

    assert_eq!(report.breakout.count, 1);
    assert_eq!(report.breakout.total, 7);
    assert!((report.breakout.percentage - 100.0 / 7.0).abs() < 1e-9);

    assert_eq!(report.budget_growth.years, 7);
    let budget_cagr = 20f64.powf(1.0 / 7.0) - 1.0;
    assert!((report.budget_growth.cagr.unwrap() - budget_cagr).abs() < 1e-12);
    let revenue_cagr = (100.0f64 / 150.0).powf(1.0 / 7.0) - 1.0;
    assert!((report.revenue_growth.cagr.unwrap() - revenue_cagr).abs() < 1e-12);

    let genres: Vec<(&str, usize, usize)> = report
        .genre_participation
        .iter()
        .map(|p| (p.genre.as_str(), p.high_roi_films, p.films_in_band))
        .collect();
    assert_eq!(genres, vec![("Comedy", 1, 1), ("Drama", 1, 2)]);
    assert_eq!(report.genre_participation[1].percentage, 50.0);

    let ranking: Vec<(&str, f64)> = report
        .director_ranking
        .iter()
        .map(|d| (d.director.as_str(), d.median_roi))
        .collect();
    assert_eq!(ranking, vec![("Alice Top", 225.0), ("Dan Other", 100.0)]);

    let uplift = &report.director_uplift;
    assert_eq!(uplift.top_directors, 1);
    assert_eq!(uplift.top.group, DirectorGroup::Top);
    assert_eq!(uplift.top.films, 2);
    assert_eq!(uplift.top.mean_roi, Some(225.0));
    assert_eq!(uplift.other.mean_roi, Some(100.0));
    assert_eq!(uplift.uplift_pct, Some(125.0));
}

#[test]
fn test_report_renders_text_and_json() {
    let (table, _) = prepared();
    let report = run_all(&table, &AnalysisConfig::default());

    let mut text = Vec::new();
    write_report(&mut text, &report).unwrap();
    let text = String::from_utf8(text).unwrap();
    assert!(text.contains("Breakout films: 1\n"));
    assert!(text.contains("Comedy films with ROI above the cut: 100.00% (1 of 1)"));
    assert!(text.contains("Top director ROI uplift on large budgets: 125.00%"));

    let mut json = Vec::new();
    write_json(&mut json, &report).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(value["breakout"]["count"], 1);
    assert_eq!(value["budget_growth"]["metric"], "budget");
    assert_eq!(value["director_uplift"]["top"]["group"], "Top Director");
}

#[test]
fn test_missing_input_file_is_fatal() {
    let result = prepare_from_paths(
        &fixture("no_such_movies.csv"),
        &fixture("credits.csv"),
        &AnalysisConfig::default(),
    );
    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("no_such_movies.csv"));
}

#[test]
fn test_missing_expected_column_is_fatal() {
    let movies = std::env::temp_dir().join("tmdb_roi_it_sparse_movies.csv");
    std::fs::write(&movies, "id,title,genres\n1,A,[]\n2,B,[]\n").unwrap();

    let result = prepare_from_paths(&movies, &fixture("credits.csv"), &AnalysisConfig::default());
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("Missing expected column"), "{message}");
    assert!(message.contains("release_date"), "{message}");
    assert!(message.contains("budget"), "{message}");

    std::fs::remove_file(&movies).unwrap();
}
