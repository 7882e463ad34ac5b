use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::analyzers::types::{DirectorGroup, DirectorRoi, DirectorUplift, GroupRoi};
use crate::config::AnalysisConfig;
use crate::prepare::{Movie, MovieTable};
use crate::stats::{mean, median, uplift_pct};

fn large_budget<'a>(
    table: &'a MovieTable,
    config: &'a AnalysisConfig,
) -> impl Iterator<Item = &'a Movie> {
    table.iter().filter(|m| m.budget > config.high_budget_min)
}

/// Directors of large-budget films ranked by median ROI, best first.
///
/// Films without a director are skipped, null ROIs are ignored, and a
/// director with no defined ROI at all is left out.
pub fn top_directors_by_roi(table: &MovieTable, config: &AnalysisConfig) -> Vec<DirectorRoi> {
    let mut rois: HashMap<&str, Vec<f64>> = HashMap::new();
    for movie in large_budget(table, config) {
        let Some(director) = movie.director.as_deref() else {
            continue;
        };
        let entry = rois.entry(director).or_default();
        if let Some(roi) = movie.roi {
            entry.push(roi);
        }
    }

    let mut ranking: Vec<DirectorRoi> = rois
        .into_iter()
        .filter_map(|(director, values)| {
            Some(DirectorRoi {
                director: director.to_string(),
                median_roi: median(&values)?,
                films: values.len(),
            })
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.median_roi
            .total_cmp(&a.median_roi)
            .then_with(|| a.director.cmp(&b.director))
    });
    ranking.truncate(config.director_ranking_size);
    ranking
}

/// Directors whose best-grossing film, across the whole table, clears the
/// top-director revenue bar.
pub fn top_directors<'a>(table: &'a MovieTable, config: &AnalysisConfig) -> HashSet<&'a str> {
    let mut best: HashMap<&str, f64> = HashMap::new();
    for movie in table {
        if let Some(director) = movie.director.as_deref() {
            let max = best.entry(director).or_insert(f64::NEG_INFINITY);
            *max = max.max(movie.revenue);
        }
    }

    best.into_iter()
        .filter(|(_, revenue)| *revenue > config.top_director_min_revenue)
        .map(|(director, _)| director)
        .collect()
}

/// Labels a film by its director. Films without a director are `Other`.
pub fn classify(director: Option<&str>, top: &HashSet<&str>) -> DirectorGroup {
    match director {
        Some(name) if top.contains(name) => DirectorGroup::Top,
        _ => DirectorGroup::Other,
    }
}

/// Compares mean ROI of large-budget films made by top directors against
/// everyone else.
pub fn top_director_uplift(table: &MovieTable, config: &AnalysisConfig) -> DirectorUplift {
    let top = top_directors(table, config);

    let mut films: HashMap<DirectorGroup, usize> = HashMap::new();
    let mut rois: HashMap<DirectorGroup, Vec<f64>> = HashMap::new();
    for movie in large_budget(table, config) {
        let group = classify(movie.director.as_deref(), &top);
        *films.entry(group).or_default() += 1;
        if let Some(roi) = movie.roi {
            rois.entry(group).or_default().push(roi);
        }
    }

    let group_roi = |group: DirectorGroup| GroupRoi {
        group,
        films: films.get(&group).copied().unwrap_or(0),
        mean_roi: rois.get(&group).and_then(|values| mean(values)),
    };
    let top_group = group_roi(DirectorGroup::Top);
    let other_group = group_roi(DirectorGroup::Other);

    let uplift = match (top_group.mean_roi, other_group.mean_roi) {
        (Some(top_mean), Some(other_mean)) => uplift_pct(top_mean, other_mean),
        _ => None,
    };
    if uplift.is_none() {
        warn!(
            top_films = top_group.films,
            other_films = other_group.films,
            "Top-director uplift is undefined"
        );
    }

    DirectorUplift {
        top_directors: top.len(),
        top: top_group,
        other: other_group,
        uplift_pct: uplift,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::film;

    #[test]
    fn test_top_director_threshold() {
        let table = MovieTable::from_rows(vec![
            film(1, 2000, 50_000_000.0, 600_000_000.0, Some("Hitmaker"), &[]),
            film(2, 2001, 150_000_000.0, 90_000_000.0, Some("Hitmaker"), &[]),
            film(3, 2000, 50_000_000.0, 499_999_999.0, Some("Almost"), &[]),
            film(4, 2001, 150_000_000.0, 300_000_000.0, Some("Almost"), &[]),
        ]);
        let config = AnalysisConfig::default();

        let top = top_directors(&table, &config);
        assert!(top.contains("Hitmaker"));
        assert!(!top.contains("Almost"));

        // every film of a top director is labeled top, even the flop
        for movie in &table {
            let expected = match movie.director.as_deref() {
                Some("Hitmaker") => DirectorGroup::Top,
                _ => DirectorGroup::Other,
            };
            assert_eq!(classify(movie.director.as_deref(), &top), expected);
        }
        assert_eq!(classify(None, &top), DirectorGroup::Other);
    }

    #[test]
    fn test_uplift_between_groups() {
        let table = MovieTable::from_rows(vec![
            // makes "A" a top director; not large-budget itself
            film(1, 2000, 90_000_000.0, 700_000_000.0, Some("A"), &[]),
            // ROI 200%
            film(2, 2001, 200_000_000.0, 600_000_000.0, Some("A"), &[]),
            // ROI 100%
            film(3, 2001, 200_000_000.0, 400_000_000.0, Some("B"), &[]),
            // ROI 0%, no director
            film(4, 2002, 200_000_000.0, 200_000_000.0, None, &[]),
        ]);

        let uplift = top_director_uplift(&table, &AnalysisConfig::default());

        assert_eq!(uplift.top_directors, 1);
        assert_eq!(uplift.top.films, 1);
        assert_eq!(uplift.top.mean_roi, Some(200.0));
        assert_eq!(uplift.other.films, 2);
        assert_eq!(uplift.other.mean_roi, Some(50.0));
        assert_eq!(uplift.uplift_pct, Some(300.0));
    }

    #[test]
    fn test_uplift_with_empty_group_is_undefined() {
        let table = MovieTable::from_rows(vec![film(
            1,
            2000,
            200_000_000.0,
            300_000_000.0,
            Some("Solo"),
            &[],
        )]);

        let uplift = top_director_uplift(&table, &AnalysisConfig::default());
        assert_eq!(uplift.top.films, 0);
        assert_eq!(uplift.top.mean_roi, None);
        assert_eq!(uplift.uplift_pct, None);
    }

    #[test]
    fn test_ranking_takes_median_and_limits() {
        let mut rows = vec![
            // "Mid": ROIs 10%, 50%, 90% -> median 50%
            film(1, 2000, 200_000_000.0, 220_000_000.0, Some("Mid"), &[]),
            film(2, 2000, 200_000_000.0, 300_000_000.0, Some("Mid"), &[]),
            film(3, 2000, 200_000_000.0, 380_000_000.0, Some("Mid"), &[]),
            // below the budget floor, ignored
            film(4, 2000, 100_000_000.0, 900_000_000.0, Some("Mid"), &[]),
            // no director, ignored
            film(5, 2000, 200_000_000.0, 2_000_000_000.0, None, &[]),
        ];
        for (i, name) in ["D1", "D2", "D3", "D4", "D5"].iter().enumerate() {
            // ROI 100% .. 500%
            let revenue = 200_000_000.0 * (i as f64 + 2.0);
            rows.push(film(10 + i as i64, 2001, 200_000_000.0, revenue, Some(*name), &[]));
        }
        let table = MovieTable::from_rows(rows);

        let ranking = top_directors_by_roi(&table, &AnalysisConfig::default());
        let names: Vec<&str> = ranking.iter().map(|d| d.director.as_str()).collect();
        assert_eq!(names, vec!["D5", "D4", "D3", "D2", "D1"]);
        assert_eq!(ranking[0].median_roi, 500.0);

        let config = AnalysisConfig {
            director_ranking_size: 10,
            ..AnalysisConfig::default()
        };
        let ranking = top_directors_by_roi(&table, &config);
        let mid = ranking.iter().find(|d| d.director == "Mid").unwrap();
        assert!((mid.median_roi - 50.0).abs() < 1e-9);
        assert_eq!(mid.films, 3);
        assert_eq!(ranking.last().unwrap().director, "Mid");
    }

    #[test]
    fn test_ranking_drops_director_without_defined_roi() {
        let mut no_roi = film(1, 2000, 200_000_000.0, 300_000_000.0, Some("Ghost"), &[]);
        no_roi.roi = None;
        let table = MovieTable::from_rows(vec![
            no_roi,
            film(2, 2000, 200_000_000.0, 300_000_000.0, Some("Real"), &[]),
        ]);

        let ranking = top_directors_by_roi(&table, &AnalysisConfig::default());
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].director, "Real");
    }
}
