use std::collections::BTreeMap;
use tracing::warn;

use crate::analyzers::types::{AnnualTotal, GrowthRate, Metric};
use crate::prepare::{Movie, MovieTable};
use crate::stats::cagr;

fn metric_value(movie: &Movie, metric: Metric) -> f64 {
    match metric {
        Metric::Budget => movie.budget,
        Metric::Revenue => movie.revenue,
    }
}

/// Sums `metric` per release year, ascending.
pub fn annual_totals(table: &MovieTable, metric: Metric) -> Vec<AnnualTotal> {
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
    for movie in table {
        *totals.entry(movie.release_year).or_default() += metric_value(movie, metric);
    }

    totals
        .into_iter()
        .map(|(year, total)| AnnualTotal { year, total })
        .collect()
}

/// Compound annual growth between the first and last year's totals, using
/// the number of distinct years as the period count.
pub fn annual_growth(table: &MovieTable, metric: Metric) -> GrowthRate {
    let annual_totals = annual_totals(table, metric);
    let years = annual_totals.len();

    let rate = match (annual_totals.first(), annual_totals.last()) {
        (Some(first), Some(last)) => cagr(first.total, last.total, years),
        _ => None,
    };
    if rate.is_none() {
        warn!(%metric, years, "Growth rate is undefined");
    }

    GrowthRate {
        metric,
        years,
        cagr: rate,
        annual_totals,
    }
}
