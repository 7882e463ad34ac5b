use tracing::info;

use crate::analyzers::breakout::breakout_ratio;
use crate::analyzers::director::{top_director_uplift, top_directors_by_roi};
use crate::analyzers::genre::genre_roi_participation;
use crate::analyzers::growth::annual_growth;
use crate::analyzers::types::{AnalysisReport, Metric};
use crate::config::AnalysisConfig;
use crate::prepare::MovieTable;

/// Runs every analysis over `table`.
#[tracing::instrument(skip_all, fields(rows = table.len()))]
pub fn run_all(table: &MovieTable, config: &AnalysisConfig) -> AnalysisReport {
    let report = AnalysisReport {
        breakout: breakout_ratio(table, config),
        budget_growth: annual_growth(table, Metric::Budget),
        revenue_growth: annual_growth(table, Metric::Revenue),
        genre_participation: genre_roi_participation(table, config),
        director_ranking: top_directors_by_roi(table, config),
        director_uplift: top_director_uplift(table, config),
    };

    info!(
        breakouts = report.breakout.count,
        genres = report.genre_participation.len(),
        ranked_directors = report.director_ranking.len(),
        "Analysis complete"
    );
    report
}
