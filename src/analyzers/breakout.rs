use crate::analyzers::types::BreakoutSummary;
use crate::config::AnalysisConfig;
use crate::prepare::MovieTable;
use crate::stats::pct;

/// Counts films under the breakout budget cap that beat the revenue bar,
/// relative to the whole table.
pub fn breakout_ratio(table: &MovieTable, config: &AnalysisConfig) -> BreakoutSummary {
    let count = table
        .iter()
        .filter(|m| m.budget < config.breakout_max_budget && m.revenue > config.breakout_min_revenue)
        .count();
    let total = table.len();

    BreakoutSummary {
        count,
        total,
        percentage: pct(count, total),
    }
}
