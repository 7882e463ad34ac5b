use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Numeric thresholds used by preparation and every analysis.
///
/// Can be overridden from a JSON file; any key left out keeps its default:
/// ```json
/// {
///   "breakout_max_budget": 15000000,
///   "top_director_min_revenue": 750000000
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Budgets and revenues at or below this are treated as missing.
    pub min_valid_amount: f64,
    /// Films released before this year are dropped.
    pub min_release_year: i32,

    pub breakout_max_budget: f64,
    pub breakout_min_revenue: f64,

    /// Inclusive lower bound of the mid-budget band.
    pub genre_band_min_budget: f64,
    /// Exclusive upper bound of the mid-budget band.
    pub genre_band_max_budget: f64,
    /// ROI percentage a film must exceed to count as high-return.
    pub genre_min_roi: f64,

    /// Films with a budget strictly above this are "large-budget".
    pub high_budget_min: f64,
    pub top_director_min_revenue: f64,
    pub director_ranking_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_valid_amount: 1_000.0,
            min_release_year: 1960,
            breakout_max_budget: 20_000_000.0,
            breakout_min_revenue: 100_000_000.0,
            genre_band_min_budget: 30_000_000.0,
            genre_band_max_budget: 100_000_000.0,
            genre_min_roi: 20.0,
            high_budget_min: 100_000_000.0,
            top_director_min_revenue: 500_000_000.0,
            director_ranking_size: 5,
        }
    }
}

impl AnalysisConfig {
    /// Loads overrides from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read thresholds file '{}'", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid thresholds file '{}'", path.display()))?;
        Ok(config)
    }

    /// Uses the file at `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
