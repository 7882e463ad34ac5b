//! Result types produced by the analyzers.

use serde::Serialize;
use std::fmt;

/// Share of low-budget films that still cleared the revenue bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakoutSummary {
    pub count: usize,
    pub total: usize,
    pub percentage: f64,
}

/// Financial column a growth rate is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Budget,
    Revenue,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Budget => f.write_str("Budget"),
            Metric::Revenue => f.write_str("Revenue"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualTotal {
    pub year: i32,
    pub total: f64,
}

/// Compound annual growth of a metric's yearly totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthRate {
    pub metric: Metric,
    /// Number of distinct release years; used as the compounding period.
    pub years: usize,
    /// `None` when the rate is undefined (no data, zero first-year total).
    pub cagr: Option<f64>,
    /// Ascending by year.
    pub annual_totals: Vec<AnnualTotal>,
}

/// How often a genre's mid-budget films beat the ROI cut.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreParticipation {
    pub genre: String,
    pub films_in_band: usize,
    pub high_roi_films: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectorRoi {
    pub director: String,
    pub median_roi: f64,
    /// Large-budget films with a defined ROI.
    pub films: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DirectorGroup {
    #[serde(rename = "Top Director")]
    Top,
    #[serde(rename = "Other Director")]
    Other,
}

impl fmt::Display for DirectorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectorGroup::Top => f.write_str("Top Director"),
            DirectorGroup::Other => f.write_str("Other Director"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRoi {
    pub group: DirectorGroup,
    pub films: usize,
    pub mean_roi: Option<f64>,
}

/// Mean-ROI comparison of large-budget films by top and other directors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectorUplift {
    pub top_directors: usize,
    pub top: GroupRoi,
    pub other: GroupRoi,
    /// `(top - other) / other * 100`; `None` when either mean is undefined
    /// or the baseline is zero.
    pub uplift_pct: Option<f64>,
}

/// Everything the `report` command prints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub breakout: BreakoutSummary,
    pub budget_growth: GrowthRate,
    pub revenue_growth: GrowthRate,
    pub genre_participation: Vec<GenreParticipation>,
    pub director_ranking: Vec<DirectorRoi>,
    pub director_uplift: DirectorUplift,
}
