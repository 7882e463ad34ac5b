//! Rendering of analysis results to standard output.
//!
//! Text mode prints one human-readable line per statistic; JSON mode prints
//! the same result values pretty-printed.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

use crate::analyzers::types::{
    AnalysisReport, BreakoutSummary, DirectorRoi, DirectorUplift, GenreParticipation, GrowthRate,
};
use crate::prepare::PrepReport;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Writes `value` as pretty-printed JSON followed by a newline.
pub fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "undefined".to_string(),
    }
}

pub fn write_prep_report(out: &mut impl Write, report: &PrepReport) -> Result<()> {
    writeln!(out, "Movies loaded: {}", report.movies_loaded)?;
    writeln!(out, "Credits loaded: {}", report.credits_loaded)?;
    writeln!(out, "Joined rows: {}", report.joined_rows)?;
    writeln!(
        out,
        "Runtimes imputed: {} (median {})",
        report.imputed_runtimes,
        fmt_opt(report.median_runtime, 1)
    )?;
    writeln!(
        out,
        "Dropped (missing release date): {}",
        report.dropped_missing_release_date
    )?;
    writeln!(
        out,
        "Dropped (invalid release date): {}",
        report.dropped_invalid_release_date
    )?;
    writeln!(
        out,
        "Dropped (budget or revenue too low): {}",
        report.dropped_invalid_amounts
    )?;
    writeln!(out, "Dropped (released too early): {}", report.dropped_before_min_year)?;
    writeln!(
        out,
        "Structured fields replaced by empty lists: {}",
        report.malformed_structured_fields
    )?;
    writeln!(out, "Rows retained: {}", report.retained_rows)?;
    Ok(())
}

pub fn write_breakout(out: &mut impl Write, summary: &BreakoutSummary) -> Result<()> {
    writeln!(out, "Breakout films: {}", summary.count)?;
    writeln!(
        out,
        "Breakout film share: {:.2}% of {} films",
        summary.percentage, summary.total
    )?;
    Ok(())
}

pub fn write_growth(out: &mut impl Write, growth: &GrowthRate) -> Result<()> {
    let span = match (growth.annual_totals.first(), growth.annual_totals.last()) {
        (Some(first), Some(last)) => format!("{}-{}", first.year, last.year),
        _ => "no data".to_string(),
    };
    writeln!(
        out,
        "{} CAGR: {} ({}, {} years)",
        growth.metric,
        fmt_opt(growth.cagr, 6),
        span,
        growth.years
    )?;
    Ok(())
}

pub fn write_genre_participation(
    out: &mut impl Write,
    participation: &[GenreParticipation],
) -> Result<()> {
    if participation.is_empty() {
        writeln!(out, "No mid-budget genre reached the ROI cut")?;
    }
    for p in participation {
        writeln!(
            out,
            "{} films with ROI above the cut: {:.2}% ({} of {})",
            p.genre, p.percentage, p.high_roi_films, p.films_in_band
        )?;
    }
    Ok(())
}

pub fn write_director_ranking(out: &mut impl Write, ranking: &[DirectorRoi]) -> Result<()> {
    writeln!(out, "Large-budget directors by median ROI:")?;
    let width = ranking
        .iter()
        .map(|d| d.director.chars().count())
        .max()
        .unwrap_or(0);
    for d in ranking {
        writeln!(
            out,
            "  {:<width$}  {:>10.2}%  ({} films)",
            d.director, d.median_roi, d.films
        )?;
    }
    Ok(())
}

pub fn write_uplift(out: &mut impl Write, uplift: &DirectorUplift) -> Result<()> {
    writeln!(
        out,
        "{} mean ROI on large budgets: {}% ({} films)",
        uplift.top.group,
        fmt_opt(uplift.top.mean_roi, 2),
        uplift.top.films
    )?;
    writeln!(
        out,
        "{} mean ROI on large budgets: {}% ({} films)",
        uplift.other.group,
        fmt_opt(uplift.other.mean_roi, 2),
        uplift.other.films
    )?;
    writeln!(
        out,
        "Top director ROI uplift on large budgets: {}%",
        fmt_opt(uplift.uplift_pct, 2)
    )?;
    Ok(())
}

pub fn write_report(out: &mut impl Write, report: &AnalysisReport) -> Result<()> {
    write_breakout(out, &report.breakout)?;
    write_growth(out, &report.budget_growth)?;
    write_growth(out, &report.revenue_growth)?;
    write_genre_participation(out, &report.genre_participation)?;
    write_director_ranking(out, &report.director_ranking)?;
    write_uplift(out, &report.director_uplift)?;
    Ok(())
}
