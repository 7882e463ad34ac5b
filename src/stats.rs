//! Small numeric helpers shared by preparation and the analyzers.

/// Computes the arithmetic mean. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Computes the median, averaging the two middle values for even lengths.
/// Returns `None` for empty input.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// `part / total` as a percentage; 0.0 when `total` is zero.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Return on investment as a percentage of `budget`.
///
/// `None` when the budget is not positive or the ratio is not finite.
pub fn roi_pct(budget: f64, revenue: f64) -> Option<f64> {
    if budget <= 0.0 {
        return None;
    }
    let roi = (revenue - budget) / budget * 100.0;
    roi.is_finite().then_some(roi)
}

/// Compound growth rate `(end / start)^(1 / periods) - 1`.
///
/// `None` when `start` is zero, `periods` is zero, or the result is not a
/// finite number (e.g. a negative ratio under a fractional power).
pub fn cagr(start: f64, end: f64, periods: usize) -> Option<f64> {
    if start == 0.0 || periods == 0 {
        return None;
    }
    let rate = (end / start).powf(1.0 / periods as f64) - 1.0;
    rate.is_finite().then_some(rate)
}

/// Relative change of `value` over `baseline`, in percent.
///
/// `None` when the baseline is zero or either side is not finite.
pub fn uplift_pct(value: f64, baseline: f64) -> Option<f64> {
    if baseline == 0.0 {
        return None;
    }
    let uplift = (value - baseline) / baseline * 100.0;
    uplift.is_finite().then_some(uplift)
}
