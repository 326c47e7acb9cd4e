//! Small statistical helpers shared by the classifier and the corrector.

/// Type-7 quantile: linear interpolation between order statistics at
/// position `q * (n - 1)` on the sorted sample.
///
/// This is the estimator the whole pipeline is calibrated against; other
/// quantile conventions shift the ideal-bin thresholds and every fit
/// downstream of them. Returns `None` on an empty sample.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(quantile_sorted(&sorted, q))
}

/// Same as [quantile] over an already-sorted, non-empty sample.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let base = pos.floor() as usize;
    let rest = pos - base as f64;
    if base + 1 < sorted.len() {
        sorted[base] + rest * (sorted[base + 1] - sorted[base])
    } else {
        sorted[base]
    }
}

/// Median absolute value, used for the robustness reweighting in lowess.
pub fn median_abs(values: &[f64]) -> Option<f64> {
    let abs: Vec<f64> = values.iter().map(|v| v.abs()).collect();
    quantile(&abs, 0.5)
}
