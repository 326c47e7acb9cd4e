use log::{debug, info};

use crate::config::CorrectionConfig;
use crate::errors::{CorrectError, Result};
use crate::models::{ClassifiedBin, CorrectedBin};
use crate::smooth::{fit_gc_curve, fit_map_curve};
use crate::stats::quantile;

/// Fraction of high GC-corrected values excluded from the mappability fit.
const GC_CORRECTED_OUTLIER: f64 = 0.01;

/// Divide, with missing propagation: a missing operand or a zero
/// denominator yields missing. A zero prediction carries no usable scale,
/// so the ratio is reported as missing rather than infinite.
fn ratio_or_missing(numerator: f64, denominator: f64) -> f64 {
    if !numerator.is_finite() || !denominator.is_finite() || denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    }
}

/// log2, defined only for finite positive values; missing otherwise.
fn log2_or_missing(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value.log2()
    } else {
        f64::NAN
    }
}

/// GC correction: fit the configured curve of reads against GC over the
/// ideal bins, then normalize every bin by its predicted count.
///
/// Returns one GC-corrected value per input bin, missing where the bin's
/// GC lies outside the fitted domain (local regression) or the prediction
/// is unusable.
pub fn correct_gc(bins: &[ClassifiedBin], config: &CorrectionConfig) -> Result<Vec<f64>> {
    let (gc, reads): (Vec<f64>, Vec<f64>) = bins
        .iter()
        .filter(|b| b.ideal)
        .map(|b| (b.record.gc, b.record.reads as f64))
        .unzip();
    if gc.is_empty() {
        return Err(CorrectError::EmptySubset { what: "ideal" });
    }

    debug!("fitting GC curve over {} ideal bins", gc.len());
    let curve = fit_gc_curve(&gc, &reads, config)?;

    Ok(bins
        .iter()
        .map(|b| ratio_or_missing(b.record.reads as f64, curve.predict(b.record.gc)))
        .collect())
}

/// Mappability correction over the GC-corrected values.
///
/// The fitting subset trims the top percentile of the GC-corrected values
/// (estimated over valid bins) and everything missing;
/// the fitted curve is then applied to every bin. Returns (cor_map, copy)
/// per bin, where copy is log2 of the mappability-corrected value and
/// missing wherever that value is missing or non-positive.
pub fn correct_map(
    bins: &[ClassifiedBin],
    cor_gc: &[f64],
    config: &CorrectionConfig,
) -> Result<Vec<(f64, f64)>> {
    let sample: Vec<f64> = bins
        .iter()
        .zip(cor_gc)
        .filter(|(b, v)| b.valid && v.is_finite())
        .map(|(_, &v)| v)
        .collect();
    let range_hi = quantile(&sample, 1.0 - GC_CORRECTED_OUTLIER).ok_or(
        CorrectError::EmptySubset {
            what: "GC-corrected valid",
        },
    )?;
    debug!("mappability fit keeps GC-corrected values below {}", range_hi);

    // missing values compare false and drop out of the fitting subset
    let (map, corrected): (Vec<f64>, Vec<f64>) = bins
        .iter()
        .zip(cor_gc)
        .filter(|&(_, &v)| v < range_hi)
        .map(|(b, &v)| (b.record.map, v))
        .unzip();
    let curve = fit_map_curve(&map, &corrected, config)?;

    Ok(bins
        .iter()
        .zip(cor_gc)
        .map(|(b, &v)| {
            let cor_map = ratio_or_missing(v, curve.predict(b.record.map));
            (cor_map, log2_or_missing(cor_map))
        })
        .collect())
}

/// Run both corrections and rebuild the bins with their corrected fields.
pub fn correct(
    bins: Vec<ClassifiedBin>,
    config: &CorrectionConfig,
) -> Result<Vec<CorrectedBin>> {
    let cor_gc = correct_gc(&bins, config)?;
    let cor_map = correct_map(&bins, &cor_gc, config)?;

    info!(
        "corrected {} bins with the {} strategy",
        bins.len(),
        config.strategy
    );

    Ok(bins
        .into_iter()
        .zip(cor_gc)
        .zip(cor_map)
        .map(|((b, cor_gc), (cor_map, copy))| CorrectedBin {
            record: b.record,
            valid: b.valid,
            ideal: b.ideal,
            cor_gc,
            cor_map,
            copy,
        })
        .collect())
}
