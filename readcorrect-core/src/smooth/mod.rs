//! Curve-fitting strategies for the bias corrector.
//!
//! Local regression is the default: lowess over the fitting subset,
//! refined for the GC curve by a resample-and-refit second pass so the
//! correction curve is single-valued and densely defined across the GC
//! domain. The polynomial strategy trades the domain restriction for a
//! fit that is defined everywhere.

pub mod interp;
pub mod lowess;
pub mod poly;

pub use self::interp::Interp1d;
pub use self::lowess::Lowess;

use crate::config::{CorrectionConfig, SmoothingStrategy};
use crate::errors::Result;

/// First-pass neighbourhood fraction for the GC fit.
const GC_FRACTION_FIRST: f64 = 0.03;
/// Second-pass fraction over the resampled grid.
const GC_FRACTION_SECOND: f64 = 0.3;
/// Spacing of the dense resampling grid over the GC axis [0, 1).
const GC_GRID_STEP: f64 = 0.001;
/// Number of grid points covering [0, 1) at the grid spacing above.
const GC_GRID_POINTS: usize = 1000;
/// Neighbourhood fraction for the mappability fit.
const MAP_FRACTION: f64 = 0.66;
/// Anchor spacing for the mappability fit, as a share of the x range.
const MAP_DELTA_SHARE: f64 = 0.01;

/// A fitted smoothing curve, evaluable at arbitrary points.
#[derive(Debug, Clone)]
pub enum FittedCurve {
    /// Linear interpolant over smoothed support points; NaN outside the
    /// fitted domain.
    Interpolated(Interp1d),
    /// Polynomial coefficients in ascending power order; defined
    /// everywhere.
    Polynomial(Vec<f64>),
}

impl FittedCurve {
    /// Predict the smoothed value at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        match self {
            FittedCurve::Interpolated(f) => f.eval(x),
            FittedCurve::Polynomial(coefs) => poly::polyval(coefs, x),
        }
    }
}

/// Fit the read-count-versus-GC curve over the ideal bins.
///
/// Local regression runs in two passes: a tight first pass over the raw
/// pairs, then a linear interpolant resampled on a uniform grid across the
/// GC axis and re-smoothed with a wider fraction. The second pass irons
/// out the non-monotone wiggles the tight fraction leaves behind, and the
/// resampling guarantees support across the whole fitted domain.
pub fn fit_gc_curve(
    gc: &[f64],
    reads: &[f64],
    config: &CorrectionConfig,
) -> Result<FittedCurve> {
    match config.strategy {
        SmoothingStrategy::Polynomial => Ok(FittedCurve::Polynomial(poly::polyfit(
            gc,
            reads,
            config.polynomial_degree,
        )?)),
        SmoothingStrategy::LocalRegression => {
            let first = Lowess {
                fraction: GC_FRACTION_FIRST,
                ..Lowess::default()
            }
            .fit(gc, reads)?;
            let coarse = Interp1d::new(&first)?;

            let grid: Vec<f64> = (0..GC_GRID_POINTS)
                .map(|i| i as f64 * GC_GRID_STEP)
                .collect();
            // out-of-domain grid points resample to NaN and are dropped by
            // the second pass
            let resampled: Vec<f64> = grid.iter().map(|&g| coarse.eval(g)).collect();

            let second = Lowess {
                fraction: GC_FRACTION_SECOND,
                ..Lowess::default()
            }
            .fit(&grid, &resampled)?;
            Ok(FittedCurve::Interpolated(Interp1d::new(&second)?))
        }
    }
}

/// Fit the corrected-reads-versus-mappability curve.
///
/// A single lowess pass; the anchor spacing is set to 1% of the
/// mappability range, which keeps the fit tractable over dense
/// genome-wide inputs.
pub fn fit_map_curve(
    map: &[f64],
    cor_gc: &[f64],
    config: &CorrectionConfig,
) -> Result<FittedCurve> {
    match config.strategy {
        SmoothingStrategy::Polynomial => Ok(FittedCurve::Polynomial(poly::polyfit(
            map,
            cor_gc,
            config.polynomial_degree,
        )?)),
        SmoothingStrategy::LocalRegression => {
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            for (&x, &y) in map.iter().zip(cor_gc) {
                if x.is_finite() && y.is_finite() {
                    lo = lo.min(x);
                    hi = hi.max(x);
                }
            }
            let delta = if hi > lo {
                MAP_DELTA_SHARE * (hi - lo)
            } else {
                0.0
            };

            let pairs = Lowess {
                fraction: MAP_FRACTION,
                delta,
                ..Lowess::default()
            }
            .fit(map, cor_gc)?;
            Ok(FittedCurve::Interpolated(Interp1d::new(&pairs)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::*;

    fn local_regression() -> CorrectionConfig {
        CorrectionConfig {
            strategy: SmoothingStrategy::LocalRegression,
            ..CorrectionConfig::default()
        }
    }

    fn polynomial() -> CorrectionConfig {
        CorrectionConfig {
            strategy: SmoothingStrategy::Polynomial,
            ..CorrectionConfig::default()
        }
    }

    /// A plausible GC/reads sample: coverage rises towards mid GC and
    /// falls off at the extremes.
    fn gc_sample() -> (Vec<f64>, Vec<f64>) {
        let gc: Vec<f64> = (0..200).map(|i| 0.25 + 0.002 * i as f64).collect();
        let reads: Vec<f64> = gc
            .iter()
            .map(|g| 100.0 - 400.0 * (g - 0.45) * (g - 0.45))
            .collect();
        (gc, reads)
    }

    #[rstest]
    fn test_gc_curve_excludes_out_of_domain_queries() {
        let (gc, reads) = gc_sample();
        let curve = fit_gc_curve(&gc, &reads, &local_regression()).unwrap();

        assert!(curve.predict(0.1).is_nan());
        assert!(curve.predict(0.9).is_nan());
        assert!(curve.predict(f64::NAN).is_nan());
        assert!(curve.predict(0.45).is_finite());
    }

    #[rstest]
    fn test_gc_curve_tracks_the_trend() {
        let (gc, reads) = gc_sample();
        let curve = fit_gc_curve(&gc, &reads, &local_regression()).unwrap();

        // the smoothed curve stays close to the generating parabola well
        // inside the domain
        for g in [0.3, 0.4, 0.45, 0.5, 0.6] {
            let expected = 100.0 - 400.0 * (g - 0.45) * (g - 0.45);
            let got = curve.predict(g);
            assert!(
                (got - expected).abs() < 2.0,
                "curve at {} drifted to {} (expected ~{})",
                g,
                got,
                expected
            );
        }
    }

    #[rstest]
    fn test_polynomial_gc_curve_defined_everywhere() {
        let (gc, reads) = gc_sample();
        let curve = fit_gc_curve(&gc, &reads, &polynomial()).unwrap();

        assert!(curve.predict(0.0).is_finite());
        assert!(curve.predict(1.0).is_finite());
        assert!(curve.predict(-5.0).is_finite());
    }

    #[rstest]
    fn test_map_curve_single_support_point() {
        // uniform mappability collapses the fit to one support point
        let map = vec![0.95; 8];
        let cor_gc = vec![1.0, 1.1, 0.9, 1.05, 0.95, 1.0, 1.02, 0.98];
        let curve = fit_map_curve(&map, &cor_gc, &local_regression()).unwrap();

        assert!(curve.predict(0.95).is_finite());
        assert!(curve.predict(0.2).is_nan());
    }

    #[rstest]
    fn test_map_curve_follows_linear_bias() {
        let map: Vec<f64> = (0..100).map(|i| 0.5 + 0.005 * i as f64).collect();
        let cor_gc: Vec<f64> = map.iter().map(|m| 0.4 + 0.6 * m).collect();
        let curve = fit_map_curve(&map, &cor_gc, &local_regression()).unwrap();

        for m in [0.55, 0.7, 0.9] {
            let got = curve.predict(m);
            let expected = 0.4 + 0.6 * m;
            assert!((got - expected).abs() < 1e-6);
        }
    }
}
