use crate::errors::{CorrectError, Result};
use crate::stats::median_abs;

/// Denominators below this are treated as degenerate and fall back to a
/// weighted mean.
const SINGULAR_EPS: f64 = 1e-12;

///
/// Locally weighted scatterplot smoothing (lowess).
///
/// For each sample point, the nearest `fraction * n` neighbours are fitted
/// with a tricube-weighted linear regression and the fit is evaluated at
/// the point. `iterations` bisquare reweightings damp outliers after the
/// initial pass. When `delta > 0`, points closer than `delta` to the last
/// anchor are not refitted; their values are linearly interpolated between
/// anchors, which keeps dense inputs tractable.
///
#[derive(Debug, Clone)]
pub struct Lowess {
    /// Fraction of the sample in each local neighbourhood.
    pub fraction: f64,
    /// Number of robustness reweightings after the initial fit.
    pub iterations: usize,
    /// Anchor spacing for the interpolation short-cut; 0 fits every point.
    pub delta: f64,
}

impl Default for Lowess {
    fn default() -> Self {
        Lowess {
            fraction: 2.0 / 3.0,
            iterations: 3,
            delta: 0.0,
        }
    }
}

impl Lowess {
    /// Smooth `y` as a function of `x`.
    ///
    /// Pairs with a non-finite coordinate are dropped. Returns the
    /// x-sorted sequence of (x, fitted) pairs covering every retained
    /// sample point; ties in x receive identical fits.
    pub fn fit(&self, x: &[f64], y: &[f64]) -> Result<Vec<(f64, f64)>> {
        let mut pairs: Vec<(f64, f64)> = x
            .iter()
            .zip(y)
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .map(|(&a, &b)| (a, b))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let n = pairs.len();
        if n < 2 {
            return Err(CorrectError::NotEnoughPoints {
                context: "lowess smoothing",
                got: n,
                need: 2,
            });
        }

        let xs: Vec<f64> = pairs.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
        let k = ((self.fraction * n as f64).ceil() as usize).clamp(2, n);

        let mut robustness = vec![1.0; n];
        let mut fitted = vec![0.0; n];
        for iteration in 0..=self.iterations {
            self.smooth_pass(&xs, &ys, &robustness, k, &mut fitted);
            if iteration == self.iterations {
                break;
            }
            if !update_robustness(&ys, &fitted, &mut robustness) {
                break;
            }
        }

        Ok(xs.into_iter().zip(fitted).collect())
    }

    /// One full pass over the sorted sample, honouring `delta`.
    fn smooth_pass(
        &self,
        xs: &[f64],
        ys: &[f64],
        robustness: &[f64],
        k: usize,
        fitted: &mut [f64],
    ) {
        let n = xs.len();
        let mut window_lo = 0;

        fitted[0] = fit_local(xs, ys, robustness, k, 0, &mut window_lo);
        let mut anchor = 0;
        for i in 1..n {
            if i < n - 1 && xs[i] - xs[anchor] < self.delta {
                continue;
            }
            fitted[i] = fit_local(xs, ys, robustness, k, i, &mut window_lo);
            if i > anchor + 1 {
                interpolate_between(xs, fitted, anchor, i);
            }
            anchor = i;
        }
    }
}

/// Fit the local regression at sample index `query`, sliding the k-wide
/// window right as long as the next point is closer than the leftmost.
fn fit_local(
    xs: &[f64],
    ys: &[f64],
    robustness: &[f64],
    k: usize,
    query: usize,
    window_lo: &mut usize,
) -> f64 {
    let n = xs.len();
    let x0 = xs[query];

    while *window_lo + k < n && xs[*window_lo + k] - x0 < x0 - xs[*window_lo] {
        *window_lo += 1;
    }
    let lo = *window_lo;
    let hi = lo + k;

    let max_dist = (x0 - xs[lo]).max(xs[hi - 1] - x0);
    if max_dist <= 0.0 {
        // the whole neighbourhood sits on one x; average it
        return weighted_mean(&ys[lo..hi], &robustness[lo..hi]);
    }

    let mut sum_w = 0.0;
    let mut sum_wx = 0.0;
    let mut sum_wy = 0.0;
    let mut sum_wxx = 0.0;
    let mut sum_wxy = 0.0;
    for j in lo..hi {
        let u = (xs[j] - x0).abs() / max_dist;
        if u >= 1.0 {
            continue;
        }
        let t = 1.0 - u * u * u;
        let w = robustness[j] * t * t * t;
        sum_w += w;
        sum_wx += w * xs[j];
        sum_wy += w * ys[j];
        sum_wxx += w * xs[j] * xs[j];
        sum_wxy += w * xs[j] * ys[j];
    }
    if sum_w <= 0.0 {
        return weighted_mean(&ys[lo..hi], &robustness[lo..hi]);
    }

    let denom = sum_w * sum_wxx - sum_wx * sum_wx;
    if denom.abs() < SINGULAR_EPS {
        return sum_wy / sum_w;
    }
    let slope = (sum_w * sum_wxy - sum_wx * sum_wy) / denom;
    let intercept = (sum_wy - slope * sum_wx) / sum_w;

    slope * x0 + intercept
}

fn weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    let sum_w: f64 = weights.iter().sum();
    if sum_w <= 0.0 {
        return values.iter().sum::<f64>() / values.len() as f64;
    }
    values
        .iter()
        .zip(weights)
        .map(|(v, w)| v * w)
        .sum::<f64>()
        / sum_w
}

/// Linearly fill the fits skipped between two anchors.
fn interpolate_between(xs: &[f64], fitted: &mut [f64], lo: usize, hi: usize) {
    let span = xs[hi] - xs[lo];
    for j in lo + 1..hi {
        fitted[j] = if span > 0.0 {
            let t = (xs[j] - xs[lo]) / span;
            fitted[lo] + t * (fitted[hi] - fitted[lo])
        } else {
            fitted[lo]
        };
    }
}

/// Bisquare reweighting from the current residuals. Returns false when the
/// fit is already tight enough that reweighting would be a no-op.
fn update_robustness(ys: &[f64], fitted: &[f64], robustness: &mut [f64]) -> bool {
    let residuals: Vec<f64> = ys.iter().zip(fitted).map(|(y, f)| y - f).collect();
    let scale = match median_abs(&residuals) {
        Some(s) if s > SINGULAR_EPS => s,
        _ => return false,
    };
    for (w, r) in robustness.iter_mut().zip(&residuals) {
        let u = r.abs() / (6.0 * scale);
        *w = if u >= 1.0 {
            0.0
        } else {
            let t = 1.0 - u * u;
            t * t
        };
    }
    true
}
