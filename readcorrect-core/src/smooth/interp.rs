use crate::errors::{CorrectError, Result};

///
/// Piecewise-linear interpolant over a set of (x, y) support points.
///
/// Queries outside the support domain return NaN — bins whose GC or
/// mappability falls outside the fitted domain receive no correction, by
/// design of the local-regression strategy. Ties in x are collapsed by
/// averaging their y values so the interpolant is single-valued.
///
#[derive(Debug, Clone)]
pub struct Interp1d {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Interp1d {
    /// Build an interpolant from (x, y) pairs.
    ///
    /// Pairs with a non-finite coordinate are dropped; at least one usable
    /// pair must remain. The input does not need to be sorted.
    pub fn new(pairs: &[(f64, f64)]) -> Result<Self> {
        let mut pairs: Vec<(f64, f64)> = pairs
            .iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .copied()
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        if pairs.is_empty() {
            return Err(CorrectError::NotEnoughPoints {
                context: "interpolation",
                got: 0,
                need: 1,
            });
        }

        let mut xs: Vec<f64> = Vec::with_capacity(pairs.len());
        let mut ys: Vec<f64> = Vec::with_capacity(pairs.len());
        let mut i = 0;
        while i < pairs.len() {
            let x = pairs[i].0;
            let mut sum = 0.0;
            let mut count = 0;
            while i < pairs.len() && pairs[i].0 == x {
                sum += pairs[i].1;
                count += 1;
                i += 1;
            }
            xs.push(x);
            ys.push(sum / count as f64);
        }

        Ok(Interp1d { xs, ys })
    }

    /// The closed interval the interpolant is defined on.
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Evaluate at `x`; NaN for non-finite or out-of-domain queries.
    pub fn eval(&self, x: f64) -> f64 {
        if !x.is_finite() {
            return f64::NAN;
        }
        let (lo, hi) = self.domain();
        if x < lo || x > hi {
            return f64::NAN;
        }
        // index of the first support point >= x
        let idx = self.xs.partition_point(|&p| p < x);
        if self.xs[idx] == x {
            return self.ys[idx];
        }
        let (x0, x1) = (self.xs[idx - 1], self.xs[idx]);
        let (y0, y1) = (self.ys[idx - 1], self.ys[idx]);
        y0 + (x - x0) / (x1 - x0) * (y1 - y0)
    }
}
