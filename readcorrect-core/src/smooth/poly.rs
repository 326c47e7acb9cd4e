use crate::errors::{CorrectError, Result};

/// Least-squares polynomial fit of the given degree.
///
/// Solves the normal equations of the Vandermonde system with Gaussian
/// elimination; returns coefficients in ascending power order. Pairs with
/// a non-finite coordinate are dropped before fitting.
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> Result<Vec<f64>> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect();

    let n = pairs.len();
    let terms = degree + 1;
    if n < terms {
        return Err(CorrectError::NotEnoughPoints {
            context: "polynomial fit",
            got: n,
            need: terms,
        });
    }

    // moments sum(x^p) for p in 0..=2*degree, and sum(y * x^p)
    let mut moments = vec![0.0; 2 * degree + 1];
    let mut rhs = vec![0.0; terms];
    for &(xv, yv) in &pairs {
        let mut power = 1.0;
        for (p, moment) in moments.iter_mut().enumerate() {
            *moment += power;
            if p < terms {
                rhs[p] += yv * power;
            }
            power *= xv;
        }
    }

    let mut matrix: Vec<Vec<f64>> = (0..terms)
        .map(|row| (0..terms).map(|col| moments[row + col]).collect())
        .collect();

    solve_in_place(&mut matrix, &mut rhs).ok_or(CorrectError::SingularFit {
        degree,
        points: n,
    })?;

    Ok(rhs)
}

/// Evaluate a polynomial (ascending coefficients) at `x` by Horner's rule.
pub fn polyval(coefs: &[f64], x: f64) -> f64 {
    coefs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Gaussian elimination with partial pivoting; None when singular.
fn solve_in_place(matrix: &mut [Vec<f64>], rhs: &mut [f64]) -> Option<()> {
    let n = rhs.len();
    for col in 0..n {
        let pivot = (col..n).max_by(|&a, &b| {
            matrix[a][col].abs().total_cmp(&matrix[b][col].abs())
        })?;
        if matrix[pivot][col].abs() < 1e-12 {
            return None;
        }
        matrix.swap(col, pivot);
        rhs.swap(col, pivot);

        for row in col + 1..n {
            let factor = matrix[row][col] / matrix[col][col];
            for k in col..n {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }
    for col in (0..n).rev() {
        let mut value = rhs[col];
        for k in col + 1..n {
            value -= matrix[col][k] * rhs[k];
        }
        rhs[col] = value / matrix[col][col];
    }
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::*;

    #[rstest]
    fn test_exact_quadratic_recovery() {
        // y = 2 - 3x + 0.5x^2 sampled without noise
        let xs: Vec<f64> = (0..20).map(|i| i as f64 / 4.0).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 - 3.0 * x + 0.5 * x * x).collect();

        let coefs = polyfit(&xs, &ys, 2).unwrap();
        assert!((coefs[0] - 2.0).abs() < 1e-9);
        assert!((coefs[1] + 3.0).abs() < 1e-9);
        assert!((coefs[2] - 0.5).abs() < 1e-9);
    }

    #[rstest]
    fn test_least_squares_residual_orthogonality() {
        // residuals of the normal-equation solution are orthogonal to
        // 1, x and x^2 -- the defining property of the least-squares fit
        let xs = vec![0.1, 0.3, 0.35, 0.5, 0.62, 0.8, 0.93, 1.1, 1.4];
        let ys = vec![5.0, 9.0, 8.0, 14.0, 11.0, 20.0, 18.0, 25.0, 31.0];

        let coefs = polyfit(&xs, &ys, 2).unwrap();
        for power in 0..=2 {
            let dot: f64 = xs
                .iter()
                .zip(&ys)
                .map(|(&x, &y)| (y - polyval(&coefs, x)) * x.powi(power))
                .sum();
            assert!(
                dot.abs() < 1e-8,
                "residuals not orthogonal to x^{}: {}",
                power,
                dot
            );
        }
    }

    #[rstest]
    fn test_polyval_everywhere_defined() {
        let coefs = vec![1.0, 0.0, 1.0]; // 1 + x^2
        assert_eq!(polyval(&coefs, 10.0), 101.0);
        assert_eq!(polyval(&coefs, -2.0), 5.0);
        assert!(polyval(&coefs, f64::NAN).is_nan());
    }

    #[rstest]
    fn test_degenerate_x_is_singular() {
        let xs = vec![0.5; 5];
        let ys = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let err = polyfit(&xs, &ys, 2).unwrap_err();
        assert!(matches!(err, CorrectError::SingularFit { .. }));
    }

    #[rstest]
    fn test_too_few_points() {
        let err = polyfit(&[1.0, 2.0], &[1.0, 2.0], 2).unwrap_err();
        assert!(matches!(err, CorrectError::NotEnoughPoints { .. }));
    }
}
