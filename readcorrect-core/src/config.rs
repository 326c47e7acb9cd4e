use std::fmt::{self, Display};
use std::str::FromStr;

/// Minimum mappability for a bin to count as ideal.
pub const DEFAULT_MAPPABILITY_THRESHOLD: f64 = 0.9;
/// Degree used when the polynomial strategy is selected.
pub const DEFAULT_POLYNOMIAL_DEGREE: usize = 2;

/// Curve-fitting family used for both the GC and the mappability fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmoothingStrategy {
    /// Locally weighted regression; corrections are undefined outside the
    /// fitted domain.
    #[default]
    LocalRegression,
    /// Least-squares polynomial; defined over the whole axis.
    Polynomial,
}

impl FromStr for SmoothingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local-regression" | "lowess" => Ok(SmoothingStrategy::LocalRegression),
            "polynomial" => Ok(SmoothingStrategy::Polynomial),
            _ => Err(format!("unknown smoothing strategy: {}", s)),
        }
    }
}

impl Display for SmoothingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmoothingStrategy::LocalRegression => write!(f, "local-regression"),
            SmoothingStrategy::Polynomial => write!(f, "polynomial"),
        }
    }
}

///
/// Explicit configuration for one correction run.
///
/// Built once at the CLI boundary and passed down; components take no
/// configuration from any other channel.
///
#[derive(Debug, Clone)]
pub struct CorrectionConfig {
    pub mappability_threshold: f64,
    pub strategy: SmoothingStrategy,
    pub polynomial_degree: usize,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        CorrectionConfig {
            mappability_threshold: DEFAULT_MAPPABILITY_THRESHOLD,
            strategy: SmoothingStrategy::default(),
            polynomial_degree: DEFAULT_POLYNOMIAL_DEGREE,
        }
    }
}
