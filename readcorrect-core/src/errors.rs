use thiserror::Error;

/// Error type for the correction pipeline.
#[derive(Error, Debug)]
pub enum CorrectError {
    /// The three input tracks have different bin counts.
    #[error("input tracks differ in length: reads={reads}, map={map}, gc={gc}")]
    TrackLengthMismatch {
        reads: usize,
        map: usize,
        gc: usize,
    },

    /// The input tracks disagree on a bin coordinate.
    #[error(
        "tracks disagree on {field} at bin {index}: reads track has {expected}, \
         {track} track has {found}"
    )]
    TrackMismatch {
        index: usize,
        field: &'static str,
        track: &'static str,
        expected: String,
        found: String,
    },

    /// No valid bins to estimate the classification quantiles from.
    #[error("no valid bins to compute quantile thresholds from")]
    NoValidBins,

    /// A fitting subset came out empty.
    #[error("no {what} bins to fit a correction curve against")]
    EmptySubset { what: &'static str },

    /// Too few usable points for a fit or interpolation.
    #[error("not enough points for {context}: got {got}, need at least {need}")]
    NotEnoughPoints {
        context: &'static str,
        got: usize,
        need: usize,
    },

    /// The polynomial normal equations could not be solved.
    #[error("polynomial fit of degree {degree} is singular over {points} points")]
    SingularFit { degree: usize, points: usize },
}

/// Result type alias for readcorrect-core operations.
pub type Result<T> = std::result::Result<T, CorrectError>;
