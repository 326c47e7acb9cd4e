use std::fmt::{self, Display};

///
/// One bin of a single step-function track, as produced by the reader.
///
/// Coordinates are 1-based and inclusive; `width` is the step size of the
/// segment the bin came from, carried along so the merger can verify that
/// all tracks were generated with the same window size.
///
#[derive(Debug, Clone, PartialEq)]
pub struct TrackBin {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub width: u64,
    pub value: f64,
}

impl Display for TrackBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}={}",
            self.chrom, self.start, self.end, self.value
        )
    }
}
