pub mod bin;
pub mod track;

// re-export for cleaner imports
pub use self::bin::{BinRecord, ClassifiedBin, CorrectedBin};
pub use self::track::TrackBin;
