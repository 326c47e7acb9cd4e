use log::debug;

use crate::errors::{CorrectError, Result};
use crate::models::{BinRecord, TrackBin};

/// Join the three input tracks into one per-bin record set.
///
/// The tracks are iterated in lock-step and must agree exactly on
/// chromosome, start, end and width at every index; any disagreement is an
/// alignment error, reported before any partial table is produced. The
/// tracks are assumed to come from one generation pipeline, so a mismatch
/// means different window sizes or chromosome sets upstream — it is never
/// resolved here by re-sorting or truncating.
///
/// The reads track is integer-valued by construction (see the reader's
/// count parsing); its values are narrowed back to integers here.
pub fn merge(
    reads: Vec<TrackBin>,
    map: Vec<TrackBin>,
    gc: Vec<TrackBin>,
) -> Result<Vec<BinRecord>> {
    if reads.len() != map.len() || reads.len() != gc.len() {
        return Err(CorrectError::TrackLengthMismatch {
            reads: reads.len(),
            map: map.len(),
            gc: gc.len(),
        });
    }

    let mut bins = Vec::with_capacity(reads.len());
    for (index, ((reads_bin, map_bin), gc_bin)) in
        reads.into_iter().zip(map).zip(gc).enumerate()
    {
        check_aligned(index, &reads_bin, &map_bin, "mappability")?;
        check_aligned(index, &reads_bin, &gc_bin, "gc")?;

        bins.push(BinRecord {
            chrom: reads_bin.chrom,
            start: reads_bin.start,
            end: reads_bin.end,
            width: reads_bin.width,
            gc: gc_bin.value,
            map: map_bin.value,
            reads: reads_bin.value as i64,
        });
    }

    debug!("merged {} bins from three tracks", bins.len());
    Ok(bins)
}

fn check_aligned(
    index: usize,
    reads: &TrackBin,
    other: &TrackBin,
    track: &'static str,
) -> Result<()> {
    let mismatch = |field: &'static str, expected: String, found: String| {
        Err(CorrectError::TrackMismatch {
            index,
            field,
            track,
            expected,
            found,
        })
    };

    if reads.chrom != other.chrom {
        return mismatch("chromosome", reads.chrom.clone(), other.chrom.clone());
    }
    if reads.start != other.start {
        return mismatch("start", reads.start.to_string(), other.start.to_string());
    }
    if reads.end != other.end {
        return mismatch("end", reads.end.to_string(), other.end.to_string());
    }
    if reads.width != other.width {
        return mismatch("width", reads.width.to_string(), other.width.to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn track(values: &[(u64, f64)]) -> Vec<TrackBin> {
        values
            .iter()
            .map(|&(start, value)| TrackBin {
                chrom: "1".to_string(),
                start,
                end: start + 999,
                width: 1000,
                value,
            })
            .collect()
    }

    #[rstest]
    fn test_merge_aligned_tracks() {
        let reads = track(&[(1, 7.0), (1001, 12.0)]);
        let map = track(&[(1, 0.95), (1001, 0.9)]);
        let gc = track(&[(1, 0.41), (1001, 0.44)]);

        let bins = merge(reads, map, gc).unwrap();
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].reads, 7);
        assert_eq!(bins[0].map, 0.95);
        assert_eq!(bins[0].gc, 0.41);
        assert_eq!(bins[1].start, 1001);
        assert_eq!(bins[1].end, 2000);
    }

    #[rstest]
    fn test_merge_rejects_shifted_start() {
        let reads = track(&[(1, 7.0), (1001, 12.0)]);
        let map = track(&[(1, 0.95), (2001, 0.9)]);
        let gc = track(&[(1, 0.41), (1001, 0.44)]);

        let err = merge(reads, map, gc).unwrap_err();
        match err {
            CorrectError::TrackMismatch { index, field, .. } => {
                assert_eq!(index, 1);
                assert_eq!(field, "start");
            }
            other => panic!("expected TrackMismatch, got {:?}", other),
        }
    }

    #[rstest]
    fn test_merge_rejects_different_chromosome() {
        let reads = track(&[(1, 7.0)]);
        let map = track(&[(1, 0.95)]);
        let mut gc = track(&[(1, 0.41)]);
        gc[0].chrom = "2".to_string();

        let err = merge(reads, map, gc).unwrap_err();
        assert!(matches!(
            err,
            CorrectError::TrackMismatch {
                field: "chromosome",
                track: "gc",
                ..
            }
        ));
    }

    #[rstest]
    fn test_merge_rejects_length_mismatch() {
        let reads = track(&[(1, 7.0), (1001, 12.0)]);
        let map = track(&[(1, 0.95)]);
        let gc = track(&[(1, 0.41), (1001, 0.44)]);

        let err = merge(reads, map, gc).unwrap_err();
        assert!(matches!(err, CorrectError::TrackLengthMismatch { .. }));
    }
}
