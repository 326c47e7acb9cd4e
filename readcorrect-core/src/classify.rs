use log::debug;

use crate::errors::{CorrectError, Result};
use crate::models::{BinRecord, ClassifiedBin};
use crate::stats::quantile_sorted;

/// Fraction of high-count bins trimmed off the ideal read range.
const READS_OUTLIER: f64 = 0.01;
/// Fraction trimmed off each end of the ideal GC domain.
const GC_OUTLIER: f64 = 0.001;

/// Label every bin as valid and/or ideal.
///
/// A bin is valid when it has at least one read and a defined GC value.
/// Ideal bins are the valid bins that clear the mappability threshold and
/// whose reads and GC fall inside the quantile-trimmed range and domain
/// estimated over the valid subset. Note the strict lower bound on reads:
/// a bin whose count equals the valid minimum is not ideal.
///
/// # Arguments
/// - bins: the merged bin records
/// - mappability_threshold: minimum mappability for ideality
pub fn classify(
    bins: Vec<BinRecord>,
    mappability_threshold: f64,
) -> Result<Vec<ClassifiedBin>> {
    let valid_flags: Vec<bool> = bins
        .iter()
        .map(|bin| bin.reads > 0 && bin.gc >= 0.0)
        .collect();

    let mut valid_reads: Vec<f64> = Vec::new();
    let mut valid_gc: Vec<f64> = Vec::new();
    for (bin, &valid) in bins.iter().zip(&valid_flags) {
        if valid {
            valid_reads.push(bin.reads as f64);
            valid_gc.push(bin.gc);
        }
    }
    if valid_reads.is_empty() {
        return Err(CorrectError::NoValidBins);
    }

    valid_reads.sort_by(|a, b| a.total_cmp(b));
    valid_gc.sort_by(|a, b| a.total_cmp(b));

    let range_lo = quantile_sorted(&valid_reads, 0.0);
    let range_hi = quantile_sorted(&valid_reads, 1.0 - READS_OUTLIER);
    let domain_lo = quantile_sorted(&valid_gc, GC_OUTLIER);
    let domain_hi = quantile_sorted(&valid_gc, 1.0 - GC_OUTLIER);

    debug!(
        "classifying {} bins ({} valid): reads range ({}, {}], gc domain [{}, {}]",
        bins.len(),
        valid_reads.len(),
        range_lo,
        range_hi,
        domain_lo,
        domain_hi
    );

    let classified = bins
        .into_iter()
        .zip(valid_flags)
        .map(|(record, valid)| {
            let reads = record.reads as f64;
            let ideal = valid
                && record.map >= mappability_threshold
                && reads > range_lo
                && reads <= range_hi
                && record.gc >= domain_lo
                && record.gc <= domain_hi;
            ClassifiedBin {
                record,
                valid,
                ideal,
            }
        })
        .collect();

    Ok(classified)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn bin(reads: i64, gc: f64, map: f64) -> BinRecord {
        BinRecord {
            chrom: "1".to_string(),
            start: 1,
            end: 1000,
            width: 1000,
            gc,
            map,
            reads,
        }
    }

    /// Ten single-chromosome bins with one zero-read bin, one
    /// low-mappability extreme-count bin, and ordinary bins elsewhere.
    fn scenario_bins() -> Vec<BinRecord> {
        let reads = [0, 5, 8, 12, 9, 7, 50, 6, 8, 11];
        let gc = [-1.0, 0.4, 0.42, 0.41, 0.43, 0.39, 0.9, 0.44, 0.4, 0.38];
        let map = [0.95, 0.95, 0.95, 0.95, 0.95, 0.95, 0.2, 0.95, 0.95, 0.95];

        (0..10)
            .map(|i| BinRecord {
                chrom: "1".to_string(),
                start: i as u64 * 1000 + 1,
                end: (i as u64 + 1) * 1000,
                width: 1000,
                gc: gc[i],
                map: map[i],
                reads: reads[i],
            })
            .collect()
    }

    #[rstest]
    fn test_scenario_classification() {
        let classified = classify(scenario_bins(), 0.9).unwrap();
        assert_eq!(classified.len(), 10);

        let valid: Vec<bool> = classified.iter().map(|b| b.valid).collect();
        let ideal: Vec<bool> = classified.iter().map(|b| b.ideal).collect();

        // bin 0 has zero reads and undefined gc
        assert_eq!(
            valid,
            vec![false, true, true, true, true, true, true, true, true, true]
        );
        // bin 1 sits exactly on the read minimum (strict lower bound),
        // bin 6 fails the mappability threshold and is a count outlier
        assert_eq!(
            ideal,
            vec![false, false, true, true, true, true, false, true, true, true]
        );
    }

    #[rstest]
    #[case(0, 0.4, false)] // no reads
    #[case(-3, 0.4, false)] // negative count
    #[case(5, -1.0, false)] // undefined gc
    #[case(5, 0.0, true)] // zero gc is defined
    fn test_valid_rule(#[case] reads: i64, #[case] gc: f64, #[case] expected: bool) {
        let bins = vec![bin(reads, gc, 0.95), bin(10, 0.5, 0.95), bin(11, 0.5, 0.95)];
        let classified = classify(bins, 0.9).unwrap();
        assert_eq!(classified[0].valid, expected);
    }

    #[rstest]
    fn test_ideal_refines_valid() {
        let classified = classify(scenario_bins(), 0.9).unwrap();
        for bin in &classified {
            if bin.ideal {
                assert!(bin.valid);
                assert!(bin.record.map >= 0.9);
            }
        }
    }

    #[rstest]
    fn test_no_valid_bins_is_an_error() {
        let bins = vec![bin(0, 0.4, 0.95), bin(5, -1.0, 0.95)];
        let err = classify(bins, 0.9).unwrap_err();
        assert!(matches!(err, CorrectError::NoValidBins));
    }

    #[rstest]
    fn test_quantile_trim_share() {
        // 1000 valid bins with distinct counts: the strict upper bound at
        // the 0.99 quantile should cut roughly 1% of them
        let bins: Vec<BinRecord> = (0..1000).map(|i| bin(i + 1, 0.5, 0.95)).collect();
        let classified = classify(bins, 0.9).unwrap();
        let over: usize = classified
            .iter()
            .filter(|b| !b.ideal && b.record.reads as f64 > 900.0)
            .count();
        // counts 1..=1000, range_hi = 1 + 0.99 * 999 = 990.01 -> ten bins above
        assert_eq!(over, 10);
    }
}
