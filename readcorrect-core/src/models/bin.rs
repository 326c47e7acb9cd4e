///
/// One genomic bin after merging the reads, GC and mappability tracks.
///
/// `gc` is a fraction in [0, 1], with -1.0 as the sentinel for bins where
/// GC content is undefined (assembly gaps). `reads` keeps the sign the
/// track carried; the classifier treats anything non-positive as invalid.
///
#[derive(Debug, Clone, PartialEq)]
pub struct BinRecord {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub width: u64,
    pub gc: f64,
    pub map: f64,
    pub reads: i64,
}

///
/// A [BinRecord] with its classification flags.
///
/// `valid` means the bin has at least one read and a defined GC value;
/// `ideal` additionally requires the mappability threshold and that reads
/// and GC fall inside the quantile-trimmed range/domain.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedBin {
    pub record: BinRecord,
    pub valid: bool,
    pub ideal: bool,
}

///
/// A fully corrected bin, ready to be written out.
///
/// `cor_gc`, `cor_map` and `copy` use NaN as the missing sentinel; the
/// table writer renders it as `NA`.
///
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedBin {
    pub record: BinRecord,
    pub valid: bool,
    pub ideal: bool,
    pub cor_gc: f64,
    pub cor_map: f64,
    pub copy: f64,
}
