use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use log::{debug, warn};

use readcorrect_core::models::TrackBin;

use crate::error::{Result, TrackIoError};

/// How the value lines of a track are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Integer read counts.
    Count,
    /// Fractional scores (GC content, mappability).
    Fraction,
}

/// Running state of the segment the reader is currently inside.
struct Segment {
    chrom: String,
    step: u64,
    next_bin: u64,
}

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: the path to the file to read
///
fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).map_err(|source| TrackIoError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Read a step-function track into an ordered sequence of bins.
///
/// The format is a sequence of chromosome segments. Each segment opens
/// with a `fixedStep` header carrying `chrom=`, `start=` (1-based),
/// `step=` and `span=` fields; every following non-blank line holds one
/// value for the next consecutive bin of that segment. Bin coordinates are
/// reconstructed purely from the header and the running bin index:
///
/// ```text
/// bin0   = 0 if start < step, start / step otherwise
/// startN = (bin0 + N) * step + 1
/// endN   = (bin0 + N + 1) * step
/// ```
///
/// A value line before any header, an incomplete header, or a token that
/// does not parse as `kind` are format errors carrying the line number.
pub fn read_fixed_step<P: AsRef<Path>>(path: P, kind: ValueKind) -> Result<Vec<TrackBin>> {
    let path = path.as_ref();
    let reader = get_dynamic_reader(path)?;

    let mut bins: Vec<TrackBin> = Vec::new();
    let mut segment: Option<Segment> = None;

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let lineno = number + 1;

        if line.is_empty() {
            continue;
        }
        if line.starts_with("fixedStep") {
            segment = Some(parse_header(path, lineno, line)?);
            continue;
        }

        let Some(seg) = segment.as_mut() else {
            return Err(TrackIoError::ValueBeforeHeader {
                path: path.display().to_string(),
                line: lineno,
            });
        };

        let value = match kind {
            ValueKind::Count => match line.parse::<i64>() {
                Ok(count) => count as f64,
                Err(_) => {
                    return Err(TrackIoError::InvalidValue {
                        path: path.display().to_string(),
                        line: lineno,
                        expected: "integer",
                        token: line.to_string(),
                    });
                }
            },
            ValueKind::Fraction => match line.parse::<f64>() {
                Ok(value) => value,
                Err(_) => {
                    return Err(TrackIoError::InvalidValue {
                        path: path.display().to_string(),
                        line: lineno,
                        expected: "numeric",
                        token: line.to_string(),
                    });
                }
            },
        };

        bins.push(TrackBin {
            chrom: seg.chrom.clone(),
            start: seg.next_bin * seg.step + 1,
            end: (seg.next_bin + 1) * seg.step,
            width: seg.step,
            value,
        });
        seg.next_bin += 1;
    }

    debug!("read {} bins from {}", bins.len(), path.display());
    Ok(bins)
}

fn parse_header(path: &Path, lineno: usize, line: &str) -> Result<Segment> {
    let invalid = |reason: String| TrackIoError::InvalidHeader {
        path: path.display().to_string(),
        line: lineno,
        reason,
    };

    let mut chrom: Option<String> = None;
    let mut start: Option<u64> = None;
    let mut step: Option<u64> = None;
    let mut span: Option<u64> = None;

    for field in line.split_whitespace().skip(1) {
        let Some((key, value)) = field.split_once('=') else {
            return Err(invalid(format!("field {:?} is not key=value", field)));
        };
        match key {
            "chrom" => chrom = Some(value.to_string()),
            "start" => {
                start = Some(value.parse().map_err(|_| {
                    invalid(format!("start {:?} is not a positive integer", value))
                })?)
            }
            "step" => {
                step = Some(value.parse().map_err(|_| {
                    invalid(format!("step {:?} is not a positive integer", value))
                })?)
            }
            "span" => {
                span = Some(value.parse().map_err(|_| {
                    invalid(format!("span {:?} is not a positive integer", value))
                })?)
            }
            _ => {} // unknown keys are tolerated
        }
    }

    let chrom = chrom.ok_or_else(|| invalid("missing chrom field".to_string()))?;
    let start = start.ok_or_else(|| invalid("missing start field".to_string()))?;
    let step = step.ok_or_else(|| invalid("missing step field".to_string()))?;
    let span = span.ok_or_else(|| invalid("missing span field".to_string()))?;

    if step == 0 {
        return Err(invalid("step must be positive".to_string()));
    }
    if span != step {
        // production track generators always emit span == step; a
        // mismatch usually means a misconfigured generator upstream
        warn!(
            "{}:{}: span {} differs from step {}, using step",
            path.display(),
            lineno,
            span,
            step
        );
    }

    Ok(Segment {
        chrom,
        step,
        next_bin: if start < step { 0 } else { start / step },
    })
}
