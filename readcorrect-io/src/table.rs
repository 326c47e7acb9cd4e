use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use readcorrect_core::models::CorrectedBin;

use crate::error::Result;

/// Column order of the output table.
const HEADER: &str = "chromosome,start,end,width,gc,map,reads,valid,ideal,cor.gc,cor.map,copy";
/// Token written for missing numeric values.
const MISSING: &str = "NA";

/// Serialize the corrected bin table as CSV.
///
/// Rows are written in source order, one per bin, with missing numeric
/// fields rendered as `NA`. The table is first streamed to a `.partial`
/// sibling and renamed over `path` after a successful flush, so a failed
/// run never leaves a half-written table at the output path.
pub fn write_table<P: AsRef<Path>>(path: P, bins: &[CorrectedBin]) -> Result<()> {
    let path = path.as_ref();
    let partial = partial_path(path);

    match write_rows(&partial, bins) {
        Ok(()) => {
            fs::rename(&partial, path)?;
            debug!("wrote {} rows to {}", bins.len(), path.display());
            Ok(())
        }
        Err(err) => {
            let _ = fs::remove_file(&partial);
            Err(err)
        }
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map_or_else(
        || "output".to_string(),
        |n| n.to_string_lossy().to_string(),
    );
    name.push_str(".partial");
    path.with_file_name(name)
}

fn write_rows(path: &Path, bins: &[CorrectedBin]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", HEADER)?;
    for bin in bins {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            bin.record.chrom,
            bin.record.start,
            bin.record.end,
            bin.record.width,
            float_field(bin.record.gc),
            float_field(bin.record.map),
            bin.record.reads,
            bin.valid,
            bin.ideal,
            float_field(bin.cor_gc),
            float_field(bin.cor_map),
            float_field(bin.copy),
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn float_field(value: f64) -> String {
    if value.is_nan() {
        MISSING.to_string()
    } else {
        value.to_string()
    }
}
