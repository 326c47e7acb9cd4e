use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use readcorrect_core::classify::classify;
use readcorrect_core::config::{CorrectionConfig, SmoothingStrategy};
use readcorrect_core::correct::correct;
use readcorrect_core::merge::merge;
use readcorrect_io::table::write_table;
use readcorrect_io::wig::{ValueKind, read_fixed_step};

/// Matches items from CLAP args before running the correction pipeline
pub fn run_correct(matches: &ArgMatches) -> Result<()> {
    let reads = matches
        .get_one::<String>("reads")
        .expect("reads path is required");
    let gc = matches.get_one::<String>("gc").expect("gc path is required");
    let map = matches
        .get_one::<String>("map")
        .expect("map path is required");
    let output = matches
        .get_one::<String>("output")
        .expect("output path is required");

    let threshold = matches
        .get_one::<f64>("mappability-threshold")
        .expect("mappability threshold has a default");
    let smoothing = matches
        .get_one::<String>("smoothing")
        .expect("smoothing has a default");
    let degree = matches
        .get_one::<usize>("degree")
        .expect("degree has a default");
    let skip_existing = matches.get_flag("skip-existing");

    let strategy: SmoothingStrategy = smoothing.parse().map_err(anyhow::Error::msg)?;
    let config = CorrectionConfig {
        mappability_threshold: *threshold,
        strategy,
        polynomial_degree: *degree,
    };

    run_pipeline(
        Path::new(reads),
        Path::new(gc),
        Path::new(map),
        Path::new(output),
        &config,
        skip_existing,
    )
}

/// Run the whole correction pipeline: read the three tracks, merge,
/// classify, correct, and write the table.
///
/// With `skip_existing`, an already-present output file is treated as
/// pre-computed and left untouched; otherwise a rerun fully recomputes
/// and overwrites it.
pub fn run_pipeline(
    reads: &Path,
    gc: &Path,
    map: &Path,
    output: &Path,
    config: &CorrectionConfig,
    skip_existing: bool,
) -> Result<()> {
    if skip_existing && output.exists() {
        info!(
            "output {} already exists, skipping recomputation",
            output.display()
        );
        return Ok(());
    }

    let reads_track = read_fixed_step(reads, ValueKind::Count)
        .with_context(|| format!("reading read counts from {}", reads.display()))?;
    let gc_track = read_fixed_step(gc, ValueKind::Fraction)
        .with_context(|| format!("reading GC content from {}", gc.display()))?;
    let map_track = read_fixed_step(map, ValueKind::Fraction)
        .with_context(|| format!("reading mappability from {}", map.display()))?;

    let bins = merge(reads_track, map_track, gc_track)?;
    info!("merged {} bins", bins.len());

    let classified = classify(bins, config.mappability_threshold)?;
    let corrected = correct(classified, config)?;

    write_table(output, &corrected)
        .with_context(|| format!("writing table to {}", output.display()))?;
    info!("wrote {}", output.display());

    Ok(())
}
