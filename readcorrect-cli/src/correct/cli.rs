use clap::{Arg, ArgAction, Command};

pub const CORRECT_CMD: &str = "correct";

/// Creates the correct CLI Command object
pub fn create_correct_cli() -> Command {
    Command::new(CORRECT_CMD)
        .about("Correct binned read counts for GC and mappability bias")
        .arg(
            Arg::new("reads")
                .long("reads")
                .short('r')
                .help("Path to the read-count wiggle track")
                .required(true),
        )
        .arg(
            Arg::new("gc")
                .long("gc")
                .short('g')
                .help("Path to the GC-content wiggle track")
                .required(true),
        )
        .arg(
            Arg::new("map")
                .long("map")
                .short('m')
                .help("Path to the mappability wiggle track")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Path for the output CSV table")
                .required(true),
        )
        .arg(
            Arg::new("mappability-threshold")
                .long("mappability-threshold")
                .value_parser(clap::value_parser!(f64))
                .default_value("0.9")
                .help("Minimum mappability for a bin to count as ideal"),
        )
        .arg(
            Arg::new("smoothing")
                .long("smoothing")
                .default_value("local-regression")
                .help("Curve-fitting strategy: local-regression or polynomial"),
        )
        .arg(
            Arg::new("degree")
                .long("degree")
                .value_parser(clap::value_parser!(usize))
                .default_value("2")
                .help("Degree for the polynomial strategy"),
        )
        .arg(
            Arg::new("skip-existing")
                .long("skip-existing")
                .action(ArgAction::SetTrue)
                .help("Exit successfully without recomputing if the output already exists"),
        )
}
