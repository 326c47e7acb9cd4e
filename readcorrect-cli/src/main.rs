use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use readcorrect_cli::consts;
use readcorrect_cli::correct;

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about(
            "Bias-corrected copy-number read-depth profiles from binned \
             read-count, GC and mappability tracks.",
        )
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(correct::cli::create_correct_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    let level = if matches.get_flag("verbose") {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_module_path(false)
        .init();

    match matches.subcommand() {
        //
        // CORRECT
        //
        Some((correct::cli::CORRECT_CMD, matches)) => {
            correct::handlers::run_correct(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
