mod cli;
mod commands;
mod errors;
mod files;
mod ui;

use std::process::ExitCode;

use clap::Parser;
use log::debug;

use cli::{ClinicCli, ClinicCliCommand, PresetAction};
use errors::CliError;

fn main() -> ExitCode {
    let cli = ClinicCli::parse();
    initialize_logging(cli.verbose);
    debug!("Running with {:?}", cli.command);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            debug!("Exiting with {}", error);
            ExitCode::from(error.exit_code())
        }
    }
}

fn run(cli: ClinicCli) -> Result<(), CliError> {
    let format = cli.format;
    match cli.command {
        ClinicCliCommand::Filter(args) => {
            let config = files::load_config(cli.config.as_deref())?;
            let store = files::preset_store(cli.presets);
            commands::filter_records(args, config, &store, format)
        }
        ClinicCliCommand::Fields => commands::list_fields(format),
        ClinicCliCommand::Preset { action } => {
            let store = files::preset_store(cli.presets);
            match action {
                PresetAction::List => commands::list_presets(&store, format),
                PresetAction::Save {
                    name,
                    search,
                    status,
                    category,
                } => commands::save_preset(&store, name, search, status, category, format),
                PresetAction::Delete { name } => commands::delete_preset(&store, name),
            }
        }
        ClinicCliCommand::Price {
            mrp,
            discount,
            dealer_price,
            quantity,
            gst,
        } => commands::price_line(mrp, discount, dealer_price, quantity, gst, format),
    }
}

/// Logs go to stderr so JSON on stdout stays clean.
fn initialize_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();
}
