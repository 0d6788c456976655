//! `DndGrid` CLI - Command-line interface for `DndGrid` layouts
//!
//! Provides commands for building layout files, validating and analyzing
//! them, simulating drops, and hit-testing drop quadrants.

mod cli;
mod commands;
mod error;
mod format;
mod util;

use clap::Parser;
use cli::Cli;
use dndgrid_core::config::GridSettings;
use dndgrid_core::tracing::{TracingConfig, TracingLevel, init_tracing};

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = util::load_settings(config_path).and_then(|settings| {
        init_logging(&settings, cli.verbose, cli.quiet);
        commands::dispatch(&settings, cli.command)
    });

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}

/// Initializes logging from the settings file, raised by `-v` and
/// silenced by `--quiet`
fn init_logging(settings: &GridSettings, verbose: u8, quiet: bool) {
    let mut config = TracingConfig::from_settings(&settings.logging);
    if quiet {
        config.filter = None;
        config.level = TracingLevel::Error;
    } else {
        config.level = TracingLevel::from_verbosity(config.level, verbose);
    }

    if let Err(e) = init_tracing(&config)
        && !quiet
    {
        eprintln!("Warning: logging disabled: {e}");
    }
}
