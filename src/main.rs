//! Diamond Probe - Content-sniffing file format detector
//!
//! Identifies files by their leading bytes rather than their names, one at a
//! time or across whole directory trees.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use diamond_probe::cli::{self, Cli, Commands};
use diamond_probe::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    // An explicit --config must load; a broken default one is reported once logging is up
    let (config, config_error) = match &cli.config {
        Some(path) => (Config::load_from(path)?, None),
        None => match Config::load() {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        },
    };

    // Initialize logging; RUST_LOG wins over the config level
    let level = if cli.verbose {
        "debug"
    } else {
        config.general.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("diamond_probe={}", level)))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
        .with(filter)
        .init();

    if let Some(e) = config_error {
        tracing::warn!("Ignoring config: {:#}", e);
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let ctx = cli::Context::new(&cli, config, config_path);

    match &cli.command {
        Commands::Identify(args) => {
            if !cli::run_identify(&ctx, args)? {
                std::process::exit(1);
            }
        }
        Commands::Scan(args) => cli::run_scan(&ctx, args)?,
        Commands::Formats(args) => cli::run_formats(&ctx, args)?,
        Commands::Config(args) => cli::run_config(&ctx, args)?,
    }

    Ok(())
}
