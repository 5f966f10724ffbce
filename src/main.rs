mod cli;

use std::process::ExitCode;

use clap::Parser;

use particle_box::{SimConfig, SimulationError};

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG still wins over the verbosity flags.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), SimulationError> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    log::info!(
        "starting: {}x{}, tick {} ms, seed {:?}",
        config.window.width,
        config.window.height,
        config.tick_ms,
        config.seed
    );
    particle_box::run(config)
}
