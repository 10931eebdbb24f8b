//! `relief`: generate and inspect heightmap-driven voxel terrain.
//!
//! Run with: `cargo run -p relief-app -- --heightmap map.png chunk 0 0`

mod app;
mod commands;
mod error;
mod loader;
mod platform;

use std::process::ExitCode;

use clap::Parser;
use relief_config::{CliArgs, Config};
use tracing::info;

use crate::app::App;
use crate::commands::Command;
use crate::error::AppError;
use crate::platform::PlatformDirs;

/// CLI arguments for the relief binary.
#[derive(Parser, Debug)]
#[command(name = "relief", about = "Heightmap-driven voxel terrain generator")]
struct ReliefArgs {
    #[command(flatten)]
    overrides: CliArgs,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let args = ReliefArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("relief: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: ReliefArgs) -> Result<(), AppError> {
    let dirs = match &args.overrides.config {
        Some(dir) => PlatformDirs::with_config_dir(dir),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    // Start with the persisted config, then apply CLI overrides.
    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(&args.overrides);

    relief_log::init_logging(Some(&dirs.log_dir), config.debug.log_to_file, Some(&config));

    info!(config_dir = %dirs.config_dir.display(), "relief starting");
    info!(
        "Terrain: scale={} base={} water={} forest={} snow={} caves={}",
        config.terrain.scale,
        config.terrain.base_level,
        config.terrain.water_level,
        config.terrain.forest_level,
        config.terrain.snow_mountain_level,
        config.caves.enabled,
    );

    let app = App::build(&config, &dirs.config_dir)?;
    commands::run(&app, args.command)
}
