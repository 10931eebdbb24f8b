//! Command-line overrides for the persisted configuration.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Terrain generator command-line arguments.
///
/// CLI values override settings loaded from the config file. Binaries
/// flatten this into their own parser.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    /// World blocks per heightmap pixel.
    #[arg(long, global = true)]
    pub scale: Option<f32>,

    /// World Y that a heightmap value of 0 maps to.
    #[arg(long, global = true)]
    pub base_level: Option<i32>,

    /// Sea level offset above the base level.
    #[arg(long, global = true)]
    pub water_level: Option<i32>,

    /// Forest hills offset above the base level.
    #[arg(long, global = true)]
    pub forest_level: Option<i32>,

    /// Ice mountains offset above the base level.
    #[arg(long, global = true)]
    pub snow_mountain_level: Option<i32>,

    /// Heightmap image to load.
    #[arg(long, global = true)]
    pub heightmap: Option<PathBuf>,

    /// Disable cave carving.
    #[arg(long, global = true)]
    pub no_caves: bool,

    /// Cave noise seed.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(scale) = args.scale {
            self.terrain.scale = scale;
        }
        if let Some(level) = args.base_level {
            self.terrain.base_level = level;
        }
        if let Some(level) = args.water_level {
            self.terrain.water_level = level;
        }
        if let Some(level) = args.forest_level {
            self.terrain.forest_level = level;
        }
        if let Some(level) = args.snow_mountain_level {
            self.terrain.snow_mountain_level = level;
        }
        if let Some(ref path) = args.heightmap {
            self.terrain.heightmap = Some(path.clone());
        }
        if args.no_caves {
            self.caves.enabled = false;
        }
        if let Some(seed) = args.seed {
            self.caves.seed = seed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
