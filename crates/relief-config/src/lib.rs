//! Configuration for the relief terrain generator.
//!
//! Settings persist to disk as a RON file, can be overridden from the
//! command line via clap, and are hot-reloadable: [`Config::reload`] reports
//! whether the file on disk differs from the settings in memory.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CaveSettings, Config, DebugConfig, TerrainConfig, default_config_dir,
};
pub use error::ConfigError;
