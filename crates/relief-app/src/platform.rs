//! OS-specific directory resolution.

use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur during platform operations.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// Directory creation failed.
    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Where the generator keeps its files.
///
/// Follows OS conventions (XDG on Linux, Known Folders on Windows, Library
/// on macOS).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// `relief.ron` and relative heightmap paths.
    pub config_dir: PathBuf,
    /// JSON log files.
    pub log_dir: PathBuf,
}

const APP_NAME: &str = "relief";

impl PlatformDirs {
    /// Resolve platform-specific directories without creating them on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoConfigDir`] if the OS does not expose a
    /// configuration directory.
    pub fn resolve() -> Result<Self, PlatformError> {
        let config_dir = relief_config::default_config_dir().ok_or(PlatformError::NoConfigDir)?;
        let log_dir = dirs::data_local_dir()
            .map(|base| base.join(APP_NAME).join("logs"))
            .unwrap_or_else(|| config_dir.join("logs"));
        Ok(Self {
            config_dir,
            log_dir,
        })
    }

    /// Directories rooted under a custom config path, as passed on the
    /// command line.
    pub fn with_config_dir(config_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            log_dir: config_dir.join("logs"),
        }
    }

    /// Create all directories on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if any directory cannot be created.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_dirs_resolve() {
        if dirs::config_dir().is_none() {
            return;
        }
        let dirs = PlatformDirs::resolve().unwrap();
        assert!(dirs.config_dir.is_absolute(), "config_dir is not absolute");
        assert!(dirs.log_dir.is_absolute(), "log_dir is not absolute");
        assert!(dirs.config_dir.ends_with(APP_NAME));
    }

    #[test]
    fn test_directory_creation() {
        let root = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::with_config_dir(&root.path().join("cfg"));
        dirs.create_dirs().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
        assert!(dirs.log_dir.starts_with(&dirs.config_dir));
    }
}
