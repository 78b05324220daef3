//! Path management for SkillSwap client files.
//!
//! Paths are resolved with the `dirs` crate so the client follows each
//! platform's conventions (XDG on Linux, `Application Support` on macOS,
//! `AppData` on Windows).

use std::path::PathBuf;

/// Name of the application directory below the platform config directory.
pub const APP_DIR_NAME: &str = "skillswap";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path management for the client.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/skillswap/
/// └── config.toml              # Client configuration
/// ```
pub struct SkillSwapPaths;

impl SkillSwapPaths {
    /// Returns the client configuration directory (e.g. `~/.config/skillswap/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_lives_in_app_dir() {
        if let Ok(path) = SkillSwapPaths::config_file() {
            assert!(path.ends_with("skillswap/config.toml"));
        }
    }
}
