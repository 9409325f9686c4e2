//! Path management for split-ledger
//!
//! ## Path Resolution Order
//!
//! 1. `SPLIT_LEDGER_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/split-ledger` or `~/.config/split-ledger`
//! 3. Windows: `%APPDATA%\split-ledger`

use std::path::{Path, PathBuf};

use crate::error::SplitError;

/// Environment variable overriding the base directory
pub const LEDGER_DIR_ENV: &str = "SPLIT_LEDGER_DIR";

const APP_DIR_NAME: &str = "split-ledger";

/// Manages all paths used by split-ledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns a config error if no home or app-data directory can be found.
    pub fn new() -> Result<Self, SplitError> {
        let base_dir = match std::env::var(LEDGER_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create LedgerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Path to settings.json
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("settings.json")
    }

    /// Directory searched for group documents given by bare name
    pub fn groups_dir(&self) -> PathBuf {
        self.base_dir.join("groups")
    }

    /// Resolve a group document argument
    ///
    /// An existing path is used as is. Otherwise the name is looked up in
    /// the groups directory, with `.json` appended when it has no
    /// extension. Falls back to the argument unchanged so the caller
    /// reports the original path as missing.
    pub fn resolve_group_file(&self, arg: &Path) -> PathBuf {
        if arg.exists() {
            return arg.to_path_buf();
        }

        let mut candidate = self.groups_dir().join(arg);
        if candidate.extension().is_none() {
            candidate.set_extension("json");
        }
        if candidate.exists() {
            candidate
        } else {
            arg.to_path_buf()
        }
    }

    /// Create the base and groups directories
    pub fn ensure_directories(&self) -> Result<(), SplitError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SplitError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.groups_dir())
            .map_err(|e| SplitError::Io(format!("Failed to create groups directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SplitError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                SplitError::Config("Could not determine home directory (HOME not set)".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join(APP_DIR_NAME))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SplitError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SplitError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("settings.json"));
        assert_eq!(paths.groups_dir(), temp_dir.path().join("groups"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(LEDGER_DIR_ENV, custom_path);
        let paths = LedgerPaths::new().unwrap();
        env::remove_var(LEDGER_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.groups_dir().exists());
    }

    #[test]
    fn test_resolve_group_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.groups_dir().join("trip.json"), "{}").unwrap();

        assert_eq!(
            paths.resolve_group_file(Path::new("trip")),
            paths.groups_dir().join("trip.json")
        );
        assert_eq!(
            paths.resolve_group_file(Path::new("trip.json")),
            paths.groups_dir().join("trip.json")
        );
        assert_eq!(
            paths.resolve_group_file(Path::new("missing")),
            PathBuf::from("missing")
        );

        let direct = temp_dir.path().join("direct.json");
        std::fs::write(&direct, "{}").unwrap();
        assert_eq!(paths.resolve_group_file(&direct), direct);
    }
}
