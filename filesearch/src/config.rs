//! Server configuration

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Name the server reports during the MCP handshake
pub const DEFAULT_SERVER_NAME: &str = "file-search-server";

/// Configuration for a File Search server instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server name reported in `serverInfo`
    pub name: String,
    /// Server version reported in `serverInfo`
    pub version: String,
    /// Absolute directory that relative file paths are resolved against
    pub base_dir: PathBuf,
}

impl ServerConfig {
    /// Create a configuration rooted at `base_dir`.
    ///
    /// A relative `base_dir` is resolved against the process working
    /// directory. The directory must exist.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let base_dir = if base_dir.is_absolute() {
            base_dir.to_path_buf()
        } else {
            crate::search::resolve_path(&std::env::current_dir()?, base_dir)
        };

        if !base_dir.is_dir() {
            return Err(Error::ConfigError(format!(
                "Base directory does not exist: {}",
                base_dir.display()
            )));
        }

        Ok(Self {
            name: DEFAULT_SERVER_NAME.to_string(),
            version: crate::VERSION.to_string(),
            base_dir,
        })
    }

    /// Create a configuration rooted at the process working directory
    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::new(cwd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_with_existing_dir() {
        let dir = tempdir().unwrap();
        let config = ServerConfig::new(dir.path()).unwrap();
        assert_eq!(config.base_dir, dir.path());
        assert_eq!(config.name, DEFAULT_SERVER_NAME);
        assert_eq!(config.version, crate::VERSION);
    }

    #[test]
    fn test_new_with_missing_dir() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = ServerConfig::new(&missing).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
        assert!(err.to_string().contains("does-not-exist"));
    }

    #[test]
    fn test_from_current_dir_is_absolute() {
        let config = ServerConfig::from_current_dir().unwrap();
        assert!(config.base_dir.is_absolute());
    }
}
