//! User configuration loaded from `config.toml`.
//!
//! ```toml
//! [engine]
//! depth_mode = "shared"   # or "per-path"
//!
//! [display]
//! error_marker = "#ERR!"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{GridletError, Result};
use gridlet_engine::engine::DepthMode;

const MAX_CONFIG_FILE_BYTES: u64 = 65_536;

pub const DEFAULT_ERROR_MARKER: &str = "#ERR!";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub engine: EngineConfig,
    pub display: DisplayConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub depth_mode: DepthMode,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Shown in place of a value when a cell fails to render.
    pub error_marker: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
        }
    }
}

impl Config {
    /// `<config_dir>/gridlet/config.toml` for the current platform.
    pub fn default_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("", "", "gridlet")?;
        let mut path = proj.config_dir().to_path_buf();
        path.push("config.toml");
        Some(path)
    }

    /// Load the user's config, falling back to defaults when there is none.
    pub fn discover() -> Result<Config> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Config> {
        let config_err = |message: String| GridletError::Config {
            path: path.to_path_buf(),
            message,
        };
        let meta = std::fs::metadata(path)?;
        if meta.len() > MAX_CONFIG_FILE_BYTES {
            return Err(config_err(format!(
                "file too large ({} bytes, max {})",
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content).map_err(|e| config_err(e.to_string()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> std::result::Result<Config, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.engine.depth_mode, DepthMode::Shared);
        assert_eq!(config.display.error_marker, "#ERR!");
    }

    #[test]
    fn test_parse_all_keys() {
        let config = Config::parse(
            "[engine]\ndepth_mode = \"per-path\"\n\n[display]\nerror_marker = \"ERR\"\n",
        )
        .unwrap();
        assert_eq!(config.engine.depth_mode, DepthMode::PerPath);
        assert_eq!(config.display.error_marker, "ERR");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(Config::parse("[engine]\nmax_depth = 3\n").is_err());
        assert!(Config::parse("[engine]\ndepth_mode = \"sideways\"\n").is_err());
    }

    #[test]
    fn test_load_reports_path_on_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nerror_marker = 5").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        match err {
            GridletError::Config { path, .. } => assert_eq!(path, file.path()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, GridletError::Io(_)));
    }
}
