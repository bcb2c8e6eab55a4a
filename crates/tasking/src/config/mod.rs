//! Configuration module for tasking.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

pub mod keybindings;

pub use keybindings::{Action, KeyBindingsConfig, ViewType};

const CONFIG_DIR: &str = "tasking";
const CONFIG_FILE: &str = "config.toml";
const DB_FILE: &str = "tasks.db3";

/// Top-level configuration loaded from the user config directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Database location.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Export target.
    #[serde(default)]
    pub export: ExportConfig,
    /// TUI configuration.
    #[serde(default)]
    pub tui: TuiConfig,
}

/// Database location block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite file; defaults to the user data directory.
    pub path: Option<PathBuf>,
}

/// Export target block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving `<epoch-ms>.json` files; defaults to the current
    /// directory.
    pub dir: Option<PathBuf>,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Keybindings configuration.
    #[serde(default)]
    pub keybindings: KeyBindingsConfig,
}

/// Returns the default configuration file path.
///
/// On Linux/macOS: `~/.config/tasking/config.toml`
/// On Windows: `%APPDATA%\tasking\config.toml`
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

impl Config {
    /// Load configuration, falling back to defaults when the file is absent.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read, parsed, or
    /// validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;
        keybindings::validate_keybindings_config(&config.tui.keybindings)?;
        Ok(config)
    }

    /// Resolve the database path: CLI override, then config, then the user
    /// data directory. The parent directory is created when missing.
    ///
    /// # Errors
    /// Returns an error when no location can be determined or the parent
    /// directory cannot be created.
    pub fn resolve_db_path(&self, cli_override: Option<PathBuf>) -> Result<PathBuf> {
        let path = cli_override
            .or_else(|| self.database.path.clone())
            .or_else(|| dirs::data_dir().map(|dir| dir.join(CONFIG_DIR).join(DB_FILE)))
            .ok_or_else(|| anyhow!("could not determine a database location"))?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        Ok(path)
    }

    /// Resolve the export directory; defaults to the current directory.
    #[must_use]
    pub fn resolve_export_dir(&self) -> PathBuf {
        self.export
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().expect("create temp dir");
        let config = Config::load(Some(&dir.path().join("nope.toml"))).expect("load");
        assert!(config.database.path.is_none());
        assert_eq!(config.resolve_export_dir(), PathBuf::from("."));
    }

    #[test]
    fn parses_database_and_export_blocks() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[database]\npath = \"/tmp/tasks.db3\"\n\n[export]\ndir = \"/tmp/exports\"\n",
        )
        .expect("write config");

        let config = Config::load(Some(&path)).expect("load");
        assert_eq!(config.database.path.as_deref(), Some(Path::new("/tmp/tasks.db3")));
        assert_eq!(config.resolve_export_dir(), PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn cli_override_wins_over_config() {
        let dir = TempDir::new().expect("create temp dir");
        let override_path = dir.path().join("cli.db3");
        let config = Config {
            database: DatabaseConfig {
                path: Some(dir.path().join("config.db3")),
            },
            ..Config::default()
        };
        let resolved = config
            .resolve_db_path(Some(override_path.clone()))
            .expect("resolve");
        assert_eq!(resolved, override_path);
    }

    #[test]
    fn rejects_invalid_keybindings() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[tui.keybindings.task_list]\nquit = [\"NoSuchKey\"]\n",
        )
        .expect("write config");

        assert!(Config::load(Some(&path)).is_err());
    }
}
