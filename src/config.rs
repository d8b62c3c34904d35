//! Check-in configuration.
//!
//! Loaded from `~/.checkin/config.toml`. Every key is optional and a
//! missing file means defaults:
//!
//! ```toml
//! data-dir = "/var/lib/checkin"
//! default-station = "ENTRADA"
//! log-filter = "checkin=info"
//! ```
//!
//! The data directory is resolved through a chain:
//!
//! 1. `--data-dir <path>` (per command)
//! 2. `CHECKIN_DATA_DIR` env var
//! 3. `data-dir` in the config file
//! 4. `~/.checkin/data/`

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::model::Station;
use crate::storage::Storage;

/// Environment variable that overrides the configured data directory.
pub const DATA_DIR_ENV: &str = "CHECKIN_DATA_DIR";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Check-in configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Where snapshots are kept.
    pub data_dir: Option<PathBuf>,

    /// Station a desk opens at when `--station` is not given.
    pub default_station: Option<Station>,

    /// Tracing filter used when `CHECKIN_LOG` is unset.
    pub log_filter: Option<String>,
}

impl Config {
    /// Load config from `~/.checkin/config.toml`, or defaults if it doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The config file path: `~/.checkin/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".checkin").join("config.toml"))
    }

    /// Resolve the data directory from the tiered chain.
    ///
    /// Returns `None` only when every source is empty and the home
    /// directory cannot be determined.
    pub fn resolve_data_dir(&self, explicit: Option<PathBuf>) -> Option<PathBuf> {
        let from_env = env::var_os(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        pick_data_dir(explicit, from_env, self.data_dir.clone())
            .or_else(Storage::default_root)
    }

    pub fn default_station(&self) -> Station {
        self.default_station.unwrap_or(Station::Entrada)
    }
}

/// First present source wins: explicit flag, then environment, then config file.
fn pick_data_dir(
    explicit: Option<PathBuf>,
    from_env: Option<PathBuf>,
    configured: Option<PathBuf>,
) -> Option<PathBuf> {
    explicit.or(from_env).or(configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert!(config.data_dir.is_none());
        assert_eq!(config.default_station(), Station::Entrada);
    }

    #[test]
    fn parses_kebab_case_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "data-dir = \"/tmp/checkin\"\n\
             default-station = \"sala-vip\"\n\
             log-filter = \"debug\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/checkin")));
        assert_eq!(config.default_station(), Station::SalaVip);
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn unknown_station_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default-station = \"LOBBY\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn explicit_wins_over_env_and_config() {
        let picked = pick_data_dir(
            Some("/flag".into()),
            Some("/env".into()),
            Some("/config".into()),
        );
        assert_eq!(picked, Some(PathBuf::from("/flag")));
    }

    #[test]
    fn env_wins_over_config() {
        let picked = pick_data_dir(None, Some("/env".into()), Some("/config".into()));
        assert_eq!(picked, Some(PathBuf::from("/env")));

        let picked = pick_data_dir(None, None, Some("/config".into()));
        assert_eq!(picked, Some(PathBuf::from("/config")));
    }
}
