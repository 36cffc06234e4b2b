//! `cipherlab.toml` loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cipherlab_core::rsa::DEFAULT_MAX_ATTEMPTS;
use log::info;
use serde::Deserialize;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "CIPHERLAB_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "cipherlab.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub rsa: RsaConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RsaConfig {
    pub p: u64,
    pub q: u64,
    pub max_e_attempts: usize,
}

impl Default for RsaConfig {
    fn default() -> Self {
        Self {
            p: 17,
            q: 19,
            max_e_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("cipherlab.db"),
        }
    }
}

impl Config {
    /// Loads `explicit`, else `$CIPHERLAB_CONFIG`, else `./cipherlab.toml`.
    ///
    /// A path that was asked for must exist; the implicit default may be
    /// missing, in which case built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let requested = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match requested {
            Some(path) => Self::from_file(&path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    info!("{DEFAULT_CONFIG_FILE} not found, using built-in defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!((config.rsa.p, config.rsa.q), (17, 19));
        assert_eq!(config.store.path, PathBuf::from("cipherlab.db"));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::parse("[rsa]\np = 61\nq = 53\n").unwrap();
        assert_eq!(config.rsa.p, 61);
        assert_eq!(config.rsa.max_e_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("[rsa]\nprime = 3\n").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lab.toml");
        fs::write(&path, "[store]\npath = \"/tmp/lab.db\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.store.path, PathBuf::from("/tmp/lab.db"));
    }
}
