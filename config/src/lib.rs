//! Load configuration from XDG `config.toml` and project `.env`, then apply it to the process
//! environment with priority: **existing env > .env > XDG**.
//!
//! Aspen itself only reads `ASPEN_*`, `RUST_LOG` and `LOG_FILE` from the environment;
//! this crate is how those get there from files.

mod dotenv;
mod xdg_toml;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read {path}: {source}")]
    XdgRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    XdgParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("read {path}: {source}")]
    DotenvRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Files that [`apply`] reads. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSources {
    /// `$XDG_CONFIG_HOME/<app>/config.toml`, when it exists.
    pub xdg_file: Option<PathBuf>,
    /// `.env` in the override directory or the current directory, when it exists.
    pub dotenv_file: Option<PathBuf>,
}

impl ConfigSources {
    /// Locates the config files for `app_name`.
    ///
    /// * `override_dir`: look for `.env` here instead of `std::env::current_dir()`.
    pub fn discover(app_name: &str, override_dir: Option<&Path>) -> Result<Self, LoadError> {
        Ok(Self {
            xdg_file: xdg_toml::config_file(app_name)?,
            dotenv_file: dotenv::dotenv_path(override_dir),
        })
    }
}

/// What [`apply`] did.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub sources: ConfigSources,
    /// Keys that were set, sorted. Keys already in the environment are not listed.
    pub applied: Vec<String>,
}

/// Loads XDG `config.toml` and `.env` for `app_name` and sets environment variables
/// only for keys that are **not** already set.
///
/// Order of precedence when a key is missing in the process environment:
/// 1. Value from project `.env` (current directory or `override_dir` if given)
/// 2. Value from `$XDG_CONFIG_HOME/<app_name>/config.toml` `[env]` table
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<LoadReport, LoadError> {
    apply(ConfigSources::discover(app_name, override_dir)?)
}

/// Applies the given files to the process environment (env > .env > XDG).
pub fn apply(sources: ConfigSources) -> Result<LoadReport, LoadError> {
    let mut merged: BTreeMap<String, String> = match &sources.xdg_file {
        Some(path) => xdg_toml::load_env_map(path)?.into_iter().collect(),
        None => BTreeMap::new(),
    };
    if let Some(path) = &sources.dotenv_file {
        let map = dotenv::load_env_map(path).map_err(|source| LoadError::DotenvRead {
            path: path.clone(),
            source,
        })?;
        merged.extend(map);
    }

    let mut applied = Vec::new();
    for (key, value) in merged {
        if std::env::var_os(&key).is_some() {
            continue;
        }
        std::env::set_var(&key, value);
        applied.push(key);
    }
    Ok(LoadReport { sources, applied })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn existing_env_wins() {
        let dir = tempfile::tempdir().unwrap();
        let dotenv = write(dir.path(), ".env", "ASPEN_CFG_TEST_EXISTING=from_dotenv\n");
        env::set_var("ASPEN_CFG_TEST_EXISTING", "from_env");
        let report = apply(ConfigSources {
            xdg_file: None,
            dotenv_file: Some(dotenv),
        })
        .unwrap();
        assert_eq!(env::var("ASPEN_CFG_TEST_EXISTING").as_deref(), Ok("from_env"));
        assert!(report.applied.is_empty());
        env::remove_var("ASPEN_CFG_TEST_EXISTING");
    }

    #[test]
    fn no_files_is_ok() {
        let report = apply(ConfigSources::default()).unwrap();
        assert!(report.applied.is_empty());
    }

    #[test]
    fn dotenv_overrides_xdg_and_xdg_fills_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let xdg = write(
            dir.path(),
            "config.toml",
            "[env]\nASPEN_CFG_TEST_PRIORITY = \"from_xdg\"\nASPEN_CFG_TEST_XDG_ONLY = \"xdg\"\n",
        );
        let dotenv = write(dir.path(), ".env", "ASPEN_CFG_TEST_PRIORITY=from_dotenv\n");
        env::remove_var("ASPEN_CFG_TEST_PRIORITY");
        env::remove_var("ASPEN_CFG_TEST_XDG_ONLY");

        let report = apply(ConfigSources {
            xdg_file: Some(xdg),
            dotenv_file: Some(dotenv),
        })
        .unwrap();
        let priority = env::var("ASPEN_CFG_TEST_PRIORITY").unwrap();
        let xdg_only = env::var("ASPEN_CFG_TEST_XDG_ONLY").unwrap();
        env::remove_var("ASPEN_CFG_TEST_PRIORITY");
        env::remove_var("ASPEN_CFG_TEST_XDG_ONLY");

        assert_eq!(priority, "from_dotenv");
        assert_eq!(xdg_only, "xdg");
        assert_eq!(
            report.applied,
            vec!["ASPEN_CFG_TEST_PRIORITY", "ASPEN_CFG_TEST_XDG_ONLY"]
        );
    }

    #[test]
    fn invalid_xdg_toml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let xdg = write(dir.path(), "config.toml", "invalid [[[\n");
        let err = apply(ConfigSources {
            xdg_file: Some(xdg.clone()),
            dotenv_file: None,
        })
        .unwrap_err();
        assert!(matches!(err, LoadError::XdgParse { .. }));
        assert!(err.to_string().contains(&xdg.display().to_string()));
    }

    #[test]
    fn discover_finds_dotenv_in_override_dir() {
        let dir = tempfile::tempdir().unwrap();
        let dotenv = write(dir.path(), ".env", "X=1\n");
        let sources =
            ConfigSources::discover("aspen-config-test-nonexistent-app", Some(dir.path())).unwrap();
        assert_eq!(sources.dotenv_file, Some(dotenv));
    }
}
