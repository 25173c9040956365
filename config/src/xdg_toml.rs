//! `[env]` table from `$XDG_CONFIG_HOME/<app>/config.toml`.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// `$XDG_CONFIG_HOME` when set to an absolute path, else `<home>/.config`.
fn config_home(xdg: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    xdg.map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| home.map(|h| h.join(".config")))
}

/// Path of the app's config file if it exists.
pub(crate) fn config_file(app_name: &str) -> Result<Option<PathBuf>, LoadError> {
    let base = config_home(std::env::var_os("XDG_CONFIG_HOME"), dirs::home_dir())
        .ok_or_else(|| LoadError::XdgPath("no XDG_CONFIG_HOME and no home directory".into()))?;
    let path = base.join(app_name).join("config.toml");
    Ok(path.is_file().then_some(path))
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
}

/// Env key-value pairs from the `[env]` section; no section yields an empty map.
pub(crate) fn load_env_map(path: &Path) -> Result<HashMap<String, String>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::XdgRead {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ConfigFile = toml::from_str(&content).map_err(|source| LoadError::XdgParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config.env)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn xdg_variable_wins_over_home() {
        let home = config_home(Some("/xdg".into()), Some(PathBuf::from("/home/u")));
        assert_eq!(home, Some(PathBuf::from("/xdg")));
    }

    #[test]
    fn relative_or_missing_xdg_falls_back_to_home() {
        let expected = Some(PathBuf::from("/home/u/.config"));
        assert_eq!(
            config_home(Some("relative".into()), Some(PathBuf::from("/home/u"))),
            expected
        );
        assert_eq!(config_home(None, Some(PathBuf::from("/home/u"))), expected);
        assert_eq!(config_home(None, None), None);
    }

    #[test]
    fn missing_app_config_is_none() {
        let file = config_file("aspen-config-test-nonexistent-12345").unwrap_or(None);
        assert!(file.is_none());
    }

    #[test]
    fn reads_env_table() {
        let (_dir, path) = config("[env]\nFOO = \"from_toml\"\nBAR = \"baz\"\n");
        let map = load_env_map(&path).unwrap();
        assert_eq!(map.get("FOO").map(String::as_str), Some("from_toml"));
        assert_eq!(map.get("BAR").map(String::as_str), Some("baz"));
    }

    #[test]
    fn other_sections_are_ignored() {
        let (_dir, path) = config("[other]\nkey = \"ignored\"\n");
        assert!(load_env_map(&path).unwrap().is_empty());
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let (_dir, path) = config("not valid toml [[[\n");
        assert!(matches!(
            load_env_map(&path),
            Err(LoadError::XdgParse { .. })
        ));
    }
}
