use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BledError, Result};

/// User-level configuration loaded from `~/.config/create-bled-app/config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Directory holding the `bled-<database>-<auth>` template bundles.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

/// Get the path to the user config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("create-bled-app").join("config.toml"))
}

/// Load user configuration from `path`, usually [`config_path`].
///
/// Returns `Ok(None)` if the config file does not exist.
/// Returns `Err` if the file exists but cannot be read or parsed.
pub fn load_user_config_from(path: &Path) -> Result<Option<UserConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| BledError::Io {
        context: format!("reading user config {}", path.display()),
        source: e,
    })?;

    let config: UserConfig =
        toml::from_str(&content).map_err(|e| BledError::UserConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_templates_dir() {
        let config: UserConfig = toml::from_str(r#"templates_dir = "/opt/bled/templates""#).unwrap();
        assert_eq!(
            config.templates_dir.as_deref(),
            Some(Path::new("/opt/bled/templates"))
        );
    }

    #[test]
    fn parse_empty_config() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert!(config.templates_dir.is_none());
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_user_config_from(&dir.path().join("config.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn load_malformed_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid [[ toml").unwrap();

        let err = load_user_config_from(&path).unwrap_err();
        assert!(matches!(err, BledError::UserConfigParse { .. }));
    }
}
