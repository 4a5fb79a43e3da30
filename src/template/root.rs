use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::user::{config_path, load_user_config_from};
use crate::error::{BledError, Result};

/// Environment variable naming the template root.
pub const TEMPLATES_ENV: &str = "BLED_TEMPLATES_DIR";

const APP_DIR: &str = "create-bled-app";

/// Find the directory holding the template bundles.
///
/// Order: the explicit path (from `--templates-dir`), `BLED_TEMPLATES_DIR`,
/// `templates_dir` in the user config, then the first existing of the
/// install locations. Explicit sources are returned even if they don't exist.
pub fn resolve_template_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "template root from command line");
        return Ok(path.to_path_buf());
    }

    if let Some(value) = std::env::var_os(TEMPLATES_ENV).filter(|v| !v.is_empty()) {
        let path = PathBuf::from(value);
        debug!(path = %path.display(), env = TEMPLATES_ENV, "template root from environment");
        return Ok(path);
    }

    let user_config = config_path();
    if let Some(config_file) = &user_config {
        if let Some(dir) = load_user_config_from(config_file)?.and_then(|c| c.templates_dir) {
            let path = anchor_to(config_file, dir);
            debug!(path = %path.display(), "template root from user config");
            return Ok(path);
        }
    }

    first_existing(install_locations()).ok_or_else(|| BledError::TemplateRootMissing {
        config: user_config
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "the user config file".into()),
    })
}

/// Directories the templates are installed to alongside the binary.
fn install_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        locations.push(exe_dir.join("templates"));
        locations.push(exe_dir.join("../share").join(APP_DIR).join("templates"));
    }
    if let Some(data) = dirs::data_dir() {
        locations.push(data.join(APP_DIR).join("templates"));
    }
    locations
}

fn first_existing(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|p| {
        let found = p.is_dir();
        debug!(path = %p.display(), found, "probing template root");
        found
    })
}

/// Relative `templates_dir` values are relative to the config file.
fn anchor_to(config_file: &Path, dir: PathBuf) -> PathBuf {
    if dir.is_absolute() {
        return dir;
    }
    match config_file.parent() {
        Some(parent) => parent.join(dir),
        None => dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_root_wins_even_if_missing() {
        let root = resolve_template_root(Some(Path::new("/does/not/exist"))).unwrap();
        assert_eq!(root, PathBuf::from("/does/not/exist"));
    }

    #[test]
    fn test_first_existing_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("templates");
        std::fs::create_dir(&present).unwrap();

        let found = first_existing(vec![dir.path().join("missing"), present.clone()]);
        assert_eq!(found, Some(present));
    }

    #[test]
    fn test_first_existing_ignores_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("templates");
        std::fs::write(&file, "").unwrap();

        assert_eq!(first_existing(vec![file]), None);
    }

    #[test]
    fn test_anchor_relative_to_config_file() {
        let config = Path::new("/home/me/.config/create-bled-app/config.toml");
        assert_eq!(
            anchor_to(config, PathBuf::from("templates")),
            PathBuf::from("/home/me/.config/create-bled-app/templates")
        );
        assert_eq!(
            anchor_to(config, PathBuf::from("/srv/templates")),
            PathBuf::from("/srv/templates")
        );
    }
}
