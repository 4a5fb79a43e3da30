use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BledError, Result};

pub fn destination_path(cwd: &Path, project_name: &str) -> PathBuf {
    cwd.join(project_name)
}

/// Check that nothing exists at `<cwd>/<project_name>` and return that path.
///
/// Any entry counts, including files and dangling symlinks.
pub fn ensure_destination_available(cwd: &Path, project_name: &str) -> Result<PathBuf> {
    let path = destination_path(cwd, project_name);
    match std::fs::symlink_metadata(&path) {
        Ok(_) => Err(BledError::DestinationExists {
            name: project_name.to_string(),
            path,
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "destination is available");
            Ok(path)
        }
        Err(e) => Err(BledError::Io {
            context: format!("checking destination {}", path.display()),
            source: e,
        }),
    }
}
