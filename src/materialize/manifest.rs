use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{BledError, Result};
use crate::template::MANIFEST_FILE;

/// Version every generated project starts from.
pub const INITIAL_VERSION: &str = "0.0.1";

/// Rewrite `name` and `version` in `<destination>/package.json`.
///
/// Every other field keeps its value and position. The document is written
/// back with two-space indentation.
pub fn patch_manifest(destination: &Path, project_name: &str) -> Result<()> {
    let path = destination.join(MANIFEST_FILE);
    match std::fs::symlink_metadata(&path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            return Err(BledError::ManifestSymlink { path });
        }
        Ok(meta) if meta.is_file() => {}
        _ => return Err(BledError::ManifestMissing { path }),
    }

    let content = std::fs::read_to_string(&path).map_err(|e| BledError::Io {
        context: format!("reading {}", path.display()),
        source: e,
    })?;

    let mut manifest: Value =
        serde_json::from_str(&content).map_err(|e| BledError::ManifestParse {
            path: path.clone(),
            source: e,
        })?;

    let Some(fields) = manifest.as_object_mut() else {
        return Err(BledError::ManifestShape { path });
    };
    fields.insert("name".into(), Value::String(project_name.to_string()));
    fields.insert("version".into(), Value::String(INITIAL_VERSION.to_string()));

    let patched =
        serde_json::to_string_pretty(&manifest).map_err(|e| BledError::ManifestSerialize {
            path: path.clone(),
            source: e,
        })?;

    std::fs::write(&path, patched).map_err(|e| BledError::Io {
        context: format!("writing {}", path.display()),
        source: e,
    })?;

    debug!(path = %path.display(), name = project_name, "patched manifest");
    Ok(())
}
