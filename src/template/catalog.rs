use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::{BledError, Result};
use crate::template::key::TemplateKey;

/// Name of the manifest file every bundle carries.
pub const MANIFEST_FILE: &str = "package.json";

/// A prewritten template directory, treated as read-only payload.
#[derive(Debug, Clone)]
pub struct TemplateBundle {
    pub key: TemplateKey,
    pub path: PathBuf,
}

impl TemplateBundle {
    /// Relative paths of every non-directory entry in the bundle, sorted.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.path).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| BledError::Walk {
                path: self.path.clone(),
                source: e,
            })?;
            if entry.file_type().is_dir() {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(&self.path) {
                files.push(rel.to_path_buf());
            }
        }
        Ok(files)
    }
}

/// The set of bundles available under a template root, enumerated once.
#[derive(Debug)]
pub struct TemplateCatalog {
    root: PathBuf,
    keys: BTreeSet<TemplateKey>,
}

impl TemplateCatalog {
    /// Scan `root` for `bled-<database>-<auth>` directories.
    ///
    /// Entries that are not directories or don't parse as a key are ignored.
    pub fn discover(root: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(root).map_err(|e| BledError::Io {
            context: format!("reading template directory {}", root.display()),
            source: e,
        })?;

        let mut keys = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| BledError::Io {
                context: format!("reading template directory {}", root.display()),
                source: e,
            })?;
            let name = entry.file_name();
            let Some(key) = name.to_str().and_then(TemplateKey::parse) else {
                trace!(entry = %name.to_string_lossy(), "skipping non-template entry");
                continue;
            };
            if entry.path().is_dir() {
                keys.insert(key);
            }
        }

        debug!(root = %root.display(), templates = keys.len(), "discovered template catalog");

        Ok(Self {
            root: root.to_path_buf(),
            keys,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn keys(&self) -> impl Iterator<Item = &TemplateKey> {
        self.keys.iter()
    }

    /// Find the bundle for `key`.
    ///
    /// A missing combination is [`BledError::TemplateNotFound`], not an I/O error.
    pub fn locate_bundle(&self, key: TemplateKey) -> Result<TemplateBundle> {
        if !self.keys.contains(&key) {
            return Err(BledError::TemplateNotFound { key });
        }
        let path = self.root.join(key.dir_name());
        debug!(%key, path = %path.display(), "located template bundle");
        Ok(TemplateBundle { key, path })
    }
}
