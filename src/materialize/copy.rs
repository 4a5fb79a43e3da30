use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::{BledError, Result};
use crate::template::{TemplateBundle, MANIFEST_FILE};

/// What a copy wrote, relative to the destination.
#[derive(Debug, Default)]
pub struct CopyReport {
    pub files: Vec<PathBuf>,
    pub directories: Vec<PathBuf>,
}

/// Recursively copy a bundle into `destination`.
///
/// Existing files are never overwritten: hitting one aborts with
/// [`BledError::WouldOverwrite`]. Nothing already copied is rolled back.
/// A symlinked top-level manifest is copied as a regular file, since it is
/// rewritten afterwards.
pub fn materialize(bundle: &TemplateBundle, destination: &Path) -> Result<CopyReport> {
    std::fs::create_dir_all(destination).map_err(|e| BledError::Io {
        context: format!("creating directory {}", destination.display()),
        source: e,
    })?;

    let mut report = CopyReport::default();

    for entry in WalkDir::new(&bundle.path).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| BledError::Walk {
            path: bundle.path.clone(),
            source: e,
        })?;
        let Ok(rel_path) = entry.path().strip_prefix(&bundle.path) else {
            continue;
        };
        let dest_path = destination.join(rel_path);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            std::fs::create_dir_all(&dest_path).map_err(|e| BledError::Io {
                context: format!("creating directory {}", dest_path.display()),
                source: e,
            })?;
            report.directories.push(rel_path.to_path_buf());
        } else if file_type.is_symlink() && rel_path != Path::new(MANIFEST_FILE) {
            copy_symlink(entry.path(), &dest_path)?;
            report.files.push(rel_path.to_path_buf());
        } else {
            copy_file_new(entry.path(), &dest_path)?;
            report.files.push(rel_path.to_path_buf());
        }
        trace!(path = %rel_path.display(), "copied");
    }

    debug!(
        key = %bundle.key,
        files = report.files.len(),
        directories = report.directories.len(),
        "materialized template bundle"
    );

    Ok(report)
}

/// Copy contents and permissions into a file that must not exist yet.
fn copy_file_new(src: &Path, dest: &Path) -> Result<()> {
    let mut reader = File::open(src).map_err(|e| BledError::Io {
        context: format!("reading {}", src.display()),
        source: e,
    })?;

    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest)
        .map_err(|e| refuse_overwrite(e, dest))?;

    std::io::copy(&mut reader, &mut writer).map_err(|e| BledError::Io {
        context: format!("writing {}", dest.display()),
        source: e,
    })?;

    let permissions = reader
        .metadata()
        .map_err(|e| BledError::Io {
            context: format!("reading metadata of {}", src.display()),
            source: e,
        })?
        .permissions();
    writer.set_permissions(permissions).map_err(|e| BledError::Io {
        context: format!("setting permissions on {}", dest.display()),
        source: e,
    })
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dest: &Path) -> Result<()> {
    let target = std::fs::read_link(src).map_err(|e| BledError::Io {
        context: format!("reading link {}", src.display()),
        source: e,
    })?;
    std::os::unix::fs::symlink(&target, dest).map_err(|e| refuse_overwrite(e, dest))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dest: &Path) -> Result<()> {
    copy_file_new(src, dest)
}

fn refuse_overwrite(e: std::io::Error, dest: &Path) -> BledError {
    if e.kind() == ErrorKind::AlreadyExists {
        BledError::WouldOverwrite {
            path: dest.to_path_buf(),
        }
    } else {
        BledError::Io {
            context: format!("creating {}", dest.display()),
            source: e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Auth, Database};
    use crate::template::TemplateKey;
    use std::fs;

    fn bundle(dir: &Path) -> TemplateBundle {
        let path = dir.join("bled-turso-creds");
        fs::create_dir_all(path.join("src/routes")).unwrap();
        fs::create_dir_all(path.join("drizzle")).unwrap();
        fs::write(path.join("package.json"), r#"{"name":"bled"}"#).unwrap();
        fs::write(path.join("src/index.ts"), "export {}\n").unwrap();
        fs::write(path.join("src/routes/auth.ts"), "// auth\n").unwrap();
        TemplateBundle {
            key: TemplateKey::new(Database::Turso, Auth::Creds),
            path,
        }
    }

    #[test]
    fn test_materialize_copies_tree() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let bundle = bundle(src.path());
        let dest = out.path().join("my-app");

        let report = materialize(&bundle, &dest).unwrap();

        assert_eq!(
            report.files,
            vec![
                PathBuf::from("package.json"),
                PathBuf::from("src/index.ts"),
                PathBuf::from("src/routes/auth.ts"),
            ]
        );
        assert!(dest.join("drizzle").is_dir(), "empty directories are kept");
        assert_eq!(
            fs::read_to_string(dest.join("src/routes/auth.ts")).unwrap(),
            "// auth\n"
        );
    }

    #[test]
    fn test_materialize_refuses_to_overwrite() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let bundle = bundle(src.path());
        let dest = out.path().join("my-app");
        fs::create_dir_all(dest.join("src")).unwrap();
        fs::write(dest.join("src/index.ts"), "mine").unwrap();

        let err = materialize(&bundle, &dest).unwrap_err();

        assert!(matches!(err, BledError::WouldOverwrite { ref path } if path.ends_with("src/index.ts")));
        assert_eq!(fs::read_to_string(dest.join("src/index.ts")).unwrap(), "mine");
    }

    #[cfg(unix)]
    #[test]
    fn test_materialize_keeps_permissions_and_symlinks() {
        use std::os::unix::fs::PermissionsExt;

        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let bundle = bundle(src.path());
        let script = bundle.path.join("migrate.sh");
        fs::write(&script, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        std::os::unix::fs::symlink("src/index.ts", bundle.path.join("main.ts")).unwrap();

        let dest = out.path().join("my-app");
        materialize(&bundle, &dest).unwrap();

        let mode = fs::metadata(dest.join("migrate.sh")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        assert_eq!(
            fs::read_link(dest.join("main.ts")).unwrap(),
            PathBuf::from("src/index.ts")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_materialize_dereferences_symlinked_manifest() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let bundle = bundle(src.path());
        let shared = src.path().join("shared-package.json");
        fs::write(&shared, r#"{"name":"shared"}"#).unwrap();
        fs::remove_file(bundle.path.join(MANIFEST_FILE)).unwrap();
        std::os::unix::fs::symlink(&shared, bundle.path.join(MANIFEST_FILE)).unwrap();

        let dest = out.path().join("my-app");
        materialize(&bundle, &dest).unwrap();

        let copied = dest.join(MANIFEST_FILE);
        assert!(!fs::symlink_metadata(&copied).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(copied).unwrap(), r#"{"name":"shared"}"#);
    }
}
