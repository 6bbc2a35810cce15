//! Path canonicalization and relative store keys

use crate::error::StorageError;
use std::path::{Component, Path, PathBuf};

/// Canonicalize the workspace root (resolves symlinks, `..`, `.`).
pub fn canonical_root(path: &Path) -> Result<PathBuf, StorageError> {
    dunce::canonicalize(path).map_err(|e| {
        StorageError::InvalidPath(format!(
            "Failed to canonicalize {}: {}",
            path.display(),
            e
        ))
    })
}

/// Store key for `file` relative to `root`: the on-disk component names
/// joined with `/`. Names are kept byte-exact so the key can be re-joined
/// onto the root and found again; names that are not valid UTF-8 have no key.
pub fn relative_key(root: &Path, file: &Path) -> Result<String, StorageError> {
    let relative = file.strip_prefix(root).map_err(|_| {
        StorageError::InvalidPath(format!(
            "{} is not inside {}",
            file.display(),
            root.display()
        ))
    })?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => match name.to_str() {
                Some(name) => parts.push(name),
                None => {
                    return Err(StorageError::InvalidPath(format!(
                        "{} is not valid UTF-8",
                        relative.display()
                    )))
                }
            },
            Component::CurDir => {}
            other => {
                return Err(StorageError::InvalidPath(format!(
                    "Unexpected component {:?} in {}",
                    other,
                    relative.display()
                )))
            }
        }
    }
    if parts.is_empty() {
        return Err(StorageError::InvalidPath(format!(
            "{} has no relative component",
            file.display()
        )));
    }
    Ok(parts.join("/"))
}

/// Absolute path for a store key under `root`.
pub fn resolve_key(root: &Path, key: &str) -> PathBuf {
    key.split('/').fold(root.to_path_buf(), |acc, part| acc.join(part))
}
