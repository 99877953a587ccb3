//! Cache filesystem primitives
//!
//! Every cache file is written once: bytes land in a temp file beside the
//! destination and are persisted over it, so a failed write never leaves a
//! partial file behind.

use std::io::Write;
use std::path::{Component, Path};

use crate::error::{Error, Result};

/// Mode applied to every persisted cache file (temp files start as 0600).
const CACHE_FILE_MODE: u32 = 0o644;

/// Ensure a file's parent directory exists.
///
/// Creates the parent directory (and all ancestors) if it doesn't exist.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|source| Error::CacheWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Write `bytes` to `dest` atomically, creating missing parent directories.
pub fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<()> {
    ensure_parent_dir(dest)?;

    let write_err = |source: std::io::Error| Error::CacheWrite {
        path: dest.to_path_buf(),
        source,
    };

    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(dest).map_err(|e| write_err(e.error))?;

    set_mode(dest, CACHE_FILE_MODE).map_err(write_err)
}

/// Read a cached file, mapping failures to [`Error::CacheRead`].
pub fn read_cached(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| Error::CacheRead {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

/// Check if a remote-supplied relative path stays beneath its base directory.
///
/// Rejects empty paths, absolute paths, roots and any `..` component.
pub fn is_safe_relative_path(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && !path.is_absolute()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Validate a relative path, returning [`Error::UnsafePath`] if it could escape.
pub fn validate_relative_path(path: &str) -> Result<&Path> {
    let p = Path::new(path);
    if !is_safe_relative_path(p) {
        return Err(Error::UnsafePath {
            path: path.to_string(),
        });
    }
    Ok(p)
}

/// Validate that `name` is exactly one normal path component (no separators).
pub fn validate_component(name: &str) -> Result<&str> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(name),
        _ => Err(Error::UnsafePath {
            path: name.to_string(),
        }),
    }
}
