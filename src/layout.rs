//! On-disk cache layout
//!
//! ```text
//! <root>/versions/version_manifest.json
//! <root>/versions/<id>/meta.json
//! <root>/versions/<id>/client_<id>.jar
//! <root>/versions/<id>/server_<id>.jar
//! <root>/versions/<id>/libraries/<relative path>
//! <root>/versions/<id>/native-libraries/<file name>
//! ```
//!
//! Paths are write-once. Existence of a path is the only signal that it has
//! been materialized.

use std::path::{Path, PathBuf};

use crate::core::fs_utils;
use crate::error::Result;

/// Which primary payload a run materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadKind {
    #[default]
    Client,
    Server,
}

impl PayloadKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }
}

/// Path arithmetic for a cache rooted at one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    root: PathBuf,
}

impl CacheLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn versions_dir(&self) -> PathBuf {
        self.root.join("versions")
    }

    /// Cached copy of the version catalog.
    pub fn catalog_file(&self) -> PathBuf {
        self.versions_dir().join("version_manifest.json")
    }

    /// Directory holding everything for one version.
    ///
    /// Fails if `id` is not a single path component.
    pub fn version_dir(&self, id: &str) -> Result<PathBuf> {
        Ok(self.versions_dir().join(fs_utils::validate_component(id)?))
    }

    pub fn package_file(&self, id: &str) -> Result<PathBuf> {
        Ok(self.version_dir(id)?.join("meta.json"))
    }

    pub fn payload_file(&self, id: &str, kind: PayloadKind) -> Result<PathBuf> {
        Ok(self
            .version_dir(id)?
            .join(format!("{}_{}.jar", kind.name(), id)))
    }

    pub fn libraries_dir(&self, id: &str) -> Result<PathBuf> {
        Ok(self.version_dir(id)?.join("libraries"))
    }

    pub fn natives_dir(&self, id: &str) -> Result<PathBuf> {
        Ok(self.version_dir(id)?.join("native-libraries"))
    }

    /// Destination for an ordinary library, preserving its nested relative path.
    pub fn library_file(&self, id: &str, relative_path: &str) -> Result<PathBuf> {
        let relative = fs_utils::validate_relative_path(relative_path)?;
        Ok(self.libraries_dir(id)?.join(relative))
    }

    /// Destination for a native library, flattened to its file name.
    pub fn native_file(&self, id: &str, file_name: &str) -> Result<PathBuf> {
        Ok(self
            .natives_dir(id)?
            .join(fs_utils::validate_component(file_name)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn layout() -> CacheLayout {
        CacheLayout::new("/cache")
    }

    #[test]
    fn test_catalog_file() {
        assert_eq!(
            layout().catalog_file(),
            PathBuf::from("/cache/versions/version_manifest.json")
        );
    }

    #[test]
    fn test_version_scoped_paths() {
        let l = layout();
        assert_eq!(
            l.package_file("1.20.1").unwrap(),
            PathBuf::from("/cache/versions/1.20.1/meta.json")
        );
        assert_eq!(
            l.payload_file("1.20.1", PayloadKind::Client).unwrap(),
            PathBuf::from("/cache/versions/1.20.1/client_1.20.1.jar")
        );
        assert_eq!(
            l.payload_file("1.20.1", PayloadKind::Server).unwrap(),
            PathBuf::from("/cache/versions/1.20.1/server_1.20.1.jar")
        );
    }

    #[test]
    fn test_library_file_preserves_nesting() {
        let path = layout()
            .library_file("1.20.1", "com/google/guava/guava/31.1/guava-31.1.jar")
            .unwrap();
        assert_eq!(
            path,
            PathBuf::from(
                "/cache/versions/1.20.1/libraries/com/google/guava/guava/31.1/guava-31.1.jar"
            )
        );
    }

    #[test]
    fn test_native_file_is_flat() {
        let path = layout()
            .native_file("1.20.1", "lwjgl-3.3.1-natives-linux.jar")
            .unwrap();
        assert_eq!(
            path,
            PathBuf::from("/cache/versions/1.20.1/native-libraries/lwjgl-3.3.1-natives-linux.jar")
        );
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let l = layout();
        assert!(matches!(
            l.library_file("1.20.1", "../../../etc/passwd"),
            Err(Error::UnsafePath { .. })
        ));
        assert!(matches!(
            l.version_dir("../outside"),
            Err(Error::UnsafePath { .. })
        ));
        assert!(matches!(
            l.native_file("1.20.1", "nested/name.jar"),
            Err(Error::UnsafePath { .. })
        ));
    }
}
