//! Per-version metadata packages
//!
//! A package describes the primary payload, the dependency libraries and the
//! asset index of one version. Once published it never changes, so a cached
//! copy is trusted unconditionally.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::core::{fs_utils, output};
use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::layout::{CacheLayout, PayloadKind};
use crate::manifest::VersionType;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionPackage {
    pub id: String,
    pub downloads: Downloads,
    #[serde(default)]
    pub libraries: Vec<LibraryRef>,
    pub asset_index: Option<AssetIndexRef>,
    pub assets: Option<String>,
    #[serde(default)]
    pub compliance_level: u32,
    pub main_class: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<VersionType>,
    pub release_time: Option<String>,
    pub time: Option<String>,
    pub minimum_launcher_version: Option<u32>,
    /// Platform-conditional launch arguments; shape varies between versions.
    pub arguments: Option<serde_json::Value>,
    /// Pre-1.13 flat argument string.
    pub minecraft_arguments: Option<String>,
    pub java_version: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Downloads {
    pub client: DownloadRef,
    pub server: Option<DownloadRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadRef {
    pub url: String,
    #[serde(default)]
    pub sha1: String,
    #[serde(rename = "size", default)]
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetIndexRef {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub sha1: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub total_size: u64,
}

/// A dependency library, named `group:artifact:version`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LibraryRef {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<PlatformRule>,
    /// Platform key to classifier key, e.g. `linux -> natives-linux`.
    #[serde(rename = "natives", default)]
    pub native_classifiers: BTreeMap<String, String>,
    #[serde(default)]
    pub downloads: LibraryDownloads,
    pub extract: Option<ExtractRules>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct LibraryDownloads {
    pub artifact: Option<ArtifactRef>,
    #[serde(default)]
    pub classifiers: BTreeMap<String, ArtifactRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtifactRef {
    /// Maven-style `group/artifact/version/file.jar` path.
    #[serde(rename = "path", default)]
    pub relative_path: String,
    pub url: String,
    #[serde(default)]
    pub sha1: String,
    #[serde(rename = "size", default)]
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlatformRule {
    pub action: String,
    pub os: Option<OsSelector>,
    pub features: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OsSelector {
    pub name: Option<String>,
    pub version: Option<String>,
    pub arch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ExtractRules {
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl VersionPackage {
    pub fn from_slice(bytes: &[u8], origin: &str) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::parse(format!("version package ({})", origin), e))
    }

    /// The primary payload of the given kind, if this version publishes one.
    pub fn payload(&self, kind: PayloadKind) -> Option<&DownloadRef> {
        match kind {
            PayloadKind::Client => Some(&self.downloads.client),
            PayloadKind::Server => self.downloads.server.as_ref(),
        }
    }
}

impl LibraryRef {
    /// The universal (non-native) artifact.
    pub fn artifact(&self) -> Option<&ArtifactRef> {
        self.downloads.artifact.as_ref()
    }

    /// Artifact published under a classifier key such as `natives-linux`.
    pub fn classifier(&self, key: &str) -> Option<&ArtifactRef> {
        self.downloads.classifiers.get(key)
    }
}

/// Loads version packages from cache or fetches them by metadata URL.
pub struct PackageStore<'a, F: ?Sized> {
    fetcher: &'a F,
    layout: &'a CacheLayout,
}

impl<'a, F: Fetch + ?Sized> PackageStore<'a, F> {
    pub fn new(fetcher: &'a F, layout: &'a CacheLayout) -> Self {
        Self { fetcher, layout }
    }

    /// Load the package for `id`.
    ///
    /// If `versions/<id>/meta.json` exists it is parsed without contacting
    /// the remote. Otherwise the package is fetched from `metadata_url`,
    /// parsed and cached.
    pub fn load(&self, id: &str, metadata_url: &str) -> Result<VersionPackage> {
        let path = self.layout.package_file(id)?;

        if path.exists() {
            let bytes = fs_utils::read_cached(&path)?;
            return VersionPackage::from_slice(&bytes, &path.display().to_string());
        }

        output::detail(&format!("fetching {}", metadata_url));
        let bytes = self.fetcher.fetch(metadata_url)?;
        let package = VersionPackage::from_slice(&bytes, metadata_url)?;
        fs_utils::write_atomic(&path, &bytes)?;
        Ok(package)
    }
}
