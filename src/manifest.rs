//! Version catalog and its on-disk cache
//!
//! The catalog maps the `release`/`snapshot` aliases and every published
//! version ID to the URL of that version's metadata package.

use serde::Deserialize;

use crate::core::{fs_utils, output};
use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::layout::CacheLayout;

/// Top-level version catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    pub latest: Latest,
    #[serde(rename = "versions")]
    pub entries: Vec<CatalogEntry>,
}

/// IDs the aliases currently point at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Latest {
    pub release: String,
    pub snapshot: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: VersionType,
    #[serde(rename = "url")]
    pub metadata_url: String,
    #[serde(rename = "releaseTime", default)]
    pub release_time: String,
    #[serde(rename = "time", default)]
    pub last_modified: String,
}

/// Release channel of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum VersionType {
    Release,
    Snapshot,
    OldAlpha,
    OldBeta,
    Other(String),
}

impl From<String> for VersionType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "release" => Self::Release,
            "snapshot" => Self::Snapshot,
            "old_alpha" => Self::OldAlpha,
            "old_beta" => Self::OldBeta,
            _ => Self::Other(s),
        }
    }
}

impl Catalog {
    pub fn from_slice(bytes: &[u8], origin: &str) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::parse(format!("version catalog ({})", origin), e))
    }

    /// First entry whose ID matches exactly.
    pub fn entry(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

/// Loads the catalog from cache or refreshes it from the remote endpoint.
pub struct ManifestStore<'a, F: ?Sized> {
    fetcher: &'a F,
    layout: &'a CacheLayout,
    url: &'a str,
}

impl<'a, F: Fetch + ?Sized> ManifestStore<'a, F> {
    pub fn new(fetcher: &'a F, layout: &'a CacheLayout, url: &'a str) -> Self {
        Self {
            fetcher,
            layout,
            url,
        }
    }

    /// Load the catalog.
    ///
    /// The remote is consulted when `force_refresh` is set or nothing is
    /// cached yet; otherwise the cached file is used as-is, however old.
    /// Fetched bytes are parsed before they replace the cache so a malformed
    /// response never poisons later runs.
    pub fn load(&self, force_refresh: bool) -> Result<Catalog> {
        let path = self.layout.catalog_file();

        if !force_refresh && path.exists() {
            let bytes = fs_utils::read_cached(&path)?;
            return Catalog::from_slice(&bytes, &path.display().to_string());
        }

        output::detail(&format!("fetching {}", self.url));
        let bytes = self.fetcher.fetch(self.url)?;
        let catalog = Catalog::from_slice(&bytes, self.url)?;
        fs_utils::write_atomic(&path, &bytes)?;
        Ok(catalog)
    }
}
