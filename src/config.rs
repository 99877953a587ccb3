//! Run configuration
//!
//! One explicit value carries everything that would otherwise be global:
//! the cache root, the catalog endpoint and transport settings.

use std::path::PathBuf;
use std::time::Duration;

use crate::layout::CacheLayout;

/// Well-known catalog endpoint.
pub const DEFAULT_MANIFEST_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";

/// Lower and upper bound for a user-supplied HTTP timeout, in seconds.
const TIMEOUT_BOUNDS_SECS: (u64, u64) = (5, 3600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cache root; everything lives under `<root>/versions`.
    pub root: PathBuf,
    pub manifest_url: String,
    /// `None` blocks until the server answers.
    pub http_timeout: Option<Duration>,
    /// Check declared SHA-1 digests of freshly downloaded artifacts.
    pub verify_checksums: bool,
}

impl Config {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
            http_timeout: None,
            verify_checksums: false,
        }
    }

    /// `<user config dir>/minecraft`, if the platform has a config dir.
    pub fn default_root() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("minecraft"))
    }

    pub fn with_manifest_url(mut self, url: impl Into<String>) -> Self {
        self.manifest_url = url.into();
        self
    }

    /// Set the HTTP timeout, clamped to a sane range.
    pub fn with_http_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.http_timeout = secs.map(clamp_timeout);
        self
    }

    pub fn with_verify_checksums(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }

    pub fn layout(&self) -> CacheLayout {
        CacheLayout::new(&self.root)
    }
}

fn clamp_timeout(secs: u64) -> Duration {
    let (min, max) = TIMEOUT_BOUNDS_SECS;
    Duration::from_secs(secs.clamp(min, max))
}
