//! End-to-end acquisition pipeline
//!
//! catalog -> resolve -> package -> place, strictly in that order.

use crate::config::Config;
use crate::core::output;
use crate::error::Result;
use crate::fetch::Fetch;
use crate::layout::{CacheLayout, PayloadKind};
use crate::manifest::ManifestStore;
use crate::package::{PackageStore, VersionPackage};
use crate::placer::{ArtifactPlacer, MaterializeReport};
use crate::platform::{self, PlatformTag};
use crate::resolve;

/// What to acquire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// `release`, `snapshot` or a literal version ID.
    pub version: String,
    pub payload: PayloadKind,
}

impl Request {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            payload: PayloadKind::Client,
        }
    }

    pub fn server(mut self, server: bool) -> Self {
        self.payload = if server {
            PayloadKind::Server
        } else {
            PayloadKind::Client
        };
        self
    }
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct Acquired {
    pub id: String,
    pub package: VersionPackage,
    pub report: MaterializeReport,
}

pub struct Acquirer<F> {
    config: Config,
    layout: CacheLayout,
    fetcher: F,
    platform: PlatformTag,
}

impl<F: Fetch> Acquirer<F> {
    pub fn new(config: Config, fetcher: F) -> Self {
        let layout = config.layout();
        Self {
            config,
            layout,
            fetcher,
            platform: platform::current(),
        }
    }

    /// Override the detected host platform.
    pub fn with_platform(mut self, platform: PlatformTag) -> Self {
        self.platform = platform;
        self
    }

    pub fn layout(&self) -> &CacheLayout {
        &self.layout
    }

    pub fn platform(&self) -> &PlatformTag {
        &self.platform
    }

    /// Resolve `request.version` and materialize everything it needs.
    ///
    /// Aliases always re-read the remote catalog; pinned IDs use the cached
    /// catalog when one exists.
    pub fn run(&self, request: &Request) -> Result<Acquired> {
        let force_refresh = resolve::is_alias(&request.version);

        output::action(&format!("Resolving {}", request.version));
        let catalog = ManifestStore::new(&self.fetcher, &self.layout, &self.config.manifest_url)
            .load(force_refresh)?;
        let resolved = resolve::resolve(&request.version, &catalog)?;
        if resolved.id != request.version {
            output::info(&format!("{} -> {}", request.version, resolved.id));
        }

        let package =
            PackageStore::new(&self.fetcher, &self.layout).load(&resolved.id, &resolved.metadata_url)?;

        output::action(&format!(
            "Placing {} {} ({} libraries, {})",
            resolved.id,
            request.payload.name(),
            package.libraries.len(),
            self.platform
        ));
        let report = ArtifactPlacer::new(&self.fetcher, &self.layout)
            .verify_checksums(self.config.verify_checksums)
            .materialize(&package, &self.platform, request.payload)?;

        Ok(Acquired {
            id: resolved.id,
            package,
            report,
        })
    }
}
