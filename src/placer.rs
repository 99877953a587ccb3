//! Artifact placement
//!
//! Materializes a version's primary payload and libraries into the cache.
//! Every artifact is fetched only if its destination is absent, so a second
//! run over a complete cache performs no fetches and no writes.
//!
//! Libraries that declare a native classifier for the current platform are
//! flattened into `native-libraries/` by file name. Everything else keeps its
//! Maven-style relative path under `libraries/`.
//!
//! A native artifact that fails to download is reported and skipped; every
//! other failure ends the run.

use std::path::{Path, PathBuf};

use crate::core::{fs_utils, hash, output};
use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::layout::{CacheLayout, PayloadKind};
use crate::package::{ArtifactRef, LibraryRef, VersionPackage};
use crate::platform::PlatformTag;

/// Where a library goes for a given platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement<'p> {
    /// Platform-specific artifact, stored flat under its file name.
    Native {
        artifact: &'p ArtifactRef,
        file_name: &'p str,
    },
    /// Universal artifact, stored under its relative path.
    Ordinary { artifact: &'p ArtifactRef },
    /// Nothing usable for this platform.
    Unresolved,
}

/// Decide how `library` is placed on `platform`.
pub fn classify<'p>(library: &'p LibraryRef, platform: &PlatformTag) -> Placement<'p> {
    if let Some(classifier) = platform.native_classifier(&library.native_classifiers) {
        return library
            .classifier(&classifier)
            .and_then(|artifact| {
                Path::new(&artifact.relative_path)
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map(|file_name| Placement::Native {
                        artifact,
                        file_name,
                    })
            })
            .unwrap_or(Placement::Unresolved);
    }

    match library.artifact() {
        Some(artifact) if !artifact.relative_path.is_empty() => Placement::Ordinary { artifact },
        _ => Placement::Unresolved,
    }
}

/// A native library that could not be downloaded.
#[derive(Debug)]
pub struct NativeFailure {
    pub library: String,
    pub error: Error,
}

/// What a [`ArtifactPlacer::materialize`] call did.
#[derive(Debug, Default)]
pub struct MaterializeReport {
    /// Files written by this call, in visit order.
    pub fetched: Vec<PathBuf>,
    /// Artifacts whose destination already existed.
    pub skipped: usize,
    pub failed_natives: Vec<NativeFailure>,
    /// Libraries with no artifact usable on this platform.
    pub unresolved: Vec<String>,
}

impl MaterializeReport {
    /// True if nothing was fetched and nothing failed.
    pub fn is_noop(&self) -> bool {
        self.fetched.is_empty() && self.failed_natives.is_empty()
    }
}

pub struct ArtifactPlacer<'a, F: ?Sized> {
    fetcher: &'a F,
    layout: &'a CacheLayout,
    verify_checksums: bool,
}

impl<'a, F: Fetch + ?Sized> ArtifactPlacer<'a, F> {
    pub fn new(fetcher: &'a F, layout: &'a CacheLayout) -> Self {
        Self {
            fetcher,
            layout,
            verify_checksums: false,
        }
    }

    /// Check declared SHA-1 digests of freshly fetched bytes before storing them.
    pub fn verify_checksums(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }

    /// Materialize the primary payload and every library usable on `platform`.
    ///
    /// Libraries are visited one at a time, in package order.
    pub fn materialize(
        &self,
        pkg: &VersionPackage,
        platform: &PlatformTag,
        payload: PayloadKind,
    ) -> Result<MaterializeReport> {
        let mut report = MaterializeReport::default();

        self.place_payload(pkg, payload, &mut report)?;

        for library in &pkg.libraries {
            match classify(library, platform) {
                Placement::Native {
                    artifact,
                    file_name,
                } => self.place_native(&pkg.id, library, artifact, file_name, &mut report)?,
                Placement::Ordinary { artifact } => {
                    self.place_ordinary(&pkg.id, artifact, &mut report)?
                }
                Placement::Unresolved => report.unresolved.push(library.name.clone()),
            }
        }

        Ok(report)
    }

    fn place_payload(
        &self,
        pkg: &VersionPackage,
        kind: PayloadKind,
        report: &mut MaterializeReport,
    ) -> Result<()> {
        let download = pkg.payload(kind).ok_or_else(|| Error::MissingPayload {
            id: pkg.id.clone(),
            kind: kind.name(),
        })?;
        let dest = self.layout.payload_file(&pkg.id, kind)?;

        if dest.exists() {
            report.skipped += 1;
            return Ok(());
        }

        let bytes = self.download(&download.url, &download.sha1)?;
        self.store(&dest, &bytes, report)
    }

    fn place_ordinary(
        &self,
        id: &str,
        artifact: &ArtifactRef,
        report: &mut MaterializeReport,
    ) -> Result<()> {
        let dest = self.layout.library_file(id, &artifact.relative_path)?;
        fs_utils::ensure_parent_dir(&dest)?;

        if dest.exists() {
            report.skipped += 1;
            return Ok(());
        }

        let bytes = self.download(&artifact.url, &artifact.sha1)?;
        self.store(&dest, &bytes, report)
    }

    fn place_native(
        &self,
        id: &str,
        library: &LibraryRef,
        artifact: &ArtifactRef,
        file_name: &str,
        report: &mut MaterializeReport,
    ) -> Result<()> {
        let dest = self.layout.native_file(id, file_name)?;

        if dest.exists() {
            report.skipped += 1;
            return Ok(());
        }

        match self.download(&artifact.url, &artifact.sha1) {
            Ok(bytes) => self.store(&dest, &bytes, report),
            Err(error) => {
                output::warning(&format!(
                    "skipping native library {}: {}",
                    library.name, error
                ));
                report.failed_natives.push(NativeFailure {
                    library: library.name.clone(),
                    error,
                });
                Ok(())
            }
        }
    }

    fn download(&self, url: &str, sha1: &str) -> Result<Vec<u8>> {
        let bytes = self.fetcher.fetch(url)?;
        if self.verify_checksums {
            hash::verify_sha1(url, &bytes, sha1)?;
        }
        Ok(bytes)
    }

    fn store(&self, dest: &Path, bytes: &[u8], report: &mut MaterializeReport) -> Result<()> {
        fs_utils::write_atomic(dest, bytes)?;
        if let Some(name) = dest.file_name() {
            output::detail(&format!(
                "stored {} ({} bytes)",
                name.to_string_lossy(),
                bytes.len()
            ));
        }
        report.fetched.push(dest.to_path_buf());
        Ok(())
    }
}
