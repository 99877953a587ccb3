//! Version resolution and idempotent artifact acquisition
//!
//! Turns a loose version request (`release`, `snapshot` or a literal ID) into
//! a concrete version, fetches its metadata package and materializes the
//! primary payload and dependency libraries into a local cache. Anything
//! already on disk is left alone.
//!
//! # Pipeline
//!
//! 1. [`manifest::ManifestStore`] loads or refreshes the version catalog.
//! 2. [`resolve::resolve`] maps the request to a version ID and metadata URL.
//! 3. [`package::PackageStore`] loads or fetches that version's package.
//! 4. [`platform::current`] picks the native-library tag for this host.
//! 5. [`placer::ArtifactPlacer`] fetches every missing artifact.
//!
//! [`Acquirer`] runs all five in order.
//!
//! # Cache layout
//!
//! ```text
//! <root>/versions/version_manifest.json
//! <root>/versions/<id>/meta.json
//! <root>/versions/<id>/client_<id>.jar
//! <root>/versions/<id>/libraries/<group>/<artifact>/<version>/<file>.jar
//! <root>/versions/<id>/native-libraries/<file>.jar
//! ```

pub mod acquire;
pub mod config;
pub mod core;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod manifest;
pub mod package;
pub mod placer;
pub mod platform;
pub mod resolve;

pub use acquire::{Acquired, Acquirer, Request};
pub use config::Config;
pub use crate::core::output;
pub use error::{Error, Result};
pub use fetch::{Fetch, FetchError, HttpFetcher};
pub use layout::{CacheLayout, PayloadKind};
pub use platform::PlatformTag;
