//! Version alias resolution

use crate::error::{Error, Result};
use crate::manifest::Catalog;

pub const RELEASE_ALIAS: &str = "release";
pub const SNAPSHOT_ALIAS: &str = "snapshot";

/// A concrete version and where its metadata lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub id: String,
    pub metadata_url: String,
}

/// True for the moving aliases whose target drifts over time.
///
/// Callers use this to decide whether the catalog must be refreshed: a pinned
/// ID's metadata URL never changes once published.
pub fn is_alias(requested: &str) -> bool {
    requested == RELEASE_ALIAS || requested == SNAPSHOT_ALIAS
}

/// Resolve `requested` (an alias or a literal ID) against `catalog`.
///
/// A miss reports the originally requested string, not the substituted ID.
pub fn resolve(requested: &str, catalog: &Catalog) -> Result<ResolvedVersion> {
    let id = match requested {
        RELEASE_ALIAS => catalog.latest.release.as_str(),
        SNAPSHOT_ALIAS => catalog.latest.snapshot.as_str(),
        other => other,
    };

    catalog
        .entry(id)
        .map(|entry| ResolvedVersion {
            id: entry.id.clone(),
            metadata_url: entry.metadata_url.clone(),
        })
        .ok_or_else(|| Error::VersionNotFound {
            alias: requested.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{CatalogEntry, Latest, VersionType};

    fn entry(id: &str, kind: VersionType) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            kind,
            metadata_url: format!("https://meta.example/{}.json", id),
            release_time: String::new(),
            last_modified: String::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog {
            latest: Latest {
                release: "1.20.1".to_string(),
                snapshot: "23w31a".to_string(),
            },
            entries: vec![
                entry("23w31a", VersionType::Snapshot),
                entry("1.20.1", VersionType::Release),
                entry("1.16.4", VersionType::Release),
            ],
        }
    }

    #[test]
    fn test_is_alias() {
        assert!(is_alias("release"));
        assert!(is_alias("snapshot"));
        assert!(!is_alias("1.20.1"));
        assert!(!is_alias("release-candidate"));
        assert!(!is_alias("Release"));
    }

    #[test]
    fn test_resolve_release_alias() {
        let resolved = resolve("release", &catalog()).unwrap();
        assert_eq!(
            resolved,
            ResolvedVersion {
                id: "1.20.1".to_string(),
                metadata_url: "https://meta.example/1.20.1.json".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_snapshot_alias() {
        let resolved = resolve("snapshot", &catalog()).unwrap();
        assert_eq!(resolved.id, "23w31a");
    }

    #[test]
    fn test_resolve_pinned_id() {
        let resolved = resolve("1.16.4", &catalog()).unwrap();
        assert_eq!(resolved.metadata_url, "https://meta.example/1.16.4.json");
    }

    #[test]
    fn test_resolve_unknown_reports_alias() {
        let err = resolve("not-a-real-id", &catalog()).unwrap_err();
        match err {
            Error::VersionNotFound { alias } => assert_eq!(alias, "not-a-real-id"),
            other => panic!("expected VersionNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_dangling_alias_reports_alias() {
        let mut catalog = catalog();
        catalog.latest.snapshot = "24w01a".to_string();

        let err = resolve("snapshot", &catalog).unwrap_err();
        assert!(matches!(err, Error::VersionNotFound { ref alias } if alias == "snapshot"));
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let mut catalog = catalog();
        let mut dup = entry("1.20.1", VersionType::Release);
        dup.metadata_url = "https://mirror.example/1.20.1.json".to_string();
        catalog.entries.push(dup);

        let resolved = resolve("1.20.1", &catalog).unwrap();
        assert_eq!(resolved.metadata_url, "https://meta.example/1.20.1.json");
    }
}
