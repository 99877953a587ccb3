//! Host platform classification for native libraries

use std::collections::BTreeMap;
use std::fmt;

/// Tag used to pick a library's native classifier.
///
/// Derived once per run. Unknown host names are kept verbatim; they simply
/// match no library's native mapping, so libraries fall back to their
/// universal artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlatformTag {
    Linux,
    Windows,
    MacOs,
    Other(String),
}

impl PlatformTag {
    /// Map a host OS identifier to a tag.
    ///
    /// `darwin` is the host's name for macOS; the metadata calls it `macos`.
    pub fn from_os_name(os: &str) -> Self {
        match os {
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            "darwin" | "macos" => Self::MacOs,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Linux => "linux",
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Other(name) => name,
        }
    }

    /// Keys under which a library's native mapping may list this platform.
    /// Older metadata lists macOS natives under `osx`.
    fn native_keys(&self) -> Vec<&str> {
        match self {
            Self::MacOs => vec!["macos", "osx"],
            other => vec![other.as_str()],
        }
    }

    /// Classifier key this platform selects from a library's native mapping,
    /// with any `${arch}` placeholder expanded.
    pub fn native_classifier(&self, natives: &BTreeMap<String, String>) -> Option<String> {
        self.native_keys()
            .into_iter()
            .find_map(|key| natives.get(key))
            .map(|classifier| expand_arch(classifier))
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag for the running host.
pub fn current() -> PlatformTag {
    PlatformTag::from_os_name(std::env::consts::OS)
}

#[cfg(target_pointer_width = "64")]
const ARCH_BITS: &str = "64";
#[cfg(not(target_pointer_width = "64"))]
const ARCH_BITS: &str = "32";

fn expand_arch(classifier: &str) -> String {
    classifier.replace("${arch}", ARCH_BITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn natives(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_os_name() {
        assert_eq!(PlatformTag::from_os_name("darwin"), PlatformTag::MacOs);
        assert_eq!(PlatformTag::from_os_name("darwin").as_str(), "macos");
        assert_eq!(PlatformTag::from_os_name("linux").as_str(), "linux");
        assert_eq!(PlatformTag::from_os_name("windows").as_str(), "windows");
    }

    #[test]
    fn test_unknown_os_passes_through() {
        let tag = PlatformTag::from_os_name("freebsd");
        assert_eq!(tag, PlatformTag::Other("freebsd".to_string()));
        assert_eq!(tag.to_string(), "freebsd");

        let map = natives(&[("linux", "natives-linux"), ("windows", "natives-windows")]);
        assert_eq!(tag.native_classifier(&map), None);
    }

    #[test]
    fn test_current_is_known_on_supported_hosts() {
        let tag = current();
        if cfg!(target_os = "linux") {
            assert_eq!(tag, PlatformTag::Linux);
        } else if cfg!(target_os = "windows") {
            assert_eq!(tag, PlatformTag::Windows);
        } else if cfg!(target_os = "macos") {
            assert_eq!(tag, PlatformTag::MacOs);
        }
    }

    #[test]
    fn test_native_classifier_lookup() {
        let map = natives(&[("linux", "natives-linux"), ("osx", "natives-osx")]);
        assert_eq!(
            PlatformTag::Linux.native_classifier(&map).as_deref(),
            Some("natives-linux")
        );
        assert_eq!(PlatformTag::Windows.native_classifier(&map), None);
    }

    #[test]
    fn test_macos_matches_macos_before_osx() {
        let both = natives(&[("macos", "natives-macos"), ("osx", "natives-osx")]);
        assert_eq!(
            PlatformTag::MacOs.native_classifier(&both).as_deref(),
            Some("natives-macos")
        );

        let legacy = natives(&[("osx", "natives-osx")]);
        assert_eq!(
            PlatformTag::MacOs.native_classifier(&legacy).as_deref(),
            Some("natives-osx")
        );
    }

    #[test]
    fn test_arch_placeholder_expanded() {
        let map = natives(&[("windows", "natives-windows-${arch}")]);
        let classifier = PlatformTag::Windows.native_classifier(&map).unwrap();
        assert_eq!(classifier, format!("natives-windows-{}", ARCH_BITS));
    }
}
