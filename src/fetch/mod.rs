//! Transport capability
//!
//! Every remote read in the pipeline goes through [`Fetch`]. Fetches are
//! blocking and strictly sequential; there is no retry.

mod http;

pub use http::HttpFetcher;

use thiserror::Error;

/// A failed GET.
///
/// A server that answered with a non-success status is kept apart from a
/// request that never got an answer, though the pipeline treats both alike.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("GET {url} returned HTTP {code}")]
    Status { url: String, code: u16 },

    #[error("GET {url} failed: {message}")]
    Transport { url: String, message: String },
}

impl FetchError {
    /// The URL that failed.
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. } | Self::Transport { url, .. } => url,
        }
    }

    /// True if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { code: 404 | 410, .. })
    }
}

/// Fetch the full body at `url`.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_url() {
        let err = FetchError::Status {
            url: "https://example.com/a".into(),
            code: 500,
        };
        assert_eq!(err.url(), "https://example.com/a");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_fetch_error_not_found() {
        let err = FetchError::Status {
            url: "https://example.com/a".into(),
            code: 404,
        };
        assert!(err.is_not_found());

        let err = FetchError::Transport {
            url: "https://example.com/a".into(),
            message: "dns".into(),
        };
        assert!(!err.is_not_found());
    }

    fn body_of(fetcher: impl Fetch, url: &str) -> Vec<u8> {
        fetcher.fetch(url).unwrap()
    }

    #[test]
    fn test_fetch_through_reference() {
        let fake = testing::FakeFetcher::new().serve("u", b"body".to_vec());
        assert_eq!(body_of(&fake, "u"), b"body");
        assert_eq!(fake.call_count(), 1);
    }
}
