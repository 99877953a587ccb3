//! Blocking HTTP transport backed by ureq.

use std::io::Read;
use std::time::Duration;

use super::{Fetch, FetchError};
use crate::core::progress::{self, upgrade_to_bytes};

const USER_AGENT: &str = concat!("blockfetch/", env!("CARGO_PKG_VERSION"));

const CHUNK_SIZE: usize = 64 * 1024;

/// Upper bound on the buffer reserved up front from `Content-Length`.
/// The header is untrusted; the body grows past this as bytes arrive.
const MAX_PREALLOC: u64 = 8 * CHUNK_SIZE as u64;

/// Sequential HTTP fetcher.
///
/// Without a timeout a stalled server blocks the caller indefinitely, which is
/// acceptable for a one-shot CLI run.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let pb = progress::create_spinner(&format!("downloading {}", display_name(url)));

        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(e) => {
                pb.finish_and_clear();
                return Err(match e {
                    ureq::Error::Status(code, _) => FetchError::Status {
                        url: url.to_string(),
                        code,
                    },
                    ureq::Error::Transport(t) => FetchError::Transport {
                        url: url.to_string(),
                        message: t.to_string(),
                    },
                });
            }
        };

        let content_length: Option<u64> = response
            .header("content-length")
            .and_then(|s| s.parse().ok());
        if let Some(len) = content_length {
            upgrade_to_bytes(&pb, len);
        }

        let mut reader = response.into_reader();
        let mut body =
            Vec::with_capacity(content_length.map_or(0, |n| n.min(MAX_PREALLOC) as usize));
        let mut buffer = vec![0u8; CHUNK_SIZE];

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(n) => n,
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(FetchError::Transport {
                        url: url.to_string(),
                        message: format!("read error: {}", e),
                    });
                }
            };
            if n == 0 {
                break;
            }
            body.extend_from_slice(&buffer[..n]);
            pb.set_position(body.len() as u64);
        }

        pb.finish_and_clear();
        Ok(body)
    }
}

/// Last path segment of a URL, for progress messages.
fn display_name(url: &str) -> &str {
    let clean = url.split(['?', '#']).next().unwrap_or(url);
    clean
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(clean)
}
