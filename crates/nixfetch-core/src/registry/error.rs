//! Why a registry lookup produced no checksum.

use std::fmt;

use crate::error::PrefetchError;

/// Cause of a failed registry lookup. Callers only ever see `None`; this is
/// kept for logging.
#[derive(Debug)]
pub enum LookupMiss {
    /// Registry base URL could not be turned into an endpoint.
    Endpoint(url::ParseError),
    /// Curl reported an error (DNS, connect, timeout, TLS).
    Transport(curl::Error),
    /// Non-2xx response.
    Http(u32),
    /// Body was not a JSON array of version entries.
    Parse(serde_json::Error),
    /// No entry with the requested version and platform.
    NotFound { version: String, platform: String },
    /// Matching entry has no (or an empty) `sha` field.
    MissingSha,
    /// `sha` is not base16; the registry's encoding may have changed.
    UnexpectedShaEncoding(String),
    /// Re-encoding the published sha failed.
    Encode(PrefetchError),
}

impl LookupMiss {
    /// True for the ordinary "nothing published" outcomes, as opposed to
    /// something going wrong on the way.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupMiss::NotFound { .. } | LookupMiss::MissingSha)
    }
}

impl fmt::Display for LookupMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupMiss::Endpoint(e) => write!(f, "bad registry endpoint: {}", e),
            LookupMiss::Transport(e) => write!(f, "{}", e),
            LookupMiss::Http(code) => write!(f, "HTTP {}", code),
            LookupMiss::Parse(e) => write!(f, "malformed response: {}", e),
            LookupMiss::NotFound { version, platform } => {
                write!(f, "no entry for version {} on platform {}", version, platform)
            }
            LookupMiss::MissingSha => write!(f, "entry has no sha"),
            LookupMiss::UnexpectedShaEncoding(sha) => {
                write!(f, "sha is not base16: {:?}", sha)
            }
            LookupMiss::Encode(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LookupMiss {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LookupMiss::Endpoint(e) => Some(e),
            LookupMiss::Transport(e) => Some(e),
            LookupMiss::Parse(e) => Some(e),
            LookupMiss::Encode(e) => Some(e),
            LookupMiss::Http(_)
            | LookupMiss::NotFound { .. }
            | LookupMiss::MissingSha
            | LookupMiss::UnexpectedShaEncoding(_) => None,
        }
    }
}
