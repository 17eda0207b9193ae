//! What to prefetch.

use std::fmt;

/// A single prefetch intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// A git repository at a revision, optionally with submodules.
    Git {
        repo: String,
        rev: String,
        submodules: bool,
    },
    /// The checksum a package registry publishes for one version.
    Registry { name: String, version: String },
    /// Arbitrary URL content.
    Url { url: String },
}

impl fmt::Display for FetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchRequest::Git {
                repo,
                rev,
                submodules,
            } => {
                write!(f, "git {}@{}", repo, rev)?;
                if *submodules {
                    write!(f, " (with submodules)")?;
                }
                Ok(())
            }
            FetchRequest::Registry { name, version } => write!(f, "registry {} {}", name, version),
            FetchRequest::Url { url } => write!(f, "url {}", url),
        }
    }
}
