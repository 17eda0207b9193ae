//! Package registry lookup of published checksums.
//!
//! Uses the curl crate (libcurl) for a blocking GET of
//! `<base>/api/v1/versions/<name>.json` and picks the entry for the requested
//! version and platform.

mod error;
mod parse;

pub use error::LookupMiss;
pub use parse::VersionEntry;

use std::time::Duration;

use crate::checksum::{Checksum, Encoding};
use crate::config::RegistryConfig;

/// Build the versions endpoint for `name`. The name becomes a single,
/// percent-encoded path segment.
pub fn versions_url(base_url: &str, name: &str) -> Result<url::Url, url::ParseError> {
    let mut url = url::Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(["api", "v1", "versions", &format!("{name}.json")]);
    Ok(url)
}

/// Blocking client for a package registry's version index.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    config: RegistryConfig,
}

impl RegistryClient {
    pub fn new(config: RegistryConfig) -> Self {
        Self { config }
    }

    /// Fetch and decode the version index for `name`.
    pub fn versions(&self, name: &str) -> Result<Vec<VersionEntry>, LookupMiss> {
        let url = versions_url(&self.config.base_url, name).map_err(LookupMiss::Endpoint)?;
        let body = self.get(url.as_str())?;
        parse::parse_versions(&body).map_err(LookupMiss::Parse)
    }

    /// The base16 sha256 published for `name` at `version` on the configured
    /// platform.
    pub fn published_sha(&self, name: &str, version: &str) -> Result<String, LookupMiss> {
        let entries = self.versions(name)?;
        let entry = parse::select(&entries, version, &self.config.platform).ok_or_else(|| {
            LookupMiss::NotFound {
                version: version.to_string(),
                platform: self.config.platform.clone(),
            }
        })?;

        let sha = match entry.sha.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => return Err(LookupMiss::MissingSha),
        };

        Checksum::parse(sha, Encoding::Base16)
            .map(Checksum::into_string)
            .map_err(|_| LookupMiss::UnexpectedShaEncoding(sha.to_string()))
    }

    fn get(&self, url: &str) -> Result<Vec<u8>, LookupMiss> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(LookupMiss::Transport)?;
        easy.get(true).map_err(LookupMiss::Transport)?;
        easy.follow_location(true).map_err(LookupMiss::Transport)?;
        easy.connect_timeout(Duration::from_secs(self.config.connect_timeout_secs))
            .map_err(LookupMiss::Transport)?;
        easy.timeout(Duration::from_secs(self.config.timeout_secs))
            .map_err(LookupMiss::Transport)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(LookupMiss::Transport)?;
            transfer.perform().map_err(LookupMiss::Transport)?;
        }

        let code = easy.response_code().map_err(LookupMiss::Transport)?;
        if !(200..300).contains(&code) {
            return Err(LookupMiss::Http(code));
        }
        tracing::debug!(url, bytes = body.len(), "registry response");
        Ok(body)
    }
}
