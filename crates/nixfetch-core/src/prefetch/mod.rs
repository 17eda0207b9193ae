//! Checksum prefetching: run the Nix prefetch tools or query the registry,
//! validate what comes back, and normalize to a base32 sha256.

mod request;

pub use request::FetchRequest;

use std::fmt::Display;

use crate::checksum::{Checksum, Encoding};
use crate::config::{NixfetchConfig, ToolsConfig};
use crate::error::PrefetchError;
use crate::registry::{LookupMiss, RegistryClient};
use crate::tool::ToolCommand;

/// Normalizes the output of every prefetch source to a base32 [`Checksum`].
///
/// Holds only configuration; each call is an independent, blocking pipeline
/// of at most two external calls.
#[derive(Debug, Clone)]
pub struct Prefetcher {
    tools: ToolsConfig,
    registry: RegistryClient,
}

impl Prefetcher {
    pub fn new(config: NixfetchConfig) -> Self {
        Self {
            tools: config.tools,
            registry: RegistryClient::new(config.registry),
        }
    }

    /// sha256 of a git checkout (with `.git`) at `rev`, base32.
    pub fn fetch_git(
        &self,
        repo: &str,
        rev: &str,
        submodules: bool,
    ) -> Result<Checksum, PrefetchError> {
        let base16 = self.git_command(repo, rev, submodules).invoke()?;
        let base16 = Checksum::parse(&base16, Encoding::Base16)?;
        self.to_base32(base16.as_str())
    }

    /// Published sha256 of a registry package version, base32.
    ///
    /// Best effort: any failure yields `None`. The cause is logged.
    pub fn fetch_registry(&self, name: &str, version: impl Display) -> Option<Checksum> {
        let version = version.to_string();
        match self.registry_checksum(name, &version) {
            Ok(c) => Some(c),
            Err(miss @ LookupMiss::UnexpectedShaEncoding(_)) => {
                tracing::warn!(name, %version, "registry sha encoding changed: {miss}");
                None
            }
            Err(miss) if miss.is_not_found() => {
                tracing::info!(name, %version, "no published checksum: {miss}");
                None
            }
            Err(miss) => {
                tracing::warn!(name, %version, "registry lookup failed: {miss}");
                None
            }
        }
    }

    /// sha256 of the content at `url`, as printed (base32) by the URL prefetcher.
    pub fn fetch_url(&self, url: &str) -> Result<Checksum, PrefetchError> {
        let out = ToolCommand::new(&self.tools.prefetch_url).arg(url).invoke()?;
        Checksum::parse(&out, Encoding::Base32)
    }

    /// Re-encode a base16 sha256 to base32 with the hash tool.
    pub fn to_base32(&self, base16: &str) -> Result<Checksum, PrefetchError> {
        let base16 = Checksum::parse(base16, Encoding::Base16)?;
        let out = ToolCommand::new(&self.tools.nix_hash)
            .args(["--type", "sha256", "--to-base32", base16.as_str()])
            .invoke()?;
        Checksum::parse(&out, Encoding::Base32)
    }

    /// Dispatch a [`FetchRequest`]. Only registry requests can yield `None`.
    pub fn fetch(&self, request: &FetchRequest) -> Result<Option<Checksum>, PrefetchError> {
        match request {
            FetchRequest::Git {
                repo,
                rev,
                submodules,
            } => self.fetch_git(repo, rev, *submodules).map(Some),
            FetchRequest::Registry { name, version } => Ok(self.fetch_registry(name, version)),
            FetchRequest::Url { url } => self.fetch_url(url).map(Some),
        }
    }

    fn git_command(&self, repo: &str, rev: &str, submodules: bool) -> ToolCommand {
        let cmd = ToolCommand::new(&self.tools.prefetch_git)
            .env("HOME", &self.tools.home_override)
            .args([repo, rev, "--hash", "sha256", "--leave-dotGit"]);
        if submodules {
            cmd.arg("--fetch-submodules")
        } else {
            cmd
        }
    }

    fn registry_checksum(&self, name: &str, version: &str) -> Result<Checksum, LookupMiss> {
        let base16 = self.registry.published_sha(name, version)?;
        self.to_base32(&base16).map_err(LookupMiss::Encode)
    }
}

impl Default for Prefetcher {
    fn default() -> Self {
        Self::new(NixfetchConfig::default())
    }
}
