use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// External prefetch programs (optional `[tools]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Git prefetcher; name on `PATH` or absolute path.
    pub prefetch_git: String,
    /// URL prefetcher; prints a base32 sha256.
    pub prefetch_url: String,
    /// Hash re-encoder used for `--to-base32`.
    pub nix_hash: String,
    /// Value of `HOME` for the git prefetcher, so the caller's ~/.gitconfig is not read.
    pub home_override: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            prefetch_git: "nix-prefetch-git".to_string(),
            prefetch_url: "nix-prefetch-url".to_string(),
            nix_hash: "nix-hash".to_string(),
            home_override: "/homeless-shelter".to_string(),
        }
    }
}

/// Package registry lookup (optional `[registry]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Scheme and host of the registry; `/api/v1/versions/<name>.json` is appended.
    pub base_url: String,
    /// Only entries with this `platform` value are considered.
    pub platform: String,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://rubygems.org".to_string(),
            platform: "ruby".to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/nixfetch/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NixfetchConfig {
    pub tools: ToolsConfig,
    pub registry: RegistryConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("nixfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<NixfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = NixfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path. The file must exist.
pub fn load_from(path: &Path) -> Result<NixfetchConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: NixfetchConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
