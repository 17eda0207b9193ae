//! `nixfetch git|gem|url|to-base32` – print a base32 sha256 on stdout.

use anyhow::{Context, Result};
use nixfetch_core::{FetchRequest, Prefetcher};

pub fn run_git(prefetcher: &Prefetcher, repo: &str, rev: &str, submodules: bool) -> Result<()> {
    let request = FetchRequest::Git {
        repo: repo.to_string(),
        rev: rev.to_string(),
        submodules,
    };
    let checksum = prefetcher
        .fetch_git(repo, rev, submodules)
        .with_context(|| format!("prefetch {}", request))?;
    println!("{checksum}");
    Ok(())
}

/// A missing registry checksum is not an error; a note goes to stderr and
/// stdout stays empty.
pub fn run_gem(prefetcher: &Prefetcher, name: &str, version: &str) -> Result<()> {
    match prefetcher.fetch_registry(name, version) {
        Some(checksum) => println!("{checksum}"),
        None => eprintln!("no published checksum for {name} {version}"),
    }
    Ok(())
}

pub fn run_url(prefetcher: &Prefetcher, url: &str) -> Result<()> {
    let checksum = prefetcher
        .fetch_url(url)
        .with_context(|| format!("prefetch url {}", url))?;
    println!("{checksum}");
    Ok(())
}

pub fn run_to_base32(prefetcher: &Prefetcher, hash: &str) -> Result<()> {
    let checksum = prefetcher.to_base32(hash)?;
    println!("{checksum}");
    Ok(())
}
