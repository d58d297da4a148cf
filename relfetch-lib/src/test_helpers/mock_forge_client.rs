use crate::forge_client::ForgeClient;
use crate::github::{Release, Repository};
use anyhow::{Result, bail};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Canned forge for tests. Every download attempt bumps `downloads`, so
/// tests can assert that skipped items cause no network traffic.
#[derive(Default)]
pub struct MockForgeClient {
    pub repositories: Vec<Repository>,
    pub releases: HashMap<String, Vec<Release>>,

    /// Fail the repository listing itself
    pub repository_listing_fails: bool,

    /// Repositories whose release listing fails
    pub broken_repositories: HashSet<String>,

    /// URLs that fail before any byte is written
    pub unreachable_urls: HashSet<String>,

    /// URLs that fail halfway, leaving a partial file at the destination
    pub truncated_urls: HashSet<String>,

    pub payload: Vec<u8>,
    pub downloads: AtomicUsize,
}

impl MockForgeClient {
    pub fn new(payload: &[u8]) -> Self {
        Self {
            payload: payload.to_vec(),
            ..Default::default()
        }
    }
}

impl ForgeClient for MockForgeClient {
    async fn owned_repositories(&self) -> Result<Vec<Repository>> {
        if self.repository_listing_fails {
            bail!("forge API request failed: 401 Unauthorized");
        }
        Ok(self.repositories.clone())
    }

    async fn releases(&self, repo_full_name: &str) -> Result<Vec<Release>> {
        if self.broken_repositories.contains(repo_full_name) {
            bail!("forge API request failed: 500 Internal Server Error");
        }
        Ok(self.releases.get(repo_full_name).cloned().unwrap_or_default())
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        self.downloads.fetch_add(1, Ordering::SeqCst);

        if self.unreachable_urls.contains(url) {
            bail!("connection refused");
        }

        if self.truncated_urls.contains(url) {
            fs::write(dest, &self.payload[..self.payload.len() / 2])?;
            bail!("connection reset mid-stream");
        }

        fs::write(dest, &self.payload)?;
        Ok(())
    }
}
