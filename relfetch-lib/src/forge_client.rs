use crate::github::{Release, Repository};
use anyhow::Result;
use std::path::Path;

/// The three forge capabilities the rest of the crate consumes.
/// Everything behind these methods (auth, transport, pagination) is the
/// implementation's business.
pub trait ForgeClient {
    /// Repositories owned by the authenticated user, in API order.
    fn owned_repositories(&self) -> impl Future<Output = Result<Vec<Repository>>> + Send;

    /// Releases of one repository, assets included, in API order.
    fn releases(&self, repo_full_name: &str) -> impl Future<Output = Result<Vec<Release>>> + Send;

    /// Authenticated GET of the raw bytes behind `url`, written to `dest`.
    fn download(&self, url: &str, dest: &Path) -> impl Future<Output = Result<()>> + Send;
}
