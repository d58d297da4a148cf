use crate::forge_client::ForgeClient;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("cannot derive a safe file name from '{0}'")]
    UnsafeName(String),

    #[error("download failed: {0}")]
    Download(String),

    #[error("downloaded file is missing: {0}")]
    MissingAfterWrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome counts of one fetch pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    pub fetched: usize,
    pub skipped: usize,
    pub failed: usize,
}

enum FetchOutcome {
    Fetched,
    AlreadyPresent,
}

/// Downloads every locator into `lib_dir`, one at a time.
///
/// The directory is created first; failure to create it aborts the run
/// before any network traffic. After that, failures stay per-item: they are
/// logged and counted, and the remaining locators are still attempted. A
/// file that already exists under the derived name is never re-downloaded.
pub async fn fetch_all<C: ForgeClient>(
    client: &C,
    lib_dir: &Path,
    locators: &[String],
) -> Result<FetchSummary> {
    fs::create_dir_all(lib_dir)
        .with_context(|| format!("Unable to create lib dir: {}", lib_dir.display()))?;

    let mut summary = FetchSummary::default();

    for locator in locators {
        match fetch_one(client, lib_dir, locator).await {
            Ok(FetchOutcome::Fetched) => summary.fetched += 1,
            Ok(FetchOutcome::AlreadyPresent) => {
                tracing::debug!("Already present, skipping: {locator}");
                summary.skipped += 1;
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch '{}': {}",
                    asset_file_name(locator).unwrap_or_else(|_| locator.clone()),
                    e
                );
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

async fn fetch_one<C: ForgeClient>(
    client: &C,
    lib_dir: &Path,
    locator: &str,
) -> Result<FetchOutcome, FetchError> {
    let file_name = asset_file_name(locator)?;
    let dest = lib_dir.join(&file_name);

    if dest.exists() {
        return Ok(FetchOutcome::AlreadyPresent);
    }

    // Stream into a sibling temp file and rename, so an interrupted
    // download never leaves a truncated file under the final name.
    let part = lib_dir.join(format!("{file_name}.part"));
    if let Err(e) = client.download(locator, &part).await {
        let _ = fs::remove_file(&part);
        return Err(FetchError::Download(e.to_string()));
    }

    fs::rename(&part, &dest)?;

    if !dest.exists() {
        return Err(FetchError::MissingAfterWrite(file_name));
    }

    Ok(FetchOutcome::Fetched)
}

/// Local file name for a locator: the final segment of the URL path.
///
/// The result must be a single normal path component, so a hostile locator
/// cannot place the file outside the lib dir.
pub fn asset_file_name(locator: &str) -> Result<String, FetchError> {
    let unsafe_name = || FetchError::UnsafeName(locator.to_string());

    let url = reqwest::Url::parse(locator).map_err(|_| unsafe_name())?;
    let name = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .ok_or_else(unsafe_name)?
        .to_string();

    if name.is_empty() || name == "." || name == ".." || name.contains('\\') {
        return Err(unsafe_name());
    }

    let mut components = Path::new(&name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(name),
        _ => Err(unsafe_name()),
    }
}
