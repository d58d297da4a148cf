use crate::config::Config;
use crate::forge_client::ForgeClient;
use crate::logging::download_style;
use anyhow::{Context, Result, bail};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::instrument;
use tracing_indicatif::span_ext::IndicatifSpanExt;

const API_BASE: &str = "https://api.github.com";
const PAGE_SIZE: u32 = 100;

/// A repository of the authenticated user, as returned by the GitHub API.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Repository {
    pub full_name: String,
}

/// A release and its assets. The releases listing returns assets inline,
/// so one call per repository is enough.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Release {
    pub tag_name: String,
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
    pub size: u64,
}

pub struct GitHubClient {
    client: Client,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .context("API token contains characters that are invalid in a header")?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .user_agent(concat!("relfetch/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Follows `Link: rel="next"` headers until the listing is exhausted.
    async fn fetch_paginated<T: DeserializeOwned>(&self, first_url: String) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut next_url = Some(first_url);

        while let Some(url) = next_url {
            let response = self.client.get(&url).send().await?;

            if !response.status().is_success() {
                bail!("GitHub API request failed: {}", response.status());
            }

            let link_header = response
                .headers()
                .get("link")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.to_string());

            let page: Vec<T> = response.json().await?;
            items.extend(page);

            next_url = link_header.and_then(|h| parse_next_link(&h));
        }

        Ok(items)
    }
}

impl ForgeClient for GitHubClient {
    async fn owned_repositories(&self) -> Result<Vec<Repository>> {
        let url = format!("{API_BASE}/user/repos?affiliation=owner&per_page={PAGE_SIZE}");
        self.fetch_paginated(url).await
    }

    async fn releases(&self, repo_full_name: &str) -> Result<Vec<Release>> {
        let url = format!("{API_BASE}/repos/{repo_full_name}/releases?per_page={PAGE_SIZE}");
        self.fetch_paginated(url).await
    }

    #[instrument(skip_all)]
    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let display_name = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| url.to_string());

        let current_span = tracing::Span::current();
        current_span.pb_set_style(&download_style()?);
        current_span.pb_set_message(&format!("Downloading {display_name}..."));
        current_span.pb_set_finish_message(&format!("Downloading {display_name}... Complete!"));

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            bail!("Download failed: {}", response.status());
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut downloaded = 0u64;
        let mut stream = response.bytes_stream();

        use futures_util::StreamExt;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            // Update the span field so a subscriber can see progress
            tracing::Span::current().pb_set_position(downloaded);
        }

        file.flush().await?;
        Ok(())
    }
}

fn parse_next_link(link_header: &str) -> Option<String> {
    for part in link_header.split(',') {
        if part.contains("rel=\"next\"") {
            return part
                .split(';')
                .next()
                .map(|s| s.trim().trim_matches(|c| c == '<' || c == '>').to_string());
        }
    }
    None
}
