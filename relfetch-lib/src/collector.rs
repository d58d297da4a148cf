use crate::forge_client::ForgeClient;
use crate::github::Repository;
use crate::logging::spinner_style;
use tracing::instrument;
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// Walks the releases of every repository and returns the download URLs of
/// their assets, in source order.
///
/// With `latest_only` set, only the first asset of each release is taken;
/// releases without assets are skipped with a warning. A repository whose
/// release listing fails contributes nothing, and the remaining
/// repositories are still scanned.
#[instrument(skip_all)]
pub async fn collect_locators<C: ForgeClient>(
    client: &C,
    repositories: &[Repository],
    latest_only: bool,
) -> Vec<String> {
    let current_span = tracing::Span::current();
    if let Ok(style) = spinner_style("{msg} [Scanned repositories: {pos}]") {
        current_span.pb_set_style(&style);
    }
    current_span.pb_set_message("Scanning releases...");
    current_span.pb_set_finish_message("Scanning releases... Done");

    let mut locators = Vec::new();

    for (scanned, repository) in repositories.iter().enumerate() {
        let releases = match client.releases(&repository.full_name).await {
            Ok(releases) => releases,
            Err(e) => {
                tracing::warn!(
                    "Skipping repository '{}': failed to list releases: {}",
                    repository.full_name,
                    e
                );
                continue;
            }
        };

        for release in &releases {
            if latest_only {
                match release.assets.first() {
                    Some(asset) => locators.push(asset.browser_download_url.clone()),
                    None => tracing::warn!(
                        "Release '{}' of '{}' has no assets, skipping",
                        release.tag_name,
                        repository.full_name
                    ),
                }
            } else {
                locators.extend(
                    release
                        .assets
                        .iter()
                        .map(|asset| asset.browser_download_url.clone()),
                );
            }
        }

        current_span.pb_set_position(scanned as u64 + 1);
    }

    locators
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{MockForgeClient, asset, release, repo};

    fn client_with_one_repo(releases: Vec<crate::github::Release>) -> MockForgeClient {
        let mut client = MockForgeClient::default();
        client.repositories = vec![repo("acme/core")];
        client.releases.insert("acme/core".to_string(), releases);
        client
    }

    #[tokio::test]
    async fn test_latest_only_takes_first_asset_of_each_release() {
        let client = client_with_one_repo(vec![
            release(
                "v2.0",
                vec![
                    asset("core-2.0.jar", "https://dl.test/core-2.0.jar"),
                    asset("core-2.0-sources.jar", "https://dl.test/core-2.0-sources.jar"),
                ],
            ),
            release("v1.0", vec![asset("core-1.0.jar", "https://dl.test/core-1.0.jar")]),
        ]);

        let locators = collect_locators(&client, &client.repositories, true).await;
        assert_eq!(
            locators,
            vec!["https://dl.test/core-2.0.jar", "https://dl.test/core-1.0.jar"]
        );
    }

    #[tokio::test]
    async fn test_all_assets_in_release_order() {
        let client = client_with_one_repo(vec![release(
            "v2.0",
            vec![
                asset("core-2.0.jar", "https://dl.test/core-2.0.jar"),
                asset("core-2.0-sources.jar", "https://dl.test/core-2.0-sources.jar"),
            ],
        )]);

        let locators = collect_locators(&client, &client.repositories, false).await;
        assert_eq!(
            locators,
            vec![
                "https://dl.test/core-2.0.jar",
                "https://dl.test/core-2.0-sources.jar"
            ]
        );
    }

    #[tokio::test]
    async fn test_release_without_assets_is_skipped() {
        let client = client_with_one_repo(vec![
            release("v2.0", vec![]),
            release("v1.0", vec![asset("core-1.0.jar", "https://dl.test/core-1.0.jar")]),
        ]);

        let locators = collect_locators(&client, &client.repositories, true).await;
        assert_eq!(locators, vec!["https://dl.test/core-1.0.jar"]);
    }

    #[tokio::test]
    async fn test_failing_repository_does_not_abort_the_scan() {
        let mut client = MockForgeClient::default();
        client.repositories = vec![repo("acme/core"), repo("acme/broken"), repo("acme/tools")];
        client.releases.insert(
            "acme/core".to_string(),
            vec![release("v1.0", vec![asset("core-1.0.jar", "https://dl.test/core-1.0.jar")])],
        );
        client.broken_repositories.insert("acme/broken".to_string());
        client.releases.insert(
            "acme/tools".to_string(),
            vec![release("v0.3", vec![asset("tools-0.3.jar", "https://dl.test/tools-0.3.jar")])],
        );

        let locators = collect_locators(&client, &client.repositories, false).await;
        assert_eq!(
            locators,
            vec!["https://dl.test/core-1.0.jar", "https://dl.test/tools-0.3.jar"]
        );
    }
}
