use crate::cli::GlobalArgs;
use crate::commands::name_filter;
use crate::ui;
use anyhow::{Result, bail};
use clap::Args;
use relfetch_lib::collector::collect_locators;
use relfetch_lib::config::Config;
use relfetch_lib::fetcher::fetch_all;
use relfetch_lib::github::GitHubClient;
use relfetch_lib::repos::matching_repositories;

#[derive(Args)]
pub struct SyncCommand {
    /// Only take the first asset of each release
    #[arg(long)]
    pub latest_only: bool,

    /// Only include repositories whose full name contains this substring
    #[arg(long, short)]
    pub filter: Option<String>,

    /// Collect asset URLs but do not download anything
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncCommand {
    pub async fn run(self, global_args: GlobalArgs) -> Result<()> {
        let config = Config::setup(global_args.dir.as_deref(), global_args.token.as_deref())?;
        let client = GitHubClient::new(&config)?;

        let repositories =
            matching_repositories(&client, name_filter(self.filter.as_deref())).await?;
        ui::info(&format!("Found {} repositories", repositories.len()));

        let locators = collect_locators(&client, &repositories, self.latest_only).await;
        ui::info(&format!("Identified {} release assets", locators.len()));

        if self.dry_run {
            for locator in &locators {
                ui::info(locator);
            }
            ui::tip("Run without --dry-run to download these assets.");
            return Ok(());
        }

        let summary = fetch_all(&client, &config.lib_dir, &locators).await?;

        ui::success(&format!(
            "Fetched {} assets ({} already present) into {}",
            summary.fetched,
            summary.skipped,
            config.lib_dir.display()
        ));

        if summary.failed > 0 {
            bail!("{} asset(s) failed to download", summary.failed);
        }

        Ok(())
    }
}
