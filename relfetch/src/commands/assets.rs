use crate::cli::GlobalArgs;
use crate::commands::name_filter;
use crate::ui;
use anyhow::Result;
use clap::Args;
use relfetch_lib::collector::collect_locators;
use relfetch_lib::config::Config;
use relfetch_lib::github::GitHubClient;
use relfetch_lib::repos::matching_repositories;

#[derive(Args)]
pub struct AssetsCommand {
    /// Only take the first asset of each release
    #[arg(long)]
    pub latest_only: bool,

    /// Only include repositories whose full name contains this substring
    #[arg(long, short)]
    pub filter: Option<String>,
}

impl AssetsCommand {
    pub async fn run(self, global_args: GlobalArgs) -> Result<()> {
        let config = Config::setup(global_args.dir.as_deref(), global_args.token.as_deref())?;
        let client = GitHubClient::new(&config)?;

        let repositories =
            matching_repositories(&client, name_filter(self.filter.as_deref())).await?;
        let locators = collect_locators(&client, &repositories, self.latest_only).await;

        if locators.is_empty() {
            ui::warning("No release assets found.");
            return Ok(());
        }

        for locator in &locators {
            ui::info(locator);
        }
        ui::success(&format!("{} release assets", locators.len()));
        ui::tip("Run `relfetch sync` to download them.");

        Ok(())
    }
}
