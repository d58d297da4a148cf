use crate::cli::GlobalArgs;
use crate::commands::name_filter;
use crate::ui;
use anyhow::Result;
use clap::Args;
use relfetch_lib::config::Config;
use relfetch_lib::github::GitHubClient;
use relfetch_lib::repos::matching_repositories;

#[derive(Args)]
pub struct ReposCommand {
    /// Only list repositories whose full name contains this substring
    #[arg(long, short)]
    pub filter: Option<String>,
}

impl ReposCommand {
    pub async fn run(self, global_args: GlobalArgs) -> Result<()> {
        let config = Config::setup(global_args.dir.as_deref(), global_args.token.as_deref())?;
        let client = GitHubClient::new(&config)?;

        let repositories =
            matching_repositories(&client, name_filter(self.filter.as_deref())).await?;

        if repositories.is_empty() {
            ui::warning("No repositories matched.");
            return Ok(());
        }

        for repository in &repositories {
            ui::info(&repository.full_name);
        }
        ui::success(&format!("{} repositories", repositories.len()));

        Ok(())
    }
}
