use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{assets::AssetsCommand, repos::ReposCommand, sync::SyncCommand};

#[derive(Parser)]
#[command(name = "relfetch")]
#[command(about = "Mirror the release assets of your GitHub repositories into a local directory")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[derive(clap::Args, Clone)]
pub struct GlobalArgs {
    /// Directory fetched assets are written into (defaults to RELFETCH_DIR, then the platform data dir)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// API token for GitHub (defaults to RELFETCH_TOKEN, then GITHUB_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the release assets of your repositories
    Sync(SyncCommand),

    /// List repositories owned by the authenticated user
    #[command(alias = "ls")]
    Repos(ReposCommand),

    /// List the asset URLs a sync would download
    Assets(AssetsCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Sync(cmd) => cmd.run(self.global_args).await,
            Commands::Repos(cmd) => cmd.run(self.global_args).await,
            Commands::Assets(cmd) => cmd.run(self.global_args).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use clap::CommandFactory;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert();
    }
}
