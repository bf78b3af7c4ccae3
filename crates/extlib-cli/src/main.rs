//! extlib - libextism installer CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use extlib_cli::ui::Output;
use extlib_cli::{Cli, Commands, cmd};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let dry_run = cli.dry_run;
    let output = Output::new(cli.verbose);

    match cli.command {
        Commands::Install(args) => {
            let ctx = cmd::context(&cli.api_url, cli.github_token, output);
            cmd::install::install(&ctx, &args, dry_run).await
        }
        Commands::Uninstall { os, layout } => {
            cmd::uninstall::uninstall(&layout.layout(), &os, dry_run, &output).await;
            Ok(())
        }
        Commands::Versions { tags } => {
            let ctx = cmd::context(&cli.api_url, cli.github_token, output);
            cmd::versions::versions(&ctx, &tags).await
        }
        Commands::Check => cmd::check::check(&output),
        Commands::Completions { shell } => {
            cmd::completions::completions(shell);
            Ok(())
        }
    }
}
