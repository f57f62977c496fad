mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use storyboard_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storyboard_core::init_tracing()?;

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::debug!("Command failed: {:?}", e);
        output::output_error(&format!("{:#}", e));
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load();
    let file = cli.file.as_deref();

    match cli.command {
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "storyboard",
                &mut std::io::stdout(),
            );
        }
        Commands::Column(column_cmd) => {
            handlers::board::handle_columns(column_cmd.action)?;
        }
        Commands::Link(link_cmd) => {
            handlers::link::handle(file, config, link_cmd.action).await?;
        }
        Commands::Board(board_cmd) => {
            let ctx = CliContext::load(file, config).await?;
            handlers::board::handle(&ctx, board_cmd.action).await?;
            ctx.finish().await;
        }
        Commands::Card(card_cmd) => {
            let ctx = CliContext::load(file, config).await?;
            handlers::card::handle(&ctx, card_cmd.action).await?;
            ctx.finish().await;
        }
        Commands::Sync(sync_cmd) => {
            let ctx = CliContext::load(file, config).await?;
            handlers::sync::handle(&ctx, sync_cmd.action).await?;
            ctx.finish().await;
        }
    }

    Ok(())
}
