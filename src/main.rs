use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hackline::app::AppContext;
use hackline::cli::{commands, Cli, Commands};
use hackline::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Stories { category, pages } => {
            let pages = pages.unwrap_or(ctx.config.display.page_count);
            commands::list_stories(&ctx, category, pages).await?;
        }
        Commands::Search { text } => {
            commands::search(&ctx, &text).await?;
        }
        Commands::Comments { id } => {
            commands::show_comments(&ctx, id).await?;
        }
    }

    Ok(())
}
