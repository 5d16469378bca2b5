use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tributary::app::AppContext;
use tributary::cli::{commands, Cli, Commands};
use tributary::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let ctx = if cli.in_memory {
        AppContext::in_memory(config)?
    } else {
        AppContext::new(config)?
    };

    // Drop an expired feed cache before anything reads it
    ctx.pipeline.validate_cache();

    match cli.command {
        Commands::Feed { pages } => {
            commands::show_feed(&ctx, pages).await?;
        }
        Commands::Comments { image_id } => {
            commands::show_comments(&ctx, image_id).await?;
        }
        Commands::Image { url, output } => {
            commands::fetch_image(&ctx, &url, output.as_deref()).await?;
        }
        Commands::Validate => {
            commands::validate_cache(&ctx)?;
        }
    }

    Ok(())
}
