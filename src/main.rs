use anyhow::Context;
use clap::Parser;
use fast_mcp::{FastMcp, cli::Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout belongs to the stdio transport, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("info,{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.start_config()?;
    tracing::debug!("Starting fast-mcp with config: {config:#?}");

    let server = FastMcp::new(cli.server_options());
    server
        .start(config)
        .await
        .context("failed to start server")?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    server.stop().await?;
    Ok(())
}
