use anyhow::Result;
use nodeboard_core::config::Config;
use nodeboard_core::stdio::run_stdio;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env_and_args();

    // stdout carries protocol traffic; logs go to stderr
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    info!(pretty = config.pretty, "nodeboard starting (stdio)");
    run_stdio(&config).await?;
    Ok(())
}
