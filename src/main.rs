use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stream_launcher::backends::external_streams::ExternalStream;
use stream_launcher::models::ContentId;
use stream_launcher::{Config, ExternalStreamApi, SelectorState, StreamSelectionCoordinator};

#[derive(Parser, Debug)]
#[command(name = "stream-launcher")]
#[command(about = "List and resolve external streams for a catalog item")]
#[command(version)]
struct Args {
    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the stream service base URL
    #[arg(long, env = "STREAM_LAUNCHER_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List candidate streams for a content id
    Streams { content_id: String },
    /// Resolve the candidate at a position into a playable URL
    Resolve { content_id: String, index: usize },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "stream_launcher=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = args.base_url {
        config.external_streams.base_url = base_url;
    }

    info!("Using stream service at {}", config.external_streams.base_url);
    let api = ExternalStreamApi::new(&config.external_streams)
        .context("Failed to create stream service client")?;
    let coordinator = StreamSelectionCoordinator::new(Arc::new(api));

    match args.command {
        Command::Streams { content_id } => {
            let streams = list_streams(&coordinator, content_id).await?;
            for (index, stream) in streams.iter().enumerate() {
                println!(
                    "{:>3}  {:<8} {:<10} {:<6} {}",
                    index, stream.quality, stream.size, stream.lang, stream.title
                );
            }
        }
        Command::Resolve { content_id, index } => {
            println!("{}", resolve_url(&coordinator, content_id, index).await?);
        }
    }

    Ok(())
}

async fn load(coordinator: &StreamSelectionCoordinator, content_id: String) -> Result<()> {
    if let Some(handle) = coordinator.load(ContentId::new(content_id)).await {
        handle.await.context("Load task failed")?;
    }
    if let SelectorState::Error { message } = coordinator.state() {
        bail!(message);
    }
    Ok(())
}

async fn list_streams(
    coordinator: &StreamSelectionCoordinator,
    content_id: String,
) -> Result<Vec<ExternalStream>> {
    load(coordinator, content_id).await?;
    match coordinator.state() {
        SelectorState::Loaded { streams, .. } => Ok(streams),
        _ => Ok(Vec::new()),
    }
}

async fn resolve_url(
    coordinator: &StreamSelectionCoordinator,
    content_id: String,
    index: usize,
) -> Result<String> {
    load(coordinator, content_id).await?;
    if let Some(handle) = coordinator.resolve(index).await {
        handle.await.context("Resolve task failed")?;
    }
    match coordinator.take_outcome().await {
        Some(Ok(url)) => Ok(url),
        Some(Err(message)) => bail!(message),
        None => bail!("No stream was resolved"),
    }
}
