//! CLI binary for devref.

use clap::{Parser, Subcommand};
use devref::{DevrefConfig, RecommendRequest, Recommender, Server};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// devref: turn review comments into learning resources.
#[derive(Parser)]
#[command(name = "devref", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true, env = "DEVREF_CONFIG")]
    config: Option<PathBuf>,

    /// Seed file for the internal source. Overrides `internal.seed_path`,
    /// which is resolved from the config file's directory (or the current
    /// directory when no config file is used).
    #[arg(long, global = true, env = "DEVREF_SEED")]
    seed: Option<PathBuf>,

    /// Skip the embedding model and rank by word overlap.
    #[arg(long, global = true)]
    lexical: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve `POST /process-comment` until Ctrl+C.
    Serve {
        /// Override `server.host`.
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port` (0 picks a free port).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one comment through the pipeline and print the JSON response.
    Recommend {
        /// Review comment text.
        comment: String,
        /// Extra topic appended after the extracted ones (repeatable).
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Source to query: internal, google or youtube (repeatable).
        #[arg(short, long = "source")]
        sources: Vec<String>,
        /// Number of resources to return.
        #[arg(short = 'n', long)]
        num: Option<usize>,
        /// Also print the extracted topics and dispatched queries to stderr.
        #[arg(long)]
        explain: bool,
    },

    /// Write the effective configuration to a TOML file.
    InitConfig {
        /// Destination (defaults to `~/.config/devref/config.toml`).
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `recommend` output stays pipeable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("devref=info,devref_search=info,ort=warn,hf_hub=warn")
        }))
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;
    if let Some(seed) = cli.seed {
        config.internal.seed_path = seed;
    }
    if cli.lexical {
        config.rerank.semantic = false;
    }

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Command::Recommend {
            comment,
            tags,
            sources,
            num,
            explain,
        } => {
            let mut request = RecommendRequest::new(comment);
            request.tags = tags;
            request.settings.num_recommendations = num;
            if !sources.is_empty() {
                request.settings.sources = Some(sources);
            }
            recommend(config, request, explain).await
        }
        Command::InitConfig { path } => {
            let path = path.unwrap_or_else(DevrefConfig::default_config_path);
            config.save_to_file(&path)?;
            println!("wrote {}", path.display());
            Ok(())
        }
    }
}

/// Explicit path, else the default path if it exists, else built-in defaults.
fn load_config(path: Option<&PathBuf>) -> anyhow::Result<DevrefConfig> {
    if let Some(path) = path {
        return Ok(DevrefConfig::from_file(path)?);
    }
    let default_path = DevrefConfig::default_config_path();
    if default_path.exists() {
        info!("using config {}", default_path.display());
        Ok(DevrefConfig::from_file(&default_path)?)
    } else {
        Ok(DevrefConfig::default())
    }
}

/// Model loading blocks, so build the recommender off the runtime threads.
async fn build_recommender(config: DevrefConfig) -> anyhow::Result<Recommender> {
    Ok(tokio::task::spawn_blocking(move || Recommender::new(config)).await??)
}

async fn serve(config: DevrefConfig) -> anyhow::Result<()> {
    println!("devref v{}", env!("CARGO_PKG_VERSION"));
    let server_config = config.server.clone();
    let recommender = Arc::new(build_recommender(config).await?);
    info!("ranker: {}", recommender.ranker_name());

    let server = Server::start(recommender, &server_config).await?;
    println!("\nListening on http://{}. Press Ctrl+C to stop.\n", server.addr());

    tokio::signal::ctrl_c().await?;
    info!("received Ctrl+C, shutting down...");
    server.shutdown();
    Ok(())
}

async fn recommend(
    config: DevrefConfig,
    request: RecommendRequest,
    explain: bool,
) -> anyhow::Result<()> {
    let recommender = build_recommender(config).await?;
    if explain {
        eprintln!("{}", serde_json::to_string_pretty(&recommender.plan(&request))?);
    }
    let response = recommender.process(&request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
