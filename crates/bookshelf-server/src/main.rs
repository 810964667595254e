//! Bookshelf server - catalog web application entry point.

use axum::extract::Request;
use axum::ServiceExt;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf_auth::{GithubConfig, HttpGithubClient};
use bookshelf_server::{create_app, seed_demo_catalog, AppState, Config};

/// Bookshelf - a book catalog with GitHub login
#[derive(Parser, Debug)]
#[command(name = "bookshelf-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "bookshelf.yaml")]
    config: PathBuf,

    /// HTTP listen address
    #[arg(long, default_value = "127.0.0.1:5000")]
    addr: SocketAddr,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Seed the catalog with a small demo shelf
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("bookshelf={}", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting bookshelf server");

    let config = Config::load(&args.config)?;
    let github = GithubConfig {
        client_id: config.github_client_id.clone(),
        client_secret: config.github_client_secret.clone(),
    };
    if !github.is_configured() {
        tracing::warn!("github client secrets not configured; login is disabled");
    }

    let state = AppState::new(Arc::new(HttpGithubClient::new(github)));
    if args.seed {
        seed_demo_catalog(&state.catalog);
    }

    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    tracing::info!(addr = %args.addr, "listening");
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
