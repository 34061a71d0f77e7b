mod app;
mod cli;
mod error;
mod handlers;
mod model;
mod state;

use std::sync::Arc;

use crate::app::App;
use crate::cli::{StorageBackendArg, CLI};
use crate::state::AppState;
use anyhow::Context;
use clap::Parser;
use snip_core::{Repository, Shortener};
use snip_generator::RandomGenerator;
use snip_shortener::{ShortenerConfig, ShortenerService};
use snip_storage::{InMemoryRepository, SqliteRepository};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    snip_telemetry::init(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        public_base_url = %config.public_base_url,
        storage_backend = %config.storage,
        code_length = config.code_length,
        max_attempts = config.max_attempts,
        "starting gateway server"
    );

    let generator = RandomGenerator::new(&config.code_alphabet, config.code_length)
        .context("invalid short code generator settings")?;
    let shortener_config = ShortenerConfig::builder()
        .max_attempts(config.max_attempts)
        .build();

    let shortener = match config.storage {
        StorageBackendArg::InMemory => {
            build_shortener(InMemoryRepository::new(), generator, shortener_config)
        }
        StorageBackendArg::Sqlite => {
            let repository = SqliteRepository::connect(&config.sqlite_url)
                .await
                .with_context(|| format!("failed to open {}", config.sqlite_url))?;
            repository
                .ensure_schema()
                .await
                .context("failed to create schema")?;
            build_shortener(repository, generator, shortener_config)
        }
    };

    let router = App::router(AppState::new(shortener, config.public_base_url));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

fn build_shortener<R: Repository>(
    repository: R,
    generator: RandomGenerator,
    config: ShortenerConfig,
) -> Arc<dyn Shortener> {
    Arc::new(ShortenerService::new(repository, generator).with_config(config))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
