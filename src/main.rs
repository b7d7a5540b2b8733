#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use std::net::SocketAddr;

use anyhow::Result;
use axum::Extension;
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::artifacts::ArtifactStore;
use crate::config::Config;
use crate::directory::Directory;

mod artifacts;
mod config;
mod directory;
mod links;
mod pages;
#[cfg(test)]
mod tests;

const DEFAULT_RUST_LOG: &str = "concierge=debug,tower_http=debug";
const DEFAULT_ADDRESS: &str = "0.0.0.0:5000";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let config = Config::from_env()?;
    let directory = directory::setup()?;

    let app = setup_app(config, directory).await?;

    let address = setup_address()?;
    tracing::info!("Listening on {}", address);

    let listener = TcpListener::bind(address).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Create and setup the app with its dependencies
///
/// # Errors
///
/// Will return `Err` if the artifact directories can not be created
pub async fn setup_app<D: Directory>(config: Config, directory: D) -> Result<Router> {
    let artifacts = ArtifactStore::prepare(&config).await?;

    Ok(create_router(config, directory, artifacts))
}

/// Create the router for Concierge
fn create_router<D: Directory>(config: Config, directory: D, artifacts: ArtifactStore) -> Router {
    let static_root = config.static_root.clone();

    Router::new()
        .route("/guest/{guest_name}/{created}", get(pages::welcome::<D>))
        .route("/guest/{guest_name}/{created}/pdf", get(pages::document))
        .nest_service("/static", ServeDir::new(static_root))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(directory))
        .layer(Extension(artifacts))
        .layer(Extension(config))
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}

fn setup_address() -> Result<SocketAddr> {
    let mut address = config::env_var_or_else("ADDRESS", || String::from(DEFAULT_ADDRESS))
        .parse::<SocketAddr>()?;

    // optional override of just the port
    if let Ok(port) = std::env::var("PORT") {
        // only check non-empty strings
        if !port.is_empty() {
            let port = port.parse::<u16>()?;

            address.set_port(port);
        }
    }

    Ok(address)
}

/// Handler for graceful shutdown
///
/// Will listen to Ctrl+C and SIGTERM to initiate a shutdown
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c().await.expect("Valid CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Valid terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Terminate signal received, starting graceful shutdown");
}
