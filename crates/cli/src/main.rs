//! gh-relay entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Load configuration**: load an optional `.env` file, then read and
//!    validate environment variables ([`config::RelayConfig`]).
//! 2. **Wire observability**: install `tracing-subscriber` with a JSON layer
//!    and, when configured, an OpenTelemetry OTLP exporter. All `tracing`
//!    spans and events emitted by every crate in the workspace flow through it.
//! 3. **Construct infrastructure**: create the `DiscordNotifier`, inject it
//!    into `WebhookService`, and mount the service on the listener router.
//! 4. **Serve** until Ctrl-C or SIGTERM, then drain in-flight requests and
//!    flush telemetry.

mod config;
mod telemetry;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use discord::DiscordNotifier;
use listener::ListenerConfig;
use relay::WebhookProcessor;
use service::WebhookService;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::{EnvFile, RelayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = EnvFile::load();
    let config = RelayConfig::from_env().context("Failed to load configuration")?;
    let telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;
    match &env_file {
        EnvFile::Loaded(path) => info!(path = %path.display(), "Loaded .env file"),
        EnvFile::NotFound => warn!("No .env file found, using process environment"),
        EnvFile::Invalid(e) => {
            warn!(error = %e, "Failed to load .env file, using process environment")
        }
    }
    info!(?config, "Configuration loaded");

    let notifier = DiscordNotifier::new(config.endpoints.clone(), config.http_timeout)
        .context("Failed to construct Discord notifier")?;
    let processor: Arc<dyn WebhookProcessor> =
        Arc::new(WebhookService::new(Arc::new(notifier)));
    let app = listener::router(
        processor,
        &ListenerConfig {
            max_body_bytes: config.max_body_bytes,
        },
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let tcp = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    let result = listener::serve(tcp, app, shutdown_signal()).await;
    telemetry.shutdown();
    result.context("Webhook listener failed")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
