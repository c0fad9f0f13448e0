//! gh-relay webhook event source.
//!
//! Binds an HTTP server that receives GitHub webhook deliveries and hands
//! each one to a [`relay::WebhookProcessor`] according to its
//! `X-GitHub-Event` header.
//!
//! ## Routes
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | `POST` | `/webhook/github` | GitHub webhook deliveries |
//! | `GET` | `/health` | Liveness probe |
//!
//! ## Response Contract
//!
//! | Situation | Status |
//! |-----------|--------|
//! | Processed (notified or intentionally skipped) | 200 |
//! | Event type not handled | 200 |
//! | Body could not be read | 400 |
//! | Decode or delivery failure | 500 |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP framing and status mapping live here. The
//! [`relay`] crate sees only [`relay::WebhookProcessor`].

mod handler;

use std::{future::Future, sync::Arc};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use relay::WebhookProcessor;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

pub use handler::{GITHUB_DELIVERY_HEADER, GITHUB_EVENT_HEADER};

/// GitHub caps webhook payloads at 25 MB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Listener tuning.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Largest request body accepted on the webhook route. Larger bodies are
    /// answered with 400.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Failure to run the HTTP server.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("Webhook listener I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the webhook router.
pub fn router(processor: Arc<dyn WebhookProcessor>, config: &ListenerConfig) -> Router {
    Router::new()
        .route(
            "/webhook/github",
            post(handler::github_webhook).layer(DefaultBodyLimit::max(config.max_body_bytes)),
        )
        .route("/health", get(handler::health))
        .with_state(processor)
}

/// Serves `app` on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish after `shutdown` resolves.
///
/// # Errors
///
/// Returns [`ListenerError::Io`] if the listener address cannot be read or
/// the server fails.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), ListenerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "Webhook listener started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Webhook listener stopped");
    Ok(())
}
