//! Port traits implemented by infrastructure and orchestration crates.
//!
//! Both traits are object-safe via `async_trait` so they can be held as
//! `Arc<dyn ...>` by the composition root.

use async_trait::async_trait;

use crate::{ChannelName, NotificationMessage, ProcessError, SendError};

/// Delivers a notification to a logical channel.
///
/// Implementations make at most one delivery attempt per call and never
/// retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `message` to the endpoint configured for `channel`.
    ///
    /// # Errors
    ///
    /// - [`SendError::Unconfigured`] if `channel` has no endpoint; no network
    ///   call is made.
    /// - [`SendError::Transport`] if no HTTP response was received.
    /// - [`SendError::RemoteRejected`] if the endpoint answered with a status
    ///   outside `200..300`.
    async fn send(&self, channel: &ChannelName, message: &NotificationMessage)
        -> Result<(), SendError>;
}

/// What a processor did with a delivery it accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// A notification was delivered to `channel`.
    Notified { channel: ChannelName },
    /// The event was decoded but is not notify-worthy.
    Skipped,
}

/// Runs the decode → classify → send pipeline for one webhook body.
///
/// Called by the inbound boundary once it has identified the event family.
#[async_trait]
pub trait WebhookProcessor: Send + Sync {
    /// Processes a `pull_request` delivery body.
    async fn process_pull_request_event(&self, payload: &[u8])
        -> Result<ProcessOutcome, ProcessError>;

    /// Processes a `workflow_run` delivery body.
    async fn process_workflow_run_event(&self, payload: &[u8])
        -> Result<ProcessOutcome, ProcessError>;
}
