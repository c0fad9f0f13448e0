//! gh-relay webhook processor.
//!
//! Provides [`WebhookService`], the single implementation of
//! [`relay::WebhookProcessor`]. For every delivery it decodes the body,
//! classifies the event, and, when the event is notify-worthy, hands the
//! resulting message to the injected [`relay::Notifier`].
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** The service sequences calls between business logic
//! in the [`relay`] crate and the notifier port. It contains no formatting or
//! routing rules of its own and holds no per-request state.

use std::sync::Arc;

use async_trait::async_trait;
use relay::{
    classify, EventKind, InboundEvent, Notifier, ProcessError, ProcessOutcome, Timestamp,
    WebhookProcessor,
};
use tracing::{error, info, instrument};

/// Decode → classify → send pipeline over an injected [`Notifier`].
#[derive(Clone)]
pub struct WebhookService {
    notifier: Arc<dyn Notifier>,
}

impl WebhookService {
    /// Creates a service that delivers through `notifier`.
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    #[instrument(skip(self, payload), fields(payload_bytes = payload.len()))]
    async fn process(
        &self,
        kind: EventKind,
        payload: &[u8],
    ) -> Result<ProcessOutcome, ProcessError> {
        let event = InboundEvent::decode_as(kind, payload)
            .inspect_err(|e| error!(error = %e, "Failed to decode webhook payload"))?;

        let Some(notification) = classify(&event, Timestamp::now()) else {
            return Ok(ProcessOutcome::Skipped);
        };

        info!(channel = %notification.channel, "Sending notification");
        self.notifier
            .send(&notification.channel, &notification.message)
            .await
            .inspect_err(|e| {
                error!(
                    channel = %notification.channel,
                    error = %e,
                    "Failed to send notification"
                )
            })?;

        Ok(ProcessOutcome::Notified {
            channel: notification.channel,
        })
    }
}

#[async_trait]
impl WebhookProcessor for WebhookService {
    async fn process_pull_request_event(
        &self,
        payload: &[u8],
    ) -> Result<ProcessOutcome, ProcessError> {
        self.process(EventKind::PullRequest, payload).await
    }

    async fn process_workflow_run_event(
        &self,
        payload: &[u8],
    ) -> Result<ProcessOutcome, ProcessError> {
        self.process(EventKind::WorkflowRun, payload).await
    }
}
