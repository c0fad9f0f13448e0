use std::time::Duration;

use async_trait::async_trait;
use relay::{ChannelName, NotificationMessage, Notifier, SendError};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::DiscordPayload;

/// The webhook URL configured for each logical channel.
///
/// URLs are opaque to the notifier. They embed a secret token and are never
/// logged.
#[derive(Clone, Default)]
pub struct ChannelEndpoints {
    pub development: String,
    pub testing: String,
}

impl ChannelEndpoints {
    /// Returns the URL for `channel`, or `None` if the channel is unknown or
    /// its URL is empty.
    pub fn resolve(&self, channel: &ChannelName) -> Option<&str> {
        let url = match channel.as_str() {
            "development" => &self.development,
            "testing" => &self.testing,
            _ => return None,
        };
        (!url.is_empty()).then_some(url.as_str())
    }
}

impl std::fmt::Debug for ChannelEndpoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelEndpoints")
            .field("development", &!self.development.is_empty())
            .field("testing", &!self.testing.is_empty())
            .finish()
    }
}

/// Failure to construct a [`DiscordNotifier`].
#[derive(Debug, Error)]
pub enum NotifierSetupError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Posts notifications to Discord incoming webhooks.
#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    client: reqwest::Client,
    endpoints: ChannelEndpoints,
}

impl DiscordNotifier {
    /// Creates a notifier whose requests time out after `timeout`.
    ///
    /// Redirects are not followed: a 3xx answer is reported as a rejection.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierSetupError::HttpClient`] if the TLS backend cannot be
    /// initialised.
    pub fn new(endpoints: ChannelEndpoints, timeout: Duration) -> Result<Self, NotifierSetupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client, endpoints })
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    #[instrument(skip(self, channel, message), fields(channel = %channel))]
    async fn send(
        &self,
        channel: &ChannelName,
        message: &NotificationMessage,
    ) -> Result<(), SendError> {
        let Some(url) = self.endpoints.resolve(channel) else {
            warn!("No Discord webhook URL configured for channel");
            return Err(SendError::Unconfigured {
                channel: channel.clone(),
            });
        };

        let payload = DiscordPayload::from(message);
        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Transport failure sending to Discord");
                SendError::Transport {
                    channel: channel.clone(),
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                warn!(error = %e, "Failed to read Discord error response body");
                String::new()
            });
            error!(status = status.as_u16(), body = %body, "Discord rejected notification");
            return Err(SendError::RemoteRejected {
                channel: channel.clone(),
                status: status.as_u16(),
                body,
            });
        }

        info!(status = status.as_u16(), "Notification delivered to Discord");
        Ok(())
    }
}
