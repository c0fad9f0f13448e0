//! Error types for the relay domain.
//!
//! Every error here is local to a single webhook delivery: none of them
//! carries or corrupts state that outlives the request, and none is retried.
//!
//! - [`DecodeError`]: the inbound body could not be turned into a typed event.
//! - [`SendError`]: the notification could not be delivered.
//! - [`ProcessError`]: the union of the two, returned by the processor port.

use thiserror::Error;

use crate::{ChannelName, EventKind};

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Failure to decode a raw webhook body into an [`crate::InboundEvent`].
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The event-type identifier names no event family this relay understands.
    #[error("Unsupported event type: '{event_type}'")]
    UnsupportedEventType {
        /// The identifier as received (e.g. the `X-GitHub-Event` header value).
        event_type: String,
    },

    /// The body is not syntactically valid for the named event family.
    #[error("Malformed {kind} payload: {source}")]
    Malformed {
        /// The event family the body was decoded as.
        kind: EventKind,
        /// Underlying JSON parse failure.
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Delivery
// ---------------------------------------------------------------------------

/// Failure to deliver a notification to its channel.
///
/// Exactly one delivery attempt is made per notification; the variant
/// describes why that attempt did not succeed.
#[derive(Debug, Error)]
pub enum SendError {
    /// No endpoint is configured for the requested channel. No network call
    /// was attempted.
    #[error("No webhook URL configured for channel '{channel}'")]
    Unconfigured {
        /// The channel label that could not be resolved.
        channel: ChannelName,
    },

    /// The request never produced an HTTP response (connection refused,
    /// DNS failure, timeout).
    #[error("Transport failure sending to channel '{channel}': {message}")]
    Transport {
        /// The channel being delivered to.
        channel: ChannelName,
        /// Description of the transport failure.
        message: String,
    },

    /// The endpoint answered with a non-2xx status.
    #[error("Channel '{channel}' rejected notification with status {status}: {body}")]
    RemoteRejected {
        /// The channel being delivered to.
        channel: ChannelName,
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Response body, for diagnostics. May be empty.
        body: String,
    },
}

// ---------------------------------------------------------------------------
// Processing
// ---------------------------------------------------------------------------

/// Failure of one decode → classify → send pass.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Send(#[from] SendError),
}
