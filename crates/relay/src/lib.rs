//! Core domain for gh-relay.
//!
//! This crate contains every domain concept used to turn a GitHub webhook
//! delivery into a chat notification: the typed event model and its decoder,
//! the notification message model, the per-family classifiers that decide
//! whether (and what) to notify, and the port traits that infrastructure
//! crates implement.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is sent and *when*; infrastructure crates define *how*
//! it reaches the outside world.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`PullRequestNumber`, `ChannelName`, etc.) |
//! | [`types`] | Shared value types (`Timestamp`, `EmbedColor`) |
//! | [`events`] | Inbound GitHub payload model and decoder |
//! | [`message`] | Outbound notification model |
//! | [`classify`] | Pull-request and workflow-run classifiers |
//! | [`ports`] | `Notifier` and `WebhookProcessor` traits |
//! | [`errors`] | Decode, send, and processing error types |

pub mod classify;
pub mod errors;
pub mod events;
pub mod identifiers;
pub mod message;
pub mod ports;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use classify::{classify, classify_pull_request, classify_workflow_run};
pub use errors::{DecodeError, ProcessError, SendError};
pub use events::{
    Branch, EventKind, InboundEvent, PullRequest, PullRequestAction, PullRequestEvent,
    Repository, RepositoryRef, User, Workflow, WorkflowConclusion, WorkflowPullRequest,
    WorkflowPullRequestRef, WorkflowRun, WorkflowRunAction, WorkflowRunEvent,
};
pub use identifiers::{BranchName, ChannelName, PullRequestNumber, WorkflowRunId};
pub use message::{Embed, EmbedField, EmbedFooter, Notification, NotificationMessage};
pub use ports::{Notifier, ProcessOutcome, WebhookProcessor};
pub use types::{EmbedColor, Timestamp};
