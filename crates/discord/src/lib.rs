//! gh-relay Discord adapter.
//!
//! Implements the [`relay::Notifier`] trait by posting messages to Discord
//! incoming-webhook URLs, one URL per logical channel.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, the Discord wire format, and status
//! interpretation all live here. The [`relay`] crate sees only
//! [`relay::Notifier`] and [`relay::SendError`].
//!
//! ## Delivery Model
//!
//! Each call makes exactly one POST attempt. There is no retry, back-off, or
//! queueing; failures are reported to the caller and logged.

mod notifier;
pub mod wire;

pub use notifier::{ChannelEndpoints, DiscordNotifier, NotifierSetupError};
pub use wire::{DiscordEmbed, DiscordField, DiscordFooter, DiscordPayload};
