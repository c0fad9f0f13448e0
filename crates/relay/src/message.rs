//! Outbound notification model.
//!
//! The shape mirrors a chat "rich message": optional plain text plus a list of
//! embeds. It is transport-neutral; infrastructure crates map it onto their
//! own wire format.

use crate::{ChannelName, EmbedColor, Timestamp};

/// A notification ready to be delivered, paired with its target channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub channel: ChannelName,
    pub message: NotificationMessage,
}

/// The content of a notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationMessage {
    /// Plain text shown above the embeds.
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
}

impl NotificationMessage {
    /// Creates a message consisting of a single embed and no plain text.
    pub fn from_embed(embed: Embed) -> Self {
        Self {
            content: None,
            embeds: vec![embed],
        }
    }
}

/// A styled section of a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    /// Link target of the title.
    pub url: String,
    pub color: EmbedColor,
    /// Rendered in order.
    pub fields: Vec<EmbedField>,
    pub footer: Option<EmbedFooter>,
    pub timestamp: Option<Timestamp>,
}

impl Embed {
    /// Returns the first field with the given name.
    pub fn field(&self, name: &str) -> Option<&EmbedField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A `name: value` pair inside an [`Embed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    /// Whether the field may share a row with its neighbours.
    pub inline: bool,
}

impl EmbedField {
    /// Creates a field that may share a row with its neighbours.
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: Option<String>,
}

impl EmbedFooter {
    /// Creates a text-only footer.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon_url: None,
        }
    }
}
