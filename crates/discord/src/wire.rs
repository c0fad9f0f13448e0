//! Discord webhook execution payload.
//!
//! See <https://discord.com/developers/docs/resources/webhook#execute-webhook>.
//! Empty optional values are omitted from the serialized JSON rather than sent
//! as empty strings, which Discord rejects for some fields (e.g. `url`).

use relay::{Embed, EmbedField, EmbedFooter, NotificationMessage};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscordPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<DiscordEmbed>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscordEmbed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Decimal `0xRRGGBB`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<DiscordField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<DiscordFooter>,
    /// ISO-8601.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscordField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscordFooter {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl From<&NotificationMessage> for DiscordPayload {
    fn from(message: &NotificationMessage) -> Self {
        Self {
            content: message.content.as_deref().and_then(non_empty),
            embeds: message.embeds.iter().map(DiscordEmbed::from).collect(),
        }
    }
}

impl From<&Embed> for DiscordEmbed {
    fn from(embed: &Embed) -> Self {
        Self {
            title: non_empty(&embed.title),
            description: non_empty(&embed.description),
            url: non_empty(&embed.url),
            color: Some(embed.color.as_u32()),
            fields: embed.fields.iter().map(DiscordField::from).collect(),
            footer: embed.footer.as_ref().map(DiscordFooter::from),
            timestamp: embed.timestamp.map(|ts| ts.to_rfc3339()),
        }
    }
}

impl From<&EmbedField> for DiscordField {
    fn from(field: &EmbedField) -> Self {
        Self {
            name: field.name.clone(),
            value: field.value.clone(),
            inline: field.inline,
        }
    }
}

impl From<&EmbedFooter> for DiscordFooter {
    fn from(footer: &EmbedFooter) -> Self {
        Self {
            text: footer.text.clone(),
            icon_url: footer.icon_url.as_deref().and_then(non_empty),
        }
    }
}
