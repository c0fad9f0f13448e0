//! Shared value types for the relay domain.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
///
/// Payload fields that GitHub may send as `null` are modelled as
/// `Option<Timestamp>`; an absent value is never coerced to the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Formats the timestamp as RFC 3339 with second precision and a `Z`
    /// suffix (e.g. `2024-05-01T12:30:00Z`).
    pub fn to_rfc3339(self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Sidebar color of a notification embed, as a decimal `0xRRGGBB` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmbedColor(u32);

impl EmbedColor {
    pub const BLUE: Self = Self(3_447_003);
    pub const GREEN: Self = Self(3_066_993);
    pub const YELLOW: Self = Self(16_776_960);
    pub const PURPLE: Self = Self(8_359_053);
    pub const RED: Self = Self(15_158_332);
    pub const GRAY: Self = Self(9_807_270);

    /// Creates a color from a raw `0xRRGGBB` value.
    pub fn new(rgb: u32) -> Self {
        Self(rgb)
    }

    /// Returns the decimal color code.
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EmbedColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}
