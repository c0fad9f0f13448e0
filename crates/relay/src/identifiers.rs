//! Newtype domain identifiers.
//!
//! Every value that identifies something is represented as a distinct newtype
//! wrapping a primitive. This prevents accidentally interchanging, for
//! example, a [`PullRequestNumber`] with a [`WorkflowRunId`] even though both
//! are integers assigned by GitHub.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes (GitHub-assigned integers).
// Generates: struct (Copy), new(), as_u64(), Display.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: GitHub-integer-backed
// ---------------------------------------------------------------------------

u64_id! {
    /// The repository-scoped number of a GitHub Pull Request (`#42`).
    PullRequestNumber
}

u64_id! {
    /// Identifies a single GitHub Actions workflow run.
    WorkflowRunId
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// A Git branch name as reported in a payload `ref` (e.g. `"main"`).
    ///
    /// Payloads with a missing ref decode to the empty branch name.
    BranchName
}

string_id! {
    /// A logical delivery target for notifications.
    ///
    /// Each channel maps to exactly one external webhook endpoint. The set of
    /// channels the notifier knows about is fixed by configuration; any other
    /// label is rejected at send time.
    ChannelName
}

impl ChannelName {
    /// The channel that receives pull-request activity.
    pub fn development() -> Self {
        Self("development".to_string())
    }

    /// The channel that receives workflow-run results.
    pub fn testing() -> Self {
        Self("testing".to_string())
    }
}
