//! Inbound GitHub webhook payload model and decoder.
//!
//! Only the fields the classifiers read (plus a few identifiers useful for
//! logging) are modelled. Every struct decodes leniently: absent fields take
//! their default value and `null` in a string or object field is treated as
//! absent. Only syntactically invalid input, or input whose shape contradicts
//! the schema (an object where a number is expected), fails to decode.

use serde::{Deserialize, Deserializer};

use crate::{BranchName, DecodeError, PullRequestNumber, Timestamp, WorkflowRunId};

/// Deserializes `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Event families
// ---------------------------------------------------------------------------

/// The event families this relay handles, keyed by the `X-GitHub-Event`
/// header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `pull_request`
    PullRequest,
    /// `workflow_run`
    WorkflowRun,
}

impl EventKind {
    /// Maps an event-type identifier to a family, or `None` for event types
    /// this relay does not handle.
    pub fn from_event_type(event_type: &str) -> Option<Self> {
        match event_type {
            "pull_request" => Some(Self::PullRequest),
            "workflow_run" => Some(Self::WorkflowRun),
            _ => None,
        }
    }

    /// Returns the GitHub identifier for this family.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PullRequest => "pull_request",
            Self::WorkflowRun => "workflow_run",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded webhook delivery.
///
/// Constructed once per inbound request and discarded after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    PullRequest(PullRequestEvent),
    WorkflowRun(WorkflowRunEvent),
}

impl InboundEvent {
    /// Decodes `raw` as the event family named by `event_type`.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::UnsupportedEventType`] if `event_type` is not a
    ///   handled family.
    /// - [`DecodeError::Malformed`] if `raw` cannot be parsed as that
    ///   family's schema.
    pub fn decode(event_type: &str, raw: &[u8]) -> Result<Self, DecodeError> {
        let kind = EventKind::from_event_type(event_type).ok_or_else(|| {
            DecodeError::UnsupportedEventType {
                event_type: event_type.to_string(),
            }
        })?;
        Self::decode_as(kind, raw)
    }

    /// Decodes `raw` as the given event family.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Malformed`] if `raw` cannot be parsed.
    pub fn decode_as(kind: EventKind, raw: &[u8]) -> Result<Self, DecodeError> {
        let malformed = |source| DecodeError::Malformed { kind, source };
        match kind {
            EventKind::PullRequest => serde_json::from_slice(raw)
                .map(Self::PullRequest)
                .map_err(malformed),
            EventKind::WorkflowRun => serde_json::from_slice(raw)
                .map(Self::WorkflowRun)
                .map_err(malformed),
        }
    }

    /// Returns the family this event belongs to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PullRequest(_) => EventKind::PullRequest,
            Self::WorkflowRun(_) => EventKind::WorkflowRun,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared sub-objects
// ---------------------------------------------------------------------------

/// A GitHub account (the PR author or the event sender).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub login: String,
    /// Profile page URL.
    #[serde(deserialize_with = "null_as_default")]
    pub html_url: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub account_type: String,
}

/// A repository as embedded in webhook payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// `owner/repo`.
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub html_url: String,
}

// ---------------------------------------------------------------------------
// pull_request
// ---------------------------------------------------------------------------

/// The `action` of a `pull_request` delivery.
///
/// Only the actions the classifier distinguishes are named; every other
/// action (`synchronize`, `labeled`, `edited`, ...) decodes as
/// [`PullRequestAction::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestAction {
    Opened,
    Reopened,
    ReadyForReview,
    Closed,
    #[default]
    #[serde(other)]
    Other,
}

/// One side (head or base) of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Branch {
    #[serde(rename = "ref", deserialize_with = "null_as_default")]
    pub name: BranchName,
    #[serde(deserialize_with = "null_as_default")]
    pub sha: String,
    /// `None` when the source fork has been deleted.
    pub repo: Option<Repository>,
}

/// The `pull_request` object of a `pull_request` delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PullRequest {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub html_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// The account that opened the pull request.
    #[serde(deserialize_with = "null_as_default")]
    pub user: User,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub merged: bool,
    pub merged_at: Option<Timestamp>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    #[serde(deserialize_with = "null_as_default")]
    pub head: Branch,
    #[serde(deserialize_with = "null_as_default")]
    pub base: Branch,
}

/// A `pull_request` webhook delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PullRequestEvent {
    #[serde(deserialize_with = "null_as_default")]
    pub action: PullRequestAction,
    pub number: PullRequestNumber,
    #[serde(deserialize_with = "null_as_default")]
    pub pull_request: PullRequest,
    #[serde(deserialize_with = "null_as_default")]
    pub repository: Repository,
    /// The account whose activity triggered the delivery.
    #[serde(deserialize_with = "null_as_default")]
    pub sender: User,
}

// ---------------------------------------------------------------------------
// workflow_run
// ---------------------------------------------------------------------------

/// The `action` of a `workflow_run` delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowRunAction {
    Requested,
    InProgress,
    Completed,
    #[default]
    #[serde(other)]
    Other,
}

/// The conclusion of a completed workflow run.
///
/// GitHub sends `null` while a run is still in progress; that decodes as
/// `None` on [`WorkflowRun::conclusion`]. Values GitHub may add in future
/// decode as [`WorkflowConclusion::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowConclusion {
    Success,
    Failure,
    Cancelled,
    Skipped,
    Neutral,
    TimedOut,
    ActionRequired,
    Stale,
    StartupFailure,
    #[serde(other)]
    Unknown,
}

impl WorkflowConclusion {
    /// Returns the GitHub spelling of this conclusion.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Cancelled => "cancelled",
            Self::Skipped => "skipped",
            Self::Neutral => "neutral",
            Self::TimedOut => "timed_out",
            Self::ActionRequired => "action_required",
            Self::Stale => "stale",
            Self::StartupFailure => "startup_failure",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for WorkflowConclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A repository reference inside a workflow run's pull-request list.
///
/// Unlike [`Repository`] this carries the API URL rather than the HTML URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RepositoryRef {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// One side of a pull request associated with a workflow run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkflowPullRequestRef {
    #[serde(rename = "ref", deserialize_with = "null_as_default")]
    pub name: BranchName,
    #[serde(deserialize_with = "null_as_default")]
    pub sha: String,
    #[serde(deserialize_with = "null_as_default")]
    pub repo: RepositoryRef,
}

/// A pull request associated with a workflow run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkflowPullRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    pub id: u64,
    pub number: PullRequestNumber,
    #[serde(deserialize_with = "null_as_default")]
    pub head: WorkflowPullRequestRef,
    #[serde(deserialize_with = "null_as_default")]
    pub base: WorkflowPullRequestRef,
}

/// The `workflow_run` object of a `workflow_run` delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkflowRun {
    pub id: WorkflowRunId,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub head_branch: BranchName,
    #[serde(deserialize_with = "null_as_default")]
    pub head_sha: String,
    pub run_number: u64,
    /// The event that triggered the run (`push`, `pull_request`, ...).
    #[serde(deserialize_with = "null_as_default")]
    pub event: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub conclusion: Option<WorkflowConclusion>,
    pub workflow_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub html_url: String,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    #[serde(deserialize_with = "null_as_default")]
    pub pull_requests: Vec<WorkflowPullRequest>,
}

/// The `workflow` object of a `workflow_run` delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Workflow {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Path of the workflow file (e.g. `.github/workflows/ci.yml`).
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
}

/// A `workflow_run` webhook delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkflowRunEvent {
    #[serde(deserialize_with = "null_as_default")]
    pub action: WorkflowRunAction,
    #[serde(deserialize_with = "null_as_default")]
    pub workflow_run: WorkflowRun,
    #[serde(deserialize_with = "null_as_default")]
    pub workflow: Workflow,
    #[serde(deserialize_with = "null_as_default")]
    pub repository: Repository,
    #[serde(deserialize_with = "null_as_default")]
    pub sender: User,
}
