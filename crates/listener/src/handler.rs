use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use relay::{EventKind, WebhookProcessor};
use serde::Serialize;
use tracing::{error, info, info_span, Instrument};

/// Header carrying the event type (`pull_request`, `workflow_run`, ...).
pub const GITHUB_EVENT_HEADER: &str = "X-GitHub-Event";

/// Header carrying the unique delivery GUID.
pub const GITHUB_DELIVERY_HEADER: &str = "X-GitHub-Delivery";

#[derive(Debug, Serialize)]
pub(crate) struct WebhookResponse {
    status: &'static str,
    message: String,
}

fn reply(
    code: StatusCode,
    status: &'static str,
    message: impl Into<String>,
) -> (StatusCode, Json<WebhookResponse>) {
    (
        code,
        Json(WebhookResponse {
            status,
            message: message.into(),
        }),
    )
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub(crate) async fn github_webhook(
    State(processor): State<Arc<dyn WebhookProcessor>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, Json<WebhookResponse>) {
    let event_type = header(&headers, GITHUB_EVENT_HEADER).to_string();
    let delivery_id = header(&headers, GITHUB_DELIVERY_HEADER);
    let span = info_span!("github_webhook", %event_type, %delivery_id);

    dispatch(processor, event_type, body).instrument(span).await
}

async fn dispatch(
    processor: Arc<dyn WebhookProcessor>,
    event_type: String,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, Json<WebhookResponse>) {
    info!("Webhook received");

    let payload = match body {
        Ok(payload) => payload,
        Err(rejection) => {
            error!(error = %rejection, "Failed to read request body");
            return reply(
                StatusCode::BAD_REQUEST,
                "error",
                "Error reading request body",
            );
        }
    };

    let result = match EventKind::from_event_type(&event_type) {
        Some(EventKind::PullRequest) => processor.process_pull_request_event(&payload).await,
        Some(EventKind::WorkflowRun) => processor.process_workflow_run_event(&payload).await,
        None => {
            info!("Ignoring unhandled event type");
            return reply(
                StatusCode::OK,
                "received",
                "Event received but type is not handled",
            );
        }
    };

    match result {
        Ok(outcome) => {
            info!(?outcome, "Event processed successfully");
            reply(
                StatusCode::OK,
                "success",
                format!("Event '{event_type}' processed successfully"),
            )
        }
        Err(e) => {
            error!(error = %e, "Error processing event");
            reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "error",
                format!("Error processing event '{event_type}'"),
            )
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "UP" })
}
