//! Full relay path: HTTP delivery → processor → Discord notifier → fake
//! Discord endpoint.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use discord::{ChannelEndpoints, DiscordNotifier, DiscordPayload};
use listener::{router, serve, ListenerConfig, GITHUB_EVENT_HEADER};
use serde_json::json;
use service::WebhookService;

type Inbox = Arc<Mutex<Vec<(String, DiscordPayload)>>>;

async fn record(
    State(inbox): State<Inbox>,
    axum::extract::Path(channel): axum::extract::Path<String>,
    Json(payload): Json<DiscordPayload>,
) -> StatusCode {
    inbox.lock().unwrap().push((channel, payload));
    StatusCode::NO_CONTENT
}

async fn spawn_discord() -> (String, Inbox) {
    let inbox: Inbox = Arc::default();
    let app = Router::new()
        .route("/hooks/:channel", post(record))
        .with_state(inbox.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    (format!("http://{addr}/hooks"), inbox)
}

async fn spawn_relay(endpoints: ChannelEndpoints) -> String {
    let notifier = DiscordNotifier::new(endpoints, Duration::from_secs(5)).unwrap();
    let processor = Arc::new(WebhookService::new(Arc::new(notifier)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(processor, &ListenerConfig::default());
    tokio::spawn(serve(listener, app, std::future::pending()));
    format!("http://{addr}/webhook/github")
}

async fn deliver(url: &str, event_type: &str, body: serde_json::Value) -> u16 {
    reqwest::Client::new()
        .post(url)
        .header(GITHUB_EVENT_HEADER, event_type)
        .json(&body)
        .send()
        .await
        .unwrap()
        .status()
        .as_u16()
}

fn pull_request(action: &str, merged: bool) -> serde_json::Value {
    json!({
        "action": action,
        "number": 42,
        "pull_request": {
            "html_url": "https://github.com/acme/widgets/pull/42",
            "title": "Fix bug",
            "user": { "login": "octocat", "html_url": "https://github.com/octocat" },
            "merged": merged,
            "created_at": "2024-03-14T10:00:00Z",
            "head": { "ref": "fix" },
            "base": { "ref": "main" }
        },
        "repository": {
            "full_name": "acme/widgets",
            "html_url": "https://github.com/acme/widgets"
        },
        "sender": { "login": "hubot", "html_url": "https://github.com/hubot" }
    })
}

#[tokio::test]
async fn opened_pull_request_reaches_development_channel() {
    let (discord, inbox) = spawn_discord().await;
    let relay = spawn_relay(ChannelEndpoints {
        development: format!("{discord}/development"),
        testing: format!("{discord}/testing"),
    })
    .await;

    let status = deliver(&relay, "pull_request", pull_request("opened", false)).await;
    assert_eq!(status, 200);

    let inbox = inbox.lock().unwrap();
    assert_eq!(inbox.len(), 1);
    let (channel, payload) = &inbox[0];
    assert_eq!(channel, "development");

    let embed = &payload.embeds[0];
    assert_eq!(embed.title.as_deref(), Some("🚀 New Pull Request #42: Fix bug"));
    assert_eq!(embed.color, Some(3447003));
    assert_eq!(embed.timestamp.as_deref(), Some("2024-03-14T10:00:00Z"));
    assert_eq!(embed.fields[1].name, "Branch");
    assert_eq!(embed.fields[1].value, "`fix` → `main`");
}

#[tokio::test]
async fn unmerged_close_sends_nothing_and_succeeds() {
    let (discord, inbox) = spawn_discord().await;
    let relay = spawn_relay(ChannelEndpoints {
        development: format!("{discord}/development"),
        testing: format!("{discord}/testing"),
    })
    .await;

    let status = deliver(&relay, "pull_request", pull_request("closed", false)).await;

    assert_eq!(status, 200);
    assert!(inbox.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_workflow_run_reaches_testing_channel() {
    let (discord, inbox) = spawn_discord().await;
    let relay = spawn_relay(ChannelEndpoints {
        development: format!("{discord}/development"),
        testing: format!("{discord}/testing"),
    })
    .await;

    let body = json!({
        "action": "completed",
        "workflow_run": {
            "id": 9001,
            "head_branch": "main",
            "event": "push",
            "conclusion": "failure",
            "html_url": "https://github.com/acme/widgets/actions/runs/9001",
            "updated_at": "2024-03-14T12:30:00Z",
            "pull_requests": []
        },
        "workflow": { "name": "CI", "path": ".github/workflows/ci.yml" },
        "repository": {
            "full_name": "acme/widgets",
            "html_url": "https://github.com/acme/widgets"
        },
        "sender": { "login": "hubot", "html_url": "https://github.com/hubot" }
    });
    let status = deliver(&relay, "workflow_run", body).await;
    assert_eq!(status, 200);

    let inbox = inbox.lock().unwrap();
    let (channel, payload) = &inbox[0];
    assert_eq!(channel, "testing");
    assert_eq!(payload.embeds[0].color, Some(15158332));
    assert!(!payload.embeds[0]
        .description
        .as_deref()
        .unwrap_or_default()
        .contains("Associated Pull Request"));
}

#[tokio::test]
async fn unconfigured_channel_fails_the_delivery() {
    let (discord, inbox) = spawn_discord().await;
    let relay = spawn_relay(ChannelEndpoints {
        development: String::new(),
        testing: format!("{discord}/testing"),
    })
    .await;

    let status = deliver(&relay, "pull_request", pull_request("opened", false)).await;

    assert_eq!(status, 500);
    assert!(inbox.lock().unwrap().is_empty());
}
