//! Notification classifiers.
//!
//! Each event family has a stateless classifier that inspects the action (and,
//! for workflow runs, the conclusion) and either produces one fully-formed
//! [`Notification`] or nothing. Classifiers perform no I/O. The current time
//! is passed in rather than read, and is only consulted when a pull request
//! lacks the timestamp its action would normally use.
//!
//! | Family | Channel |
//! |--------|---------|
//! | `pull_request` | `development` |
//! | `workflow_run` | `testing` |

use tracing::info;

use crate::{
    ChannelName, Embed, EmbedColor, EmbedField, EmbedFooter, InboundEvent, Notification,
    NotificationMessage, PullRequestAction, PullRequestEvent, Timestamp, User,
    WorkflowConclusion, WorkflowRunAction, WorkflowRunEvent,
};

/// Classifies a decoded event of either family.
pub fn classify(event: &InboundEvent, now: Timestamp) -> Option<Notification> {
    match event {
        InboundEvent::PullRequest(pr) => classify_pull_request(pr, now),
        InboundEvent::WorkflowRun(run) => classify_workflow_run(run),
    }
}

// ---------------------------------------------------------------------------
// pull_request
// ---------------------------------------------------------------------------

/// Classifies a `pull_request` delivery.
///
/// Notifies on `opened`, `reopened`, `ready_for_review`, and on `closed` when
/// the pull request was merged. Closing without merging and every other
/// action produce no notification.
pub fn classify_pull_request(event: &PullRequestEvent, now: Timestamp) -> Option<Notification> {
    let pr = &event.pull_request;
    let repo = &event.repository;
    let repo_link = markdown_link(&repo.full_name, &repo.html_url);

    let (title, description, color, timestamp, footer) = match event.action {
        PullRequestAction::Opened => (
            format!("🚀 New Pull Request #{}: {}", event.number, pr.title),
            format!("A new pull request was opened in {repo_link}."),
            EmbedColor::BLUE,
            pr.created_at,
            format!("Triggered by {}", event.sender.login),
        ),
        PullRequestAction::Reopened => (
            format!("🔄 Pull Request Reopened #{}: {}", event.number, pr.title),
            format!("Pull request reopened in {repo_link}."),
            EmbedColor::YELLOW,
            pr.updated_at,
            format!("Reopened by {}", event.sender.login),
        ),
        PullRequestAction::ReadyForReview => (
            format!("👀 PR Ready for Review #{}: {}", event.number, pr.title),
            format!("Pull request marked as ready for review in {repo_link}."),
            EmbedColor::GREEN,
            pr.updated_at,
            format!("Marked ready by {}", event.sender.login),
        ),
        PullRequestAction::Closed if pr.merged => (
            format!("✅ Pull Request Merged #{}: {}", event.number, pr.title),
            format!(
                "Pull request successfully merged into `{}` in {repo_link}.",
                pr.base.name
            ),
            EmbedColor::PURPLE,
            pr.merged_at,
            "Merged".to_string(),
        ),
        PullRequestAction::Closed => {
            info!(
                number = %event.number,
                "Pull request closed without merging; no notification sent"
            );
            return None;
        }
        PullRequestAction::Other => {
            info!(
                number = %event.number,
                "Unhandled pull request action; no notification sent"
            );
            return None;
        }
    };

    let second_field = if event.action == PullRequestAction::Closed {
        EmbedField::inline("Merged By", user_link(&event.sender))
    } else {
        EmbedField::inline(
            "Branch",
            format!("`{}` → `{}`", pr.head.name, pr.base.name),
        )
    };

    let embed = Embed {
        title,
        description,
        url: pr.html_url.clone(),
        color,
        fields: vec![EmbedField::inline("Author", user_link(&pr.user)), second_field],
        footer: Some(EmbedFooter::text(footer)),
        timestamp: Some(timestamp.unwrap_or(now)),
    };

    Some(Notification {
        channel: ChannelName::development(),
        message: NotificationMessage::from_embed(embed),
    })
}

// ---------------------------------------------------------------------------
// workflow_run
// ---------------------------------------------------------------------------

/// Classifies a `workflow_run` delivery.
///
/// Only `completed` runs are considered, and of those only the `success`,
/// `failure`, `cancelled`, and `skipped` conclusions notify.
pub fn classify_workflow_run(event: &WorkflowRunEvent) -> Option<Notification> {
    let run = &event.workflow_run;

    if event.action != WorkflowRunAction::Completed {
        info!(
            action = ?event.action,
            run_id = %run.id,
            "Ignoring workflow run that has not completed"
        );
        return None;
    }

    let (conclusion, color, emoji) = match run.conclusion {
        Some(c @ WorkflowConclusion::Success) => (c, EmbedColor::GREEN, "✅"),
        Some(c @ WorkflowConclusion::Failure) => (c, EmbedColor::RED, "❌"),
        Some(c @ WorkflowConclusion::Cancelled) => (c, EmbedColor::GRAY, "⏹️"),
        Some(c @ WorkflowConclusion::Skipped) => (c, EmbedColor::YELLOW, "⏭️"),
        other => {
            info!(
                conclusion = other.map_or("null", WorkflowConclusion::as_str),
                run_id = %run.id,
                "Unhandled workflow conclusion; no notification sent"
            );
            return None;
        }
    };

    let workflow = &event.workflow;
    let repo = &event.repository;

    let mut description = format!(
        "Workflow **{}** completed with status: **{conclusion}**",
        workflow.name
    );
    if let Some(pr) = run.pull_requests.first() {
        let pr_url = format!("{}/pull/{}", repo.html_url, pr.number);
        description.push_str(&format!(
            "\nAssociated Pull Request: [#{}]({pr_url})",
            pr.number
        ));
    }

    let embed = Embed {
        title: format!("{emoji} Workflow Run {conclusion}: {}", workflow.name),
        description,
        url: run.html_url.clone(),
        color,
        fields: vec![
            EmbedField::inline(
                "Repository",
                markdown_link(&repo.full_name, &repo.html_url),
            ),
            EmbedField::inline("Branch", format!("`{}`", run.head_branch)),
            EmbedField::inline("Triggered By", user_link(&event.sender)),
            EmbedField::inline("Event", run.event.clone()),
            EmbedField::inline("Run ID", markdown_link(&run.id.to_string(), &run.html_url)),
        ],
        footer: Some(EmbedFooter::text(format!("Workflow: {}", workflow.path))),
        timestamp: run.updated_at,
    };

    Some(Notification {
        channel: ChannelName::testing(),
        message: NotificationMessage::from_embed(embed),
    })
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn markdown_link(text: &str, url: &str) -> String {
    format!("[{text}]({url})")
}

fn user_link(user: &User) -> String {
    markdown_link(&user.login, &user.html_url)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{
        Branch, BranchName, PullRequest, PullRequestNumber, Repository, Workflow,
        WorkflowPullRequest, WorkflowRun, WorkflowRunId,
    };

    fn ts(hour: u32) -> Timestamp {
        Timestamp::from_utc(Utc.with_ymd_and_hms(2024, 3, 14, hour, 0, 0).unwrap())
    }

    fn user(login: &str) -> User {
        User {
            login: login.to_string(),
            html_url: format!("https://github.com/{login}"),
            ..User::default()
        }
    }

    fn repository() -> Repository {
        Repository {
            id: 1,
            name: "widgets".to_string(),
            full_name: "acme/widgets".to_string(),
            html_url: "https://github.com/acme/widgets".to_string(),
        }
    }

    fn branch(name: &str) -> Branch {
        Branch {
            name: BranchName::new(name).unwrap(),
            ..Branch::default()
        }
    }

    fn pr_event(action: PullRequestAction, merged: bool) -> PullRequestEvent {
        PullRequestEvent {
            action,
            number: PullRequestNumber::new(42),
            pull_request: PullRequest {
                html_url: "https://github.com/acme/widgets/pull/42".to_string(),
                title: "Fix bug".to_string(),
                user: user("octocat"),
                merged,
                created_at: Some(ts(1)),
                updated_at: Some(ts(2)),
                merged_at: merged.then(|| ts(3)),
                head: branch("fix"),
                base: branch("main"),
                ..PullRequest::default()
            },
            repository: repository(),
            sender: user("hubot"),
        }
    }

    fn run_event(
        action: WorkflowRunAction,
        conclusion: Option<WorkflowConclusion>,
    ) -> WorkflowRunEvent {
        WorkflowRunEvent {
            action,
            workflow_run: WorkflowRun {
                id: WorkflowRunId::new(9001),
                head_branch: BranchName::new("main").unwrap(),
                event: "push".to_string(),
                conclusion,
                html_url: "https://github.com/acme/widgets/actions/runs/9001".to_string(),
                updated_at: Some(ts(5)),
                ..WorkflowRun::default()
            },
            workflow: Workflow {
                name: "CI".to_string(),
                path: ".github/workflows/ci.yml".to_string(),
                ..Workflow::default()
            },
            repository: repository(),
            sender: user("hubot"),
        }
    }

    fn only_embed(notification: &Notification) -> &Embed {
        assert_eq!(notification.message.embeds.len(), 1);
        &notification.message.embeds[0]
    }

    // -- pull_request -------------------------------------------------------

    #[test]
    fn opened_pull_request_notifies_development() {
        let n = classify_pull_request(&pr_event(PullRequestAction::Opened, false), ts(0)).unwrap();
        let embed = only_embed(&n);

        assert_eq!(n.channel, ChannelName::development());
        assert_eq!(n.message.content, None);
        assert_eq!(embed.title, "🚀 New Pull Request #42: Fix bug");
        assert_eq!(
            embed.description,
            "A new pull request was opened in [acme/widgets](https://github.com/acme/widgets)."
        );
        assert_eq!(embed.url, "https://github.com/acme/widgets/pull/42");
        assert_eq!(embed.color.as_u32(), 3447003);
        assert_eq!(embed.field("Branch").unwrap().value, "`fix` → `main`");
        assert_eq!(
            embed.field("Author").unwrap().value,
            "[octocat](https://github.com/octocat)"
        );
        assert!(embed.fields.iter().all(|f| f.inline));
        assert_eq!(embed.footer.as_ref().unwrap().text, "Triggered by hubot");
        assert_eq!(embed.timestamp, Some(ts(1)));
    }

    #[test]
    fn reopened_pull_request_uses_updated_at() {
        let n =
            classify_pull_request(&pr_event(PullRequestAction::Reopened, false), ts(0)).unwrap();
        let embed = only_embed(&n);

        assert_eq!(embed.title, "🔄 Pull Request Reopened #42: Fix bug");
        assert_eq!(embed.color, EmbedColor::YELLOW);
        assert_eq!(embed.footer.as_ref().unwrap().text, "Reopened by hubot");
        assert_eq!(embed.timestamp, Some(ts(2)));
    }

    #[test]
    fn ready_for_review_pull_request_is_green() {
        let n = classify_pull_request(&pr_event(PullRequestAction::ReadyForReview, false), ts(0))
            .unwrap();
        let embed = only_embed(&n);

        assert_eq!(embed.title, "👀 PR Ready for Review #42: Fix bug");
        assert_eq!(embed.color, EmbedColor::GREEN);
        assert_eq!(embed.footer.as_ref().unwrap().text, "Marked ready by hubot");
        assert_eq!(embed.field("Branch").unwrap().value, "`fix` → `main`");
    }

    #[test]
    fn merged_pull_request_names_merger_instead_of_branch() {
        let n = classify_pull_request(&pr_event(PullRequestAction::Closed, true), ts(0)).unwrap();
        let embed = only_embed(&n);

        assert_eq!(n.channel, ChannelName::development());
        assert!(embed.title.starts_with("✅ Pull Request Merged #42"));
        assert_eq!(embed.color.as_u32(), 8359053);
        assert!(embed.description.contains("merged into `main`"));
        assert_eq!(
            embed.field("Merged By").unwrap().value,
            "[hubot](https://github.com/hubot)"
        );
        assert!(embed.field("Branch").is_none());
        assert_eq!(embed.footer.as_ref().unwrap().text, "Merged");
        assert_eq!(embed.timestamp, Some(ts(3)));
    }

    #[test]
    fn closed_without_merge_is_silent() {
        assert!(classify_pull_request(&pr_event(PullRequestAction::Closed, false), ts(0)).is_none());
    }

    #[test]
    fn other_actions_are_silent_even_when_merged() {
        assert!(classify_pull_request(&pr_event(PullRequestAction::Other, false), ts(0)).is_none());
        assert!(classify_pull_request(&pr_event(PullRequestAction::Other, true), ts(0)).is_none());
    }

    #[test]
    fn missing_timestamp_falls_back_to_now() {
        let mut event = pr_event(PullRequestAction::Opened, false);
        event.pull_request.created_at = None;

        let n = classify_pull_request(&event, ts(7)).unwrap();
        assert_eq!(only_embed(&n).timestamp, Some(ts(7)));

        let mut event = pr_event(PullRequestAction::Closed, true);
        event.pull_request.merged_at = None;

        let n = classify_pull_request(&event, ts(8)).unwrap();
        assert_eq!(only_embed(&n).timestamp, Some(ts(8)));

        for (action, now) in [
            (PullRequestAction::Reopened, ts(9)),
            (PullRequestAction::ReadyForReview, ts(10)),
        ] {
            let mut event = pr_event(action, false);
            event.pull_request.updated_at = None;

            let n = classify_pull_request(&event, now).unwrap();
            assert_eq!(only_embed(&n).timestamp, Some(now), "{action:?}");
        }
    }

    #[test]
    fn classification_is_repeatable() {
        let event = InboundEvent::PullRequest(pr_event(PullRequestAction::Opened, false));
        assert_eq!(classify(&event, ts(0)), classify(&event, ts(0)));

        let event = InboundEvent::WorkflowRun(run_event(
            WorkflowRunAction::Completed,
            Some(WorkflowConclusion::Success),
        ));
        assert_eq!(classify(&event, ts(0)), classify(&event, ts(11)));
    }

    // -- workflow_run -------------------------------------------------------

    #[test]
    fn notify_worthy_conclusions_map_to_documented_styles() {
        let cases = [
            (WorkflowConclusion::Success, "✅", EmbedColor::GREEN),
            (WorkflowConclusion::Failure, "❌", EmbedColor::RED),
            (WorkflowConclusion::Cancelled, "⏹️", EmbedColor::GRAY),
            (WorkflowConclusion::Skipped, "⏭️", EmbedColor::YELLOW),
        ];

        for (conclusion, emoji, color) in cases {
            let n = classify_workflow_run(&run_event(WorkflowRunAction::Completed, Some(conclusion)))
                .unwrap();
            let embed = only_embed(&n);

            assert_eq!(n.channel, ChannelName::testing());
            assert_eq!(
                embed.title,
                format!("{emoji} Workflow Run {}: CI", conclusion.as_str())
            );
            assert_eq!(embed.color, color);
        }
    }

    #[test]
    fn failed_run_without_pull_requests() {
        let n = classify_workflow_run(&run_event(
            WorkflowRunAction::Completed,
            Some(WorkflowConclusion::Failure),
        ))
        .unwrap();
        let embed = only_embed(&n);

        assert_eq!(n.channel, ChannelName::testing());
        assert_eq!(embed.color.as_u32(), 15158332);
        assert_eq!(
            embed.description,
            "Workflow **CI** completed with status: **failure**"
        );
        assert!(!embed.description.contains("Associated Pull Request"));
        assert_eq!(embed.url, "https://github.com/acme/widgets/actions/runs/9001");
        assert_eq!(embed.timestamp, Some(ts(5)));
        assert_eq!(
            embed.footer.as_ref().unwrap().text,
            "Workflow: .github/workflows/ci.yml"
        );

        let names: Vec<_> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            ["Repository", "Branch", "Triggered By", "Event", "Run ID"]
        );
        assert_eq!(embed.field("Branch").unwrap().value, "`main`");
        assert_eq!(embed.field("Event").unwrap().value, "push");
        assert_eq!(
            embed.field("Run ID").unwrap().value,
            "[9001](https://github.com/acme/widgets/actions/runs/9001)"
        );
    }

    #[test]
    fn only_first_associated_pull_request_is_linked() {
        let mut event = run_event(WorkflowRunAction::Completed, Some(WorkflowConclusion::Success));
        event.workflow_run.pull_requests = vec![
            WorkflowPullRequest {
                number: PullRequestNumber::new(7),
                ..WorkflowPullRequest::default()
            },
            WorkflowPullRequest {
                number: PullRequestNumber::new(8),
                ..WorkflowPullRequest::default()
            },
        ];

        let n = classify_workflow_run(&event).unwrap();
        let description = &only_embed(&n).description;

        assert!(description.ends_with(
            "\nAssociated Pull Request: [#7](https://github.com/acme/widgets/pull/7)"
        ));
        assert!(!description.contains("#8"));
    }

    #[test]
    fn incomplete_runs_are_silent_regardless_of_conclusion() {
        for action in [
            WorkflowRunAction::Requested,
            WorkflowRunAction::InProgress,
            WorkflowRunAction::Other,
        ] {
            assert!(classify_workflow_run(&run_event(action, Some(WorkflowConclusion::Success)))
                .is_none());
        }
    }

    #[test]
    fn other_conclusions_are_silent() {
        for conclusion in [
            None,
            Some(WorkflowConclusion::Neutral),
            Some(WorkflowConclusion::TimedOut),
            Some(WorkflowConclusion::Unknown),
        ] {
            assert!(
                classify_workflow_run(&run_event(WorkflowRunAction::Completed, conclusion))
                    .is_none()
            );
        }
    }
}
