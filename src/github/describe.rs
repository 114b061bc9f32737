/// One-line human descriptions of activity events.
use serde_json::Value;

use super::events::{
    ActivityEvent, EventPayload, IssuePayload, PullRequestPayload, PushPayload, RefPayload,
};

const UNKNOWN_REPO: &str = "(unknown repository)";
const UNKNOWN_KIND: &str = "(unknown event)";
const UNKNOWN_NUMBER: &str = "?";

/// Describe `event` in one line. Never fails; missing fields become placeholders.
#[must_use]
pub fn describe(event: &ActivityEvent<'_>) -> String {
    let repo = repo_display(event.repo);
    let line = match &event.payload {
        EventPayload::Push(p) => describe_push(p, &repo),
        EventPayload::Issues(p) => describe_issue(p, &repo),
        EventPayload::IssueComment(p) => format!(
            "{} a comment on issue #{} in {repo}",
            capitalize(p.action.as_deref()),
            issue_number(p),
        ),
        EventPayload::PullRequest(p) => describe_pull_request(p, &repo),
        EventPayload::PullRequestReview(p) => format!(
            "{} a review on PR #{} in {repo}",
            capitalize(p.action.as_deref()),
            pull_request_number(p),
        ),
        EventPayload::PullRequestReviewComment(p) => format!(
            "{} a review comment on PR #{} in {repo}",
            capitalize(p.action.as_deref()),
            pull_request_number(p),
        ),
        EventPayload::Watch => format!("Starred {repo}"),
        EventPayload::Fork(p) => {
            let target = p
                .forkee
                .as_ref()
                .and_then(|f| f.full_name.as_deref())
                .filter(|name| !name.is_empty())
                .unwrap_or("(fork)");
            format!("Forked {repo} → {target}")
        }
        EventPayload::Create(p) => describe_create(p, &repo),
        EventPayload::Delete(p) => format!(
            "Deleted {} {} in {repo}",
            non_empty(p.ref_type.as_deref()).unwrap_or("ref"),
            p.git_ref.as_deref().unwrap_or_default(),
        ),
        EventPayload::Release(p) => format!(
            "{} a release {} in {repo}",
            capitalize(p.action.as_deref()),
            p.release
                .as_ref()
                .and_then(|r| r.tag_name.as_deref())
                .unwrap_or_default(),
        ),
        EventPayload::Public => format!("Open-sourced {repo}"),
        EventPayload::Member(p) => format!(
            "{} {} in {repo}",
            capitalize(p.action.as_deref()),
            p.member
                .as_ref()
                .and_then(|m| non_empty(m.login.as_deref()))
                .unwrap_or("a member"),
        ),
        EventPayload::Gollum => format!("Updated the wiki in {repo}"),
        EventPayload::Other => format!("{} in {repo}", event.kind.unwrap_or(UNKNOWN_KIND)),
    };
    line.trim().to_owned()
}

fn describe_push(p: &PushPayload, repo: &str) -> String {
    let commits = p.commits.as_ref().map_or(0, Vec::len);
    let branch = branch_from_ref(p.git_ref.as_deref());
    if branch.is_empty() {
        format!("Pushed {commits} commit(s) to {repo}")
    } else {
        format!("Pushed {commits} commit(s) to {repo} (branch {branch})")
    }
}

fn describe_issue(p: &IssuePayload, repo: &str) -> String {
    let action = capitalize(p.action.as_deref());
    let number = p
        .issue
        .as_ref()
        .map(|_| format!(" #{}", issue_number(p)))
        .unwrap_or_default();
    let title = p
        .issue
        .as_ref()
        .and_then(|i| non_empty(i.title.as_deref()))
        .map(|t| format!(": {t}"))
        .unwrap_or_default();
    format!("{action} an issue{number} in {repo}{title}")
}

fn describe_pull_request(p: &PullRequestPayload, repo: &str) -> String {
    let pr = p.pull_request.as_ref();
    let number = pull_request_number(p);
    let title = pr.and_then(|pr| non_empty(pr.title.as_deref()));
    if pr.and_then(|pr| pr.merged) == Some(true) {
        return format!(
            "Merged pull request #{number} in {repo}: {}",
            title.unwrap_or_default()
        );
    }
    let title = title.map(|t| format!(": {t}")).unwrap_or_default();
    format!(
        "{} a pull request #{number} in {repo}{title}",
        capitalize(p.action.as_deref())
    )
}

fn describe_create(p: &RefPayload, repo: &str) -> String {
    let git_ref = p.git_ref.as_deref().unwrap_or_default();
    match p.ref_type.as_deref() {
        Some("repository") => format!("Created repository {repo}"),
        Some("tag") => format!("Created tag {git_ref} in {repo}"),
        Some("branch") => format!("Created branch {git_ref} in {repo}"),
        other => format!("Created {} in {repo}", non_empty(other).unwrap_or("something")),
    }
}

fn issue_number(p: &IssuePayload) -> String {
    p.issue
        .as_ref()
        .and_then(|i| i.number)
        .map_or_else(|| UNKNOWN_NUMBER.to_owned(), |n| n.to_string())
}

fn pull_request_number(p: &PullRequestPayload) -> String {
    p.pull_request
        .as_ref()
        .and_then(|pr| pr.number)
        .map_or_else(|| UNKNOWN_NUMBER.to_owned(), |n| n.to_string())
}

/// Display name of the `repo` field: its `name` if it has one, else the raw value.
#[must_use]
pub fn repo_display(repo: Option<&Value>) -> String {
    match repo {
        None | Some(Value::Null) => UNKNOWN_REPO.to_owned(),
        Some(Value::String(name)) if !name.is_empty() => name.clone(),
        Some(Value::String(_)) => UNKNOWN_REPO.to_owned(),
        Some(value) => match value.get("name").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => value.to_string(),
        },
    }
}

/// Last `/`-separated segment of a git ref (`refs/heads/main` → `main`).
#[must_use]
pub fn branch_from_ref(git_ref: Option<&str>) -> &str {
    let Some(git_ref) = git_ref else {
        return "";
    };
    match git_ref.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => git_ref,
    }
}

/// Upper-case the first character; `None` becomes the empty string.
#[must_use]
pub fn capitalize(word: Option<&str>) -> String {
    let mut chars = word.unwrap_or_default().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
