/// Typed, defensive view over one raw event record from the events API.
///
/// The API returns loosely-shaped JSON. Each known event kind gets a payload
/// struct whose fields are all optional and deserialized leniently: a field
/// that is missing *or* has an unexpected type becomes `None` instead of
/// failing the whole event.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One event, borrowing the untouched parts from the raw JSON.
#[derive(Debug, Clone)]
pub struct ActivityEvent<'a> {
    /// The `type` field, e.g. `PushEvent`.
    pub kind: Option<&'a str>,
    /// The `repo` field; `None` when absent or null.
    pub repo: Option<&'a Value>,
    /// Kind-specific payload.
    pub payload: EventPayload,
    /// The `created_at` field.
    pub created_at: Option<&'a str>,
}

impl<'a> ActivityEvent<'a> {
    /// Read an event out of a raw JSON value. Never fails.
    #[must_use]
    pub fn from_json(value: &'a Value) -> Self {
        let kind = value.get("type").and_then(Value::as_str);
        let repo = value.get("repo").filter(|r| !r.is_null());
        let created_at = value.get("created_at").and_then(Value::as_str);
        let payload = EventPayload::parse(kind.unwrap_or_default(), value.get("payload"));
        Self {
            kind,
            repo,
            payload,
            created_at,
        }
    }
}

/// Closed set of payload shapes, one per event kind we describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    Push(PushPayload),
    Issues(IssuePayload),
    IssueComment(IssuePayload),
    PullRequest(PullRequestPayload),
    PullRequestReview(PullRequestPayload),
    PullRequestReviewComment(PullRequestPayload),
    Watch,
    Fork(ForkPayload),
    Create(RefPayload),
    Delete(RefPayload),
    Release(ReleasePayload),
    Public,
    Member(MemberPayload),
    Gollum,
    /// Any kind not listed above; the payload is not inspected.
    Other,
}

impl EventPayload {
    /// Pick the payload shape for `kind` and read it from `raw`.
    #[must_use]
    pub fn parse(kind: &str, raw: Option<&Value>) -> Self {
        match kind {
            "PushEvent" => Self::Push(lenient_payload(raw)),
            "IssuesEvent" => Self::Issues(lenient_payload(raw)),
            "IssueCommentEvent" => Self::IssueComment(lenient_payload(raw)),
            "PullRequestEvent" => Self::PullRequest(lenient_payload(raw)),
            "PullRequestReviewEvent" => Self::PullRequestReview(lenient_payload(raw)),
            "PullRequestReviewCommentEvent" => Self::PullRequestReviewComment(lenient_payload(raw)),
            "WatchEvent" => Self::Watch,
            "ForkEvent" => Self::Fork(lenient_payload(raw)),
            "CreateEvent" => Self::Create(lenient_payload(raw)),
            "DeleteEvent" => Self::Delete(lenient_payload(raw)),
            "ReleaseEvent" => Self::Release(lenient_payload(raw)),
            "PublicEvent" => Self::Public,
            "MemberEvent" => Self::Member(lenient_payload(raw)),
            "GollumEvent" => Self::Gollum,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PushPayload {
    #[serde(rename = "ref", default, deserialize_with = "lenient")]
    pub git_ref: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub commits: Option<Vec<Value>>,
}

/// Shared by `IssuesEvent` and `IssueCommentEvent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IssuePayload {
    #[serde(default, deserialize_with = "lenient")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub issue: Option<IssueRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IssueRef {
    #[serde(default, deserialize_with = "lenient")]
    pub number: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
}

/// Shared by the pull request, review, and review comment events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PullRequestPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub pull_request: Option<PullRequestRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PullRequestRef {
    #[serde(default, deserialize_with = "lenient")]
    pub number: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub merged: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ForkPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub forkee: Option<Forkee>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Forkee {
    #[serde(default, deserialize_with = "lenient")]
    pub full_name: Option<String>,
}

/// Shared by `CreateEvent` and `DeleteEvent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RefPayload {
    #[serde(rename = "ref", default, deserialize_with = "lenient")]
    pub git_ref: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub ref_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReleasePayload {
    #[serde(default, deserialize_with = "lenient")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub release: Option<Release>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Release {
    #[serde(default, deserialize_with = "lenient")]
    pub tag_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MemberPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub member: Option<Member>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Member {
    #[serde(default, deserialize_with = "lenient")]
    pub login: Option<String>,
}

/// Read a payload struct, falling back to all-`None` if `raw` is not an object.
fn lenient_payload<T: DeserializeOwned + Default>(raw: Option<&Value>) -> T {
    raw.and_then(|v| T::deserialize(v).ok()).unwrap_or_default()
}

/// Field deserializer that maps a type mismatch to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
