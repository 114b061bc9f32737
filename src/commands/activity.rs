/// `github-activity <username>`: fetch one page of events and print it.
use std::io::Write;

use crate::cli::OutputCtx;
use crate::cli::output::{write_events, write_header};
use crate::github::{ActivityError, GitHubClient};
use crate::types::{OutputMode, RequestConfig};

/// Run one request and render the result to `out`.
///
/// In text mode the header line is written before the events; in JSON mode
/// nothing but the events array reaches `out`.
///
/// # Errors
///
/// Returns the classified `ActivityError` from the client, or `Output` if
/// writing fails.
pub async fn run<W: Write>(
    client: &GitHubClient,
    request: &RequestConfig,
    ctx: &OutputCtx,
    out: &mut W,
) -> Result<(), ActivityError> {
    let t_fetch = ctx.timer("fetch_events");
    let response = client
        .fetch_events(&request.account, request.page_limit)
        .await?;
    drop(t_fetch);

    tracing::debug!(
        events = response.events.as_array().map_or(0, Vec::len),
        "rendering events"
    );

    let _t_render = ctx.timer("render");
    if request.output_mode == OutputMode::Text {
        write_header(
            out,
            ctx,
            &request.account,
            response.rate_limit_remaining.as_deref(),
        )?;
    }
    write_events(out, ctx, &response.events)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn request(mode: OutputMode) -> RequestConfig {
        RequestConfig {
            account: "octocat".to_owned(),
            page_limit: 2,
            output_mode: mode,
        }
    }

    fn sample_events() -> Value {
        json!([
            {
                "id": "2",
                "type": "PushEvent",
                "actor": { "login": "octocat" },
                "repo": { "id": 1, "name": "acme/widgets" },
                "payload": { "commits": [{}, {}], "ref": "refs/heads/main" },
                "public": true,
                "created_at": "not-a-date"
            },
            {
                "id": "1",
                "type": "FooEvent",
                "repo": "x",
                "payload": {},
                "created_at": "also-not-a-date"
            }
        ])
    }

    async fn serve(server: &MockServer, status: u16, body: String) {
        server
            .mock_async(move |when, then| {
                when.method(GET)
                    .path("/users/octocat/events")
                    .query_param("per_page", "2");
                then.status(status)
                    .header("x-ratelimit-remaining", "57")
                    .body(&body);
            })
            .await;
    }

    async fn run_against(server: &MockServer, mode: OutputMode) -> (Result<(), ActivityError>, String) {
        let client = GitHubClient::new(&server.base_url()).unwrap();
        let ctx = OutputCtx::plain(mode);
        let mut out = Vec::new();
        let result = run(&client, &request(mode), &ctx, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_text_mode_prints_header_then_events() {
        let server = MockServer::start_async().await;
        serve(&server, 200, sample_events().to_string()).await;

        let (result, out) = run_against(&server, OutputMode::Text).await;

        result.unwrap();
        assert_eq!(
            out,
            "GitHub activity for @octocat (rate limit remaining: 57)\n\
             • Pushed 2 commit(s) to acme/widgets (branch main) (not-a-date)\n\
             • FooEvent in x (also-not-a-date)\n"
        );
    }

    #[tokio::test]
    async fn test_text_mode_no_events() {
        let server = MockServer::start_async().await;
        serve(&server, 200, "[]".to_owned()).await;

        let (result, out) = run_against(&server, OutputMode::Text).await;

        result.unwrap();
        assert_eq!(
            out,
            "GitHub activity for @octocat (rate limit remaining: 57)\nNo recent events found.\n"
        );
    }

    #[tokio::test]
    async fn test_json_mode_round_trips_without_header() {
        let server = MockServer::start_async().await;
        serve(&server, 200, sample_events().to_string()).await;

        let (result, out) = run_against(&server, OutputMode::Json).await;

        result.unwrap();
        let reparsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(reparsed, sample_events());
        assert!(out.starts_with('['));
    }

    #[tokio::test]
    async fn test_errors_write_nothing_to_stdout() {
        let server = MockServer::start_async().await;
        serve(&server, 500, "boom".to_owned()).await;

        let (result, out) = run_against(&server, OutputMode::Text).await;

        assert!(matches!(result, Err(ActivityError::Http { status: 500, .. })));
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let server = MockServer::start_async().await;
        serve(&server, 200, "<html>".to_owned()).await;

        let (result, _) = run_against(&server, OutputMode::Json).await;

        assert!(matches!(result, Err(ActivityError::InvalidResponse { .. })));
    }
}
