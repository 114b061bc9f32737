/// Errors from fetching and rendering GitHub activity.
use thiserror::Error;

use super::timestamps::format_epoch;

/// Maximum number of characters of a response body echoed in an error line.
const BODY_EXCERPT_MAX_LEN: usize = 200;

/// Every failure a run can end with. All variants are terminal.
#[derive(Debug, Error)]
pub enum ActivityError {
    /// The API answered 404 for the account.
    #[error("User '{account}' not found. Check the username.")]
    NotFound {
        /// The account that was queried.
        account: String,
    },

    /// The API answered 403 with zero requests remaining in the window.
    #[error("Rate limit reached. Try again after {}.", reset_display(*reset_epoch))]
    RateLimited {
        /// Epoch seconds at which the window resets, when the server sent it.
        reset_epoch: Option<i64>,
    },

    /// Any other non-2xx status.
    #[error("HTTP {status}: request to the GitHub API failed. {}", body_excerpt(body))]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A 2xx response whose body is not valid JSON.
    #[error("Unexpected failure: invalid JSON in response: {message}")]
    InvalidResponse {
        /// Parser error text.
        message: String,
    },

    /// DNS, connection, TLS or body read failure.
    #[error("Unexpected failure: {cause}")]
    Transport {
        /// Full cause chain of the underlying error.
        cause: String,
    },

    /// The configured API base URL cannot carry the events path.
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The URL as given.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Writing to stdout failed.
    #[error("Unexpected failure: could not write output: {0}")]
    Output(#[from] std::io::Error),
}

impl ActivityError {
    /// Build a `Transport` error from any error, keeping its source chain.
    #[must_use]
    pub fn transport(err: &(dyn std::error::Error + 'static)) -> Self {
        Self::Transport {
            cause: error_chain(err),
        }
    }

    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. }
            | Self::RateLimited { .. }
            | Self::Http { .. }
            | Self::InvalidResponse { .. }
            | Self::Transport { .. }
            | Self::InvalidBaseUrl { .. }
            | Self::Output(_) => 1,
        }
    }

    /// Short machine-readable name, used in debug logs.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::RateLimited { .. } => "rate_limited",
            Self::Http { .. } => "http_error",
            Self::InvalidResponse { .. } => "invalid_response",
            Self::Transport { .. } => "transport",
            Self::InvalidBaseUrl { .. } => "invalid_base_url",
            Self::Output(_) => "output",
        }
    }
}

fn reset_display(reset_epoch: Option<i64>) -> String {
    reset_epoch
        .and_then(format_epoch)
        .unwrap_or_else(|| "(unknown)".to_owned())
}

/// Squash a response body onto one line and cap its length.
fn body_excerpt(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= BODY_EXCERPT_MAX_LEN {
        return collapsed;
    }
    let mut out: String = collapsed.chars().take(BODY_EXCERPT_MAX_LEN).collect();
    out.push('…');
    out
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // reqwest repeats the inner message in its own Display for some kinds.
        if !parts.iter().any(|p| p.contains(&text)) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}
