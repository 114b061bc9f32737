/// CLI argument definitions via clap derive.
use clap::Parser;
use clap::builder::FalseyValueParser;

use crate::github::DEFAULT_API_URL;
use crate::types::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, OutputMode, RequestConfig};

/// github-activity — show a GitHub user's recent public activity.
#[derive(Debug, Parser)]
#[command(
    name = "github-activity",
    about = "Show a GitHub user's recent public activity",
    version,
    args_override_self = true
)]
pub struct Cli {
    /// GitHub username whose public events are listed.
    #[arg(value_name = "USERNAME")]
    pub account: Option<String>,

    /// Number of events to request. Values above 100 are capped at 100.
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_PAGE_LIMIT,
        value_parser = parse_limit,
        allow_negative_numbers = true
    )]
    pub limit: u8,

    /// Print the API response as pretty-printed JSON instead of text lines.
    #[arg(long)]
    pub json: bool,

    /// Disable colored output. Any non-empty `NO_COLOR` other than `0`/`false` counts.
    #[arg(long, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    /// Log request details and timings to stderr.
    #[arg(long)]
    pub debug: bool,

    /// Base URL of the GitHub REST API.
    #[arg(
        long,
        value_name = "URL",
        env = "GITHUB_ACTIVITY_API_URL",
        default_value = DEFAULT_API_URL,
        hide = true
    )]
    pub api_url: String,
}

impl Cli {
    /// Output mode selected by `--json`.
    #[must_use]
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }

    /// The validated request, or `None` when no account was given.
    #[must_use]
    pub fn request(&self) -> Option<RequestConfig> {
        let account = self.account.as_deref().filter(|a| !a.is_empty())?;
        Some(RequestConfig {
            account: account.to_owned(),
            page_limit: self.limit,
            output_mode: self.output_mode(),
        })
    }
}

/// Parse `--limit`: any finite number above zero, capped at [`MAX_PAGE_LIMIT`].
///
/// Fractions round up so the page size is a whole number of events.
/// Non-positive values are rejected rather than clamped.
///
/// # Errors
///
/// Returns a message for non-numeric, non-finite, or non-positive input.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_limit(raw: &str) -> Result<u8, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err("limit must be a number greater than 0".to_owned());
    }
    Ok(value.min(f64::from(MAX_PAGE_LIMIT)).ceil() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    use clap::builder::TypedValueParser;
    use clap::error::ErrorKind;
    use clap::{CommandFactory, FromArgMatches};

    /// Parse with the env fallbacks detached so the caller's shell cannot leak in.
    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let matches = Cli::command()
            .mut_arg("no_color", |a| a.env(None::<&str>))
            .mut_arg("api_url", |a| a.env(None::<&str>))
            .try_get_matches_from(std::iter::once("github-activity").chain(args.iter().copied()))?;
        Cli::from_arg_matches(&matches)
    }

    #[test]
    fn test_command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let request = parse(&["octocat"]).unwrap().request().unwrap();
        assert_eq!(
            request,
            RequestConfig {
                account: "octocat".to_owned(),
                page_limit: DEFAULT_PAGE_LIMIT,
                output_mode: OutputMode::Text,
            }
        );
    }

    #[test]
    fn test_limit_and_json_in_any_order() {
        let request = parse(&["--json", "--limit", "5", "octocat"])
            .unwrap()
            .request()
            .unwrap();
        assert_eq!(request.page_limit, 5);
        assert_eq!(request.output_mode, OutputMode::Json);
    }

    #[test]
    fn test_limit_is_capped_at_100() {
        for (raw, expected) in [("100", 100), ("101", 100), ("5000", 100), ("1e3", 100)] {
            let cli = parse(&["octocat", "--limit", raw]).unwrap();
            assert_eq!(cli.limit, expected, "--limit {raw}");
        }
    }

    #[test]
    fn test_fractional_limit_rounds_up() {
        assert_eq!(parse_limit("0.5"), Ok(1));
        assert_eq!(parse_limit("2.5"), Ok(3));
        assert_eq!(parse_limit("99.9"), Ok(100));
    }

    #[test]
    fn test_non_positive_or_non_numeric_limit_is_rejected() {
        for raw in ["0", "-5", "abc", "", "inf", "NaN"] {
            let err = parse(&["octocat", "--limit", raw]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "--limit {raw:?}");
        }
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = parse(&["octocat", "--verbose"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_second_positional_is_rejected() {
        let err = parse(&["octocat", "hubot"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_missing_or_empty_account_has_no_request() {
        assert!(parse(&[]).unwrap().request().is_none());
        assert!(parse(&["--json"]).unwrap().request().is_none());
        assert!(parse(&[""]).unwrap().request().is_none());
    }

    #[test]
    fn test_repeated_flags_last_one_wins() {
        let request = parse(&["octocat", "--limit", "5", "--limit", "10", "--json", "--json"])
            .unwrap()
            .request()
            .unwrap();
        assert_eq!(request.page_limit, 10);
        assert_eq!(request.output_mode, OutputMode::Json);
    }

    #[test]
    fn test_no_color_flag() {
        assert!(!parse(&["octocat"]).unwrap().no_color);
        assert!(parse(&["octocat", "--no-color"]).unwrap().no_color);
    }

    #[test]
    fn test_no_color_env_is_read_as_falsey() {
        let cmd = Cli::command();
        let arg = cmd
            .get_arguments()
            .find(|a| a.get_id() == "no_color")
            .unwrap();
        assert_eq!(arg.get_env(), Some(OsStr::new("NO_COLOR")));

        let parser = FalseyValueParser::new();
        for (raw, expected) in [
            ("1", true),
            ("yes", true),
            ("true", true),
            ("", false),
            ("0", false),
            ("false", false),
        ] {
            let value = parser.parse_ref(&cmd, Some(arg), OsStr::new(raw)).unwrap();
            assert_eq!(value, expected, "NO_COLOR={raw:?}");
        }
    }

    #[test]
    fn test_help_is_not_an_error_channel() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(!err.use_stderr());
    }
}
