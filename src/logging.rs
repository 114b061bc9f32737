/// Tracing subscriber setup. Logs go to stderr so stdout stays clean for output.
use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// Filter used for `--debug`.
const DEBUG_FILTER: &str = "github_activity=debug";

/// Filter used when neither `--debug` nor `RUST_LOG` is set. Errors are
/// reported through the single `Error:` line, not through logs.
const DEFAULT_FILTER: &str = "off";

/// Install the global subscriber.
///
/// `--debug` wins over `RUST_LOG`; otherwise `RUST_LOG` is honoured when it parses.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(debug: bool) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(debug))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

fn build_filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new(DEBUG_FILTER);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
