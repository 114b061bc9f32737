//! Request configuration shared between argument parsing and the command runner.

/// Largest page size the events endpoint accepts.
pub const MAX_PAGE_LIMIT: u8 = 100;

/// Page size used when `--limit` is not given.
pub const DEFAULT_PAGE_LIMIT: u8 = 30;

/// How events are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One decorated line per event, preceded by a header.
    #[default]
    Text,
    /// The raw API array, pretty-printed.
    Json,
}

/// What to fetch and how to print it. Built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    /// Non-empty account name.
    pub account: String,
    /// Page size in `1..=MAX_PAGE_LIMIT`.
    pub page_limit: u8,
    pub output_mode: OutputMode,
}
