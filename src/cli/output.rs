/// Output rendering: header, event lines, JSON passthrough, usage and error lines.
///
/// Every writer takes its sink as an argument; nothing here touches the
/// process-wide stdout/stderr handles.
use std::fmt::Display;
use std::io::{self, Write};

use console::Style;
use serde::Serialize;
use serde_json::Value;

use crate::github::timestamps::format_timestamp;
use crate::github::{ActivityError, ActivityEvent, describe};
use crate::types::OutputMode;

/// ANSI decoration, switched on or off once per sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(self, style: Style, text: &str) -> String {
        style.force_styling(self.enabled).apply_to(text).to_string()
    }

    #[must_use]
    pub fn dim(self, text: &str) -> String {
        self.paint(Style::new().dim(), text)
    }

    #[must_use]
    pub fn bold(self, text: &str) -> String {
        self.paint(Style::new().bold(), text)
    }

    #[must_use]
    pub fn cyan(self, text: &str) -> String {
        self.paint(Style::new().cyan(), text)
    }

    #[must_use]
    pub fn red(self, text: &str) -> String {
        self.paint(Style::new().red(), text)
    }
}

/// Output context passed to all writers.
pub struct OutputCtx {
    pub mode: OutputMode,
    /// Decoration for stdout.
    pub palette: Palette,
    /// Decoration for stderr.
    pub error_palette: Palette,
    /// When true, timers log elapsed time.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI args, detecting colour support per stream.
    #[must_use]
    pub fn new(mode: OutputMode, no_color: bool, debug: bool) -> Self {
        Self {
            mode,
            palette: Palette::new(!no_color && console::colors_enabled()),
            error_palette: Palette::new(!no_color && console::colors_enabled_stderr()),
            debug,
        }
    }

    /// Undecorated context, for captured output.
    #[cfg(test)]
    #[must_use]
    pub fn plain(mode: OutputMode) -> Self {
        Self {
            mode,
            palette: Palette::new(false),
            error_palette: Palette::new(false),
            debug: false,
        }
    }

    /// Start a named timer. Logs elapsed time on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }
}

// --- Usage ---

/// Write the short usage banner shown when no account is given.
///
/// # Errors
///
/// Returns any error from the sink.
pub fn write_usage<W: Write>(out: &mut W, palette: Palette) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", palette.bold("GitHub User Activity"))?;
    writeln!(
        out,
        "Usage: github-activity <username> [--limit 30] [--json]"
    )?;
    writeln!(out)
}

// --- Header ---

/// Write the `GitHub activity for @account` line that precedes text output.
///
/// # Errors
///
/// Returns any error from the sink.
pub fn write_header<W: Write>(
    out: &mut W,
    ctx: &OutputCtx,
    account: &str,
    rate_limit_remaining: Option<&str>,
) -> io::Result<()> {
    let title = ctx.palette.cyan(&format!("GitHub activity for @{account}"));
    match rate_limit_remaining {
        Some(remaining) => {
            let note = ctx
                .palette
                .dim(&format!("(rate limit remaining: {remaining})"));
            writeln!(out, "{title} {note}")
        }
        None => writeln!(out, "{title}"),
    }
}

// --- Events ---

/// Write the events value in the context's mode.
///
/// # Errors
///
/// Returns any error from the sink.
pub fn write_events<W: Write>(out: &mut W, ctx: &OutputCtx, events: &Value) -> io::Result<()> {
    match ctx.mode {
        OutputMode::Json => print_json(out, events),
        OutputMode::Text => write_event_lines(out, ctx, events),
    }
}

fn write_event_lines<W: Write>(out: &mut W, ctx: &OutputCtx, events: &Value) -> io::Result<()> {
    let list = match events.as_array() {
        Some(list) if !list.is_empty() => list,
        _ => return writeln!(out, "{}", ctx.palette.dim("No recent events found.")),
    };

    for raw in list {
        let event = ActivityEvent::from_json(raw);
        let when = format_timestamp(event.created_at);
        writeln!(
            out,
            "• {} {}",
            describe(&event),
            ctx.palette.dim(&format!("({when})"))
        )?;
    }
    Ok(())
}

// --- Error output ---

/// Write a single `Error: ...` line.
///
/// # Errors
///
/// Returns any error from the sink.
pub fn write_error<W: Write>(out: &mut W, palette: Palette, err: &ActivityError) -> io::Result<()> {
    writeln!(out, "{}{err}", palette.red("Error: "))
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            tracing::debug!(label = self.label, elapsed_ms = ms, "timing");
        }
    }
}

// --- Generic JSON helper ---

fn print_json<W, T>(out: &mut W, value: &T) -> io::Result<()>
where
    W: Write,
    T: Serialize + Display + ?Sized,
{
    match serde_json::to_string_pretty(value) {
        Ok(s) => writeln!(out, "{s}"),
        Err(e) => {
            tracing::debug!(error = %e, "pretty JSON failed, writing compact form");
            writeln!(out, "{value}")
        }
    }
}
