//! Terminal rendering of a provider panel.
//!
//! Added text gets a green background and removed text a red one. `Plain`
//! style falls back to `{+added+}` / `[-removed-]` markers for pipes and logs.

use crate::diff::{DiffSegment, SegmentKind};
use crate::session::{RequestState, ResponseView};

const SGR_ADDED: &str = "\x1b[30;42m";
const SGR_REMOVED: &str = "\x1b[30;41m";
const SGR_BOLD: &str = "\x1b[1m";
const SGR_RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Ansi,
    Plain,
}

/// Render segments inline, highlighting added and removed runs.
#[must_use]
pub fn render_segments<'a>(segments: impl IntoIterator<Item = &'a DiffSegment>, style: Style) -> String {
    let mut out = String::new();
    for segment in segments {
        let text = segment.text.as_str();
        let (open, close) = match (segment.kind, style) {
            (SegmentKind::Unchanged, _) => ("", ""),
            (SegmentKind::Added, Style::Ansi) => (SGR_ADDED, SGR_RESET),
            (SegmentKind::Removed, Style::Ansi) => (SGR_REMOVED, SGR_RESET),
            (SegmentKind::Added, Style::Plain) => ("{+", "+}"),
            (SegmentKind::Removed, Style::Plain) => ("[-", "-]"),
        };
        out.push_str(open);
        out.push_str(text);
        out.push_str(close);
    }
    out
}

/// One-line status for a panel header.
#[must_use]
pub fn status_line(view: &ResponseView) -> String {
    match (&view.state, &view.diff) {
        (RequestState::Idle, _) => "not asked".to_string(),
        (RequestState::Pending, _) => "pending…".to_string(),
        (RequestState::Failed(info), _) => format!("failed {info}"),
        (RequestState::Succeeded(_), Some(diff)) => {
            let stats = diff.stats();
            format!("+{} -{} ={} words", stats.added, stats.removed, stats.unchanged)
        }
        (RequestState::Succeeded(_), None) => "succeeded".to_string(),
    }
}

/// Header plus diff body for one provider.
#[must_use]
pub fn render_panel(view: &ResponseView, style: Style) -> String {
    let name = view.provider.display_name();
    let status = status_line(view);
    let mut out = match style {
        Style::Ansi => format!("{SGR_BOLD}{name} Response:{SGR_RESET} {status}\n"),
        Style::Plain => format!("{name} Response: {status}\n"),
    };
    if let Some(diff) = &view.diff {
        out.push_str(&render_segments(diff, style));
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
