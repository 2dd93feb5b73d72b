//! Display rows to ratatui `Line`s.

use crate::tree::{DisplayRow, RowMarker, Stats};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Configuration for the rendering pipeline.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Whether to emit color styling.
    pub use_color: bool,
}

const DIR_STYLE: Style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);
const MARKER_STYLE: Style = Style::new().fg(Color::DarkGray);
const SELECTED_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
const INDENT: &str = "  ";

/// Sanitize control characters to avoid terminal control-sequence injection.
pub fn sanitize_terminal_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let code = c as u32;
                if code <= 0xFF {
                    out.push_str(&format!("\\x{:02X}", code));
                } else {
                    out.push_str(&format!("\\u{{{:X}}}", code));
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Convert display rows into styled lines. `selected` is an index into `rows`.
pub fn rows_to_lines(
    rows: &[DisplayRow],
    config: &RenderConfig,
    selected: Option<usize>,
) -> Vec<Line<'static>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| row_to_line(row, config, selected == Some(i)))
        .collect()
}

fn row_to_line(row: &DisplayRow, config: &RenderConfig, selected: bool) -> Line<'static> {
    let mut spans = Vec::with_capacity(3);
    let safe_name = sanitize_terminal_text(&row.name);

    spans.push(Span::raw(INDENT.repeat(row.depth)));
    match row.marker {
        RowMarker::Folder { expanded } => {
            let marker = if expanded { "\u{25be} " } else { "\u{25b8} " }; // ▾ ▸
            let name = format!("{safe_name}/");
            if config.use_color {
                spans.push(Span::styled(marker, MARKER_STYLE));
                spans.push(Span::styled(name, DIR_STYLE));
            } else {
                spans.push(Span::raw(marker));
                spans.push(Span::raw(name));
            }
        }
        RowMarker::File => {
            spans.push(Span::raw(INDENT));
            spans.push(Span::raw(safe_name));
        }
    }

    let line = Line::from(spans);
    if selected {
        line.style(SELECTED_STYLE)
    } else {
        line
    }
}

/// The `root/` heading line.
pub fn root_line(root_name: &str, config: &RenderConfig) -> Line<'static> {
    let text = format!("{}/", sanitize_terminal_text(root_name));
    if config.use_color {
        Line::from(Span::styled(text, DIR_STYLE))
    } else {
        Line::from(text)
    }
}

/// One-line summary of the stats.
pub fn stats_summary(stats: &Stats) -> String {
    format!(
        "Files: {}  Folders: {}  File Types: {}",
        stats.file_count(),
        stats.folder_count(),
        stats.distinct_extension_count()
    )
}

/// Build a styled status bar `Line`.
pub fn status_bar_line(source: &str, stats: &Stats, query: &str, message: Option<&str>) -> Line<'static> {
    let mut text = format!(
        " {}  |  {}",
        sanitize_terminal_text(source),
        stats_summary(stats)
    );
    if !query.is_empty() {
        text.push_str(&format!("  |  Search: {}", sanitize_terminal_text(query)));
    }
    if let Some(msg) = message {
        text.push_str(&format!("  |  {}", sanitize_terminal_text(msg)));
    }

    let style = Style::new()
        .fg(Color::White)
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);
    Line::from(Span::styled(text, style))
}

/// The line shown while text is being entered.
pub fn prompt_line(label: &str, input: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label}: "), Style::new().fg(Color::Yellow)),
        Span::raw(format!("{}_", sanitize_terminal_text(input))),
    ])
}

/// Build a help bar `Line` showing available keyboard shortcuts.
pub fn help_bar_line() -> Line<'static> {
    let text = " q: Quit  |  \u{2191}\u{2193}/jk: Move  |  Enter: Toggle  |  e/c: Expand/Collapse all  |  /: Search  |  i/d: Add/Remove pattern  |  r: Reload";
    let style = Style::new().fg(Color::DarkGray);
    Line::from(Span::styled(text.to_string(), style))
}

/// Extract plain text from a `Line` (useful for testing).
pub fn line_to_plain_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(name: &str, depth: usize, expanded: bool) -> DisplayRow {
        DisplayRow {
            name: name.to_string(),
            path: name.to_string(),
            depth,
            marker: RowMarker::Folder { expanded },
            visible: true,
            is_last: false,
        }
    }

    #[test]
    fn folder_marker_follows_state() {
        let cfg = RenderConfig { use_color: false };
        let lines = rows_to_lines(&[folder("src", 1, true), folder("out", 0, false)], &cfg, None);
        assert_eq!(line_to_plain_text(&lines[0]), "  \u{25be} src/");
        assert_eq!(line_to_plain_text(&lines[1]), "\u{25b8} out/");
    }

    #[test]
    fn selected_row_is_reversed() {
        let cfg = RenderConfig { use_color: true };
        let lines = rows_to_lines(&[folder("src", 0, true)], &cfg, Some(0));
        assert!(lines[0].style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn control_chars_are_escaped() {
        assert_eq!(sanitize_terminal_text("a\u{1b}[2Jb\n"), "a\\x1B[2Jb\\n");
    }
}
