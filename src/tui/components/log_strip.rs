// Log strip component
//
// The most recent tracing lines, color coded by level. Never focusable.

use crate::logging::{LogBuffer, LogEntry};
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// `HH:MM:SS LEVEL module: message`, with the crate prefix dropped from the target
pub fn format_entry(entry: &LogEntry) -> String {
    let module = entry
        .target
        .strip_prefix("repo_scout::")
        .unwrap_or(&entry.target);
    format!(
        "{} {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        module,
        entry.message
    )
}

pub fn render(f: &mut Frame, area: Rect, buffer: &LogBuffer, count: usize, theme: &Theme) {
    let entries = buffer.recent(count);
    let lines: Vec<Line> = entries
        .iter()
        .map(|entry| {
            Line::from(Span::styled(
                format_entry(entry),
                Style::default().fg(theme.log_level_color(entry.level)),
            ))
        })
        .collect();

    let logs = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" Logs ({}) ", buffer.len())),
    );
    f.render_widget(logs, area);
}
