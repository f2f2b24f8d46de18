// Status bar component
//
// Bottom line: the last error of the active coordinator if there is one,
// otherwise the key hints for the focused view. The help toggle expands the
// hints with the global keys.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const GLOBAL_HINT: &str = "Ctrl+T:theme  ?:help  q/Ctrl+C:quit";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let hint = app.active_view_ref().focus_hint();

    let line = match app.active_error() {
        Some(e) => Line::from(vec![
            Span::styled(
                format!(" ✗ [{}] {}", e.short_label(), e),
                Style::default().fg(theme.error),
            ),
            Span::styled("  F5:retry", Style::default().fg(theme.muted)),
        ]),
        None if app.show_help => Line::from(Span::styled(
            format!(" {hint}  │  {GLOBAL_HINT}  F5:refresh"),
            Style::default().fg(theme.status_bar),
        )),
        None => Line::from(Span::styled(
            format!(" {hint}"),
            Style::default().fg(theme.status_bar),
        )),
    };

    let status = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(status, area);
}
