// Pagination control: `◀ Prev | Page N | Next ▶`
//
// Disabled ends are dimmed rather than hidden so the line never shifts.

use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn line(page: u32, has_previous: bool, has_next: bool, theme: &Theme) -> Line<'static> {
    let enabled = Style::default().fg(theme.highlight);
    let disabled = Style::default().fg(theme.muted);
    let separator = Span::styled(" | ", Style::default().fg(theme.muted));

    Line::from(vec![
        Span::styled(
            "◀ Prev",
            if has_previous { enabled } else { disabled },
        ),
        separator.clone(),
        Span::styled(
            format!("Page {page}"),
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        ),
        separator,
        Span::styled("Next ▶", if has_next { enabled } else { disabled }),
    ])
}

pub fn render(
    f: &mut Frame,
    area: Rect,
    page: u32,
    has_previous: bool,
    has_next: bool,
    theme: &Theme,
) {
    f.render_widget(
        Paragraph::new(line(page, has_previous, has_next, theme)),
        area,
    );
}
