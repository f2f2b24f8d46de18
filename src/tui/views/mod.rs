// Views module - the two view controllers and the frame layout
//
// - repositories: search input + repository list
// - contributors: contributor list of one repository
//
// draw() lays out the shell (title, view, logs, status) and renders the view
// the mode switch has made active.

pub mod contributors;
pub mod repositories;

pub use contributors::ContributorsView;
pub use repositories::RepositoriesView;

use super::app::App;
use super::components::{log_strip, status_bar, title_bar};
use super::theme::Theme;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Log lines shown under the view
const LOG_STRIP_LINES: u16 = 4;

/// Bordered block for a result list
pub(crate) fn list_block(title: &str, focused: bool, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.border_style(focused))
        .title(format!(" {title} "))
}

/// Centered one-liner in place of the list ("Loading...", empty, error)
pub(crate) fn render_placeholder(
    f: &mut Frame,
    area: Rect,
    text: &str,
    color: Color,
    block: Block<'static>,
) {
    let placeholder = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(placeholder, area);
}

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(LOG_STRIP_LINES + 1),
            Constraint::Length(2),
        ])
        .split(f.area());

    title_bar::render(f, chunks[0], app);
    app.active_view_ref().render(f, chunks[1], &app.theme);

    log_strip::render(
        f,
        chunks[2],
        &app.log_buffer,
        LOG_STRIP_LINES as usize,
        &app.theme,
    );

    status_bar::render(f, chunks[3], app);

    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }

    app.clear_expired_toast();
}
