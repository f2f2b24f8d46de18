// Title bar component
//
// App name, the current mode and a spinner while the active view is loading.

use crate::tui::app::App;
use crate::tui::mode::Mode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

fn spinner_char() -> char {
    let millis = chrono::Utc::now().timestamp_millis().unsigned_abs();
    SPINNER[(millis / 150) as usize % SPINNER.len()]
}

/// Mode label shown after the app name
pub fn mode_label(mode: &Mode) -> String {
    match mode {
        Mode::RepoSearch => "Repository search".to_string(),
        Mode::UsersSearch(repo) => format!("Contributors ─ {repo}"),
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let loading = if app.active_is_loading() {
        format!(" {} loading", spinner_char())
    } else {
        String::new()
    };
    let title_text = format!(
        " 🔍 repo-scout ──── {}{}",
        mode_label(app.mode.mode()),
        loading
    );

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(Line::from(" ? ").right_aligned()),
        );

    f.render_widget(title, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SelectedRepository;

    #[test]
    fn test_mode_label_names_selected_repository() {
        assert_eq!(mode_label(&Mode::RepoSearch), "Repository search");
        assert_eq!(
            mode_label(&Mode::UsersSearch(SelectedRepository::new("react", "facebook"))),
            "Contributors ─ facebook/react"
        );
    }
}
