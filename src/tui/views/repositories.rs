// Repository search view
//
// Search input on top, pagination line, then the result list. Typing edits
// the query and hands it to the coordinator on every keystroke; the
// coordinator's throttle decides when a request actually goes out.

use super::{list_block, render_placeholder};
use crate::query::{RepositoryCoordinator, RepositorySummary};
use crate::tui::components::formatters::{fit, format_compact_number, truncate};
use crate::tui::components::pagination;
use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;
use crate::tui::traits::{ViewAction, ViewController};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

pub struct RepositoriesView {
    pub coordinator: RepositoryCoordinator,
    input: String,
    focus: Focus,
    selected: usize,
}

impl RepositoriesView {
    pub fn new(coordinator: RepositoryCoordinator) -> Self {
        let input = coordinator.params().clone();
        Self {
            coordinator,
            input,
            focus: Focus::Input,
            selected: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Highlighted row; none while the list is replaced by "Loading..."
    pub fn selected_repository(&self) -> Option<&RepositorySummary> {
        if self.coordinator.is_loading() {
            return None;
        }
        self.coordinator.results().get(self.selected)
    }

    fn edit(&mut self, f: impl FnOnce(&mut String)) {
        f(&mut self.input);
        self.coordinator.set_query_params(self.input.clone());
    }

    fn select_next(&mut self) {
        let len = self.coordinator.results().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// "search contributors" on the highlighted row
    fn search_contributors(&self) -> ViewAction {
        let Some(repo) = self.selected_repository() else {
            return ViewAction::None;
        };
        match repo.selection() {
            Some(selected) => ViewAction::SearchContributors(selected),
            None => ViewAction::Notify(format!("✗ {} has no owner", repo.name)),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> ViewAction {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit(|text| text.push(c));
            }
            KeyCode::Backspace => {
                if !self.input.is_empty() {
                    self.edit(|text| {
                        text.pop();
                    });
                }
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter | KeyCode::Esc => {
                self.focus = Focus::List;
            }
            KeyCode::PageUp => self.coordinator.previous_page(),
            KeyCode::PageDown => self.coordinator.next_page(),
            KeyCode::F(5) => self.coordinator.refresh(),
            _ => {}
        }
        ViewAction::None
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> ViewAction {
        match key.code {
            KeyCode::Tab | KeyCode::Char('/') => self.focus = Focus::Input,
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected == 0 {
                    self.focus = Focus::Input;
                } else {
                    self.select_previous();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char('[') | KeyCode::PageUp => self.coordinator.previous_page(),
            KeyCode::Char(']') | KeyCode::PageDown => self.coordinator.next_page(),
            KeyCode::Enter | KeyCode::Char('c') => return self.search_contributors(),
            KeyCode::Char('y') => {
                if let Some(repo) = self.selected_repository() {
                    return ViewAction::Copy(repo.url.clone());
                }
            }
            KeyCode::F(5) => self.coordinator.refresh(),
            _ => {}
        }
        ViewAction::None
    }

    fn render_input(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let focused = self.focus == Focus::Input;
        let cursor = if focused { "▏" } else { "" };
        let input = Paragraph::new(Line::from(vec![
            Span::styled(self.input.as_str(), Style::default().fg(theme.foreground)),
            Span::styled(cursor, Style::default().fg(theme.highlight)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(theme.border_style(focused))
                .title(" Search repositories "),
        );
        f.render_widget(input, area);
    }

    fn row(repo: &RepositorySummary, bp: Breakpoint, width: usize, theme: &Theme) -> Line<'static> {
        let name_width = bp.name_width();
        let mut spans = vec![
            Span::styled(
                fit(&repo.full_name(), name_width),
                Style::default().fg(theme.owner),
            ),
            Span::styled(
                format!(" ★{:<6}", format_compact_number(repo.star_count)),
                Style::default().fg(theme.stars),
            ),
        ];
        let mut used = name_width + 8;

        if bp.shows_created() {
            spans.push(Span::styled(
                format!(" {}", repo.created_at.format("%Y-%m-%d")),
                Style::default().fg(theme.muted),
            ));
            used += 11;
        }
        if bp.shows_description() {
            if let Some(description) = &repo.description {
                let room = width.saturating_sub(used + 1);
                spans.push(Span::styled(
                    format!(" {}", truncate(description, room)),
                    Style::default().fg(theme.foreground),
                ));
            }
        }
        Line::from(spans)
    }

    fn render_list(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let focused = self.focus == Focus::List;
        let block = list_block("Repositories", focused, theme);

        if self.coordinator.is_loading() {
            return render_placeholder(f, area, "Loading...", theme.muted, block);
        }
        let results = self.coordinator.results();
        if results.is_empty() {
            let (text, color) = match self.coordinator.last_error() {
                Some(e) => (format!("✗ {e}"), theme.error),
                None if self.input.trim().is_empty() => {
                    ("Type to search repositories".to_string(), theme.muted)
                }
                None => ("No repositories found".to_string(), theme.muted),
            };
            return render_placeholder(f, area, &text, color, block);
        }

        let bp = Breakpoint::from_width(area.width);
        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = results
            .iter()
            .map(|repo| ListItem::new(Self::row(repo, bp, inner_width, theme)))
            .collect();

        let mut list = List::new(items).block(block);
        if focused {
            list = list.highlight_style(theme.selected_style()).highlight_symbol("▸ ");
        } else {
            list = list.highlight_symbol("  ");
        }
        let mut state = ListState::default().with_selected(Some(self.selected));
        f.render_stateful_widget(list, area, &mut state);
    }
}

impl ViewController for RepositoriesView {
    fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn is_typing(&self) -> bool {
        self.focus == Focus::Input
    }

    fn focus_hint(&self) -> &'static str {
        match self.focus {
            Focus::Input => "type:search  Tab:results  PgUp/PgDn:page",
            Focus::List => "↑↓:select  [ ]:page  Enter:contributors  y:copy url  Tab:search",
        }
    }

    fn on_loaded(&mut self) {
        self.selected = 0;
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(3),
            ])
            .split(area);

        self.render_input(f, chunks[0], theme);
        pagination::render(
            f,
            chunks[1],
            self.coordinator.page(),
            self.coordinator.has_previous_page(),
            self.coordinator.has_next_page(),
            theme,
        );
        self.render_list(f, chunks[2], theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{Credential, GithubClient};
    use crate::query::{QueryCoordinator, RepositorySearch};
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    // Long window: nothing is issued while the test runs
    fn view() -> RepositoriesView {
        let client = GithubClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let coordinator = QueryCoordinator::new(
            RepositorySearch::new(client),
            Credential::anonymous(),
            "react".to_string(),
            Duration::from_secs(60),
        );
        RepositoriesView::new(coordinator)
    }

    #[tokio::test]
    async fn test_input_seeded_from_initial_query() {
        let view = view();
        assert_eq!(view.input(), "react");
        assert!(view.is_typing());
    }

    #[tokio::test]
    async fn test_typing_updates_query_params() {
        let mut view = view();
        view.handle_key(key(KeyCode::Char('-')));
        view.handle_key(key(KeyCode::Char('d')));
        view.handle_key(key(KeyCode::Backspace));

        assert_eq!(view.input(), "react-");
        assert_eq!(view.coordinator.params(), "react-");
        assert_eq!(view.coordinator.page(), 1);
    }

    #[tokio::test]
    async fn test_control_chars_are_not_text() {
        let mut view = view();
        view.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert_eq!(view.input(), "react");
    }

    #[tokio::test]
    async fn test_tab_toggles_focus() {
        let mut view = view();
        view.handle_key(key(KeyCode::Tab));
        assert_eq!(view.focus(), Focus::List);
        assert!(!view.is_typing());

        // Letters are commands now, not text
        view.handle_key(key(KeyCode::Char('j')));
        assert_eq!(view.input(), "react");

        view.handle_key(key(KeyCode::Tab));
        assert_eq!(view.focus(), Focus::Input);
    }

    #[tokio::test]
    async fn test_row_actions_need_a_row() {
        let mut view = view();
        view.handle_key(key(KeyCode::Tab));
        assert_eq!(view.handle_key(key(KeyCode::Enter)), ViewAction::None);
        assert_eq!(view.handle_key(key(KeyCode::Char('y'))), ViewAction::None);
    }

    #[tokio::test]
    async fn test_previous_page_key_at_first_page_is_noop() {
        let mut view = view();
        view.handle_key(key(KeyCode::Tab));
        view.handle_key(key(KeyCode::Char('[')));
        assert_eq!(view.coordinator.page(), 1);
        // Next needs a full page of results
        view.handle_key(key(KeyCode::Char(']')));
        assert_eq!(view.coordinator.page(), 1);
    }
}
