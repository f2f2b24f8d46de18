// Contributor list view
//
// One view per selected repository: the App builds a fresh one (and a fresh
// coordinator at page 1) every time the user searches contributors.

use super::{list_block, render_placeholder};
use crate::query::{ContributorCoordinator, ContributorSummary, SelectedRepository};
use crate::tui::components::formatters::fit;
use crate::tui::components::pagination;
use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;
use crate::tui::traits::{ViewAction, ViewController};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub struct ContributorsView {
    pub coordinator: ContributorCoordinator,
    selected: usize,
}

impl ContributorsView {
    pub fn new(coordinator: ContributorCoordinator) -> Self {
        Self {
            coordinator,
            selected: 0,
        }
    }

    pub fn repository(&self) -> &SelectedRepository {
        self.coordinator.params()
    }

    pub fn selected_contributor(&self) -> Option<&ContributorSummary> {
        self.coordinator.results().get(self.selected)
    }

    fn row(contributor: &ContributorSummary, bp: Breakpoint, theme: &Theme) -> Line<'static> {
        let label_style = if contributor.is_anonymous {
            Style::default()
                .fg(theme.anonymous)
                .add_modifier(Modifier::ITALIC)
        } else {
            Style::default().fg(theme.owner)
        };
        let identity = contributor
            .identity()
            .map(|key| key.to_string())
            .unwrap_or_else(|| "-".to_string());

        Line::from(vec![
            Span::styled(fit(contributor.label(), bp.name_width()), label_style),
            Span::styled(
                format!(" {}", fit(&identity, bp.name_width())),
                Style::default().fg(theme.muted),
            ),
            Span::styled(
                format!(" {:>6}", contributor.contributions),
                Style::default().fg(theme.stars),
            ),
        ])
    }

    fn render_header(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled("Contributors of ", Style::default().fg(theme.muted)),
            Span::styled(
                self.repository().to_string(),
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(theme.border_style(false)),
        );
        f.render_widget(header, area);
    }

    fn render_list(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let block = list_block("Contributors", true, theme);

        if self.coordinator.is_loading() {
            return render_placeholder(f, area, "Loading...", theme.muted, block);
        }
        let results = self.coordinator.results();
        if results.is_empty() {
            let (text, color) = match self.coordinator.last_error() {
                Some(e) => (format!("✗ {e}"), theme.error),
                None => ("No contributors".to_string(), theme.muted),
            };
            return render_placeholder(f, area, &text, color, block);
        }

        let bp = Breakpoint::from_width(area.width);
        let items: Vec<ListItem> = results
            .iter()
            .map(|c| ListItem::new(Self::row(c, bp, theme)))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(theme.selected_style())
            .highlight_symbol("▸ ");
        let mut state = ListState::default().with_selected(Some(self.selected));
        f.render_stateful_widget(list, area, &mut state);
    }
}

impl ViewController for ContributorsView {
    fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.coordinator.results().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('[') | KeyCode::PageUp => self.coordinator.previous_page(),
            KeyCode::Char(']') | KeyCode::PageDown => self.coordinator.next_page(),
            KeyCode::Char('r') | KeyCode::Esc | KeyCode::Backspace => {
                return ViewAction::SearchRepositories
            }
            KeyCode::Char('y') => {
                if let Some(contributor) = self.selected_contributor() {
                    return match &contributor.profile_url {
                        Some(url) => ViewAction::Copy(url.clone()),
                        None => ViewAction::Notify(format!(
                            "✗ {} has no profile",
                            contributor.label()
                        )),
                    };
                }
            }
            KeyCode::F(5) => self.coordinator.refresh(),
            _ => {}
        }
        ViewAction::None
    }

    fn focus_hint(&self) -> &'static str {
        "↑↓:select  [ ]:page  y:copy profile  r/Esc:back to search"
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

        self.render_header(f, chunks[0], theme);
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
