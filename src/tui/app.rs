// TUI application state
//
// App is the root of the terminal client: it owns the mode switch, both view
// controllers and the shell state (theme, toast, help, log buffer). Views
// report what they want through ViewAction; App applies it.

use super::clipboard;
use super::components::Toast;
use super::mode::{Mode, ModeSwitch};
use super::theme::{Theme, ThemeKind};
use super::traits::{ViewAction, ViewController};
use super::views::{ContributorsView, RepositoriesView};
use crate::config::Config;
use crate::github::{Credential, GithubClient, RemoteQueryError};
use crate::logging::LogBuffer;
use crate::query::{
    ContributorList, Progress, QueryCoordinator, RepositorySearch, SelectedRepository,
};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Main application state for the TUI
pub struct App {
    pub mode: ModeSwitch,

    /// Kept alive across mode switches so the search survives a round trip
    pub repositories: RepositoriesView,

    /// Present only while the mode is UsersSearch
    pub contributors: Option<ContributorsView>,

    client: GithubClient,
    credential: Credential,
    throttle: Duration,

    pub theme_kind: ThemeKind,
    pub theme: Theme,

    pub toast: Option<Toast>,
    pub show_help: bool,
    pub should_quit: bool,

    pub log_buffer: LogBuffer,
}

impl App {
    pub fn new(config: &Config, log_buffer: LogBuffer) -> Result<Self> {
        let client = GithubClient::new(config.api_url.clone(), config.request_timeout())
            .context("Failed to build HTTP client")?;
        let credential = config.credential();
        let throttle = config.throttle_window();
        tracing::debug!(
            authenticated = credential.is_authenticated(),
            throttle_ms = config.throttle_ms,
            "Building coordinators"
        );

        let repositories = RepositoriesView::new(QueryCoordinator::new(
            RepositorySearch::new(client.clone()),
            credential.clone(),
            config.initial_query.clone(),
            throttle,
        ));

        let theme_kind = ThemeKind::from_name(&config.theme);
        Ok(Self {
            mode: ModeSwitch::new(),
            repositories,
            contributors: None,
            client,
            credential,
            throttle,
            theme_kind,
            theme: theme_kind.theme(),
            toast: None,
            show_help: false,
            should_quit: false,
            log_buffer,
        })
    }

    fn active_view(&mut self) -> &mut dyn ViewController {
        match (self.mode.mode(), self.contributors.as_mut()) {
            (Mode::UsersSearch(_), Some(view)) => view as &mut dyn ViewController,
            _ => &mut self.repositories,
        }
    }

    /// Read-only access for rendering
    pub fn active_view_ref(&self) -> &dyn ViewController {
        match (self.mode.mode(), self.contributors.as_ref()) {
            (Mode::UsersSearch(_), Some(view)) => view as &dyn ViewController,
            _ => &self.repositories,
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
        self.show_toast(format!("Theme: {}", self.theme_kind.name()));
    }

    /// Latest error of the active view's coordinator, for the status bar
    pub fn active_error(&self) -> Option<&RemoteQueryError> {
        match (self.mode.mode(), self.contributors.as_ref()) {
            (Mode::UsersSearch(_), Some(view)) => view.coordinator.last_error(),
            _ => self.repositories.coordinator.last_error(),
        }
    }

    pub fn active_is_loading(&self) -> bool {
        match (self.mode.mode(), self.contributors.as_ref()) {
            (Mode::UsersSearch(_), Some(view)) => view.coordinator.is_loading(),
            _ => self.repositories.coordinator.is_loading(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────

    /// Layered dispatch: global keys, then the active view
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.handle_global_key(&key) {
            return;
        }
        let action = self.active_view().handle_key(key);
        self.apply_action(action);
    }

    fn handle_global_key(&mut self, key: &KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('t') if ctrl => {
                self.cycle_theme();
                true
            }
            // Single-letter globals are text while the search box has focus
            _ if self.active_view_ref().is_typing() => false,
            KeyCode::Char('q') => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
                true
            }
            _ => false,
        }
    }

    pub fn apply_action(&mut self, action: ViewAction) {
        match action {
            ViewAction::None => {}
            ViewAction::SearchContributors(repo) => self.search_contributors(repo),
            ViewAction::SearchRepositories => self.search_repositories(),
            ViewAction::Copy(text) => {
                let message = clipboard::copy_with_feedback(&text);
                self.show_toast(message);
            }
            ViewAction::Notify(message) => self.show_toast(message),
        }
    }

    /// RepoSearch -> UsersSearch with a fresh contributor coordinator at page 1
    pub fn search_contributors(&mut self, repo: SelectedRepository) {
        if !self.mode.on_search_contributors(repo.clone()) {
            return;
        }
        tracing::info!("Listing contributors of {}", repo);
        let coordinator = QueryCoordinator::new(
            ContributorList::new(self.client.clone()),
            self.credential.clone(),
            repo,
            self.throttle,
        );
        self.contributors = Some(ContributorsView::new(coordinator));
    }

    /// UsersSearch -> RepoSearch; the contributor view and its in-flight work go away
    pub fn search_repositories(&mut self) {
        if let Some(repo) = self.mode.selected() {
            tracing::debug!("Leaving contributors of {}", repo);
        }
        if self.mode.on_search_repos() {
            self.contributors = None;
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Coordinator progress
    // ─────────────────────────────────────────────────────────────

    pub fn on_repository_progress(&mut self, progress: Progress) {
        match progress {
            Progress::Loaded(_) => self.repositories.on_loaded(),
            Progress::Failed(e) => self.show_toast(format!("✗ Repository search: {e}")),
            Progress::Issued | Progress::Discarded => {}
        }
    }

    pub fn on_contributor_progress(&mut self, progress: Progress) {
        let Some(view) = self.contributors.as_mut() else {
            return;
        };
        match progress {
            Progress::Loaded(_) => view.on_loaded(),
            Progress::Failed(e) => self.show_toast(format!("✗ Contributors: {e}")),
            Progress::Issued | Progress::Discarded => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::views::repositories::Focus;
    use mockito::Matcher;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn config(api_url: &str, throttle_ms: u64) -> Config {
        Config {
            api_url: api_url.to_string(),
            throttle_ms,
            ..Config::default()
        }
    }

    fn offline_app() -> App {
        App::new(&config("http://127.0.0.1:9", 60_000), LogBuffer::new()).unwrap()
    }

    const REACT_PAGE: &str = r#"{"total_count":1,"incomplete_results":false,"items":[
        {"id":10270250,"name":"react","html_url":"https://github.com/facebook/react",
         "created_at":"2013-05-24T16:15:54Z","owner":{"login":"facebook"},
         "stargazers_count":228000,"description":"The library for web and native user interfaces."}]}"#;

    #[tokio::test]
    async fn test_starts_in_repository_search_with_initial_query() {
        let app = offline_app();
        assert_eq!(app.mode.mode(), &Mode::RepoSearch);
        assert_eq!(app.repositories.input(), "react");
        assert!(app.contributors.is_none());
    }

    #[tokio::test]
    async fn test_round_trip_resets_contributor_page_for_new_repository() {
        let mut app = offline_app();

        app.search_contributors(SelectedRepository::new("react", "facebook"));
        let view = app.contributors.as_mut().unwrap();
        view.coordinator.set_page(3);
        assert_eq!(view.coordinator.page(), 3);

        app.apply_action(ViewAction::SearchRepositories);
        assert_eq!(app.mode.mode(), &Mode::RepoSearch);
        assert!(app.contributors.is_none());

        app.search_contributors(SelectedRepository::new("vue", "vuejs"));
        let view = app.contributors.as_ref().unwrap();
        assert_eq!(view.coordinator.page(), 1);
        assert_eq!(view.repository(), &SelectedRepository::new("vue", "vuejs"));
    }

    #[tokio::test]
    async fn test_enter_on_react_row_hands_off_react_facebook() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search/repositories")
            .match_query(Matcher::UrlEncoded("q".into(), "react in:name".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(REACT_PAGE)
            .create_async()
            .await;

        let mut app = App::new(&config(&server.url(), 0), LogBuffer::new()).unwrap();
        let progress = app.repositories.coordinator.advance().await;
        assert_eq!(progress, Progress::Loaded(1));
        app.on_repository_progress(progress);

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.repositories.focus(), Focus::List);
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(
            app.mode.mode(),
            &Mode::UsersSearch(SelectedRepository::new("react", "facebook"))
        );
        assert_eq!(
            app.contributors.as_ref().unwrap().repository(),
            &SelectedRepository::new("react", "facebook")
        );
        // The repository search is kept for the way back
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.mode.mode(), &Mode::RepoSearch);
        assert_eq!(app.repositories.coordinator.results().len(), 1);
    }

    #[tokio::test]
    async fn test_row_actions_ignored_while_list_is_loading() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search/repositories")
            .match_query(Matcher::UrlEncoded("q".into(), "react in:name".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(REACT_PAGE)
            .create_async()
            .await;

        let mut app = App::new(&config(&server.url(), 0), LogBuffer::new()).unwrap();
        let progress = app.repositories.coordinator.advance().await;
        app.on_repository_progress(progress);

        // A new query goes out; its response is never awaited
        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.repositories.coordinator.is_loading());

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.mode.mode(), &Mode::RepoSearch);
        assert!(app.contributors.is_none());

        app.handle_key(key(KeyCode::Char('y')));
        assert!(app.toast.is_none());
        assert!(app.repositories.selected_repository().is_none());
    }

    #[tokio::test]
    async fn test_refresh_key_works_while_typing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search/repositories")
            .match_query(Matcher::UrlEncoded("q".into(), "react in:name".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(REACT_PAGE)
            .expect(2)
            .create_async()
            .await;

        let mut app = App::new(&config(&server.url(), 0), LogBuffer::new()).unwrap();
        let progress = app.repositories.coordinator.advance().await;
        app.on_repository_progress(progress);
        assert!(app.active_view_ref().is_typing());

        app.handle_key(key(KeyCode::F(5)));
        assert!(app.repositories.coordinator.is_loading());
        assert_eq!(app.repositories.input(), "react");
        assert_eq!(
            app.repositories.coordinator.advance().await,
            Progress::Loaded(1)
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_q_is_text_while_typing_and_quit_otherwise() {
        let mut app = offline_app();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.repositories.input(), "reactq");

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_even_while_typing() {
        let mut app = offline_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert_eq!(app.repositories.input(), "react");
    }

    #[tokio::test]
    async fn test_ctrl_t_cycles_theme() {
        let mut app = offline_app();
        assert_eq!(app.theme_kind, ThemeKind::Dark);
        app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert_eq!(app.theme_kind, ThemeKind::Light);
        assert!(app.toast.is_some());
    }

    #[tokio::test]
    async fn test_failed_fetch_shows_toast_and_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search/repositories")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_header("x-ratelimit-remaining", "0")
            .with_body(r#"{"message":"API rate limit exceeded"}"#)
            .create_async()
            .await;

        let mut app = App::new(&config(&server.url(), 0), LogBuffer::new()).unwrap();
        let progress = app.repositories.coordinator.advance().await;
        assert!(matches!(
            progress,
            Progress::Failed(RemoteQueryError::RateLimited { .. })
        ));
        app.on_repository_progress(progress);

        assert!(app.toast.as_ref().unwrap().message.contains("rate limit"));
        assert!(app.active_error().is_some());
        assert!(!app.active_is_loading());
    }
}
