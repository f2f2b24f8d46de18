//! View controller contract
//!
//! The App owns one controller per mode and routes keys to whichever is
//! active. Controllers never reach into App; anything that crosses views
//! (mode changes, clipboard, toasts) goes back up as a [`ViewAction`].
//!
//! ```text
//! KeyEvent
//!    │
//!    ▼
//! App (global: Ctrl+C, Ctrl+T, q, ?)
//!    │ not handled
//!    ▼
//! active ViewController::handle_key ──► ViewAction ──► App::apply_action
//! ```

use crate::query::SelectedRepository;
use crate::tui::theme::Theme;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// What a view asks the App to do after handling a key
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewAction {
    /// Key consumed (or ignored) locally
    #[default]
    None,
    /// Switch to the contributor view for this repository
    SearchContributors(SelectedRepository),
    /// Return to repository search
    SearchRepositories,
    /// Put this text on the clipboard
    Copy(String),
    /// Show a short message
    Notify(String),
}

pub trait ViewController {
    fn handle_key(&mut self, key: KeyEvent) -> ViewAction;

    /// True while keystrokes go into a text field, which disables the
    /// single-letter global keys
    fn is_typing(&self) -> bool {
        false
    }

    /// Keybind hints for the status bar
    fn focus_hint(&self) -> &'static str;

    /// A fetch for this view settled with new results
    fn on_loaded(&mut self);

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme);
}
