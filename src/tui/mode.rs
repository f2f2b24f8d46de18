// Mode switch - which view controller is active
//
// Two states, two transitions:
//
//   RepoSearch ──search contributors(repo)──► UsersSearch(repo)
//   UsersSearch ──search repositories──────► RepoSearch
//
// The selected repository lives inside UsersSearch and is dropped on the
// way back.

use crate::query::SelectedRepository;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    RepoSearch,
    UsersSearch(SelectedRepository),
}

#[derive(Debug, Default)]
pub struct ModeSwitch {
    mode: Mode,
}

impl ModeSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn selected(&self) -> Option<&SelectedRepository> {
        match &self.mode {
            Mode::UsersSearch(repo) => Some(repo),
            Mode::RepoSearch => None,
        }
    }

    /// RepoSearch -> UsersSearch. Returns false (no transition) from UsersSearch.
    pub fn on_search_contributors(&mut self, repo: SelectedRepository) -> bool {
        match self.mode {
            Mode::RepoSearch => {
                tracing::debug!(%repo, "Mode: repository search -> contributors");
                self.mode = Mode::UsersSearch(repo);
                true
            }
            Mode::UsersSearch(_) => false,
        }
    }

    /// UsersSearch -> RepoSearch. Returns false (no transition) from RepoSearch.
    pub fn on_search_repos(&mut self) -> bool {
        match self.mode {
            Mode::UsersSearch(_) => {
                tracing::debug!("Mode: contributors -> repository search");
                self.mode = Mode::RepoSearch;
                true
            }
            Mode::RepoSearch => false,
        }
    }
}
