//! View-model types produced by the result mappers

use chrono::{DateTime, Utc};
use std::fmt;

/// One repository search hit, as the repository view renders it
#[derive(Debug, Clone, PartialEq)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub owner_login: Option<String>,
    pub url: String,
    pub avatar_url: Option<String>,
    pub star_count: u64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RepositorySummary {
    /// `owner/name`, or just `name` when the owner is unknown
    pub fn full_name(&self) -> String {
        match &self.owner_login {
            Some(owner) => format!("{}/{}", owner, self.name),
            None => self.name.clone(),
        }
    }

    /// Handoff for "search contributors"; needs an owner to address the repo
    pub fn selection(&self) -> Option<SelectedRepository> {
        self.owner_login
            .as_ref()
            .map(|owner| SelectedRepository::new(self.name.clone(), owner.clone()))
    }
}

/// Identity of a contributor row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContributorKey {
    Id(u64),
    Email(String),
}

impl fmt::Display for ContributorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Email(email) => f.write_str(email),
        }
    }
}

/// One contributor, registered user or anonymous committer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContributorSummary {
    pub id: Option<u64>,
    pub login: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub profile_url: Option<String>,
    pub contributions: u64,
    pub is_anonymous: bool,
}

impl ContributorSummary {
    /// `id`, falling back to `email`; both are absent for some anonymous entries
    pub fn identity(&self) -> Option<ContributorKey> {
        self.id
            .map(ContributorKey::Id)
            .or_else(|| self.email.clone().map(ContributorKey::Email))
    }

    /// Name shown in the row: login, then display name, then email
    pub fn label(&self) -> &str {
        self.login
            .as_deref()
            .or(self.display_name.as_deref())
            .or(self.email.as_deref())
            .unwrap_or("anonymous")
    }
}

/// Repository handed from the repository view to the contributor view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRepository {
    pub name: String,
    pub owner: String,
}

impl SelectedRepository {
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
        }
    }

    /// Parse `owner/repo` (as typed on the command line)
    pub fn parse(slug: &str) -> Option<Self> {
        let (owner, name) = slug.trim().trim_end_matches('/').split_once('/')?;
        let name = name.trim_end_matches(".git");
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self::new(name, owner))
    }
}

impl fmt::Display for SelectedRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
