// GitHub module - the remote capabilities behind both coordinators
//
// - client: reqwest wrapper for search and contributor endpoints
// - types: raw wire records and capability inputs
// - error: RemoteQueryError, the only externally-originating error kind

pub mod client;
pub mod error;
pub mod types;

pub use client::GithubClient;
pub use error::RemoteQueryError;
pub use types::{ContributorQuery, RawContributor, RawRepository, RepositoryQuery, PAGE_SIZE};

use std::fmt;

/// Opaque bearer token, read once at startup
///
/// Absence is legal: requests go out unauthenticated and are subject to the
/// API's anonymous rate limits. `Debug` never prints the token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(Option<String>);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.trim().is_empty() {
            Self(None)
        } else {
            Self(Some(token.trim().to_string()))
        }
    }

    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn from_option(token: Option<String>) -> Self {
        token.map(Self::new).unwrap_or_default()
    }

    /// Token to send as `Authorization: Bearer`, if any
    pub fn bearer(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Credential(***)"),
            None => f.write_str("Credential(anonymous)"),
        }
    }
}
