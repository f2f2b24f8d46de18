//! Raw wire records returned by the GitHub REST API
//!
//! Only the fields the mappers read are declared; everything else in the
//! payload is ignored by serde. Optional upstream fields stay `Option` here so
//! a sparse record never fails to decode.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Fixed page size for both capabilities
pub const PAGE_SIZE: u32 = 100;

/// Envelope of `GET /search/repositories`
#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<T>,
}

/// Owner block embedded in a repository record
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawOwner {
    pub login: Option<String>,
    pub avatar_url: Option<String>,
}

/// One repository item from the search endpoint
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawRepository {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub owner: Option<RawOwner>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
}

/// One contributor item; anonymous contributors only carry name/email
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawContributor {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub contributions: u64,
}

/// Error body GitHub sends with non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: Option<String>,
}

/// Input of the repository search capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryQuery {
    pub text: String,
    pub page: u32,
    pub per_page: u32,
}

/// Input of the contributor list capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorQuery {
    pub owner: String,
    pub repo: String,
    pub page: u32,
    pub per_page: u32,
    pub include_anonymous: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_without_owner_decodes() {
        let json = r#"{
            "id": 10270250,
            "name": "react",
            "html_url": "https://github.com/facebook/react",
            "created_at": "2013-05-24T16:15:54Z",
            "owner": null,
            "description": null,
            "stargazers_count": 220000,
            "forks": 45000
        }"#;
        let repo: RawRepository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.id, 10270250);
        assert!(repo.owner.is_none());
        assert_eq!(repo.stargazers_count, 220000);
    }

    #[test]
    fn test_anonymous_contributor_decodes() {
        let json = r#"{"email": "dev@example.com", "name": "Dev", "type": "Anonymous", "contributions": 3}"#;
        let c: RawContributor = serde_json::from_str(json).unwrap();
        assert_eq!(c.id, None);
        assert_eq!(c.login, None);
        assert_eq!(c.email.as_deref(), Some("dev@example.com"));
        assert_eq!(c.kind.as_deref(), Some("Anonymous"));
        assert_eq!(c.contributions, 3);
    }
}
