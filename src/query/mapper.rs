//! Result mappers: raw wire record -> view model
//!
//! Both are total. Missing optional upstream fields map to `None`.

use super::model::{ContributorSummary, RepositorySummary};
use crate::github::{RawContributor, RawRepository};

pub fn map_repository(raw: RawRepository) -> RepositorySummary {
    let (owner_login, avatar_url) = match raw.owner {
        Some(owner) => (owner.login, owner.avatar_url),
        None => (None, None),
    };

    RepositorySummary {
        id: raw.id,
        name: raw.name,
        owner_login,
        url: raw.html_url,
        avatar_url,
        star_count: raw.stargazers_count,
        description: raw.description,
        created_at: raw.created_at,
    }
}

pub fn map_contributor(raw: RawContributor) -> ContributorSummary {
    let is_anonymous = raw
        .kind
        .as_deref()
        .map(|k| k.eq_ignore_ascii_case("anonymous"))
        .unwrap_or(raw.id.is_none() && raw.login.is_none());

    ContributorSummary {
        id: raw.id,
        login: raw.login,
        display_name: raw.name,
        email: raw.email,
        avatar_url: raw.avatar_url,
        profile_url: raw.html_url,
        contributions: raw.contributions,
        is_anonymous,
    }
}
