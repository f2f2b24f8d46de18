//! The two concrete query sources: repository search and contributor list

use super::coordinator::QuerySource;
use super::mapper::{map_contributor, map_repository};
use super::model::{ContributorSummary, RepositorySummary, SelectedRepository};
use crate::github::{
    ContributorQuery, Credential, GithubClient, RawContributor, RawRepository, RemoteQueryError,
    RepositoryQuery, PAGE_SIZE,
};
use futures::future::BoxFuture;

/// Search repositories by name fragment
#[derive(Debug, Clone)]
pub struct RepositorySearch {
    client: GithubClient,
}

impl RepositorySearch {
    pub fn new(client: GithubClient) -> Self {
        Self { client }
    }
}

impl QuerySource for RepositorySearch {
    type Params = String;
    type Raw = RawRepository;
    type Item = RepositorySummary;

    fn name(&self) -> &'static str {
        "repositories"
    }

    fn fetch(
        &self,
        credential: &Credential,
        params: &String,
        page: u32,
    ) -> BoxFuture<'static, Result<Vec<RawRepository>, RemoteQueryError>> {
        let client = self.client.clone();
        let credential = credential.clone();
        let query = RepositoryQuery {
            text: params.clone(),
            page,
            per_page: PAGE_SIZE,
        };
        Box::pin(async move { client.search_repositories(&credential, &query).await })
    }

    fn map(raw: RawRepository) -> RepositorySummary {
        map_repository(raw)
    }
}

/// List contributors (anonymous included) of one repository
#[derive(Debug, Clone)]
pub struct ContributorList {
    client: GithubClient,
}

impl ContributorList {
    pub fn new(client: GithubClient) -> Self {
        Self { client }
    }
}

impl QuerySource for ContributorList {
    type Params = SelectedRepository;
    type Raw = RawContributor;
    type Item = ContributorSummary;

    fn name(&self) -> &'static str {
        "contributors"
    }

    fn fetch(
        &self,
        credential: &Credential,
        params: &SelectedRepository,
        page: u32,
    ) -> BoxFuture<'static, Result<Vec<RawContributor>, RemoteQueryError>> {
        let client = self.client.clone();
        let credential = credential.clone();
        let query = ContributorQuery {
            owner: params.owner.clone(),
            repo: params.name.clone(),
            page,
            per_page: PAGE_SIZE,
            include_anonymous: true,
        };
        Box::pin(async move { client.list_contributors(&credential, &query).await })
    }

    fn map(raw: RawContributor) -> ContributorSummary {
        map_contributor(raw)
    }
}
