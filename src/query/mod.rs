// Query module - the paginated, throttled remote-query core
//
// - coordinator: generic QueryCoordinator over a QuerySource
// - throttle: single-slot trailing-edge deferred execution
// - sources: repository search and contributor list bindings
// - mapper / model: raw record -> view model

pub mod coordinator;
pub mod mapper;
pub mod model;
pub mod sources;
pub mod throttle;

pub use coordinator::{Progress, QueryCoordinator, QuerySource, DEFAULT_THROTTLE};
pub use model::{ContributorKey, ContributorSummary, RepositorySummary, SelectedRepository};
pub use sources::{ContributorList, RepositorySearch};

/// Coordinator specialised for repository search
pub type RepositoryCoordinator = QueryCoordinator<RepositorySearch>;

/// Coordinator specialised for one repository's contributors
pub type ContributorCoordinator = QueryCoordinator<ContributorList>;
