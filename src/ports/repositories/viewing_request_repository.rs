use crate::domain::{
    errors::RepositoryResult,
    models::{ViewingRequest, ViewingStatus},
    value_objects::{AgentId, ViewingRequestId},
};
use async_trait::async_trait;

/// Repository for viewing requests
#[async_trait]
pub trait ViewingRequestRepository: Send + Sync + 'static {
    async fn create_viewing_request(&self, request: &ViewingRequest) -> RepositoryResult<()>;

    async fn get_viewing_request(
        &self,
        id: &ViewingRequestId,
    ) -> RepositoryResult<Option<ViewingRequest>>;

    /// Requests addressed to one agent, newest first
    async fn list_viewing_requests_by_agent(
        &self,
        agent_id: AgentId,
    ) -> RepositoryResult<Vec<ViewingRequest>>;

    /// Move a request from `expected` to `status`
    ///
    /// Returns `None` when the stored status is no longer `expected`, so two
    /// concurrent decisions cannot both apply.
    async fn update_viewing_status(
        &self,
        id: &ViewingRequestId,
        expected: ViewingStatus,
        status: ViewingStatus,
    ) -> RepositoryResult<Option<ViewingRequest>>;
}
