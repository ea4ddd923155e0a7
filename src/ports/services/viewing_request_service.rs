use crate::domain::{
    errors::ListingResult,
    models::{
        AgentViewingRequest, CreateViewingRequest, GuestViewingRequest,
        UpdateViewingStatusRequest, ViewingRequest,
    },
    value_objects::AgentId,
};
use async_trait::async_trait;

/// Port for viewing requests against existing listings
#[async_trait]
pub trait ViewingRequestService: Send + Sync + 'static {
    /// Record a request from a signed-in tenant
    async fn request_viewing(&self, request: CreateViewingRequest) -> ListingResult<ViewingRequest>;

    /// Record a request from a visitor without an account
    async fn request_guest_viewing(
        &self,
        request: GuestViewingRequest,
    ) -> ListingResult<ViewingRequest>;

    /// Requests for the agent's listings, newest first
    async fn list_for_agent(&self, agent_id: AgentId) -> ListingResult<Vec<AgentViewingRequest>>;

    /// Apply the agent's decision to one of their requests
    async fn update_status(
        &self,
        request: UpdateViewingStatusRequest,
    ) -> ListingResult<ViewingRequest>;
}
