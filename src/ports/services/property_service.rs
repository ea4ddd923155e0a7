use crate::domain::{
    errors::ListingResult,
    models::{CreatePropertyRequest, DeletePropertyRequest, Property, UpdatePropertyRequest},
    value_objects::{AgentId, PropertyId},
};
use async_trait::async_trait;

/// Port for listing operations
/// This trait defines the business logic for properties and their image sets
#[async_trait]
pub trait PropertyService: Send + Sync + 'static {
    /// Create a property with 1..5 images
    async fn create_property(&self, request: CreatePropertyRequest) -> ListingResult<Property>;

    /// Update descriptive fields, optionally replacing the whole image set
    async fn update_property(&self, request: UpdatePropertyRequest) -> ListingResult<Property>;

    /// Delete a property and reclaim its remote images
    async fn delete_property(&self, request: DeletePropertyRequest) -> ListingResult<()>;

    /// Get a property
    async fn get_property(&self, id: &PropertyId) -> ListingResult<Property>;

    /// List all properties
    async fn list_properties(&self) -> ListingResult<Vec<Property>>;

    /// List the properties of one agent, newest first
    async fn list_properties_by_agent(&self, agent_id: AgentId) -> ListingResult<Vec<Property>>;
}
