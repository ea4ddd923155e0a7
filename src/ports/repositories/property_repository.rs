use crate::domain::{
    errors::RepositoryResult,
    models::{Property, PropertyDetails, PropertyImage},
    value_objects::{AgentId, PropertyId, PublicId},
};
use async_trait::async_trait;

/// Repository for listings and their image rows
///
/// Every write is one unit: the property row and its image rows are committed or
/// rolled back together. The repository never talks to the media store.
#[async_trait]
pub trait PropertyRepository: Send + Sync + 'static {
    /// Insert a new property together with its images
    async fn create_property_with_images(&self, property: &Property) -> RepositoryResult<()>;

    /// Fetch a property with its images
    async fn get_property(&self, id: &PropertyId) -> RepositoryResult<Option<Property>>;

    /// List every property
    async fn list_properties(&self) -> RepositoryResult<Vec<Property>>;

    /// List the properties of one agent, newest first
    async fn list_properties_by_agent(&self, agent_id: AgentId) -> RepositoryResult<Vec<Property>>;

    /// Overwrite the descriptive fields, leaving the image set untouched
    async fn update_details(
        &self,
        id: &PropertyId,
        details: &PropertyDetails,
    ) -> RepositoryResult<Property>;

    /// Overwrite the descriptive fields and swap the whole image set
    ///
    /// Returns the public ids of the image rows that were removed.
    async fn replace_image_set(
        &self,
        id: &PropertyId,
        details: &PropertyDetails,
        images: &[PropertyImage],
    ) -> RepositoryResult<Vec<PublicId>>;

    /// Delete a property and cascade to its image rows
    ///
    /// Returns `None` when no such property exists, otherwise the public ids of the
    /// deleted image rows.
    async fn delete_property(&self, id: &PropertyId) -> RepositoryResult<Option<Vec<PublicId>>>;
}
