use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{RepositoryError, RepositoryResult},
        models::{Property, PropertyDetails, PropertyImage},
        value_objects::{AgentId, PropertyId, PublicId},
    },
    ports::repositories::PropertyRepository,
};

/// In-memory implementation of PropertyRepository for testing and development
///
/// Each write takes the lock once, which gives the same all-or-nothing row-set
/// behaviour as a database transaction.
#[derive(Clone, Default)]
pub struct InMemoryPropertyRepository {
    data: Arc<RwLock<RepositoryData>>,
}

#[derive(Default)]
struct RepositoryData {
    properties: HashMap<PropertyId, Property>,
}

impl InMemoryPropertyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_for_read(mut property: Property) -> Property {
    property.images.sort_by_key(|image| image.display_order);
    property
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn create_property_with_images(&self, property: &Property) -> RepositoryResult<()> {
        let mut data = self.data.write().await;

        if data.properties.contains_key(&property.id) {
            return Err(RepositoryError::DuplicateProperty { id: property.id });
        }

        data.properties.insert(property.id, property.clone());
        Ok(())
    }

    async fn get_property(&self, id: &PropertyId) -> RepositoryResult<Option<Property>> {
        let data = self.data.read().await;
        Ok(data.properties.get(id).cloned().map(sorted_for_read))
    }

    async fn list_properties(&self) -> RepositoryResult<Vec<Property>> {
        let data = self.data.read().await;

        let mut properties: Vec<Property> = data
            .properties
            .values()
            .cloned()
            .map(sorted_for_read)
            .collect();
        properties.sort_by_key(|p| p.created_at);

        Ok(properties)
    }

    async fn list_properties_by_agent(&self, agent_id: AgentId) -> RepositoryResult<Vec<Property>> {
        let data = self.data.read().await;

        let mut properties: Vec<Property> = data
            .properties
            .values()
            .filter(|p| p.agent_id == agent_id)
            .cloned()
            .map(sorted_for_read)
            .collect();
        // Newest first
        properties.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(properties)
    }

    async fn update_details(
        &self,
        id: &PropertyId,
        details: &PropertyDetails,
    ) -> RepositoryResult<Property> {
        let mut data = self.data.write().await;

        let property = data
            .properties
            .get_mut(id)
            .ok_or(RepositoryError::PropertyNotFound { id: *id })?;

        property.details = details.clone();
        property.updated_at = Utc::now();

        Ok(sorted_for_read(property.clone()))
    }

    async fn replace_image_set(
        &self,
        id: &PropertyId,
        details: &PropertyDetails,
        images: &[PropertyImage],
    ) -> RepositoryResult<Vec<PublicId>> {
        let mut data = self.data.write().await;

        let property = data
            .properties
            .get_mut(id)
            .ok_or(RepositoryError::PropertyNotFound { id: *id })?;

        let displaced = property.public_ids();
        property.details = details.clone();
        property.images = images.to_vec();
        property.updated_at = Utc::now();

        Ok(displaced)
    }

    async fn delete_property(&self, id: &PropertyId) -> RepositoryResult<Option<Vec<PublicId>>> {
        let mut data = self.data.write().await;
        Ok(data.properties.remove(id).map(|p| p.public_ids()))
    }
}
