use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::{
    adapters::outbound::telemetry::TracingEventSink,
    domain::{
        errors::{ListingError, ListingResult, RepositoryError},
        models::{
            CreatePropertyRequest, DeletePropertyRequest, ImageSetRequest, Property,
            PropertyImage, UpdatePropertyRequest, UploadedImage,
        },
        value_objects::{AgentId, ImageId, PropertyId, PublicId},
    },
    ports::{
        repositories::PropertyRepository,
        services::PropertyService,
        storage::MediaStore,
        telemetry::{MediaEvent, MediaEventSink},
    },
    services::{ImageBatchRemover, ImageBatchUploader},
};

/// Implementation of PropertyService owning the image-set invariants
///
/// A persisted property always carries 1..5 images with exactly one primary.
/// Remote deletions only run after the metadata write they depend on has been
/// committed; a crash in between leaves an orphaned remote object, never a
/// property pointing at a deleted image.
///
/// Concurrent updates of the same property are not serialised here. The last
/// metadata write wins.
#[derive(Clone)]
pub struct PropertyServiceImpl {
    repository: Arc<dyn PropertyRepository>,
    uploader: ImageBatchUploader,
    remover: ImageBatchRemover,
    events: Arc<dyn MediaEventSink>,
}

impl PropertyServiceImpl {
    /// Create a new PropertyServiceImpl instance
    pub fn new(
        repository: Arc<dyn PropertyRepository>,
        store: Arc<dyn MediaStore>,
        events: Arc<dyn MediaEventSink>,
    ) -> Self {
        Self {
            repository,
            uploader: ImageBatchUploader::new(store.clone(), events.clone()),
            remover: ImageBatchRemover::new(store, events.clone()),
            events,
        }
    }

    async fn upload_image_set(&self, set: &ImageSetRequest) -> ListingResult<Vec<UploadedImage>> {
        let uploaded = self.uploader.upload_all(&set.images).await;
        if uploaded.is_empty() {
            return Err(ListingError::UploadExhausted {
                attempted: set.images.len(),
            });
        }
        Ok(uploaded)
    }

    /// Reclaim uploads whose metadata write failed
    async fn reclaim_uncommitted(
        &self,
        property_id: PropertyId,
        images: &[PropertyImage],
        error: &RepositoryError,
    ) {
        self.events.record(MediaEvent::CommitFailed {
            property_id,
            orphaned: images.len(),
            message: error.to_string(),
        });
        let public_ids: Vec<PublicId> = images.iter().map(|i| i.public_id.clone()).collect();
        self.remover.remove_all(&public_ids).await;
    }

    async fn owned_property(&self, id: &PropertyId, agent_id: AgentId) -> ListingResult<Property> {
        let property = self
            .repository
            .get_property(id)
            .await?
            .ok_or(ListingError::PropertyNotFound { id: *id })?;

        if !property.is_owned_by(agent_id) {
            return Err(ListingError::NotOwner {
                property_id: *id,
                agent_id,
            });
        }

        Ok(property)
    }
}

/// Build image rows from the uploads that survived
///
/// Display order comes from the order value paired with the image's request
/// position. When the requested primary image did not survive, the lowest
/// surviving position becomes primary.
pub(crate) fn build_image_records(
    property_id: PropertyId,
    set: &ImageSetRequest,
    uploaded: &[UploadedImage],
    created_at: DateTime<Utc>,
    events: &dyn MediaEventSink,
) -> Vec<PropertyImage> {
    let Some(first) = uploaded.first() else {
        return Vec::new();
    };

    let primary_position = if uploaded.iter().any(|u| u.position == set.primary_index) {
        set.primary_index
    } else {
        events.record(MediaEvent::PrimaryReassigned {
            requested: set.primary_index,
            assigned: first.position,
        });
        first.position
    };

    uploaded
        .iter()
        .map(|upload| PropertyImage {
            id: ImageId::generate(),
            property_id,
            url: upload.url.clone(),
            public_id: upload.public_id.clone(),
            display_order: set.order_for(upload.position),
            is_primary: upload.position == primary_position,
            created_at,
        })
        .collect()
}

#[async_trait]
impl PropertyService for PropertyServiceImpl {
    async fn create_property(&self, request: CreatePropertyRequest) -> ListingResult<Property> {
        request.details.validate()?;
        request.images.validate()?;

        let uploaded = self.upload_image_set(&request.images).await?;

        let now = Utc::now();
        let property_id = PropertyId::generate();
        let images = build_image_records(
            property_id,
            &request.images,
            &uploaded,
            now,
            self.events.as_ref(),
        );

        let property = Property {
            id: property_id,
            agent_id: request.agent_id,
            details: request.details,
            images,
            created_at: now,
            updated_at: now,
        };

        if let Err(err) = self.repository.create_property_with_images(&property).await {
            self.reclaim_uncommitted(property_id, &property.images, &err)
                .await;
            return Err(err.into());
        }

        self.events.record(MediaEvent::PropertyCreated {
            property_id,
            images: property.images.len(),
        });

        Ok(property)
    }

    async fn update_property(&self, request: UpdatePropertyRequest) -> ListingResult<Property> {
        request.details.validate()?;
        if let Some(set) = &request.images {
            set.validate()?;
        }

        let existing = self
            .owned_property(&request.property_id, request.agent_id)
            .await?;

        let Some(set) = request.images else {
            return Ok(self
                .repository
                .update_details(&existing.id, &request.details)
                .await?);
        };

        // Nothing persisted has changed until at least one upload survives
        let uploaded = self.upload_image_set(&set).await?;

        let now = Utc::now();
        let images = build_image_records(existing.id, &set, &uploaded, now, self.events.as_ref());

        let displaced = match self
            .repository
            .replace_image_set(&existing.id, &request.details, &images)
            .await
        {
            Ok(displaced) => displaced,
            Err(err) => {
                self.reclaim_uncommitted(existing.id, &images, &err).await;
                return Err(err.into());
            }
        };

        self.events.record(MediaEvent::ImageSetReplaced {
            property_id: existing.id,
            images: images.len(),
            displaced: displaced.len(),
        });

        self.remover.remove_all(&displaced).await;

        Ok(Property {
            details: request.details,
            images,
            updated_at: now,
            ..existing
        })
    }

    async fn delete_property(&self, request: DeletePropertyRequest) -> ListingResult<()> {
        let existing = self
            .owned_property(&request.property_id, request.agent_id)
            .await?;

        let deleted_ids = self
            .repository
            .delete_property(&existing.id)
            .await?
            .ok_or(ListingError::PropertyNotFound { id: existing.id })?;

        self.events.record(MediaEvent::PropertyDeleted {
            property_id: existing.id,
            images: deleted_ids.len(),
        });

        self.remover.remove_all(&deleted_ids).await;

        Ok(())
    }

    async fn get_property(&self, id: &PropertyId) -> ListingResult<Property> {
        self.repository
            .get_property(id)
            .await?
            .ok_or(ListingError::PropertyNotFound { id: *id })
    }

    async fn list_properties(&self) -> ListingResult<Vec<Property>> {
        Ok(self.repository.list_properties().await?)
    }

    async fn list_properties_by_agent(&self, agent_id: AgentId) -> ListingResult<Vec<Property>> {
        Ok(self.repository.list_properties_by_agent(agent_id).await?)
    }
}

/// Builder for PropertyServiceImpl
#[derive(Default)]
pub struct PropertyServiceBuilder {
    repository: Option<Arc<dyn PropertyRepository>>,
    store: Option<Arc<dyn MediaStore>>,
    events: Option<Arc<dyn MediaEventSink>>,
}

impl PropertyServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repository(mut self, repository: Arc<dyn PropertyRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn store(mut self, store: Arc<dyn MediaStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn events(mut self, events: Arc<dyn MediaEventSink>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Result<PropertyServiceImpl, &'static str> {
        let repository = self.repository.ok_or("Repository is required")?;
        let store = self.store.ok_or("Media store is required")?;
        let events = self
            .events
            .unwrap_or_else(|| Arc::new(TracingEventSink::new()));

        Ok(PropertyServiceImpl::new(repository, store, events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::outbound::persistence::InMemoryPropertyRepository,
        domain::{
            errors::{RepositoryResult, ValidationError},
            models::{ImageUpload, PropertyDetails},
        },
        services::test_support::{RecordingEventSink, ScriptedMediaStore, image},
    };
    use bigdecimal::BigDecimal;

    struct Harness {
        service: PropertyServiceImpl,
        store: Arc<ScriptedMediaStore>,
        repository: Arc<InMemoryPropertyRepository>,
        events: Arc<RecordingEventSink>,
    }

    fn harness(store: ScriptedMediaStore) -> Harness {
        let store = Arc::new(store);
        let repository = Arc::new(InMemoryPropertyRepository::new());
        let events = Arc::new(RecordingEventSink::new());
        let service = PropertyServiceImpl::new(repository.clone(), store.clone(), events.clone());
        Harness {
            service,
            store,
            repository,
            events,
        }
    }

    fn agent(id: i64) -> AgentId {
        AgentId::new(id).unwrap()
    }

    fn details(title: &str) -> PropertyDetails {
        PropertyDetails {
            title: title.to_string(),
            description: "Bright and quiet".to_string(),
            address: "1 Harbour Road".to_string(),
            rental_amount: BigDecimal::from(900),
            bedrooms: 2,
            bathrooms: 1,
        }
    }

    fn images(names: &[&str]) -> Vec<ImageUpload> {
        names.iter().map(|n| image(n)).collect()
    }

    fn create_request(names: &[&str], primary_index: usize) -> CreatePropertyRequest {
        CreatePropertyRequest {
            agent_id: agent(1),
            details: details("Harbour flat"),
            images: ImageSetRequest::new(images(names)).with_primary_index(primary_index),
        }
    }

    fn primary_count(property: &Property) -> usize {
        property.images.iter().filter(|i| i.is_primary).count()
    }

    #[tokio::test]
    async fn test_create_with_all_uploads_succeeding() {
        let h = harness(ScriptedMediaStore::new());

        let created = h
            .service
            .create_property(create_request(&["a.jpg", "b.jpg", "c.jpg"], 2))
            .await
            .unwrap();

        assert_eq!(created.images.len(), 3);
        assert_eq!(primary_count(&created), 1);
        assert!(created.images[2].is_primary);
        let orders: Vec<i32> = created.images.iter().map(|i| i.display_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);

        let stored = h.repository.get_property(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.images, created.images);
    }

    #[tokio::test]
    async fn test_create_remaps_primary_when_its_upload_fails() {
        let h = harness(ScriptedMediaStore::new().fail_upload_of("b.jpg"));

        let created = h
            .service
            .create_property(create_request(&["a.jpg", "b.jpg", "c.jpg"], 1))
            .await
            .unwrap();

        assert_eq!(created.images.len(), 2);
        assert!(created.images[0].public_id.as_str().ends_with("a.jpg"));
        assert!(created.images[1].public_id.as_str().ends_with("c.jpg"));
        assert!(created.images[0].is_primary);
        assert_eq!(primary_count(&created), 1);
        assert!(h.events.events().iter().any(|e| matches!(
            e,
            MediaEvent::PrimaryReassigned {
                requested: 1,
                assigned: 0
            }
        )));
    }

    #[tokio::test]
    async fn test_create_pairs_orders_by_request_position() {
        let h = harness(ScriptedMediaStore::new().fail_upload_of("a.jpg"));

        let mut request = create_request(&["a.jpg", "b.jpg", "c.jpg"], 2);
        request.images = request.images.with_orders(vec![30, 20]);

        let created = h.service.create_property(request).await.unwrap();

        let orders: Vec<i32> = created.images.iter().map(|i| i.display_order).collect();
        assert_eq!(orders, vec![20, 3]);
        assert!(created.images[1].is_primary);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_image_counts_before_uploading() {
        let h = harness(ScriptedMediaStore::new());

        let six = h
            .service
            .create_property(create_request(
                &["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg", "6.jpg"],
                0,
            ))
            .await;
        assert!(matches!(
            six,
            Err(ListingError::Validation(ValidationError::TooManyImages {
                actual: 6,
                max: 5
            }))
        ));

        let none = h.service.create_property(create_request(&[], 0)).await;
        assert!(matches!(
            none,
            Err(ListingError::Validation(ValidationError::NoImages))
        ));

        let bad_primary = h
            .service
            .create_property(create_request(&["1.jpg"], 1))
            .await;
        assert!(matches!(
            bad_primary,
            Err(ListingError::Validation(
                ValidationError::PrimaryIndexOutOfRange { .. }
            ))
        ));

        assert!(h.store.upload_calls().is_empty());
        assert!(h.repository.list_properties().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_accepts_exactly_five_images() {
        let h = harness(ScriptedMediaStore::new());

        let created = h
            .service
            .create_property(create_request(
                &["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg"],
                4,
            ))
            .await
            .unwrap();

        assert_eq!(created.images.len(), 5);
        assert!(created.images[4].is_primary);
    }

    #[tokio::test]
    async fn test_create_fails_when_every_upload_fails() {
        let h = harness(
            ScriptedMediaStore::new()
                .fail_upload_of("a.jpg")
                .fail_upload_of("b.jpg"),
        );

        let result = h
            .service
            .create_property(create_request(&["a.jpg", "b.jpg"], 0))
            .await;

        assert!(matches!(
            result,
            Err(ListingError::UploadExhausted { attempted: 2 })
        ));
        assert!(h.repository.list_properties().await.unwrap().is_empty());
        assert_eq!(h.store.object_count(), 0);
    }

    #[tokio::test]
    async fn test_update_without_images_leaves_image_set_alone() {
        let h = harness(ScriptedMediaStore::new());
        let created = h
            .service
            .create_property(create_request(&["a.jpg", "b.jpg"], 0))
            .await
            .unwrap();

        let updated = h
            .service
            .update_property(UpdatePropertyRequest {
                property_id: created.id,
                agent_id: agent(1),
                details: details("Renamed flat"),
                images: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.details.title, "Renamed flat");
        assert_eq!(updated.images, created.images);
        assert_eq!(h.store.upload_calls().len(), 2);
        assert!(h.store.delete_calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_images_then_reclaims_old_ones() {
        let h = harness(ScriptedMediaStore::new());
        let created = h
            .service
            .create_property(create_request(&["x.jpg", "y.jpg"], 1))
            .await
            .unwrap();
        let old_ids: Vec<String> = created
            .images
            .iter()
            .map(|i| i.public_id.as_str().to_string())
            .collect();

        let updated = h
            .service
            .update_property(UpdatePropertyRequest {
                property_id: created.id,
                agent_id: agent(1),
                details: details("Harbour flat"),
                images: Some(ImageSetRequest::new(images(&["z.jpg"]))),
            })
            .await
            .unwrap();

        assert_eq!(updated.images.len(), 1);
        assert!(updated.images[0].is_primary);
        assert_eq!(h.store.delete_calls(), old_ids);
        for id in &old_ids {
            assert!(!h.store.contains(id));
        }

        let stored = h.repository.get_property(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.images, updated.images);
    }

    #[tokio::test]
    async fn test_update_with_exhausted_uploads_keeps_old_images() {
        let h = harness(ScriptedMediaStore::new().fail_upload_of("z.jpg"));
        let created = h
            .service
            .create_property(create_request(&["x.jpg", "y.jpg"], 0))
            .await
            .unwrap();

        let result = h
            .service
            .update_property(UpdatePropertyRequest {
                property_id: created.id,
                agent_id: agent(1),
                details: details("Should not stick"),
                images: Some(ImageSetRequest::new(images(&["z.jpg"]))),
            })
            .await;

        assert!(matches!(
            result,
            Err(ListingError::UploadExhausted { attempted: 1 })
        ));
        let stored = h.repository.get_property(&created.id).await.unwrap().unwrap();
        assert_eq!(stored, created);
        assert!(h.store.delete_calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_rejects_other_agents() {
        let h = harness(ScriptedMediaStore::new());
        let created = h
            .service
            .create_property(create_request(&["x.jpg"], 0))
            .await
            .unwrap();

        let result = h
            .service
            .update_property(UpdatePropertyRequest {
                property_id: created.id,
                agent_id: agent(2),
                details: details("Hijack"),
                images: Some(ImageSetRequest::new(images(&["z.jpg"]))),
            })
            .await;

        assert!(matches!(result, Err(ListingError::NotOwner { .. })));
        assert_eq!(h.store.upload_calls(), vec!["x.jpg".to_string()]);
    }

    #[tokio::test]
    async fn test_update_unknown_property() {
        let h = harness(ScriptedMediaStore::new());

        let result = h
            .service
            .update_property(UpdatePropertyRequest {
                property_id: PropertyId::generate(),
                agent_id: agent(1),
                details: details("Nothing"),
                images: None,
            })
            .await;

        assert!(matches!(result, Err(ListingError::PropertyNotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_attempts_every_image_despite_failures() {
        let h = harness(ScriptedMediaStore::new().fail_all_deletes());
        let created = h
            .service
            .create_property(create_request(&["1.jpg", "2.jpg", "3.jpg"], 0))
            .await
            .unwrap();

        h.service
            .delete_property(DeletePropertyRequest {
                property_id: created.id,
                agent_id: agent(1),
            })
            .await
            .unwrap();

        assert_eq!(h.store.delete_calls().len(), 3);
        assert!(h.repository.get_property(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_property() {
        let h = harness(ScriptedMediaStore::new());

        let result = h
            .service
            .delete_property(DeletePropertyRequest {
                property_id: PropertyId::generate(),
                agent_id: agent(1),
            })
            .await;

        assert!(matches!(result, Err(ListingError::PropertyNotFound { .. })));
        assert!(h.store.delete_calls().is_empty());
    }

    /// Repository whose writes always fail
    struct BrokenRepository;

    #[async_trait]
    impl PropertyRepository for BrokenRepository {
        async fn create_property_with_images(&self, _property: &Property) -> RepositoryResult<()> {
            Err(RepositoryError::Infrastructure {
                message: "disk full".to_string(),
                source: None,
            })
        }

        async fn get_property(&self, _id: &PropertyId) -> RepositoryResult<Option<Property>> {
            Ok(None)
        }

        async fn list_properties(&self) -> RepositoryResult<Vec<Property>> {
            Ok(Vec::new())
        }

        async fn list_properties_by_agent(
            &self,
            _agent_id: AgentId,
        ) -> RepositoryResult<Vec<Property>> {
            Ok(Vec::new())
        }

        async fn update_details(
            &self,
            id: &PropertyId,
            _details: &PropertyDetails,
        ) -> RepositoryResult<Property> {
            Err(RepositoryError::PropertyNotFound { id: *id })
        }

        async fn replace_image_set(
            &self,
            id: &PropertyId,
            _details: &PropertyDetails,
            _images: &[PropertyImage],
        ) -> RepositoryResult<Vec<PublicId>> {
            Err(RepositoryError::PropertyNotFound { id: *id })
        }

        async fn delete_property(
            &self,
            _id: &PropertyId,
        ) -> RepositoryResult<Option<Vec<PublicId>>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_failed_commit_reclaims_fresh_uploads() {
        let store = Arc::new(ScriptedMediaStore::new());
        let events = Arc::new(RecordingEventSink::new());
        let service =
            PropertyServiceImpl::new(Arc::new(BrokenRepository), store.clone(), events.clone());

        let result = service
            .create_property(create_request(&["a.jpg", "b.jpg"], 0))
            .await;

        assert!(matches!(result, Err(ListingError::Repository { .. })));
        assert_eq!(store.upload_calls().len(), 2);
        assert_eq!(store.delete_calls().len(), 2);
        assert_eq!(store.object_count(), 0);
        assert!(
            events
                .events()
                .iter()
                .any(|e| matches!(e, MediaEvent::CommitFailed { orphaned: 2, .. }))
        );
    }

    /// In-memory repository whose image-set swap always fails
    struct SwapFailingRepository {
        inner: InMemoryPropertyRepository,
    }

    #[async_trait]
    impl PropertyRepository for SwapFailingRepository {
        async fn create_property_with_images(&self, property: &Property) -> RepositoryResult<()> {
            self.inner.create_property_with_images(property).await
        }

        async fn get_property(&self, id: &PropertyId) -> RepositoryResult<Option<Property>> {
            self.inner.get_property(id).await
        }

        async fn list_properties(&self) -> RepositoryResult<Vec<Property>> {
            self.inner.list_properties().await
        }

        async fn list_properties_by_agent(
            &self,
            agent_id: AgentId,
        ) -> RepositoryResult<Vec<Property>> {
            self.inner.list_properties_by_agent(agent_id).await
        }

        async fn update_details(
            &self,
            id: &PropertyId,
            details: &PropertyDetails,
        ) -> RepositoryResult<Property> {
            self.inner.update_details(id, details).await
        }

        async fn replace_image_set(
            &self,
            _id: &PropertyId,
            _details: &PropertyDetails,
            _images: &[PropertyImage],
        ) -> RepositoryResult<Vec<PublicId>> {
            Err(RepositoryError::Infrastructure {
                message: "serialization failure".to_string(),
                source: None,
            })
        }

        async fn delete_property(
            &self,
            id: &PropertyId,
        ) -> RepositoryResult<Option<Vec<PublicId>>> {
            self.inner.delete_property(id).await
        }
    }

    #[tokio::test]
    async fn test_failed_image_swap_reclaims_fresh_uploads_only() {
        let store = Arc::new(ScriptedMediaStore::new());
        let events = Arc::new(RecordingEventSink::new());
        let repository = Arc::new(SwapFailingRepository {
            inner: InMemoryPropertyRepository::new(),
        });
        let service = PropertyServiceImpl::new(repository.clone(), store.clone(), events.clone());

        let created = service
            .create_property(create_request(&["x.jpg", "y.jpg"], 0))
            .await
            .unwrap();
        let old_ids: Vec<String> = created
            .images
            .iter()
            .map(|i| i.public_id.as_str().to_string())
            .collect();

        let result = service
            .update_property(UpdatePropertyRequest {
                property_id: created.id,
                agent_id: agent(1),
                details: details("Harbour flat"),
                images: Some(ImageSetRequest::new(images(&["p.jpg", "q.jpg", "r.jpg"]))),
            })
            .await;

        assert!(matches!(result, Err(ListingError::Repository { .. })));

        let deleted = store.delete_calls();
        assert_eq!(deleted.len(), 3);
        assert!(deleted.iter().all(|id| !old_ids.contains(id)));
        for id in &old_ids {
            assert!(store.contains(id));
        }
        assert_eq!(store.object_count(), 2);

        let stored = repository.get_property(&created.id).await.unwrap().unwrap();
        assert_eq!(stored, created);
        assert!(events.events().iter().any(|e| matches!(
            e,
            MediaEvent::CommitFailed { property_id, orphaned: 3, .. } if *property_id == created.id
        )));
    }

    #[test]
    fn test_build_records_keeps_single_primary() {
        let events = RecordingEventSink::new();
        let set = ImageSetRequest::new(images(&["a.jpg", "b.jpg", "c.jpg"])).with_primary_index(2);
        let uploaded = vec![
            UploadedImage {
                position: 1,
                url: "https://cdn.test/b".to_string(),
                public_id: PublicId::new("b".to_string()).unwrap(),
            },
            UploadedImage {
                position: 2,
                url: "https://cdn.test/c".to_string(),
                public_id: PublicId::new("c".to_string()).unwrap(),
            },
        ];

        let records =
            build_image_records(PropertyId::generate(), &set, &uploaded, Utc::now(), &events);

        assert_eq!(records.len(), 2);
        assert!(!records[0].is_primary);
        assert!(records[1].is_primary);
        assert!(events.events().is_empty());
    }
}
