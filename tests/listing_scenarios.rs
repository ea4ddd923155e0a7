use async_trait::async_trait;
use bigdecimal::BigDecimal;
use object_store::memory::InMemory;
use property_listing_server::{
    AgentId, CreatePropertyRequest, DeleteOutcome, DeletePropertyRequest, ImageSetRequest,
    ImageUpload, InMemoryPropertyRepository, ListingError, MediaStore, MediaStoreError,
    ObjectStoreMediaAdapter, Property, PropertyDetails, PropertyId, PropertyRepository,
    PropertyService, PropertyServiceBuilder, PropertyServiceImpl, PublicId, StoredMedia,
    UpdatePropertyRequest, ValidationError, domain::errors::MediaStoreResult,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Media store that fails chosen uploads and, optionally, every delete
///
/// When a property is watched, each delete records the image set the repository
/// holds for it at that moment.
struct FaultyStore {
    inner: ObjectStoreMediaAdapter,
    failing_uploads: HashSet<String>,
    fail_deletes: bool,
    repository: Arc<InMemoryPropertyRepository>,
    watched: Mutex<Option<PropertyId>>,
    seen_at_delete: Mutex<Vec<Vec<PublicId>>>,
    upload_calls: Mutex<Vec<String>>,
    delete_calls: Mutex<Vec<PublicId>>,
}

impl FaultyStore {
    fn new(repository: Arc<InMemoryPropertyRepository>) -> Self {
        Self {
            inner: ObjectStoreMediaAdapter::new(
                Arc::new(InMemory::new()),
                "https://media.test",
                "properties",
            ),
            failing_uploads: HashSet::new(),
            fail_deletes: false,
            repository,
            watched: Mutex::new(None),
            seen_at_delete: Mutex::new(Vec::new()),
            upload_calls: Mutex::new(Vec::new()),
            delete_calls: Mutex::new(Vec::new()),
        }
    }

    fn failing_upload(mut self, file_name: &str) -> Self {
        self.failing_uploads.insert(file_name.to_string());
        self
    }

    fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    fn watch(&self, id: PropertyId) {
        *self.watched.lock().unwrap() = Some(id);
    }

    fn seen_at_delete(&self) -> Vec<Vec<PublicId>> {
        self.seen_at_delete.lock().unwrap().clone()
    }

    fn upload_calls(&self) -> usize {
        self.upload_calls.lock().unwrap().len()
    }

    fn delete_calls(&self) -> Vec<PublicId> {
        self.delete_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStore for FaultyStore {
    async fn upload(&self, image: &ImageUpload) -> MediaStoreResult<StoredMedia> {
        self.upload_calls
            .lock()
            .unwrap()
            .push(image.file_name.clone());

        if self.failing_uploads.contains(&image.file_name) {
            return Err(MediaStoreError::Transport {
                message: format!("connection reset while sending {}", image.file_name),
            });
        }
        self.inner.upload(image).await
    }

    async fn delete(&self, public_id: &PublicId) -> MediaStoreResult<DeleteOutcome> {
        self.delete_calls.lock().unwrap().push(public_id.clone());

        let watched = *self.watched.lock().unwrap();
        if let Some(id) = watched {
            let current = self
                .repository
                .get_property(&id)
                .await
                .ok()
                .flatten()
                .map(|p| p.public_ids())
                .unwrap_or_default();
            self.seen_at_delete.lock().unwrap().push(current);
        }

        if self.fail_deletes {
            return Err(MediaStoreError::Timeout {
                operation: "delete".to_string(),
            });
        }
        self.inner.delete(public_id).await
    }
}

fn agent() -> AgentId {
    AgentId::new(11).unwrap()
}

fn details() -> PropertyDetails {
    PropertyDetails {
        title: "Two-bed terrace".to_string(),
        description: "Close to the station".to_string(),
        address: "14 Quarry Road".to_string(),
        rental_amount: BigDecimal::from(950),
        bedrooms: 2,
        bathrooms: 1,
    }
}

fn jpeg(name: &str) -> ImageUpload {
    ImageUpload::new(name, name.as_bytes().to_vec()).with_content_type("image/jpeg")
}

fn service(store: Arc<FaultyStore>, repository: Arc<InMemoryPropertyRepository>) -> PropertyServiceImpl {
    PropertyServiceBuilder::new()
        .repository(repository)
        .store(store)
        .build()
        .unwrap()
}

async fn create(service: &PropertyServiceImpl, images: ImageSetRequest) -> Property {
    service
        .create_property(CreatePropertyRequest {
            agent_id: agent(),
            details: details(),
            images,
        })
        .await
        .unwrap()
}

fn assert_single_primary(property: &Property) {
    let primaries = property.images.iter().filter(|i| i.is_primary).count();
    assert_eq!(primaries, 1, "property {} has {} primaries", property.id, primaries);
}

#[tokio::test]
async fn failed_primary_upload_falls_back_to_first_survivor() {
    let repository = Arc::new(InMemoryPropertyRepository::new());
    let store = Arc::new(FaultyStore::new(repository.clone()).failing_upload("b.jpg"));
    let service = service(store.clone(), repository);

    let property = create(
        &service,
        ImageSetRequest::new(vec![jpeg("a.jpg"), jpeg("b.jpg"), jpeg("c.jpg")])
            .with_primary_index(1),
    )
    .await;

    assert_eq!(store.upload_calls(), 3);
    assert_eq!(property.images.len(), 2);
    assert_single_primary(&property);

    let primary = property.primary_image().unwrap();
    assert_eq!(primary.display_order, 1);
    let orders: Vec<i32> = property.sorted_images().iter().map(|i| i.display_order).collect();
    assert_eq!(orders, vec![1, 3]);
}

#[tokio::test]
async fn image_count_matches_successful_uploads() {
    let patterns: [&[&str]; 4] = [&[], &["0.jpg"], &["1.jpg", "3.jpg"], &["0.jpg", "1.jpg", "2.jpg", "3.jpg"]];

    for failing in patterns {
        let repository = Arc::new(InMemoryPropertyRepository::new());
        let mut store = FaultyStore::new(repository.clone());
        for name in failing {
            store = store.failing_upload(name);
        }
        let service = service(Arc::new(store), repository);

        let images: Vec<ImageUpload> = (0..5).map(|i| jpeg(&format!("{}.jpg", i))).collect();
        for primary in 0..5 {
            let property = create(
                &service,
                ImageSetRequest::new(images.clone()).with_primary_index(primary),
            )
            .await;

            assert_eq!(property.images.len(), 5 - failing.len());
            assert_single_primary(&property);
        }
    }
}

#[tokio::test]
async fn image_count_bounds_are_checked_before_upload() {
    let repository = Arc::new(InMemoryPropertyRepository::new());
    let store = Arc::new(FaultyStore::new(repository.clone()));
    let service = service(store.clone(), repository.clone());

    let six: Vec<ImageUpload> = (0..6).map(|i| jpeg(&format!("{}.jpg", i))).collect();
    let too_many = service
        .create_property(CreatePropertyRequest {
            agent_id: agent(),
            details: details(),
            images: ImageSetRequest::new(six),
        })
        .await;
    assert!(matches!(
        too_many,
        Err(ListingError::Validation(ValidationError::TooManyImages { actual: 6, max: 5 }))
    ));

    let none = service
        .create_property(CreatePropertyRequest {
            agent_id: agent(),
            details: details(),
            images: ImageSetRequest::new(Vec::new()),
        })
        .await;
    assert!(matches!(
        none,
        Err(ListingError::Validation(ValidationError::NoImages))
    ));

    assert_eq!(store.upload_calls(), 0);
    assert!(repository.list_properties().await.unwrap().is_empty());

    let five: Vec<ImageUpload> = (0..5).map(|i| jpeg(&format!("{}.jpg", i))).collect();
    let property = create(&service, ImageSetRequest::new(five)).await;
    assert_eq!(property.images.len(), 5);
}

#[tokio::test]
async fn exhausted_update_keeps_existing_images() {
    let repository = Arc::new(InMemoryPropertyRepository::new());
    let store = Arc::new(FaultyStore::new(repository.clone()).failing_upload("z.jpg"));
    let service = service(store.clone(), repository.clone());

    let property = create(
        &service,
        ImageSetRequest::new(vec![jpeg("x.jpg"), jpeg("y.jpg")]),
    )
    .await;

    let result = service
        .update_property(UpdatePropertyRequest {
            property_id: property.id,
            agent_id: agent(),
            details: details(),
            images: Some(ImageSetRequest::new(vec![jpeg("z.jpg")])),
        })
        .await;

    assert!(matches!(
        result,
        Err(ListingError::UploadExhausted { attempted: 1 })
    ));
    let stored = service.get_property(&property.id).await.unwrap();
    assert_eq!(stored.public_ids(), property.public_ids());
    assert!(store.delete_calls().is_empty());
}

#[tokio::test]
async fn old_images_are_removed_only_after_the_new_set_is_committed() {
    let repository = Arc::new(InMemoryPropertyRepository::new());
    let store = Arc::new(FaultyStore::new(repository.clone()).failing_deletes());
    let service = service(store.clone(), repository.clone());

    let property = create(
        &service,
        ImageSetRequest::new(vec![jpeg("x.jpg"), jpeg("y.jpg")]),
    )
    .await;
    store.watch(property.id);

    let updated = service
        .update_property(UpdatePropertyRequest {
            property_id: property.id,
            agent_id: agent(),
            details: details(),
            images: Some(ImageSetRequest::new(vec![jpeg("z.jpg")])),
        })
        .await
        .unwrap();

    // Deletes failed, yet the update stands
    assert_eq!(updated.images.len(), 1);
    assert_eq!(store.delete_calls(), property.public_ids());

    let new_ids = updated.public_ids();
    let seen = store.seen_at_delete();
    assert_eq!(seen.len(), 2);
    for snapshot in seen {
        assert_eq!(snapshot, new_ids);
    }
}

#[tokio::test]
async fn delete_attempts_every_image_despite_failures() {
    let repository = Arc::new(InMemoryPropertyRepository::new());
    let store = Arc::new(FaultyStore::new(repository.clone()).failing_deletes());
    let service = service(store.clone(), repository.clone());

    let images: Vec<ImageUpload> = (0..4).map(|i| jpeg(&format!("{}.jpg", i))).collect();
    let property = create(&service, ImageSetRequest::new(images)).await;
    store.watch(property.id);

    service
        .delete_property(DeletePropertyRequest {
            property_id: property.id,
            agent_id: agent(),
        })
        .await
        .unwrap();

    assert_eq!(store.delete_calls().len(), 4);
    // The record was gone before the first remote delete ran
    assert!(store.seen_at_delete().iter().all(|ids| ids.is_empty()));
    assert!(matches!(
        service.get_property(&property.id).await,
        Err(ListingError::PropertyNotFound { .. })
    ));
}

#[tokio::test]
async fn other_agents_cannot_touch_a_listing() {
    let repository = Arc::new(InMemoryPropertyRepository::new());
    let store = Arc::new(FaultyStore::new(repository.clone()));
    let service = service(store.clone(), repository.clone());

    let property = create(&service, ImageSetRequest::new(vec![jpeg("a.jpg")])).await;
    let intruder = AgentId::new(99).unwrap();

    let result = service
        .delete_property(DeletePropertyRequest {
            property_id: property.id,
            agent_id: intruder,
        })
        .await;

    assert!(matches!(result, Err(ListingError::NotOwner { .. })));
    assert!(store.delete_calls().is_empty());
    assert!(service.get_property(&property.id).await.is_ok());
}
