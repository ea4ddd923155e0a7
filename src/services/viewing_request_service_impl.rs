use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    domain::{
        errors::{ListingError, ListingResult},
        models::{
            AgentViewingRequest, CreateViewingRequest, GuestViewingRequest, Property, Requester,
            UpdateViewingStatusRequest, ViewingRequest, ViewingStatus,
        },
        value_objects::{AgentId, PropertyId, ViewingRequestId},
    },
    ports::{
        repositories::{PropertyRepository, ViewingRequestRepository},
        services::ViewingRequestService,
    },
};

/// Implementation of ViewingRequestService
///
/// Requests are addressed to whoever owns the property when they are made.
/// Agent notification is left to the log; no transport is wired in.
#[derive(Clone)]
pub struct ViewingRequestServiceImpl {
    properties: Arc<dyn PropertyRepository>,
    requests: Arc<dyn ViewingRequestRepository>,
}

impl ViewingRequestServiceImpl {
    pub fn new(
        properties: Arc<dyn PropertyRepository>,
        requests: Arc<dyn ViewingRequestRepository>,
    ) -> Self {
        Self {
            properties,
            requests,
        }
    }

    async fn existing_property(&self, id: &PropertyId) -> ListingResult<Property> {
        self.properties
            .get_property(id)
            .await?
            .ok_or(ListingError::PropertyNotFound { id: *id })
    }

    async fn record(&self, request: ViewingRequest) -> ListingResult<ViewingRequest> {
        self.requests.create_viewing_request(&request).await?;

        tracing::info!(
            viewing_request_id = %request.id,
            property_id = %request.property_id,
            agent_id = %request.agent_id,
            guest = matches!(request.requester, Requester::Guest(_)),
            "Viewing request received"
        );

        Ok(request)
    }
}

#[async_trait]
impl ViewingRequestService for ViewingRequestServiceImpl {
    async fn request_viewing(&self, request: CreateViewingRequest) -> ListingResult<ViewingRequest> {
        let property = self.existing_property(&request.property_id).await?;

        self.record(ViewingRequest {
            id: ViewingRequestId::generate(),
            property_id: property.id,
            agent_id: property.agent_id,
            requester: Requester::Tenant {
                tenant_id: request.tenant_id,
            },
            viewing_date: request.viewing_date,
            preferred_time: None,
            message: None,
            status: ViewingStatus::Pending,
            created_at: Utc::now(),
        })
        .await
    }

    async fn request_guest_viewing(
        &self,
        request: GuestViewingRequest,
    ) -> ListingResult<ViewingRequest> {
        request.validate()?;
        let property = self.existing_property(&request.property_id).await?;

        let message = request
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        self.record(ViewingRequest {
            id: ViewingRequestId::generate(),
            property_id: property.id,
            agent_id: property.agent_id,
            requester: Requester::Guest(request.contact),
            viewing_date: request.preferred_date,
            preferred_time: Some(request.preferred_time.trim().to_string()),
            message,
            status: ViewingStatus::Pending,
            created_at: Utc::now(),
        })
        .await
    }

    async fn list_for_agent(&self, agent_id: AgentId) -> ListingResult<Vec<AgentViewingRequest>> {
        let titles: HashMap<PropertyId, String> = self
            .properties
            .list_properties_by_agent(agent_id)
            .await?
            .into_iter()
            .map(|p| (p.id, p.details.title))
            .collect();

        let requests = self.requests.list_viewing_requests_by_agent(agent_id).await?;

        // Requests whose property is gone are not shown
        Ok(requests
            .into_iter()
            .filter_map(|request| {
                let property_title = titles.get(&request.property_id)?.clone();
                Some(AgentViewingRequest {
                    request,
                    property_title,
                })
            })
            .collect())
    }

    async fn update_status(
        &self,
        request: UpdateViewingStatusRequest,
    ) -> ListingResult<ViewingRequest> {
        let not_found = ListingError::ViewingRequestNotFound {
            id: request.request_id,
        };

        let current = self
            .requests
            .get_viewing_request(&request.request_id)
            .await?
            .filter(|r| r.is_addressed_to(request.agent_id))
            .ok_or_else(|| not_found.clone())?;

        if self.properties.get_property(&current.property_id).await?.is_none() {
            return Err(not_found);
        }

        if !current.status.can_transition_to(request.status) {
            return Err(ListingError::InvalidStatusTransition {
                from: current.status,
                to: request.status,
            });
        }

        let updated = self
            .requests
            .update_viewing_status(&current.id, current.status, request.status)
            .await?
            .ok_or(ListingError::InvalidStatusTransition {
                from: current.status,
                to: request.status,
            })?;

        tracing::info!(
            viewing_request_id = %updated.id,
            from = %current.status,
            to = %updated.status,
            "Viewing status updated"
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::outbound::persistence::{
            InMemoryPropertyRepository, InMemoryViewingRequestRepository,
        },
        domain::models::{GuestContact, PropertyDetails},
    };
    use bigdecimal::BigDecimal;
    use chrono::Duration;

    struct Harness {
        service: ViewingRequestServiceImpl,
        properties: Arc<InMemoryPropertyRepository>,
    }

    fn harness() -> Harness {
        let properties = Arc::new(InMemoryPropertyRepository::new());
        let requests = Arc::new(InMemoryViewingRequestRepository::new());
        Harness {
            service: ViewingRequestServiceImpl::new(properties.clone(), requests),
            properties,
        }
    }

    fn agent(id: i64) -> AgentId {
        AgentId::new(id).unwrap()
    }

    async fn listing(h: &Harness, owner: i64, title: &str) -> Property {
        let now = Utc::now();
        let property = Property {
            id: PropertyId::generate(),
            agent_id: agent(owner),
            details: PropertyDetails {
                title: title.to_string(),
                description: "Quiet street".to_string(),
                address: "4 Orchard Close".to_string(),
                rental_amount: BigDecimal::from(800),
                bedrooms: 2,
                bathrooms: 1,
            },
            images: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        h.properties.create_property_with_images(&property).await.unwrap();
        property
    }

    fn guest(property_id: PropertyId) -> GuestViewingRequest {
        GuestViewingRequest {
            property_id,
            contact: GuestContact {
                name: "Robin Guest".to_string(),
                email: "robin@example.org".to_string(),
                phone: "+1 555 010 9999".to_string(),
            },
            preferred_date: Utc::now() + Duration::days(2),
            preferred_time: " Saturday morning ".to_string(),
            message: Some("   ".to_string()),
        }
    }

    fn decide(id: ViewingRequestId, by: i64, status: ViewingStatus) -> UpdateViewingStatusRequest {
        UpdateViewingStatusRequest {
            request_id: id,
            agent_id: agent(by),
            status,
        }
    }

    #[tokio::test]
    async fn test_tenant_request_is_addressed_to_the_owner() {
        let h = harness();
        let property = listing(&h, 3, "Mews house").await;

        let created = h
            .service
            .request_viewing(CreateViewingRequest {
                property_id: property.id,
                tenant_id: agent(40),
                viewing_date: Utc::now() + Duration::days(1),
            })
            .await
            .unwrap();

        assert_eq!(created.agent_id, agent(3));
        assert_eq!(created.status, ViewingStatus::Pending);
        assert_eq!(created.requester, Requester::Tenant { tenant_id: agent(40) });
    }

    #[tokio::test]
    async fn test_guest_request_is_normalised() {
        let h = harness();
        let property = listing(&h, 3, "Mews house").await;

        let created = h.service.request_guest_viewing(guest(property.id)).await.unwrap();

        assert_eq!(created.preferred_time.as_deref(), Some("Saturday morning"));
        assert_eq!(created.message, None);
        assert!(matches!(created.requester, Requester::Guest(_)));
    }

    #[tokio::test]
    async fn test_request_for_unknown_property() {
        let h = harness();

        let result = h.service.request_guest_viewing(guest(PropertyId::generate())).await;

        assert!(matches!(result, Err(ListingError::PropertyNotFound { .. })));
    }

    #[tokio::test]
    async fn test_invalid_guest_is_rejected_before_lookup() {
        let h = harness();
        let mut request = guest(PropertyId::generate());
        request.contact.email = "nobody".to_string();

        let result = h.service.request_guest_viewing(request).await;

        assert!(matches!(result, Err(ListingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_for_agent_joins_titles() {
        let h = harness();
        let mine = listing(&h, 3, "Mews house").await;
        let theirs = listing(&h, 8, "Dock flat").await;

        h.service.request_guest_viewing(guest(mine.id)).await.unwrap();
        h.service.request_guest_viewing(guest(theirs.id)).await.unwrap();

        let listed = h.service.list_for_agent(agent(3)).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].property_title, "Mews house");
        assert_eq!(listed[0].request.property_id, mine.id);
    }

    #[tokio::test]
    async fn test_requests_for_deleted_property_disappear() {
        let h = harness();
        let property = listing(&h, 3, "Mews house").await;
        let created = h.service.request_guest_viewing(guest(property.id)).await.unwrap();

        h.properties.delete_property(&property.id).await.unwrap();

        assert!(h.service.list_for_agent(agent(3)).await.unwrap().is_empty());
        assert!(matches!(
            h.service
                .update_status(decide(created.id, 3, ViewingStatus::Approved))
                .await,
            Err(ListingError::ViewingRequestNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_status_workflow() {
        let h = harness();
        let property = listing(&h, 3, "Mews house").await;
        let created = h.service.request_guest_viewing(guest(property.id)).await.unwrap();

        let approved = h
            .service
            .update_status(decide(created.id, 3, ViewingStatus::Approved))
            .await
            .unwrap();
        assert_eq!(approved.status, ViewingStatus::Approved);

        let completed = h
            .service
            .update_status(decide(created.id, 3, ViewingStatus::Completed))
            .await
            .unwrap();
        assert_eq!(completed.status, ViewingStatus::Completed);

        let reopened = h
            .service
            .update_status(decide(created.id, 3, ViewingStatus::Pending))
            .await;
        assert!(matches!(
            reopened,
            Err(ListingError::InvalidStatusTransition {
                from: ViewingStatus::Completed,
                to: ViewingStatus::Pending
            })
        ));
    }

    #[tokio::test]
    async fn test_other_agents_cannot_see_or_decide() {
        let h = harness();
        let property = listing(&h, 3, "Mews house").await;
        let created = h.service.request_guest_viewing(guest(property.id)).await.unwrap();

        let result = h
            .service
            .update_status(decide(created.id, 9, ViewingStatus::Approved))
            .await;

        assert!(matches!(
            result,
            Err(ListingError::ViewingRequestNotFound { .. })
        ));
        assert!(h.service.list_for_agent(agent(9)).await.unwrap().is_empty());
    }
}
