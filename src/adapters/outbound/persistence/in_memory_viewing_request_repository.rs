use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{RepositoryError, RepositoryResult},
        models::{ViewingRequest, ViewingStatus},
        value_objects::{AgentId, ViewingRequestId},
    },
    ports::repositories::ViewingRequestRepository,
};

/// In-memory implementation of ViewingRequestRepository
#[derive(Clone, Default)]
pub struct InMemoryViewingRequestRepository {
    requests: Arc<RwLock<HashMap<ViewingRequestId, ViewingRequest>>>,
}

impl InMemoryViewingRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ViewingRequestRepository for InMemoryViewingRequestRepository {
    async fn create_viewing_request(&self, request: &ViewingRequest) -> RepositoryResult<()> {
        let mut requests = self.requests.write().await;

        if requests.contains_key(&request.id) {
            return Err(RepositoryError::DuplicateViewingRequest { id: request.id });
        }

        requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn get_viewing_request(
        &self,
        id: &ViewingRequestId,
    ) -> RepositoryResult<Option<ViewingRequest>> {
        Ok(self.requests.read().await.get(id).cloned())
    }

    async fn list_viewing_requests_by_agent(
        &self,
        agent_id: AgentId,
    ) -> RepositoryResult<Vec<ViewingRequest>> {
        let requests = self.requests.read().await;

        let mut found: Vec<ViewingRequest> = requests
            .values()
            .filter(|r| r.agent_id == agent_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(found)
    }

    async fn update_viewing_status(
        &self,
        id: &ViewingRequestId,
        expected: ViewingStatus,
        status: ViewingStatus,
    ) -> RepositoryResult<Option<ViewingRequest>> {
        let mut requests = self.requests.write().await;

        let request = requests
            .get_mut(id)
            .ok_or(RepositoryError::ViewingRequestNotFound { id: *id })?;

        if request.status != expected {
            return Ok(None);
        }

        request.status = status;
        Ok(Some(request.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        models::{GuestContact, Requester},
        value_objects::PropertyId,
    };
    use chrono::{Duration, Utc};

    fn request(agent: i64, minutes_ago: i64) -> ViewingRequest {
        let now = Utc::now();
        ViewingRequest {
            id: ViewingRequestId::generate(),
            property_id: PropertyId::generate(),
            agent_id: AgentId::new(agent).unwrap(),
            requester: Requester::Guest(GuestContact {
                name: "Sam Visitor".to_string(),
                email: "sam@example.com".to_string(),
                phone: "0161 496 0000".to_string(),
            }),
            viewing_date: now + Duration::days(3),
            preferred_time: Some("Morning".to_string()),
            message: None,
            status: ViewingStatus::Pending,
            created_at: now - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn test_list_by_agent_newest_first() {
        let repo = InMemoryViewingRequestRepository::new();
        let older = request(4, 30);
        let newer = request(4, 5);
        let other = request(9, 1);
        for r in [&older, &newer, &other] {
            repo.create_viewing_request(r).await.unwrap();
        }

        let listed = repo
            .list_viewing_requests_by_agent(AgentId::new(4).unwrap())
            .await
            .unwrap();

        let ids: Vec<ViewingRequestId> = listed.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn test_duplicate_create_rejected() {
        let repo = InMemoryViewingRequestRepository::new();
        let r = request(4, 0);
        repo.create_viewing_request(&r).await.unwrap();

        assert!(matches!(
            repo.create_viewing_request(&r).await,
            Err(RepositoryError::DuplicateViewingRequest { .. })
        ));
    }

    #[tokio::test]
    async fn test_status_update_is_compare_and_set() {
        let repo = InMemoryViewingRequestRepository::new();
        let r = request(4, 0);
        repo.create_viewing_request(&r).await.unwrap();

        let approved = repo
            .update_viewing_status(&r.id, ViewingStatus::Pending, ViewingStatus::Approved)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(approved.status, ViewingStatus::Approved);

        let stale = repo
            .update_viewing_status(&r.id, ViewingStatus::Pending, ViewingStatus::Rejected)
            .await
            .unwrap();
        assert!(stale.is_none());

        let stored = repo.get_viewing_request(&r.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ViewingStatus::Approved);
    }

    #[tokio::test]
    async fn test_status_update_of_unknown_request() {
        let repo = InMemoryViewingRequestRepository::new();

        let result = repo
            .update_viewing_status(
                &ViewingRequestId::generate(),
                ViewingStatus::Pending,
                ViewingStatus::Approved,
            )
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::ViewingRequestNotFound { .. })
        ));
    }
}
