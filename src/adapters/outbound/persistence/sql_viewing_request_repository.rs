use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    domain::{
        errors::{RepositoryError, RepositoryResult},
        models::{GuestContact, Requester, ViewingRequest, ViewingStatus},
        value_objects::{AgentId, PropertyId, ViewingRequestId},
    },
    ports::repositories::ViewingRequestRepository,
};

/// PostgreSQL implementation of ViewingRequestRepository
///
/// Shares its pool with the property repository; rows cascade away with their
/// property.
#[derive(Clone)]
pub struct SqlViewingRequestRepository {
    pool: PgPool,
}

const VIEWING_COLUMNS: &str = "id, property_id, agent_id, tenant_id, guest_name, guest_email, \
     guest_phone, viewing_date, preferred_time, message, status, created_at";

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> RepositoryError {
    move |e| RepositoryError::Infrastructure {
        message: format!("Database error {}: {}", context, e),
        source: Some(e.to_string()),
    }
}

fn decode_error<E>(e: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(e))
}

impl SqlViewingRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the viewing_requests table; the properties table must exist
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(
            r#"
            CREATE TABLE IF NOT EXISTS viewing_requests (
                id UUID PRIMARY KEY,
                property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
                agent_id BIGINT NOT NULL,
                tenant_id BIGINT,
                guest_name VARCHAR(100),
                guest_email VARCHAR(254),
                guest_phone VARCHAR(32),
                viewing_date TIMESTAMPTZ NOT NULL,
                preferred_time VARCHAR(50),
                message TEXT,
                status VARCHAR(16) NOT NULL DEFAULT 'Pending',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                CHECK (tenant_id IS NOT NULL OR guest_name IS NOT NULL)
            );

            CREATE INDEX IF NOT EXISTS idx_viewing_requests_agent
                ON viewing_requests(agent_id, created_at DESC);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn viewing_request_from_row(row: &PgRow) -> Result<ViewingRequest, sqlx::Error> {
    let agent_id: i64 = row.try_get("agent_id")?;
    let tenant_id: Option<i64> = row.try_get("tenant_id")?;
    let status: String = row.try_get("status")?;

    let requester = match tenant_id {
        Some(tenant_id) => Requester::Tenant {
            tenant_id: AgentId::new(tenant_id).map_err(decode_error)?,
        },
        None => Requester::Guest(GuestContact {
            name: row.try_get::<Option<String>, _>("guest_name")?.unwrap_or_default(),
            email: row.try_get::<Option<String>, _>("guest_email")?.unwrap_or_default(),
            phone: row.try_get::<Option<String>, _>("guest_phone")?.unwrap_or_default(),
        }),
    };

    Ok(ViewingRequest {
        id: ViewingRequestId::from_uuid(row.try_get("id")?),
        property_id: PropertyId::from_uuid(row.try_get("property_id")?),
        agent_id: AgentId::new(agent_id).map_err(decode_error)?,
        requester,
        viewing_date: row.try_get("viewing_date")?,
        preferred_time: row.try_get("preferred_time")?,
        message: row.try_get("message")?,
        status: status.parse().map_err(decode_error)?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl ViewingRequestRepository for SqlViewingRequestRepository {
    async fn create_viewing_request(&self, request: &ViewingRequest) -> RepositoryResult<()> {
        let (tenant_id, guest) = match &request.requester {
            Requester::Tenant { tenant_id } => (Some(tenant_id.value()), None),
            Requester::Guest(contact) => (None, Some(contact)),
        };

        let inserted = sqlx::query(
            r#"
            INSERT INTO viewing_requests (
                id, property_id, agent_id, tenant_id, guest_name, guest_email, guest_phone,
                viewing_date, preferred_time, message, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(request.property_id.as_uuid())
        .bind(request.agent_id.value())
        .bind(tenant_id)
        .bind(guest.map(|g| g.name.as_str()))
        .bind(guest.map(|g| g.email.as_str()))
        .bind(guest.map(|g| g.phone.as_str()))
        .bind(request.viewing_date)
        .bind(request.preferred_time.as_deref())
        .bind(request.message.as_deref())
        .bind(request.status.as_str())
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("inserting viewing request"))?;

        if inserted.rows_affected() == 0 {
            return Err(RepositoryError::DuplicateViewingRequest { id: request.id });
        }

        Ok(())
    }

    async fn get_viewing_request(
        &self,
        id: &ViewingRequestId,
    ) -> RepositoryResult<Option<ViewingRequest>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM viewing_requests WHERE id = $1",
            VIEWING_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("retrieving viewing request"))?;

        row.as_ref()
            .map(viewing_request_from_row)
            .transpose()
            .map_err(db_error("decoding viewing request"))
    }

    async fn list_viewing_requests_by_agent(
        &self,
        agent_id: AgentId,
    ) -> RepositoryResult<Vec<ViewingRequest>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM viewing_requests WHERE agent_id = $1 ORDER BY created_at DESC",
            VIEWING_COLUMNS
        ))
        .bind(agent_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing viewing requests"))?;

        rows.iter()
            .map(viewing_request_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_error("decoding viewing request"))
    }

    async fn update_viewing_status(
        &self,
        id: &ViewingRequestId,
        expected: ViewingStatus,
        status: ViewingStatus,
    ) -> RepositoryResult<Option<ViewingRequest>> {
        let row = sqlx::query(&format!(
            "UPDATE viewing_requests SET status = $3 WHERE id = $1 AND status = $2 RETURNING {}",
            VIEWING_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(expected.as_str())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating viewing status"))?;

        match row {
            Some(row) => viewing_request_from_row(&row)
                .map(Some)
                .map_err(db_error("decoding viewing request")),
            None if self.get_viewing_request(id).await?.is_some() => Ok(None),
            None => Err(RepositoryError::ViewingRequestNotFound { id: *id }),
        }
    }
}
