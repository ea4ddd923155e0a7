use axum::{Json, extract::FromRequestParts, http::StatusCode, http::request::Parts};

use crate::{adapters::inbound::http::dto::ErrorResponseDto, domain::value_objects::AgentId};

/// Header set by the upstream authentication gateway
pub const AGENT_ID_HEADER: &str = "x-agent-id";

/// Authenticated agent taken from the `x-agent-id` header
///
/// The header is trusted as-is. A missing or malformed value is rejected with
/// 401 before the handler runs.
#[derive(Debug, Clone, Copy)]
pub struct AgentIdentity(pub AgentId);

impl<S> FromRequestParts<S> for AgentIdentity
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponseDto>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(AGENT_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponseDto::unauthorized("Missing x-agent-id header")),
                )
            })?;

        let agent_id = AgentId::parse(raw).map_err(|e| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponseDto::unauthorized(&e.to_string())),
            )
        })?;

        Ok(AgentIdentity(agent_id))
    }
}
