use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use super::property_handlers::{ApiError, listing_error};
use crate::{
    adapters::inbound::http::{
        dto::{
            CreateViewingRequestDto, GuestViewingRequestDto, ListViewingRequestsResponseDto,
            ViewingRequestReadDto, ViewingStatusQuery,
        },
        middleware::AgentIdentity,
        router::AppState,
    },
    domain::{
        errors::ListingError,
        models::{
            CreateViewingRequest, GuestContact, GuestViewingRequest, UpdateViewingStatusRequest,
            ViewingStatus,
        },
        value_objects::{PropertyId, ViewingRequestId},
    },
};

fn parse_property_id(raw: &str) -> Result<PropertyId, ApiError> {
    PropertyId::parse(raw).map_err(|e| listing_error(ListingError::Validation(e)))
}

/// Handle a viewing request from a signed-in tenant
pub async fn create_viewing_request(
    State(app_state): State<AppState>,
    AgentIdentity(tenant_id): AgentIdentity,
    Json(body): Json<CreateViewingRequestDto>,
) -> Result<(StatusCode, Json<ViewingRequestReadDto>), ApiError> {
    let request = CreateViewingRequest {
        property_id: parse_property_id(&body.property_id)?,
        tenant_id,
        viewing_date: body.viewing_date,
    };

    let created = app_state
        .viewing_request_service
        .request_viewing(request)
        .await
        .map_err(listing_error)?;

    Ok((StatusCode::CREATED, Json(ViewingRequestReadDto::from(created))))
}

/// Handle a viewing request from a visitor without an account
pub async fn create_guest_viewing_request(
    State(app_state): State<AppState>,
    Json(body): Json<GuestViewingRequestDto>,
) -> Result<(StatusCode, Json<ViewingRequestReadDto>), ApiError> {
    let request = GuestViewingRequest {
        property_id: parse_property_id(&body.property_id)?,
        contact: GuestContact {
            name: body.guest_name,
            email: body.guest_email,
            phone: body.guest_phone,
        },
        preferred_date: body.preferred_date,
        preferred_time: body.preferred_time,
        message: body.message,
    };

    let created = app_state
        .viewing_request_service
        .request_guest_viewing(request)
        .await
        .map_err(listing_error)?;

    Ok((StatusCode::CREATED, Json(ViewingRequestReadDto::from(created))))
}

/// Handle listing of the requests addressed to the calling agent
pub async fn list_agent_viewing_requests(
    State(app_state): State<AppState>,
    AgentIdentity(agent_id): AgentIdentity,
) -> Result<Json<ListViewingRequestsResponseDto>, ApiError> {
    let requests = app_state
        .viewing_request_service
        .list_for_agent(agent_id)
        .await
        .map_err(listing_error)?;

    Ok(Json(ListViewingRequestsResponseDto::from(requests)))
}

/// Handle an agent's status decision
pub async fn update_viewing_status(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    AgentIdentity(agent_id): AgentIdentity,
    Query(query): Query<ViewingStatusQuery>,
) -> Result<Json<ViewingRequestReadDto>, ApiError> {
    let request_id = ViewingRequestId::parse(&id)
        .map_err(|e| listing_error(ListingError::Validation(e)))?;
    let status = query
        .status
        .parse::<ViewingStatus>()
        .map_err(|e| listing_error(ListingError::Validation(e)))?;

    let updated = app_state
        .viewing_request_service
        .update_status(UpdateViewingStatusRequest {
            request_id,
            agent_id,
            status,
        })
        .await
        .map_err(listing_error)?;

    Ok(Json(ViewingRequestReadDto::from(updated)))
}
