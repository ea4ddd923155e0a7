use http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::{
    errors::{ListingError, ValidationError},
    models::{AgentViewingRequest, Property, PropertyImage, Requester, ViewingRequest},
};

/// DTO for a property image
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyImageDto {
    pub id: String,
    pub url: String,
    pub display_order: i32,
    pub is_primary: bool,
}

/// DTO for a property as returned to readers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyReadDto {
    pub id: String,
    pub agent_id: i64,
    pub title: String,
    pub description: String,
    pub address: String,
    /// Decimal rent rendered as a string to keep precision
    pub rental_amount: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub primary_image_url: Option<String>,
    pub images: Vec<PropertyImageDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for property list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPropertiesResponseDto {
    pub properties: Vec<PropertyReadDto>,
    pub total_count: usize,
}

/// Body of a tenant viewing request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateViewingRequestDto {
    pub property_id: String,
    pub viewing_date: DateTime<Utc>,
}

/// Body of a guest viewing request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestViewingRequestDto {
    pub property_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub preferred_date: DateTime<Utc>,
    pub preferred_time: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Query of a status change, e.g. `?status=approved`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewingStatusQuery {
    pub status: String,
}

/// DTO for a viewing request as seen by its agent or requester
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewingRequestReadDto {
    pub id: String,
    pub property_id: String,
    pub property_title: Option<String>,
    pub agent_id: i64,
    /// `Tenant` or `Guest`
    pub requester_type: String,
    pub tenant_id: Option<i64>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub viewing_date: DateTime<Utc>,
    pub preferred_time: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListViewingRequestsResponseDto {
    pub viewing_requests: Vec<ViewingRequestReadDto>,
    pub total_count: usize,
}

/// DTO for error responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
    pub timestamp: DateTime<Utc>,
}

/// DTO for success responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponseDto {
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

// Conversion implementations

impl From<&PropertyImage> for PropertyImageDto {
    fn from(image: &PropertyImage) -> Self {
        PropertyImageDto {
            id: image.id.to_string(),
            url: image.url.clone(),
            display_order: image.display_order,
            is_primary: image.is_primary,
        }
    }
}

impl From<Property> for PropertyReadDto {
    fn from(property: Property) -> Self {
        let images: Vec<PropertyImageDto> = property
            .sorted_images()
            .into_iter()
            .map(PropertyImageDto::from)
            .collect();

        PropertyReadDto {
            id: property.id.to_string(),
            agent_id: property.agent_id.value(),
            primary_image_url: property.primary_image().map(|image| image.url.clone()),
            title: property.details.title,
            description: property.details.description,
            address: property.details.address,
            rental_amount: property.details.rental_amount.with_scale(2).to_string(),
            bedrooms: property.details.bedrooms,
            bathrooms: property.details.bathrooms,
            images,
            created_at: property.created_at,
            updated_at: property.updated_at,
        }
    }
}

impl From<Vec<Property>> for ListPropertiesResponseDto {
    fn from(properties: Vec<Property>) -> Self {
        let properties: Vec<PropertyReadDto> =
            properties.into_iter().map(PropertyReadDto::from).collect();
        ListPropertiesResponseDto {
            total_count: properties.len(),
            properties,
        }
    }
}

impl From<ViewingRequest> for ViewingRequestReadDto {
    fn from(request: ViewingRequest) -> Self {
        let (requester_type, tenant_id, guest) = match request.requester {
            Requester::Tenant { tenant_id } => ("Tenant", Some(tenant_id.value()), None),
            Requester::Guest(contact) => ("Guest", None, Some(contact)),
        };

        ViewingRequestReadDto {
            id: request.id.to_string(),
            property_id: request.property_id.to_string(),
            property_title: None,
            agent_id: request.agent_id.value(),
            requester_type: requester_type.to_string(),
            tenant_id,
            guest_name: guest.as_ref().map(|g| g.name.clone()),
            guest_email: guest.as_ref().map(|g| g.email.clone()),
            guest_phone: guest.map(|g| g.phone),
            viewing_date: request.viewing_date,
            preferred_time: request.preferred_time,
            message: request.message,
            status: request.status.to_string(),
            created_at: request.created_at,
        }
    }
}

impl From<AgentViewingRequest> for ViewingRequestReadDto {
    fn from(entry: AgentViewingRequest) -> Self {
        ViewingRequestReadDto {
            property_title: Some(entry.property_title),
            ..ViewingRequestReadDto::from(entry.request)
        }
    }
}

impl From<Vec<AgentViewingRequest>> for ListViewingRequestsResponseDto {
    fn from(entries: Vec<AgentViewingRequest>) -> Self {
        let viewing_requests: Vec<ViewingRequestReadDto> =
            entries.into_iter().map(ViewingRequestReadDto::from).collect();
        ListViewingRequestsResponseDto {
            total_count: viewing_requests.len(),
            viewing_requests,
        }
    }
}

/// Convert listing errors to HTTP status codes for API responses
impl From<&ListingError> for StatusCode {
    fn from(err: &ListingError) -> Self {
        match err {
            ListingError::Validation(_) => StatusCode::BAD_REQUEST,
            ListingError::UploadExhausted { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ListingError::PropertyNotFound { .. } => StatusCode::NOT_FOUND,
            ListingError::NotOwner { .. } => StatusCode::FORBIDDEN,
            ListingError::ViewingRequestNotFound { .. } => StatusCode::NOT_FOUND,
            ListingError::InvalidStatusTransition { .. } => StatusCode::CONFLICT,
            ListingError::Repository { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Error response helpers

impl ErrorResponseDto {
    pub fn from_listing_error(error: &ListingError) -> Self {
        let mut details = HashMap::new();

        let kind = match error {
            ListingError::Validation(validation) => {
                insert_validation_details(&mut details, validation);
                "ValidationError"
            }
            ListingError::UploadExhausted { attempted } => {
                details.insert(
                    "attempted".to_string(),
                    serde_json::Value::Number((*attempted).into()),
                );
                "UploadExhausted"
            }
            ListingError::PropertyNotFound { id } => {
                details.insert(
                    "property_id".to_string(),
                    serde_json::Value::String(id.to_string()),
                );
                "PropertyNotFound"
            }
            ListingError::NotOwner { property_id, .. } => {
                details.insert(
                    "property_id".to_string(),
                    serde_json::Value::String(property_id.to_string()),
                );
                "Forbidden"
            }
            ListingError::ViewingRequestNotFound { id } => {
                details.insert(
                    "viewing_request_id".to_string(),
                    serde_json::Value::String(id.to_string()),
                );
                "ViewingRequestNotFound"
            }
            ListingError::InvalidStatusTransition { from, to } => {
                details.insert("from".to_string(), from.as_str().into());
                details.insert("to".to_string(), to.as_str().into());
                "InvalidStatusTransition"
            }
            ListingError::Repository { .. } => "InternalServerError",
        };

        // Persistence details stay in the server log
        let message = match error {
            ListingError::Repository { .. } => "The listing store is unavailable".to_string(),
            other => other.to_string(),
        };

        ErrorResponseDto {
            error: kind.to_string(),
            message,
            details: if details.is_empty() {
                None
            } else {
                Some(details)
            },
            timestamp: Utc::now(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        ErrorResponseDto {
            error: "BadRequest".to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn unauthorized(message: &str) -> Self {
        ErrorResponseDto {
            error: "Unauthorized".to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }
}

fn insert_validation_details(
    details: &mut HashMap<String, serde_json::Value>,
    error: &ValidationError,
) {
    match error {
        ValidationError::TooManyImages { actual, max } => {
            details.insert("actual".to_string(), (*actual).into());
            details.insert("max".to_string(), (*max).into());
        }
        ValidationError::PrimaryIndexOutOfRange { index, count } => {
            details.insert("index".to_string(), (*index).into());
            details.insert("count".to_string(), (*count).into());
        }
        ValidationError::EmptyField(field)
        | ValidationError::FieldTooLong { field, .. }
        | ValidationError::InvalidField { field, .. } => {
            details.insert("field".to_string(), field.clone().into());
        }
        _ => {}
    }
}

impl SuccessResponseDto {
    pub fn new(message: &str) -> Self {
        SuccessResponseDto {
            message: message.to_string(),
            data: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_data(message: &str, data: serde_json::Value) -> Self {
        SuccessResponseDto {
            message: message.to_string(),
            data: Some(data),
            timestamp: Utc::now(),
        }
    }
}
