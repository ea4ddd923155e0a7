use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::Field},
    http::StatusCode,
};
use bigdecimal::BigDecimal;
use std::str::FromStr;

use crate::{
    adapters::inbound::http::{
        dto::{ErrorResponseDto, ListPropertiesResponseDto, PropertyReadDto, SuccessResponseDto},
        middleware::AgentIdentity,
        router::AppState,
    },
    domain::{
        errors::{ListingError, ValidationError},
        models::{
            CreatePropertyRequest, DeletePropertyRequest, ImageSetRequest, ImageUpload,
            PropertyDetails, UpdatePropertyRequest,
        },
        value_objects::PropertyId,
    },
};

pub type ApiError = (StatusCode, Json<ErrorResponseDto>);

pub(crate) fn listing_error(error: ListingError) -> ApiError {
    if let ListingError::Repository { message } = &error {
        tracing::error!(%message, "Listing store failure");
    }
    let status = StatusCode::from(&error);
    (status, Json(ErrorResponseDto::from_listing_error(&error)))
}

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponseDto::bad_request(message)),
    )
}

fn validation_error(error: ValidationError) -> ApiError {
    listing_error(ListingError::Validation(error))
}

fn parse_property_id(raw: &str) -> Result<PropertyId, ApiError> {
    PropertyId::parse(raw).map_err(validation_error)
}

/// Fields collected from a multipart listing form
#[derive(Debug, Default)]
struct PropertyForm {
    title: Option<String>,
    description: Option<String>,
    address: Option<String>,
    rental_amount: Option<String>,
    bedrooms: Option<String>,
    bathrooms: Option<String>,
    images: Vec<ImageUpload>,
    image_orders: Vec<i32>,
    primary_image_index: Option<usize>,
}

impl PropertyForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = PropertyForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| bad_request(&format!("Malformed multipart body: {}", e.body_text())))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                "images" => {
                    if let Some(image) = read_image(field).await? {
                        form.images.push(image);
                    }
                }
                "image_orders" => {
                    let raw = read_text(field).await?;
                    form.image_orders.push(parse_number("image_orders", &raw)?);
                }
                "primary_image_index" => {
                    let raw = read_text(field).await?;
                    form.primary_image_index = Some(parse_number("primary_image_index", &raw)?);
                }
                "title" => form.title = Some(read_text(field).await?),
                "description" => form.description = Some(read_text(field).await?),
                "address" => form.address = Some(read_text(field).await?),
                "rental_amount" => form.rental_amount = Some(read_text(field).await?),
                "bedrooms" => form.bedrooms = Some(read_text(field).await?),
                "bathrooms" => form.bathrooms = Some(read_text(field).await?),
                // Unknown fields are ignored
                _ => {}
            }
        }

        Ok(form)
    }

    fn details(&self) -> Result<PropertyDetails, ValidationError> {
        let rental_amount = self.rental_amount.as_deref().unwrap_or_default().trim();
        let rental_amount =
            BigDecimal::from_str(rental_amount).map_err(|_| ValidationError::InvalidField {
                field: "rental_amount".to_string(),
                value: rental_amount.to_string(),
                expected: "a decimal amount".to_string(),
            })?;

        Ok(PropertyDetails {
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            address: self.address.clone().unwrap_or_default(),
            rental_amount,
            bedrooms: parse_count("bedrooms", self.bedrooms.as_deref())?,
            bathrooms: parse_count("bathrooms", self.bathrooms.as_deref())?,
        })
    }

    fn image_set(self) -> ImageSetRequest {
        ImageSetRequest::new(self.images)
            .with_orders(self.image_orders)
            .with_primary_index(self.primary_image_index.unwrap_or(0))
    }
}

async fn read_text(field: Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| bad_request(&format!("Unreadable form field: {}", e.body_text())))
}

/// Read one `images` part
///
/// An unselected file input arrives as a part with no file name and no body;
/// it yields `None`.
async fn read_image(field: Field<'_>) -> Result<Option<ImageUpload>, ApiError> {
    let file_name = field.file_name().unwrap_or_default().trim().to_string();
    let content_type = field.content_type().map(str::to_string);
    let data = field
        .bytes()
        .await
        .map_err(|e| bad_request(&format!("Unreadable image '{}': {}", file_name, e.body_text())))?;

    if file_name.is_empty() && data.is_empty() {
        return Ok(None);
    }

    let file_name = if file_name.is_empty() {
        "image".to_string()
    } else {
        file_name
    };
    let upload = ImageUpload::new(file_name, data);
    Ok(Some(match content_type {
        Some(content_type) => upload.with_content_type(content_type),
        None => upload,
    }))
}

fn parse_number<T: FromStr>(field: &str, raw: &str) -> Result<T, ApiError> {
    raw.trim().parse::<T>().map_err(|_| {
        validation_error(ValidationError::InvalidField {
            field: field.to_string(),
            value: raw.to_string(),
            expected: "an integer".to_string(),
        })
    })
}

fn parse_count(field: &str, raw: Option<&str>) -> Result<u32, ValidationError> {
    let raw = raw.unwrap_or_default();
    raw.trim().parse::<u32>().map_err(|_| ValidationError::InvalidField {
        field: field.to_string(),
        value: raw.to_string(),
        expected: "a non-negative integer".to_string(),
    })
}

/// Handle property creation
pub async fn create_property(
    State(app_state): State<AppState>,
    AgentIdentity(agent_id): AgentIdentity,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PropertyReadDto>), ApiError> {
    let form = PropertyForm::read(multipart).await?;
    let details = form.details().map_err(validation_error)?;

    let request = CreatePropertyRequest {
        agent_id,
        details,
        images: form.image_set(),
    };

    let property = app_state
        .property_service
        .create_property(request)
        .await
        .map_err(listing_error)?;

    Ok((StatusCode::CREATED, Json(PropertyReadDto::from(property))))
}

/// Handle property update
///
/// A form without image parts keeps the current image set.
pub async fn update_property(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    AgentIdentity(agent_id): AgentIdentity,
    multipart: Multipart,
) -> Result<Json<PropertyReadDto>, ApiError> {
    let property_id = parse_property_id(&id)?;
    let form = PropertyForm::read(multipart).await?;
    let details = form.details().map_err(validation_error)?;

    let images = if form.images.is_empty() {
        None
    } else {
        Some(form.image_set())
    };

    let request = UpdatePropertyRequest {
        property_id,
        agent_id,
        details,
        images,
    };

    let property = app_state
        .property_service
        .update_property(request)
        .await
        .map_err(listing_error)?;

    Ok(Json(PropertyReadDto::from(property)))
}

/// Handle property deletion
pub async fn delete_property(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    AgentIdentity(agent_id): AgentIdentity,
) -> Result<Json<SuccessResponseDto>, ApiError> {
    let property_id = parse_property_id(&id)?;

    app_state
        .property_service
        .delete_property(DeletePropertyRequest {
            property_id,
            agent_id,
        })
        .await
        .map_err(listing_error)?;

    Ok(Json(SuccessResponseDto::with_data(
        "Property deleted successfully",
        serde_json::json!({ "id": property_id.to_string() }),
    )))
}

/// Handle property retrieval
pub async fn get_property(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PropertyReadDto>, ApiError> {
    let property_id = parse_property_id(&id)?;

    let property = app_state
        .property_service
        .get_property(&property_id)
        .await
        .map_err(listing_error)?;

    Ok(Json(PropertyReadDto::from(property)))
}

/// Handle property listing
pub async fn list_properties(
    State(app_state): State<AppState>,
) -> Result<Json<ListPropertiesResponseDto>, ApiError> {
    let properties = app_state
        .property_service
        .list_properties()
        .await
        .map_err(listing_error)?;

    Ok(Json(ListPropertiesResponseDto::from(properties)))
}

/// Handle listing of the calling agent's properties, newest first
pub async fn list_agent_properties(
    State(app_state): State<AppState>,
    AgentIdentity(agent_id): AgentIdentity,
) -> Result<Json<ListPropertiesResponseDto>, ApiError> {
    let properties = app_state
        .property_service
        .list_properties_by_agent(agent_id)
        .await
        .map_err(listing_error)?;

    Ok(Json(ListPropertiesResponseDto::from(properties)))
}

pub async fn health() -> Json<SuccessResponseDto> {
    Json(SuccessResponseDto::new("healthy"))
}
