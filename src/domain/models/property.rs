use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use crate::domain::{
    errors::ValidationError,
    models::image::{ImageSetRequest, PropertyImage},
    value_objects::{AgentId, PropertyId, PublicId},
};

const MAX_TITLE_LEN: usize = 200;
const MAX_ADDRESS_LEN: usize = 500;
const MAX_DESCRIPTION_LEN: usize = 5000;

/// Upper bound for bedroom and bathroom counts
pub const MAX_ROOM_COUNT: u32 = 100;

/// Descriptive fields of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDetails {
    pub title: String,
    pub description: String,
    pub address: String,
    pub rental_amount: BigDecimal,
    pub bedrooms: u32,
    pub bathrooms: u32,
}

impl PropertyDetails {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("title", &self.title, MAX_TITLE_LEN)?;
        check_text("description", &self.description, MAX_DESCRIPTION_LEN)?;
        check_text("address", &self.address, MAX_ADDRESS_LEN)?;

        if self.rental_amount < BigDecimal::from(0) {
            return Err(ValidationError::NegativeRentalAmount(
                self.rental_amount.to_string(),
            ));
        }

        check_room_count("bedrooms", self.bedrooms)?;
        check_room_count("bathrooms", self.bathrooms)?;

        Ok(())
    }
}

fn check_room_count(field: &str, value: u32) -> Result<(), ValidationError> {
    if value > MAX_ROOM_COUNT {
        return Err(ValidationError::InvalidField {
            field: field.to_string(),
            value: value.to_string(),
            expected: format!("at most {}", MAX_ROOM_COUNT),
        });
    }
    Ok(())
}

fn check_text(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field.to_string()));
    }
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::FieldTooLong {
            field: field.to_string(),
            actual: len,
            max,
        });
    }
    Ok(())
}

/// A listing together with its image set
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: PropertyId,
    pub agent_id: AgentId,
    pub details: PropertyDetails,
    pub images: Vec<PropertyImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn primary_image(&self) -> Option<&PropertyImage> {
        self.images.iter().find(|image| image.is_primary)
    }

    /// Images sorted for presentation; ties keep their stored order
    pub fn sorted_images(&self) -> Vec<&PropertyImage> {
        let mut images: Vec<&PropertyImage> = self.images.iter().collect();
        images.sort_by_key(|image| image.display_order);
        images
    }

    pub fn public_ids(&self) -> Vec<PublicId> {
        self.images
            .iter()
            .map(|image| image.public_id.clone())
            .collect()
    }

    pub fn is_owned_by(&self, agent_id: AgentId) -> bool {
        self.agent_id == agent_id
    }
}

/// Request to create a listing
#[derive(Debug, Clone)]
pub struct CreatePropertyRequest {
    pub agent_id: AgentId,
    pub details: PropertyDetails,
    pub images: ImageSetRequest,
}

/// Request to update a listing
///
/// `images: None` keeps the current image set and its remote objects untouched.
#[derive(Debug, Clone)]
pub struct UpdatePropertyRequest {
    pub property_id: PropertyId,
    pub agent_id: AgentId,
    pub details: PropertyDetails,
    pub images: Option<ImageSetRequest>,
}

/// Request to delete a listing
#[derive(Debug, Clone)]
pub struct DeletePropertyRequest {
    pub property_id: PropertyId,
    pub agent_id: AgentId,
}
