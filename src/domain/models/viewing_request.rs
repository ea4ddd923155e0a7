use chrono::{DateTime, Utc};
use std::str::FromStr;

use crate::domain::{
    errors::ValidationError,
    value_objects::{AgentId, PropertyId, ViewingRequestId},
};

const MIN_GUEST_NAME_LEN: usize = 2;
const MAX_GUEST_NAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 254;
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;
const MAX_PREFERRED_TIME_LEN: usize = 50;
const MAX_MESSAGE_LEN: usize = 1000;

/// Where a viewing request stands in the agent's workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewingStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl ViewingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewingStatus::Pending => "Pending",
            ViewingStatus::Approved => "Approved",
            ViewingStatus::Rejected => "Rejected",
            ViewingStatus::Completed => "Completed",
        }
    }

    /// Whether an agent may move a request from `self` to `next`
    ///
    /// Pending requests are approved or rejected; approved ones are completed or
    /// called off. Rejected and completed are final. Re-applying the current
    /// status is always allowed.
    pub fn can_transition_to(&self, next: ViewingStatus) -> bool {
        use ViewingStatus::*;

        *self == next
            || matches!(
                (self, next),
                (Pending, Approved) | (Pending, Rejected) | (Approved, Completed) | (Approved, Rejected)
            )
    }
}

impl std::fmt::Display for ViewingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse of a status name
impl FromStr for ViewingStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ViewingStatus::Pending),
            "approved" => Ok(ViewingStatus::Approved),
            "rejected" => Ok(ViewingStatus::Rejected),
            "completed" => Ok(ViewingStatus::Completed),
            _ => Err(ValidationError::InvalidViewingStatus(value.to_string())),
        }
    }
}

/// Contact details left by a visitor without an account
#[derive(Debug, Clone, PartialEq)]
pub struct GuestContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl GuestContact {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let name_len = self.name.trim().chars().count();
        if name_len == 0 {
            return Err(ValidationError::EmptyField("guest_name".to_string()));
        }
        if name_len < MIN_GUEST_NAME_LEN {
            return Err(invalid("guest_name", &self.name, "at least 2 characters"));
        }
        if name_len > MAX_GUEST_NAME_LEN {
            return Err(ValidationError::FieldTooLong {
                field: "guest_name".to_string(),
                actual: name_len,
                max: MAX_GUEST_NAME_LEN,
            });
        }

        if !is_plausible_email(&self.email) {
            return Err(invalid("guest_email", &self.email, "an email address"));
        }

        if !is_plausible_phone(&self.phone) {
            return Err(invalid(
                "guest_phone",
                &self.phone,
                "a phone number with 7 to 15 digits",
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, value: &str, expected: &str) -> ValidationError {
    ValidationError::InvalidField {
        field: field.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.len() > MAX_EMAIL_LEN || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

fn is_plausible_phone(phone: &str) -> bool {
    let phone = phone.trim();
    if phone.is_empty() {
        return false;
    }
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')' | '.');
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    phone.chars().all(allowed) && (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// Who asked for the viewing
#[derive(Debug, Clone, PartialEq)]
pub enum Requester {
    /// A signed-in tenant
    Tenant { tenant_id: AgentId },
    /// A visitor without an account
    Guest(GuestContact),
}

/// A request to view a property, addressed to the listing's agent
#[derive(Debug, Clone, PartialEq)]
pub struct ViewingRequest {
    pub id: ViewingRequestId,
    pub property_id: PropertyId,
    /// Owner of the property when the request was made
    pub agent_id: AgentId,
    pub requester: Requester,
    pub viewing_date: DateTime<Utc>,
    pub preferred_time: Option<String>,
    pub message: Option<String>,
    pub status: ViewingStatus,
    pub created_at: DateTime<Utc>,
}

impl ViewingRequest {
    pub fn is_addressed_to(&self, agent_id: AgentId) -> bool {
        self.agent_id == agent_id
    }
}

/// A viewing request joined with the title of its property
#[derive(Debug, Clone, PartialEq)]
pub struct AgentViewingRequest {
    pub request: ViewingRequest,
    pub property_title: String,
}

/// Request from a signed-in tenant
#[derive(Debug, Clone)]
pub struct CreateViewingRequest {
    pub property_id: PropertyId,
    pub tenant_id: AgentId,
    pub viewing_date: DateTime<Utc>,
}

/// Request from a visitor without an account
#[derive(Debug, Clone)]
pub struct GuestViewingRequest {
    pub property_id: PropertyId,
    pub contact: GuestContact,
    pub preferred_date: DateTime<Utc>,
    pub preferred_time: String,
    pub message: Option<String>,
}

impl GuestViewingRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.contact.validate()?;

        let time_len = self.preferred_time.trim().chars().count();
        if time_len == 0 {
            return Err(ValidationError::EmptyField("preferred_time".to_string()));
        }
        if time_len > MAX_PREFERRED_TIME_LEN {
            return Err(ValidationError::FieldTooLong {
                field: "preferred_time".to_string(),
                actual: time_len,
                max: MAX_PREFERRED_TIME_LEN,
            });
        }

        if let Some(message) = &self.message {
            let len = message.chars().count();
            if len > MAX_MESSAGE_LEN {
                return Err(ValidationError::FieldTooLong {
                    field: "message".to_string(),
                    actual: len,
                    max: MAX_MESSAGE_LEN,
                });
            }
        }

        Ok(())
    }
}

/// Agent decision on a viewing request
#[derive(Debug, Clone)]
pub struct UpdateViewingStatusRequest {
    pub request_id: ViewingRequestId,
    pub agent_id: AgentId,
    pub status: ViewingStatus,
}
