/// Validation errors for listing requests and domain value objects
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // Image set validation errors
    NoImages,
    TooManyImages {
        actual: usize,
        max: usize,
    },
    PrimaryIndexOutOfRange {
        index: usize,
        count: usize,
    },

    // Property detail validation errors
    EmptyField(String),
    FieldTooLong {
        field: String,
        actual: usize,
        max: usize,
    },
    NegativeRentalAmount(String),

    // Identifier validation errors
    InvalidPropertyId(String),
    InvalidAgentId(String),
    EmptyPublicId,
    PublicIdTooLong {
        actual: usize,
        max: usize,
    },
    InvalidPublicIdCharacter(char),
    InvalidViewingRequestId(String),

    // Viewing request validation errors
    InvalidViewingStatus(String),

    InvalidField {
        field: String,
        value: String,
        expected: String,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Image set errors
            ValidationError::NoImages => write!(f, "At least 1 image is required"),
            ValidationError::TooManyImages { actual, max } => {
                write!(f, "Too many images: {} (max: {})", actual, max)
            }
            ValidationError::PrimaryIndexOutOfRange { index, count } => {
                write!(
                    f,
                    "Invalid primary image index: {} (image count: {})",
                    index, count
                )
            }

            // Property detail errors
            ValidationError::EmptyField(field) => write!(f, "Field '{}' cannot be empty", field),
            ValidationError::FieldTooLong { field, actual, max } => {
                write!(
                    f,
                    "Field '{}' too long: {} characters (max: {})",
                    field, actual, max
                )
            }
            ValidationError::NegativeRentalAmount(amount) => {
                write!(f, "Rental amount cannot be negative: {}", amount)
            }

            // Identifier errors
            ValidationError::InvalidPropertyId(value) => {
                write!(f, "Invalid property id: '{}'", value)
            }
            ValidationError::InvalidAgentId(value) => write!(f, "Invalid agent id: '{}'", value),
            ValidationError::EmptyPublicId => write!(f, "Public id cannot be empty"),
            ValidationError::PublicIdTooLong { actual, max } => {
                write!(f, "Public id too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidPublicIdCharacter(c) => {
                write!(f, "Invalid character in public id: '{}'", c.escape_default())
            }
            ValidationError::InvalidViewingRequestId(value) => {
                write!(f, "Invalid viewing request id: '{}'", value)
            }

            ValidationError::InvalidViewingStatus(value) => {
                write!(
                    f,
                    "Invalid viewing status: '{}' (expected Pending, Approved, Rejected or Completed)",
                    value
                )
            }

            ValidationError::InvalidField {
                field,
                value,
                expected,
            } => {
                write!(
                    f,
                    "Invalid value for field '{}': '{}' (expected: {})",
                    field, value, expected
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
