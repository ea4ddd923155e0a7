use crate::domain::errors::ValidationError;

/// Identity of the agent (user) owning a listing
///
/// Issued by the external user store; only positive ids are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(i64);

impl AgentId {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::InvalidAgentId(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Parse an agent id from a header or form value
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let parsed = value
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidAgentId(value.to_string()))?;
        Self::new(parsed)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
