mod agent_id;
mod property_id;
mod public_id;

pub use agent_id::AgentId;
pub use property_id::{ImageId, PropertyId, ViewingRequestId};
pub use public_id::PublicId;
