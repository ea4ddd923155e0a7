pub mod agent_identity;

pub use agent_identity::{AGENT_ID_HEADER, AgentIdentity};
