//! Unified error types surfaced by the role engine.
//!
//! Absence of a target is never an error: every query has a fallback. What
//! remains are contract violations between the engine and the squad, which
//! abort the current callback and surface immediately.
use arena_core::{AgentId, TeamId, WorldError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RoleError>;

#[derive(Debug, Error)]
pub enum RoleError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error("agent {agent} is not a member of {team}")]
    NotInSquad { agent: AgentId, team: TeamId },

    #[error("agent {0} already joined the squad")]
    AlreadyInSquad(AgentId),

    #[error("agent {agent} belongs to {actual}, cannot join {expected}")]
    ForeignAgent {
        agent: AgentId,
        expected: TeamId,
        actual: TeamId,
    },
}

/// Failures while loading [`crate::RuntimeConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse runtime config")]
    Parse(#[source] serde_json::Error),

    #[error("invalid value for `{field}`")]
    Invalid { field: &'static str },
}
