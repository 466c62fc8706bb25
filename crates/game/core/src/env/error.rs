//! World lookup errors.

use crate::state::{AgentId, AsteroidId, TeamId};

/// A [`crate::Target`] or roster entry referenced an entity the world does
/// not know about.
///
/// These are contract violations between the engine and the decision layer
/// rather than recoverable conditions: the caller handed over an identifier
/// that never existed (or was removed), so the decision is aborted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldError {
    #[error("agent {0} is not present in the world")]
    UnknownAgent(AgentId),

    #[error("no home base registered for {0}")]
    UnknownHomeBase(TeamId),

    #[error("{0} is not present in the world")]
    UnknownAsteroid(AsteroidId),
}
