//! Arena entities as observed by the decision layer.
//!
//! The simulation engine owns and mutates these values (health, cargo,
//! positions). Roles only read them through [`crate::env::WorldOracle`].
mod entities;
mod ids;
mod target;

pub use entities::{AgentState, Arena, AsteroidState, Cargo, CargoFill, HomeBaseState};
pub use ids::{AgentId, AsteroidId, TeamId};
pub use target::Target;
