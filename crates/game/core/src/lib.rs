//! Shared arena model for the role engine.
//!
//! `arena-core` defines the plane geometry, the world entities the simulation
//! engine exposes (agents, home bases, asteroids), the [`env::WorldOracle`]
//! seam through which decisions read them, and the tunables every role shares.
//! It performs no I/O and keeps no global state.
pub mod config;
pub mod env;
pub mod geometry;
pub mod state;

pub use config::RoleConfig;
pub use env::{WorldError, WorldOracle, WorldSnapshot};
pub use geometry::{
    Located, Point, Vector, angle_between, distance, offset_toward, place_near,
};
pub use state::{
    AgentId, AgentState, Arena, AsteroidId, AsteroidState, Cargo, CargoFill, HomeBaseState,
    Target, TeamId,
};
