//! Public API surface of the role engine.
//!
//! Gathers the types exchanged with the simulation engine so the role logic
//! can stay focused on decisions.

pub mod command;
pub mod errors;
pub mod events;

pub use command::{Command, CommandSink};
pub use errors::{ConfigError, Result, RoleError};
pub use events::AgentEvent;
