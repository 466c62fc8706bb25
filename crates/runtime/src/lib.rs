//! Role-based behavior engine for arena agents.
//!
//! Each agent of a team is driven by exactly one role at a time: Gatherer,
//! Attacker or Defender. The simulation engine reports lifecycle callbacks
//! to a [`Squad`], which forwards them to the agent's active role and
//! dispatches the resulting commands through a [`CommandSink`].
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the commands, events and errors exchanged with the engine
//! - [`roles`] hosts the three strategies and the world snapshot queries
//! - [`controller`] owns one agent's role and applies its decisions
//! - [`squad`] coordinates a team: roster, broadcast, final report
//! - [`stats`] and [`config`] cover travel reporting and runtime settings
pub mod api;
pub mod config;
pub mod controller;
pub mod roles;
pub mod squad;
pub mod stats;

pub use api::{AgentEvent, Command, CommandSink, ConfigError, Result, RoleError};
pub use config::RuntimeConfig;
pub use controller::{AgentController, Outcome};
pub use roles::{
    Decision, FixedOrder, OffsetOrder, Role, RoleContext, RoleKind, Scan, Scored, ShuffledOrder,
    Survey,
};
pub use squad::{Roster, Squad};
pub use stats::{MemberReport, TeamReport, TravelStats};
