//! Role-based behavior: the three strategies an agent switches between.
//!
//! A [`Role`] exposes one handler per engine callback and answers each with a
//! [`Decision`]. Roles never swap themselves; a decision carries the
//! requested transition and the controller replaces the held variant.
mod attacker;
mod context;
mod defender;
mod gatherer;
mod offsets;
mod survey;

pub use attacker::Attacker;
pub use context::RoleContext;
pub use defender::{Defender, formation_spot};
pub use gatherer::{Gatherer, choose_harvest_target};
pub use offsets::{FIRING_OFFSETS, FixedOrder, OffsetOrder, ShuffledOrder};
pub use survey::{Scan, Scored, Survey};

use arena_core::Target;

use crate::api::{AgentEvent, Command, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RoleKind {
    Gatherer,
    Attacker,
    Defender,
}

/// Outcome of one role callback.
///
/// When `transition` is set the commands are discarded: the incoming role's
/// activation decides what the agent does next.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Decision {
    pub commands: Vec<Command>,
    /// Newly decided target, if the callback picked one.
    pub target: Option<Target>,
    pub transition: Option<RoleKind>,
    /// Ask every other living Gatherer of the team to re-pick its target.
    pub broadcast: bool,
    /// Nothing is left to gather or fight.
    pub mission_complete: bool,
}

impl Decision {
    /// No command this callback.
    pub fn hold() -> Self {
        Self::default()
    }

    pub fn command(command: Command) -> Self {
        Self {
            commands: vec![command],
            ..Self::default()
        }
    }

    pub fn switch_to(kind: RoleKind) -> Self {
        Self {
            transition: Some(kind),
            ..Self::default()
        }
    }

    pub fn then(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_broadcast(mut self) -> Self {
        self.broadcast = true;
        self
    }
}

/// The active strategy of one agent.
#[derive(Clone, Debug, PartialEq)]
pub enum Role {
    Gatherer(Gatherer),
    Attacker(Attacker),
    Defender(Defender),
}

impl Role {
    /// Builds a role with its queries seeded from the current world.
    pub fn new(kind: RoleKind, ctx: &RoleContext<'_>) -> Self {
        match kind {
            RoleKind::Gatherer => Role::Gatherer(Gatherer::new(ctx)),
            RoleKind::Attacker => Role::Attacker(Attacker::new(ctx)),
            RoleKind::Defender => Role::Defender(Defender::new(ctx)),
        }
    }

    pub fn kind(&self) -> RoleKind {
        match self {
            Role::Gatherer(_) => RoleKind::Gatherer,
            Role::Attacker(_) => RoleKind::Attacker,
            Role::Defender(_) => RoleKind::Defender,
        }
    }

    /// First decision after the role took over.
    pub fn activate(&mut self, ctx: &mut RoleContext<'_>) -> Result<Decision> {
        match self {
            Role::Gatherer(role) => role.activate(ctx),
            Role::Attacker(role) => role.activate(ctx),
            Role::Defender(role) => role.activate(ctx),
        }
    }

    pub fn handle(&mut self, event: AgentEvent, ctx: &mut RoleContext<'_>) -> Result<Decision> {
        match self {
            Role::Gatherer(role) => role.handle(event, ctx),
            Role::Attacker(role) => role.handle(event, ctx),
            Role::Defender(role) => role.handle(event, ctx),
        }
    }

    /// Re-pick requested by a teammate's broadcast. Only Gatherers respond.
    pub fn retarget(&mut self, ctx: &mut RoleContext<'_>) -> Result<Decision> {
        match self {
            Role::Gatherer(role) => role.retarget(ctx),
            Role::Attacker(_) | Role::Defender(_) => Ok(Decision::hold()),
        }
    }

    pub fn survey(&self) -> &Survey {
        match self {
            Role::Gatherer(role) => role.survey(),
            Role::Attacker(role) => role.survey(),
            Role::Defender(role) => role.survey(),
        }
    }
}
