//! Per-agent controller: owns the active role and applies its decisions.
use arena_core::{AgentId, Target};

use crate::api::{AgentEvent, Command, CommandSink, Result};
use crate::roles::{Decision, Role, RoleContext, RoleKind};
use crate::stats::{TravelLog, TravelStats};

/// Team-level follow-ups requested while handling one callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub broadcast: bool,
    pub mission_complete: bool,
}

impl Outcome {
    fn absorb(&mut self, decision: &Decision) {
        self.broadcast |= decision.broadcast;
        self.mission_complete |= decision.mission_complete;
    }
}

/// What triggered a decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Trigger {
    Spawn,
    Event(AgentEvent),
    Retarget,
}

/// One team member as seen by the squad.
#[derive(Clone, Debug)]
pub struct AgentController {
    id: AgentId,
    roster_index: usize,
    weapon_range: f64,
    role: Role,
    target: Option<Target>,
    travel: TravelLog,
}

impl AgentController {
    /// Starts in Defender; the first decision comes from [`Self::step`] with
    /// [`Trigger::Spawn`].
    pub(crate) fn new(roster_index: usize, ctx: &RoleContext<'_>) -> Self {
        Self {
            id: ctx.agent.id,
            roster_index,
            weapon_range: ctx.weapon_range,
            role: Role::new(RoleKind::Defender, ctx),
            target: None,
            travel: TravelLog::default(),
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn roster_index(&self) -> usize {
        self.roster_index
    }

    pub fn weapon_range(&self) -> f64 {
        self.weapon_range
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn role_kind(&self) -> RoleKind {
        self.role.kind()
    }

    /// Last target decided by a role.
    pub fn target(&self) -> Option<Target> {
        self.target
    }

    pub fn travel(&self) -> TravelStats {
        self.travel.stats()
    }

    /// Runs one decision to completion, following role transitions up to
    /// the configured hop limit, and dispatches the resulting commands.
    pub(crate) fn step(
        &mut self,
        trigger: Trigger,
        ctx: &mut RoleContext<'_>,
        sink: &mut dyn CommandSink,
    ) -> Result<Outcome> {
        let mut decision = match trigger {
            Trigger::Spawn => self.role.activate(ctx)?,
            Trigger::Event(event) => {
                tracing::debug!("Agent {} ({}) handling {:?}", self.id, self.role.kind(), event);
                self.role.handle(event, ctx)?
            }
            Trigger::Retarget => self.role.retarget(ctx)?,
        };

        let mut outcome = Outcome::default();
        let mut hops = 0;
        loop {
            outcome.absorb(&decision);
            if let Some(target) = decision.target {
                self.target = Some(target);
            }

            let Some(next) = decision.transition else {
                self.issue(decision.commands, ctx, sink);
                return Ok(outcome);
            };

            if hops == ctx.config.max_role_hops {
                tracing::warn!(
                    "Agent {} stays {} after {} role changes in one callback (next would be {})",
                    self.id,
                    self.role.kind(),
                    hops,
                    next
                );
                return Ok(outcome);
            }
            hops += 1;

            tracing::debug!("Agent {} switching {} -> {}", self.id, self.role.kind(), next);
            self.role = Role::new(next, ctx);
            if next == RoleKind::Gatherer {
                self.travel.mark(ctx.agent.position);
            }
            decision = self.role.activate(ctx)?;
        }
    }

    fn issue(&mut self, commands: Vec<Command>, ctx: &RoleContext<'_>, sink: &mut dyn CommandSink) {
        for command in commands {
            if command.is_move() && self.role.kind() == RoleKind::Gatherer {
                self.travel
                    .record_leg(ctx.agent.position, ctx.agent.cargo.fill());
            }
            sink.dispatch(self.id, command);
        }
    }
}
