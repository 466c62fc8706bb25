//! Team coordinator.
//!
//! A [`Squad`] owns every controller of one team and is the only entry point
//! the simulation engine talks to. Callbacks are handled one at a time; the
//! re-target broadcast runs synchronously inside the originating callback and
//! never re-enters the originating agent.
use arena_core::{AgentId, HomeBaseState, RoleConfig, Target, TeamId, WorldError, WorldOracle};

use crate::api::{AgentEvent, CommandSink, Result, RoleError};
use crate::config::RuntimeConfig;
use crate::controller::{AgentController, Outcome, Trigger};
use crate::roles::{OffsetOrder, RoleContext, RoleKind};
use crate::stats::{MemberReport, TeamReport};

/// Ordered, stable membership of one team.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    team: TeamId,
    members: Vec<AgentId>,
}

impl Roster {
    pub fn new(team: TeamId) -> Self {
        Self {
            team,
            members: Vec::new(),
        }
    }

    pub fn from_members(team: TeamId, members: Vec<AgentId>) -> Self {
        Self { team, members }
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    /// Members in join order, dead ones included.
    pub fn members(&self) -> &[AgentId] {
        &self.members
    }

    pub fn index_of(&self, agent: AgentId) -> Option<usize> {
        self.members.iter().position(|member| *member == agent)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn join(&mut self, agent: AgentId) -> usize {
        self.members.push(agent);
        self.members.len() - 1
    }
}

pub struct Squad {
    roster: Roster,
    members: Vec<AgentController>,
    config: RoleConfig,
    offsets: Box<dyn OffsetOrder>,
    final_report: Option<TeamReport>,
}

impl Squad {
    pub fn new(team: TeamId, config: RoleConfig, offsets: Box<dyn OffsetOrder>) -> Self {
        Self {
            roster: Roster::new(team),
            members: Vec::new(),
            config,
            offsets,
            final_report: None,
        }
    }

    pub fn from_config(team: TeamId, config: &RuntimeConfig) -> Self {
        Self::new(team, config.roles.clone(), config.offset_order())
    }

    pub fn team(&self) -> TeamId {
        self.roster.team
    }

    pub fn config(&self) -> &RoleConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn member(&self, agent: AgentId) -> Option<&AgentController> {
        self.members.iter().find(|member| member.id() == agent)
    }

    pub fn role_of(&self, agent: AgentId) -> Option<RoleKind> {
        self.member(agent).map(AgentController::role_kind)
    }

    pub fn target_of(&self, agent: AgentId) -> Option<Target> {
        self.member(agent).and_then(AgentController::target)
    }

    /// Registers a freshly spawned agent and runs its first decision.
    ///
    /// # Errors
    ///
    /// Fails when the agent is unknown to `world`, belongs to another team
    /// or already joined.
    pub fn spawn(
        &mut self,
        agent: AgentId,
        world: &dyn WorldOracle,
        sink: &mut dyn CommandSink,
    ) -> Result<()> {
        let state = world.agent(agent).ok_or(WorldError::UnknownAgent(agent))?;
        if state.team != self.roster.team {
            return Err(RoleError::ForeignAgent {
                agent,
                expected: self.roster.team,
                actual: state.team,
            });
        }
        if self.roster.index_of(agent).is_some() {
            return Err(RoleError::AlreadyInSquad(agent));
        }

        let roster_index = self.roster.join(agent);
        let weapon_range = state.weapon_range.unwrap_or(0.0);
        let home = self.home_base(world)?;
        let ctx = RoleContext {
            world,
            agent: state,
            home,
            roster: &self.roster,
            roster_index,
            weapon_range,
            config: &self.config,
            offsets: self.offsets.as_mut(),
        };
        let controller = AgentController::new(roster_index, &ctx);
        self.members.push(controller);
        tracing::debug!(
            "Agent {} joined {} as member {}",
            agent,
            self.roster.team,
            roster_index
        );

        let outcome = self.drive(roster_index, Trigger::Spawn, world, sink)?;
        self.follow_up(roster_index, outcome, world, sink)
    }

    /// Forwards an engine callback to the agent's active role.
    ///
    /// # Errors
    ///
    /// Fails when the agent is not a member, or a decided target no longer
    /// resolves against `world`.
    pub fn dispatch(
        &mut self,
        agent: AgentId,
        event: AgentEvent,
        world: &dyn WorldOracle,
        sink: &mut dyn CommandSink,
    ) -> Result<()> {
        let index = self.roster.index_of(agent).ok_or(RoleError::NotInSquad {
            agent,
            team: self.roster.team,
        })?;
        let outcome = self.drive(index, Trigger::Event(event), world, sink)?;
        self.follow_up(index, outcome, world, sink)
    }

    /// Current travel report, whether or not the run is over.
    pub fn report(&self) -> TeamReport {
        let members = self
            .members
            .iter()
            .map(|member| MemberReport {
                agent: member.id(),
                travel: member.travel(),
            })
            .collect();
        TeamReport::new(self.roster.team, members)
    }

    /// The report emitted once the team finished, if it has.
    pub fn final_report(&self) -> Option<&TeamReport> {
        self.final_report.as_ref()
    }

    fn home_base<'w>(&self, world: &'w dyn WorldOracle) -> Result<&'w HomeBaseState> {
        Ok(world
            .home_base(self.roster.team)
            .ok_or(WorldError::UnknownHomeBase(self.roster.team))?)
    }

    fn drive(
        &mut self,
        index: usize,
        trigger: Trigger,
        world: &dyn WorldOracle,
        sink: &mut dyn CommandSink,
    ) -> Result<Outcome> {
        let home = self.home_base(world)?;
        let Self {
            roster,
            members,
            config,
            offsets,
            ..
        } = self;
        let controller = &mut members[index];
        let agent = world
            .agent(controller.id())
            .ok_or(WorldError::UnknownAgent(controller.id()))?;

        let mut ctx = RoleContext {
            world,
            agent,
            home,
            roster,
            roster_index: controller.roster_index(),
            weapon_range: controller.weapon_range(),
            config,
            offsets: offsets.as_mut(),
        };
        controller.step(trigger, &mut ctx, sink)
    }

    fn follow_up(
        &mut self,
        origin: usize,
        outcome: Outcome,
        world: &dyn WorldOracle,
        sink: &mut dyn CommandSink,
    ) -> Result<()> {
        let mut complete = outcome.mission_complete;
        if outcome.broadcast {
            for index in 0..self.members.len() {
                if index == origin || !self.is_living_gatherer(index, world) {
                    continue;
                }
                let retargeted = self.drive(index, Trigger::Retarget, world, sink)?;
                complete |= retargeted.mission_complete;
            }
        }

        if complete {
            self.try_close(world);
        }
        Ok(())
    }

    fn is_living_gatherer(&self, index: usize, world: &dyn WorldOracle) -> bool {
        let member = &self.members[index];
        member.role_kind() == RoleKind::Gatherer
            && world.agent(member.id()).is_some_and(|agent| agent.alive)
    }

    /// Emits the final report once every living member is headed home.
    fn try_close(&mut self, world: &dyn WorldOracle) {
        if self.final_report.is_some() {
            return;
        }
        let home = Target::HomeBase(self.roster.team);
        let all_home = self
            .members
            .iter()
            .filter(|member| world.agent(member.id()).is_some_and(|agent| agent.alive))
            .all(|member| member.target() == Some(home));
        if !all_home {
            return;
        }

        let report = self.report();
        tracing::info!("Run finished: {}", report);
        for member in &report.members {
            tracing::info!(
                "  {}: {:.0} full, {:.0} partial, {:.0} empty",
                member.agent,
                member.travel.full,
                member.travel.partial,
                member.travel.empty
            );
        }
        self.final_report = Some(report);
    }
}
