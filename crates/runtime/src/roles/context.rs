//! Decision context handed to every role callback.
//!
//! The [`RoleContext`] is the team-context object of a single decision. It
//! provides:
//!
//! - Read access to the live world through [`WorldOracle`]
//! - The deciding agent, its home base and the team roster
//! - Agent-level facts recorded at spawn (roster index, weapon range)
//! - The tunables and the injectable firing-offset order
use arena_core::{AgentState, HomeBaseState, Point, RoleConfig, Target, WorldOracle};

use crate::api::Result;
use crate::squad::Roster;

use super::offsets::OffsetOrder;
use super::survey::Scan;

/// Everything a role may read while deciding for one agent.
///
/// # Lifetime
///
/// The context borrows the world for the duration of one callback. Roles
/// never keep it: cached query results live in their own [`super::Survey`]
/// and are refreshed from a fresh context on every callback.
pub struct RoleContext<'a> {
    pub world: &'a dyn WorldOracle,

    /// The deciding agent, as the engine sees it right now.
    pub agent: &'a AgentState,

    /// Home base of the agent's team.
    pub home: &'a HomeBaseState,

    /// Ordered, stable membership of the agent's team.
    pub roster: &'a Roster,

    /// Join order of the agent inside [`Self::roster`].
    pub roster_index: usize,

    /// Shot distance recorded at spawn; `0.0` when unarmed.
    pub weapon_range: f64,

    pub config: &'a RoleConfig,

    pub offsets: &'a mut dyn OffsetOrder,
}

impl<'a> RoleContext<'a> {
    pub fn scan(&self) -> Scan<'a> {
        Scan::new(self.world, self.agent, self.home)
    }

    /// Living roster members, the deciding agent included.
    pub fn living_teammates(&self) -> impl Iterator<Item = &'a AgentState> {
        let world = self.world;
        self.roster
            .members()
            .iter()
            .filter_map(move |id| world.agent(*id))
            .filter(|agent| agent.alive)
    }

    /// Living roster members other than the deciding agent.
    pub fn living_partners(&self) -> impl Iterator<Item = &'a AgentState> {
        let me = self.agent.id;
        self.living_teammates().filter(move |agent| agent.id != me)
    }

    /// Number of rival teams; never zero so it can divide.
    pub fn opposing_teams(&self) -> usize {
        self.world.team_count().saturating_sub(1).max(1)
    }

    pub fn home_target(&self) -> Target {
        Target::HomeBase(self.home.team)
    }

    pub fn resolve(&self, target: &Target) -> Result<Point> {
        Ok(target.resolve(self.world)?)
    }
}
