//! Owned world snapshot.

use super::WorldOracle;
use crate::state::{AgentId, AgentState, Arena, AsteroidId, AsteroidState, HomeBaseState, TeamId};

/// Owned copy of the arena state at one simulation step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSnapshot {
    pub arena: Arena,
    pub agents: Vec<AgentState>,
    pub home_bases: Vec<HomeBaseState>,
    pub asteroids: Vec<AsteroidState>,
}

impl WorldSnapshot {
    pub fn new(arena: Arena) -> Self {
        Self {
            arena,
            agents: Vec::new(),
            home_bases: Vec::new(),
            asteroids: Vec::new(),
        }
    }

    pub fn with_home_base(mut self, base: HomeBaseState) -> Self {
        self.home_bases.push(base);
        self
    }

    pub fn with_agent(mut self, agent: AgentState) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn with_asteroid(mut self, asteroid: AsteroidState) -> Self {
        self.asteroids.push(asteroid);
        self
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut AgentState> {
        self.agents.iter_mut().find(|agent| agent.id == id)
    }

    pub fn home_base_mut(&mut self, team: TeamId) -> Option<&mut HomeBaseState> {
        self.home_bases.iter_mut().find(|base| base.team == team)
    }

    pub fn asteroid_mut(&mut self, id: AsteroidId) -> Option<&mut AsteroidState> {
        self.asteroids.iter_mut().find(|asteroid| asteroid.id == id)
    }
}

impl WorldOracle for WorldSnapshot {
    fn arena(&self) -> Arena {
        self.arena
    }

    fn agents(&self) -> &[AgentState] {
        &self.agents
    }

    fn home_bases(&self) -> &[HomeBaseState] {
        &self.home_bases
    }

    fn asteroids(&self) -> &[AsteroidState] {
        &self.asteroids
    }
}
