//! Read-only access to the live arena.
//!
//! The simulation engine is an external collaborator. It exposes its world to
//! the decision layer through [`WorldOracle`]; [`WorldSnapshot`] is the plain
//! owned implementation used by embedders that copy state out of the engine
//! each step, and by tests.
mod error;
mod snapshot;

pub use error::WorldError;
pub use snapshot::WorldSnapshot;

use crate::state::{AgentId, AgentState, Arena, AsteroidId, AsteroidState, HomeBaseState, TeamId};

/// Enumerable world state consumed by the roles.
///
/// Implementations must return entities in a stable order between calls
/// within one decision: ties in distance sorting fall back to this order.
pub trait WorldOracle {
    fn arena(&self) -> Arena;

    /// Every agent of every team, dead or alive.
    fn agents(&self) -> &[AgentState];

    /// Every home base, destroyed or not. One per team.
    fn home_bases(&self) -> &[HomeBaseState];

    fn asteroids(&self) -> &[AsteroidState];

    /// Number of teams taking part in the match.
    fn team_count(&self) -> usize {
        self.home_bases().len()
    }

    fn agent(&self, id: AgentId) -> Option<&AgentState> {
        self.agents().iter().find(|agent| agent.id == id)
    }

    fn home_base(&self, team: TeamId) -> Option<&HomeBaseState> {
        self.home_bases().iter().find(|base| base.team == team)
    }

    fn asteroid(&self, id: AsteroidId) -> Option<&AsteroidState> {
        self.asteroids().iter().find(|asteroid| asteroid.id == id)
    }
}
