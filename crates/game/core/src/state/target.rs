use std::fmt;

use crate::env::{WorldError, WorldOracle};
use crate::geometry::Point;

use super::{AgentId, AsteroidId, TeamId};

/// Anything an agent can move toward, aim at, or load from.
///
/// Entity variants are resolved against the live world on every use, so a
/// target keeps tracking an entity that moves between decisions.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Agent(AgentId),
    HomeBase(TeamId),
    Asteroid(AsteroidId),
    Point(Point),
}

impl Target {
    /// Current location of the target.
    ///
    /// # Errors
    ///
    /// Returns a [`WorldError`] when the identifier is unknown to `world`.
    pub fn resolve<W>(&self, world: &W) -> Result<Point, WorldError>
    where
        W: WorldOracle + ?Sized,
    {
        match *self {
            Target::Agent(id) => world
                .agent(id)
                .map(|agent| agent.position)
                .ok_or(WorldError::UnknownAgent(id)),
            Target::HomeBase(team) => world
                .home_base(team)
                .map(|base| base.position)
                .ok_or(WorldError::UnknownHomeBase(team)),
            Target::Asteroid(id) => world
                .asteroid(id)
                .map(|asteroid| asteroid.position)
                .ok_or(WorldError::UnknownAsteroid(id)),
            Target::Point(point) => Ok(point),
        }
    }

    pub fn is_home_base_of(&self, team: TeamId) -> bool {
        matches!(self, Target::HomeBase(owner) if *owner == team)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Agent(id) => write!(f, "agent {id}"),
            Target::HomeBase(team) => write!(f, "home base of {team}"),
            Target::Asteroid(id) => write!(f, "{id}"),
            Target::Point(point) => write!(f, "point {point}"),
        }
    }
}
