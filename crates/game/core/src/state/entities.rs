use crate::geometry::{Located, Point};

use super::{AgentId, AsteroidId, TeamId};

/// Fixed-size rectangular arena shared by every team.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Strict containment: points on the border are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x > 0.0 && point.x < self.width && point.y > 0.0 && point.y < self.height
    }
}

/// Load state used to bucket travelled distance in statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CargoFill {
    Empty,
    Partial,
    Full,
}

/// Cargo hold of an agent or home base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cargo {
    pub payload: u32,
    pub capacity: u32,
}

impl Cargo {
    pub const fn new(payload: u32, capacity: u32) -> Self {
        Self { payload, capacity }
    }

    pub const fn empty(capacity: u32) -> Self {
        Self::new(0, capacity)
    }

    pub const fn is_full(&self) -> bool {
        self.payload >= self.capacity
    }

    pub const fn is_empty(&self) -> bool {
        self.payload == 0
    }

    pub const fn free_space(&self) -> u32 {
        self.capacity.saturating_sub(self.payload)
    }

    pub const fn fill(&self) -> CargoFill {
        if self.is_full() {
            CargoFill::Full
        } else if self.is_empty() {
            CargoFill::Empty
        } else {
            CargoFill::Partial
        }
    }
}

/// Engine-owned facts about one agent, as seen at decision time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub id: AgentId,
    pub team: TeamId,
    pub position: Point,
    /// Heading in degrees.
    pub heading: f64,
    /// Health/shield gauge, 0.0..=1.0.
    pub health: f64,
    pub cargo: Cargo,
    /// Shot distance of the mounted weapon, `None` when unarmed.
    pub weapon_range: Option<f64>,
    pub alive: bool,
}

impl AgentState {
    /// Healthy, unarmed, empty-handed agent.
    pub fn new(id: AgentId, team: TeamId, position: Point, capacity: u32) -> Self {
        Self {
            id,
            team,
            position,
            heading: 0.0,
            health: 1.0,
            cargo: Cargo::empty(capacity),
            weapon_range: None,
            alive: true,
        }
    }

    pub fn with_weapon(mut self, range: f64) -> Self {
        self.weapon_range = Some(range);
        self
    }

    pub fn with_health(mut self, health: f64) -> Self {
        self.health = health;
        self
    }

    pub fn with_payload(mut self, payload: u32) -> Self {
        self.cargo.payload = payload;
        self
    }

    /// Salvage left behind once destroyed.
    pub fn salvage(&self) -> u32 {
        if self.alive { 0 } else { self.cargo.payload }
    }
}

impl Located for AgentState {
    fn location(&self) -> Point {
        self.position
    }
}

/// A team's stationary structure: heals nearby agents and stores resources.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HomeBaseState {
    pub team: TeamId,
    pub position: Point,
    /// Stored resources; becomes salvage once the base is destroyed.
    pub payload: u32,
    pub alive: bool,
}

impl HomeBaseState {
    pub fn new(team: TeamId, position: Point) -> Self {
        Self {
            team,
            position,
            payload: 0,
            alive: true,
        }
    }

    pub fn with_payload(mut self, payload: u32) -> Self {
        self.payload = payload;
        self
    }

    pub fn salvage(&self) -> u32 {
        if self.alive { 0 } else { self.payload }
    }
}

impl Located for HomeBaseState {
    fn location(&self) -> Point {
        self.position
    }
}

/// Harvestable rock with a finite remaining yield.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsteroidState {
    pub id: AsteroidId,
    pub position: Point,
    pub remaining: u32,
}

impl AsteroidState {
    pub fn new(id: AsteroidId, position: Point, remaining: u32) -> Self {
        Self {
            id,
            position,
            remaining,
        }
    }
}

impl Located for AsteroidState {
    fn location(&self) -> Point {
        self.position
    }
}
