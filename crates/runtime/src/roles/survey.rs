//! World snapshot queries shared by every role.
//!
//! [`Scan`] answers questions about the live world relative to one agent.
//! Every list it returns is sorted ascending by distance from that agent, so
//! "nearest" is always the first entry. Sorting is stable: equal distances
//! keep the world's enumeration order.
//!
//! [`Survey`] is the per-role cache of those lists. Roles refresh the parts
//! they read at the start of every decision; nothing in it is trusted across
//! callbacks.
use arena_core::{
    AgentId, AgentState, AsteroidId, HomeBaseState, Located, Point, Target, TeamId, WorldOracle,
};

/// A candidate paired with its distance from the querying agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scored<T> {
    pub item: T,
    pub location: Point,
    pub distance: f64,
}

impl<T> Scored<T> {
    pub fn new(item: T, location: Point, distance: f64) -> Self {
        Self {
            item,
            location,
            distance,
        }
    }
}

fn sort_by_distance<T>(candidates: &mut [Scored<T>]) {
    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

/// Lists the world relative to one agent.
pub struct Scan<'a> {
    world: &'a dyn WorldOracle,
    me: &'a AgentState,
    home: &'a HomeBaseState,
}

impl<'a> Scan<'a> {
    pub fn new(world: &'a dyn WorldOracle, me: &'a AgentState, home: &'a HomeBaseState) -> Self {
        Self { world, me, home }
    }

    fn scored<T>(&self, item: T, location: Point) -> Scored<T> {
        Scored::new(item, location, self.me.position.distance_to(&location))
    }

    /// Living agents of every other team.
    pub fn living_enemies(&self) -> Vec<Scored<AgentId>> {
        let mut enemies: Vec<_> = self
            .world
            .agents()
            .iter()
            .filter(|agent| agent.alive && agent.team != self.me.team)
            .map(|agent| self.scored(agent.id, agent.position))
            .collect();
        sort_by_distance(&mut enemies);
        enemies
    }

    /// Standing home bases of every other team.
    pub fn enemy_home_bases(&self) -> Vec<Scored<TeamId>> {
        let mut bases: Vec<_> = self
            .world
            .home_bases()
            .iter()
            .filter(|base| base.alive && base.team != self.home.team)
            .map(|base| self.scored(base.team, base.position))
            .collect();
        sort_by_distance(&mut bases);
        bases
    }

    /// Asteroids with yield left.
    pub fn resource_asteroids(&self) -> Vec<Scored<AsteroidId>> {
        let mut asteroids: Vec<_> = self
            .world
            .asteroids()
            .iter()
            .filter(|asteroid| asteroid.remaining > 0)
            .map(|asteroid| self.scored(asteroid.id, asteroid.position))
            .collect();
        sort_by_distance(&mut asteroids);
        asteroids
    }

    /// Wrecks of enemy agents still carrying salvage.
    pub fn destroyed_enemy_agents(&self) -> Vec<Scored<AgentId>> {
        let mut wrecks: Vec<_> = self
            .world
            .agents()
            .iter()
            .filter(|agent| agent.team != self.me.team && agent.salvage() > 0)
            .map(|agent| self.scored(agent.id, agent.position))
            .collect();
        sort_by_distance(&mut wrecks);
        wrecks
    }

    /// Ruins of enemy home bases still carrying salvage.
    pub fn destroyed_enemy_home_bases(&self) -> Vec<Scored<TeamId>> {
        let mut ruins: Vec<_> = self
            .world
            .home_bases()
            .iter()
            .filter(|base| base.team != self.home.team && base.salvage() > 0)
            .map(|base| self.scored(base.team, base.position))
            .collect();
        sort_by_distance(&mut ruins);
        ruins
    }

    /// Every resource point: asteroids, then wrecks, then ruins, re-sorted.
    pub fn all_harvest_targets(&self) -> Vec<Scored<Target>> {
        let asteroids = self
            .resource_asteroids()
            .into_iter()
            .map(|c| Scored::new(Target::Asteroid(c.item), c.location, c.distance));
        let wrecks = self
            .destroyed_enemy_agents()
            .into_iter()
            .map(|c| Scored::new(Target::Agent(c.item), c.location, c.distance));
        let ruins = self
            .destroyed_enemy_home_bases()
            .into_iter()
            .map(|c| Scored::new(Target::HomeBase(c.item), c.location, c.distance));

        let mut all: Vec<_> = asteroids.chain(wrecks).chain(ruins).collect();
        sort_by_distance(&mut all);
        all
    }

    /// Resource points covered by the home base: closer to it than
    /// `weapon_range`. An unarmed agent (range 0) has none.
    pub fn safe_harvest_targets(
        &self,
        harvest: &[Scored<Target>],
        weapon_range: f64,
    ) -> Vec<Scored<Target>> {
        let mut safe: Vec<_> = harvest
            .iter()
            .filter(|c| c.location.distance_to(self.home) < weapon_range)
            .copied()
            .collect();
        sort_by_distance(&mut safe);
        safe
    }

    /// Picks the threat to engage from `enemies` (as returned by
    /// [`Scan::living_enemies`]).
    ///
    /// A lone enemy loitering within `safety_distance` of its standing home
    /// base is shielded by it, so the base is returned instead. Otherwise the
    /// nearest enemy wins; `None` when there are no enemies.
    pub fn nearest_threat(
        &self,
        enemies: &[Scored<AgentId>],
        safety_distance: f64,
    ) -> Option<Target> {
        let nearest = enemies.first()?;
        if enemies.len() != 1 {
            return Some(Target::Agent(nearest.item));
        }

        let lone = Target::Agent(nearest.item);
        let Some(enemy) = self.world.agent(nearest.item) else {
            return Some(lone);
        };
        match self.world.home_base(enemy.team) {
            Some(base) if base.alive && enemy.distance_to(base) <= safety_distance => {
                Some(Target::HomeBase(base.team))
            }
            _ => Some(lone),
        }
    }
}

/// Cached query results held by a role between the refresh and the decision
/// that reads them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Survey {
    pub enemies: Vec<Scored<AgentId>>,
    pub enemy_home_bases: Vec<Scored<TeamId>>,
    pub harvest: Vec<Scored<Target>>,
    pub safe_harvest: Vec<Scored<Target>>,
}

impl Survey {
    /// Fresh survey with every list populated.
    pub fn capture(scan: &Scan<'_>, weapon_range: f64) -> Self {
        let mut survey = Self::default();
        survey.refresh_hostiles(scan);
        survey.refresh_harvest(scan, weapon_range);
        survey
    }

    /// Recomputes living enemies and enemy home bases.
    pub fn refresh_hostiles(&mut self, scan: &Scan<'_>) {
        self.enemies = scan.living_enemies();
        self.enemy_home_bases = scan.enemy_home_bases();
    }

    /// Recomputes every resource point and the safe subset.
    pub fn refresh_harvest(&mut self, scan: &Scan<'_>, weapon_range: f64) {
        self.harvest = scan.all_harvest_targets();
        self.safe_harvest = scan.safe_harvest_targets(&self.harvest, weapon_range);
    }

    /// Enemies or standing enemy home bases remain.
    pub fn has_threats(&self) -> bool {
        !self.enemies.is_empty() || !self.enemy_home_bases.is_empty()
    }
}
