//! Defensive role: holds a perimeter slot around the home base.
use arena_core::{Arena, Located, Point, Target, offset_toward};

use super::{Decision, RoleContext, RoleKind, Survey};
use crate::api::{AgentEvent, Command, Result};

/// Perimeter slots per formation.
const SLOTS: usize = 5;

/// Fraction of the healing radius between the base and the formation anchor.
const ANCHOR_FRACTION: f64 = 0.8;

struct Formation {
    coefficients: [f64; SLOTS],
    diagonal: [f64; SLOTS],
    anti_diagonal: [f64; SLOTS],
}

const WIDE: Formation = Formation {
    coefficients: [0.5, 0.2, 0.3, 0.7, 1.0],
    diagonal: [-110.0, -120.0, 100.0, 130.0, 140.0],
    anti_diagonal: [110.0, 120.0, -120.0, -120.0, -135.0],
};

const SQUARE: Formation = Formation {
    coefficients: [1.0, 0.4, 0.0, 0.4, 1.0],
    diagonal: [-110.0, -115.0, 0.0, 115.0, 110.0],
    anti_diagonal: [110.0, 115.0, 0.0, -115.0, -110.0],
};

const TALL: Formation = Formation {
    coefficients: [0.7, 0.3, 0.1, 0.5, 0.9],
    diagonal: [110.0, 100.0, -100.0, -120.0, -130.0],
    anti_diagonal: [-110.0, -100.0, 100.0, 120.0, 130.0],
};

/// Formation slot of the `roster_index`-th member guarding `base`.
///
/// The arena's aspect ratio picks the table; whether the base sits in a
/// corner on the main diagonal (bottom-left or top-right) picks the angle
/// row. Slots are reused past the fifth member.
pub fn formation_spot(arena: Arena, base: Point, radius: f64, roster_index: usize) -> Point {
    let formation = if arena.width > arena.height {
        &WIDE
    } else if arena.width < arena.height {
        &TALL
    } else {
        &SQUARE
    };

    let center = arena.center();
    let on_diagonal = (base.x < center.x) == (base.y < center.y);
    let angles = if on_diagonal {
        &formation.diagonal
    } else {
        &formation.anti_diagonal
    };

    let slot = roster_index % SLOTS;
    let anchor = offset_toward(base, center, ANCHOR_FRACTION, None, radius);
    offset_toward(
        anchor,
        center,
        formation.coefficients[slot],
        Some(angles[slot]),
        radius,
    )
}

#[derive(Clone, Debug, PartialEq)]
pub struct Defender {
    survey: Survey,
}

impl Defender {
    pub fn new(ctx: &RoleContext<'_>) -> Self {
        Self {
            survey: Survey::capture(&ctx.scan(), ctx.weapon_range),
        }
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    pub fn activate(&mut self, ctx: &mut RoleContext<'_>) -> Result<Decision> {
        let spot = formation_spot(
            ctx.world.arena(),
            ctx.home.position,
            ctx.config.healing_radius,
            ctx.roster_index,
        );
        if ctx.agent.position.coincides(spot) {
            return self.hold_position(ctx);
        }

        tracing::debug!("Agent {} taking formation at {}", ctx.agent.id, spot);
        let spot = Target::Point(spot);
        Ok(Decision::command(Command::MoveTo(spot)).with_target(spot))
    }

    pub fn handle(&mut self, event: AgentEvent, ctx: &mut RoleContext<'_>) -> Result<Decision> {
        match event {
            AgentEvent::UnloadComplete => self.activate(ctx),
            AgentEvent::ArrivedAtHome if !ctx.agent.cargo.is_empty() => {
                Ok(Decision::command(Command::Unload(ctx.home.team)))
            }
            _ => self.hold_position(ctx),
        }
    }

    /// Arrival logic: shoot what comes close, otherwise decide whether the
    /// perimeter is still worth holding.
    fn hold_position(&mut self, ctx: &mut RoleContext<'_>) -> Result<Decision> {
        let scan = ctx.scan();
        self.survey.refresh_hostiles(&scan);
        let threat = scan.nearest_threat(&self.survey.enemies, ctx.config.threat_safety_distance);

        if let Some(threat) = threat {
            let reach = ctx.weapon_range + ctx.config.engage_buffer;
            if ctx.agent.distance_to(&ctx.resolve(&threat)?) < reach {
                tracing::debug!("Agent {} intercepting {}", ctx.agent.id, threat);
                return Ok(Decision::command(Command::Fire(threat)));
            }
        }

        self.survey.refresh_harvest(&scan, ctx.weapon_range);
        if !self.survey.safe_harvest.is_empty() {
            return Ok(Decision::switch_to(RoleKind::Gatherer));
        }
        if self.survey.enemies.len() < ctx.living_teammates().count() {
            return Ok(Decision::switch_to(RoleKind::Attacker));
        }

        Ok(threat.map_or_else(Decision::hold, |threat| {
            Decision::command(Command::TurnTo(threat))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::FixedOrder;
    use crate::squad::Roster;
    use arena_core::{
        AgentId, AgentState, HomeBaseState, RoleConfig, TeamId, WorldOracle, WorldSnapshot,
    };

    const RADIUS: f64 = 200.0;
    const MINE: TeamId = TeamId(0);
    const THEIRS: TeamId = TeamId(1);
    const ME: AgentId = AgentId(0);
    const ENEMY: AgentId = AgentId(20);
    const HOME: Point = Point::new(90.0, 90.0);

    fn world(me: Point) -> WorldSnapshot {
        WorldSnapshot::new(Arena::new(1000.0, 1000.0))
            .with_home_base(HomeBaseState::new(MINE, HOME))
            .with_home_base(HomeBaseState::new(THEIRS, Point::new(910.0, 910.0)))
            .with_agent(AgentState::new(ME, MINE, me, 100).with_weapon(300.0))
            .with_agent(AgentState::new(ENEMY, THEIRS, Point::new(900.0, 500.0), 100))
    }

    fn slot() -> Point {
        formation_spot(Arena::new(1000.0, 1000.0), HOME, RADIUS, 0)
    }

    fn decide(world: &WorldSnapshot, event: AgentEvent) -> Decision {
        let config = RoleConfig::default();
        let roster = Roster::from_members(MINE, vec![ME]);
        let mut offsets = FixedOrder;
        let mut ctx = RoleContext {
            world,
            agent: world.agent(ME).expect("me"),
            home: world.home_base(MINE).expect("home"),
            roster: &roster,
            roster_index: 0,
            weapon_range: 300.0,
            config: &config,
            offsets: &mut offsets,
        };
        let mut defender = Defender::new(&ctx);
        defender.handle(event, &mut ctx).expect("decision")
    }

    #[test]
    fn formation_is_deterministic() {
        let arena = Arena::new(1200.0, 900.0);
        let base = Point::new(90.0, 90.0);
        for index in 0..SLOTS {
            assert_eq!(
                formation_spot(arena, base, RADIUS, index),
                formation_spot(arena, base, RADIUS, index)
            );
        }
    }

    #[test]
    fn slots_wrap_past_the_fifth_member() {
        let arena = Arena::new(1200.0, 1200.0);
        let base = Point::new(1110.0, 90.0);
        assert_eq!(
            formation_spot(arena, base, RADIUS, 6),
            formation_spot(arena, base, RADIUS, 1)
        );
    }

    #[test]
    fn square_middle_slot_sits_on_the_anchor() {
        // Coefficient zero leaves the member on the anchor point.
        let arena = Arena::new(1000.0, 1000.0);
        let base = Point::new(100.0, 100.0);
        let spot = formation_spot(arena, base, RADIUS, 2);

        let anchor = offset_toward(base, arena.center(), ANCHOR_FRACTION, None, RADIUS);
        assert!(spot.coincides(anchor), "got {spot}");
        assert!((spot.distance_to(&base) - 160.0).abs() < 1e-9);
    }

    #[test]
    fn slots_are_spread_out() {
        for arena in [
            Arena::new(1200.0, 900.0),
            Arena::new(1000.0, 1000.0),
            Arena::new(900.0, 1200.0),
        ] {
            let base = Point::new(90.0, 90.0);
            let spots: Vec<_> = (0..SLOTS)
                .map(|index| formation_spot(arena, base, RADIUS, index))
                .collect();
            for (i, a) in spots.iter().enumerate() {
                for b in &spots[i + 1..] {
                    assert!(!a.coincides(*b), "{a} and {b} overlap in {arena:?}");
                }
            }
        }
    }

    #[test]
    fn mirrored_corners_use_mirrored_angles() {
        let arena = Arena::new(1000.0, 1000.0);
        let bottom_left = formation_spot(arena, Point::new(90.0, 90.0), RADIUS, 0);
        let top_left = formation_spot(arena, Point::new(90.0, 910.0), RADIUS, 0);

        // Reflecting across the horizontal midline maps one onto the other.
        assert!((bottom_left.x - top_left.x).abs() < 1e-9);
        assert!((bottom_left.y - (1000.0 - top_left.y)).abs() < 1e-9);
    }

    #[test]
    fn distant_threat_is_faced_while_holding() {
        // One ally against one enemy: not worth leaving the perimeter.
        let decision = decide(&world(slot()), AgentEvent::ArrivedAtTarget(None));

        assert_eq!(decision.transition, None);
        assert_eq!(decision.commands, vec![Command::TurnTo(Target::Agent(ENEMY))]);
    }

    #[test]
    fn unload_complete_returns_to_the_slot() {
        let decision = decide(&world(HOME), AgentEvent::UnloadComplete);

        let spot = Target::Point(slot());
        assert_eq!(decision.commands, vec![Command::MoveTo(spot)]);
        assert_eq!(decision.target, Some(spot));
    }

    #[test]
    fn arriving_home_with_cargo_unloads() {
        let mut world = world(HOME);
        world.agent_mut(ME).expect("me").cargo.payload = 40;

        let decision = decide(&world, AgentEvent::ArrivedAtHome);
        assert_eq!(decision.commands, vec![Command::Unload(MINE)]);
    }

    #[test]
    fn arriving_home_empty_runs_the_hold_logic() {
        let decision = decide(&world(HOME), AgentEvent::ArrivedAtHome);
        assert_eq!(decision.commands, vec![Command::TurnTo(Target::Agent(ENEMY))]);
    }
}
