//! Resource-gathering role.
//!
//! Collects from the nearest worthwhile resource point, retreats home to heal
//! or unload, and hands over to a combat role once going home is all that is
//! left while enemies remain.
use arena_core::{AgentState, HomeBaseState, Located, RoleConfig, Target};

use super::{Decision, RoleContext, RoleKind, Survey};
use crate::api::{AgentEvent, Command, Result};

/// Outcome of a target pick, before any command is attached.
struct Pick {
    target: Target,
    transition: Option<RoleKind>,
    mission_complete: bool,
}

impl Pick {
    fn decision(&self) -> Decision {
        Decision {
            target: Some(self.target),
            transition: self.transition,
            mission_complete: self.mission_complete,
            ..Decision::default()
        }
    }

    fn switching(&self) -> bool {
        self.transition.is_some()
    }
}

/// Selects the next harvest target from an up-to-date survey.
///
/// Rules, first match wins:
/// - a full hold or a health gauge below `limit_health` sends the agent home;
/// - with enemies around and a heavily outnumbered, poor home base, the
///   nearest resource point is taken even if unsafe;
/// - with enemies around otherwise, the nearest safe resource point, or home;
/// - without enemies, the nearest resource point;
/// - home when nothing is left.
pub fn choose_harvest_target(
    survey: &Survey,
    agent: &AgentState,
    home: &HomeBaseState,
    config: &RoleConfig,
) -> Target {
    let home_target = Target::HomeBase(home.team);
    if agent.cargo.is_full() || agent.health < config.limit_health {
        return home_target;
    }

    let Some(nearest) = survey.harvest.first() else {
        return home_target;
    };
    if survey.enemies.is_empty() {
        return nearest.item;
    }

    let under_pressure = survey.enemies.len() > config.pressure_enemy_count
        && home.payload < config.pressure_home_payload;
    if under_pressure {
        nearest.item
    } else {
        survey
            .safe_harvest
            .first()
            .map_or(home_target, |safe| safe.item)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Gatherer {
    survey: Survey,
}

impl Gatherer {
    pub fn new(ctx: &RoleContext<'_>) -> Self {
        Self {
            survey: Survey::capture(&ctx.scan(), ctx.weapon_range),
        }
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    pub fn activate(&mut self, ctx: &mut RoleContext<'_>) -> Result<Decision> {
        if ctx.agent.distance_to(ctx.home) < ctx.config.healing_radius {
            Ok(self.move_on(ctx))
        } else {
            Ok(Decision::command(Command::Stop))
        }
    }

    pub fn handle(&mut self, event: AgentEvent, ctx: &mut RoleContext<'_>) -> Result<Decision> {
        match event {
            AgentEvent::ArrivedAtResource(resource) => Ok(self.load_from(resource, ctx)),
            AgentEvent::LoadComplete => Ok(self.move_on(ctx).with_broadcast()),
            AgentEvent::ArrivedAtHome => Ok(Decision::command(Command::Unload(ctx.home.team))),
            AgentEvent::UnloadComplete => Ok(self.after_unload(ctx)),
            AgentEvent::ArrivedAtTarget(Some(target)) => {
                let at_home = target.is_home_base_of(ctx.home.team)
                    || ctx.resolve(&target)?.coincides(ctx.home.position);
                if at_home {
                    Ok(Decision::command(Command::Unload(ctx.home.team)))
                } else {
                    Ok(self.load_from(target, ctx))
                }
            }
            AgentEvent::ArrivedAtTarget(None) | AgentEvent::Stopped => Ok(self.move_on(ctx)),
        }
    }

    /// Re-pick on a teammate's request, then head for the new target.
    pub fn retarget(&mut self, ctx: &mut RoleContext<'_>) -> Result<Decision> {
        Ok(self.move_on(ctx))
    }

    fn pick(&mut self, ctx: &RoleContext<'_>) -> Pick {
        let home = ctx.home_target();
        if ctx.agent.cargo.is_full() {
            return Pick {
                target: home,
                transition: None,
                mission_complete: false,
            };
        }

        let scan = ctx.scan();
        self.survey.refresh_hostiles(&scan);
        self.survey.refresh_harvest(&scan, ctx.weapon_range);

        let target = choose_harvest_target(&self.survey, ctx.agent, ctx.home, ctx.config);
        let mut pick = Pick {
            target,
            transition: None,
            mission_complete: false,
        };
        if target != home {
            tracing::debug!("Agent {} picked {}", ctx.agent.id, target);
            return pick;
        }

        if !self.survey.enemies.is_empty() {
            // Cargo aboard is delivered first; the switch waits for the unload.
            if ctx.agent.cargo.is_empty() {
                let attack_below = ctx.config.attackers_per_opposing_team * ctx.opposing_teams();
                let kind = if self.survey.enemies.len() < attack_below {
                    RoleKind::Attacker
                } else {
                    RoleKind::Defender
                };
                tracing::debug!(
                    "Agent {} has nothing safe to gather with {} enemies around, becoming {}",
                    ctx.agent.id,
                    self.survey.enemies.len(),
                    kind
                );
                pick.transition = Some(kind);
            }
        } else if !self.survey.has_threats() && self.survey.harvest.is_empty() {
            tracing::debug!("Agent {} found the arena exhausted", ctx.agent.id);
            pick.mission_complete = true;
        }
        pick
    }

    fn move_on(&mut self, ctx: &RoleContext<'_>) -> Decision {
        let pick = self.pick(ctx);
        if pick.switching() {
            return pick.decision();
        }
        pick.decision().then(Command::MoveTo(pick.target))
    }

    fn load_from(&mut self, resource: Target, ctx: &RoleContext<'_>) -> Decision {
        let pick = self.pick(ctx);
        if pick.switching() {
            return pick.decision();
        }
        let mut decision = pick.decision();
        if pick.target != resource {
            decision = decision.then(Command::TurnTo(pick.target));
        }
        decision.then(Command::Load(resource))
    }

    /// Back out to a covered resource point, or guard the base.
    fn after_unload(&mut self, ctx: &RoleContext<'_>) -> Decision {
        let decision = self.pick(ctx).decision().with_broadcast();
        match self.survey.safe_harvest.first() {
            Some(safe) => Decision {
                transition: None,
                ..decision
            }
            .with_target(safe.item)
            .then(Command::MoveTo(safe.item)),
            None => {
                tracing::debug!("Agent {} unloaded with nothing safe left", ctx.agent.id);
                Decision {
                    transition: Some(RoleKind::Defender),
                    ..decision
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{FixedOrder, Scored};
    use crate::squad::Roster;
    use arena_core::{
        AgentId, Arena, AsteroidId, AsteroidState, Point, TeamId, WorldOracle, WorldSnapshot,
    };

    const MINE: TeamId = TeamId(0);
    const THEIRS: TeamId = TeamId(1);
    const ME: AgentId = AgentId(0);
    const HOME: Point = Point::new(90.0, 90.0);
    const FAR_ORE: AsteroidId = AsteroidId(7);
    const NEAR_ORE: AsteroidId = AsteroidId(8);

    /// Me at `me`, the enemy base far away, no agents besides me.
    fn world(me: Point) -> WorldSnapshot {
        WorldSnapshot::new(Arena::new(1000.0, 1000.0))
            .with_home_base(HomeBaseState::new(MINE, HOME))
            .with_home_base(HomeBaseState::new(THEIRS, Point::new(910.0, 910.0)))
            .with_agent(AgentState::new(ME, MINE, me, 100).with_weapon(300.0))
    }

    /// Adds one living enemy far from both bases.
    fn contested(world: WorldSnapshot) -> WorldSnapshot {
        world.with_agent(AgentState::new(AgentId(20), THEIRS, Point::new(900.0, 500.0), 100))
    }

    fn decide(
        world: &WorldSnapshot,
        body: impl FnOnce(&mut Gatherer, &mut RoleContext<'_>) -> Result<Decision>,
    ) -> Decision {
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
        let mut gatherer = Gatherer::new(&ctx);
        body(&mut gatherer, &mut ctx).expect("decision")
    }

    fn candidates(names: &[(u32, f64)]) -> Vec<Scored<Target>> {
        names
            .iter()
            .map(|&(id, distance)| {
                Scored::new(
                    Target::Asteroid(AsteroidId(id)),
                    Point::new(distance, 0.0),
                    distance,
                )
            })
            .collect()
    }

    fn enemies(count: u32) -> Vec<Scored<AgentId>> {
        (0..count)
            .map(|i| Scored::new(AgentId(100 + i), Point::ORIGIN, f64::from(i)))
            .collect()
    }

    /// Five candidates `a..e` sorted by distance, `x` and `y` safe.
    fn pressured_survey() -> Survey {
        Survey {
            enemies: enemies(11),
            enemy_home_bases: Vec::new(),
            harvest: candidates(&[(1, 10.0), (2, 20.0), (3, 30.0), (4, 40.0), (5, 50.0)]),
            safe_harvest: candidates(&[(24, 25.0), (25, 35.0)]),
        }
    }

    fn agent(health: f64) -> AgentState {
        AgentState::new(AgentId(0), MINE, Point::new(100.0, 100.0), 100).with_health(health)
    }

    #[test]
    fn pressure_takes_nearest_overall_point() {
        let config = RoleConfig::new().with_limit_health(4.0);
        let home = HomeBaseState::new(MINE, Point::new(90.0, 90.0)).with_payload(400);

        let target = choose_harvest_target(&pressured_survey(), &agent(5.0), &home, &config);
        assert_eq!(target, Target::Asteroid(AsteroidId(1)));
    }

    #[test]
    fn low_health_always_returns_home() {
        let config = RoleConfig::new().with_limit_health(5.0);
        let home = HomeBaseState::new(MINE, Point::new(90.0, 90.0)).with_payload(400);

        let target = choose_harvest_target(&pressured_survey(), &agent(4.0), &home, &config);
        assert_eq!(target, Target::HomeBase(MINE));
    }

    #[test]
    fn rich_home_prefers_nearest_safe_point() {
        let config = RoleConfig::new().with_limit_health(4.0);
        let home = HomeBaseState::new(MINE, Point::new(90.0, 90.0)).with_payload(600);

        let target = choose_harvest_target(&pressured_survey(), &agent(5.0), &home, &config);
        assert_eq!(target, Target::Asteroid(AsteroidId(24)));
    }

    #[test]
    fn enemies_without_safe_points_send_home() {
        let config = RoleConfig::default();
        let home = HomeBaseState::new(MINE, Point::new(90.0, 90.0));
        let survey = Survey {
            enemies: enemies(2),
            safe_harvest: Vec::new(),
            ..pressured_survey()
        };

        let target = choose_harvest_target(&survey, &agent(1.0), &home, &config);
        assert_eq!(target, Target::HomeBase(MINE));
    }

    #[test]
    fn no_enemies_takes_nearest_point() {
        let config = RoleConfig::default();
        let home = HomeBaseState::new(MINE, Point::new(90.0, 90.0));
        let survey = Survey {
            enemies: Vec::new(),
            ..pressured_survey()
        };

        let target = choose_harvest_target(&survey, &agent(1.0), &home, &config);
        assert_eq!(target, Target::Asteroid(AsteroidId(1)));
    }

    #[test]
    fn full_hold_goes_home() {
        let config = RoleConfig::default();
        let home = HomeBaseState::new(MINE, Point::new(90.0, 90.0));
        let loaded = agent(1.0).with_payload(100);

        let target = choose_harvest_target(&pressured_survey(), &loaded, &home, &config);
        assert_eq!(target, Target::HomeBase(MINE));
    }

    #[test]
    fn selection_is_idempotent() {
        let config = RoleConfig::new().with_limit_health(4.0);
        let home = HomeBaseState::new(MINE, Point::new(90.0, 90.0)).with_payload(400);
        let survey = pressured_survey();

        let first = choose_harvest_target(&survey, &agent(5.0), &home, &config);
        let second = choose_harvest_target(&survey, &agent(5.0), &home, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn activation_away_from_home_stops_first() {
        let world = world(Point::new(500.0, 500.0))
            .with_asteroid(AsteroidState::new(NEAR_ORE, Point::new(250.0, 90.0), 50));

        let decision = decide(&world, |gatherer, ctx| gatherer.activate(ctx));
        assert_eq!(decision.commands, vec![Command::Stop]);
        assert_eq!(decision.transition, None);
    }

    #[test]
    fn arrival_turns_toward_next_pick_before_loading() {
        // The arrived-at asteroid is spent; the next pick lies elsewhere.
        let ore = Point::new(250.0, 90.0);
        let mut world = world(ore)
            .with_asteroid(AsteroidState::new(NEAR_ORE, ore, 50))
            .with_asteroid(AsteroidState::new(FAR_ORE, Point::new(300.0, 200.0), 50));
        world.asteroid_mut(NEAR_ORE).expect("ore").remaining = 0;

        let decision = decide(&world, |gatherer, ctx| {
            gatherer.handle(AgentEvent::ArrivedAtResource(Target::Asteroid(NEAR_ORE)), ctx)
        });
        assert_eq!(
            decision.commands,
            vec![
                Command::TurnTo(Target::Asteroid(FAR_ORE)),
                Command::Load(Target::Asteroid(NEAR_ORE)),
            ]
        );
        assert_eq!(decision.target, Some(Target::Asteroid(FAR_ORE)));
    }

    #[test]
    fn generic_arrival_loads_from_the_arrived_target() {
        let ore = Point::new(250.0, 90.0);
        let mut world = world(ore)
            .with_asteroid(AsteroidState::new(NEAR_ORE, ore, 50))
            .with_asteroid(AsteroidState::new(FAR_ORE, Point::new(300.0, 200.0), 50));
        world.asteroid_mut(NEAR_ORE).expect("ore").remaining = 0;

        let decision = decide(&world, |gatherer, ctx| {
            gatherer.handle(
                AgentEvent::ArrivedAtTarget(Some(Target::Asteroid(NEAR_ORE))),
                ctx,
            )
        });
        assert_eq!(
            decision.commands.last(),
            Some(&Command::Load(Target::Asteroid(NEAR_ORE)))
        );
    }

    #[test]
    fn partial_hold_is_delivered_before_switching() {
        let ore = Point::new(700.0, 300.0);
        let mut world = contested(world(ore)).with_asteroid(AsteroidState::new(FAR_ORE, ore, 50));
        world.agent_mut(ME).expect("me").cargo.payload = 50;

        let decision = decide(&world, |gatherer, ctx| {
            gatherer.handle(AgentEvent::LoadComplete, ctx)
        });
        assert_eq!(decision.transition, None);
        assert_eq!(
            decision.commands,
            vec![Command::MoveTo(Target::HomeBase(MINE))]
        );
        assert!(decision.broadcast);
    }

    #[test]
    fn empty_hold_at_unsafe_resource_hands_over_without_loading() {
        let ore = Point::new(700.0, 300.0);
        let world = contested(world(ore)).with_asteroid(AsteroidState::new(FAR_ORE, ore, 50));

        let decision = decide(&world, |gatherer, ctx| {
            gatherer.handle(AgentEvent::ArrivedAtResource(Target::Asteroid(FAR_ORE)), ctx)
        });
        assert_eq!(decision.transition, Some(RoleKind::Attacker));
        assert!(decision.commands.is_empty());
    }

    #[test]
    fn unload_without_safe_points_defends() {
        let world = contested(world(HOME))
            .with_asteroid(AsteroidState::new(FAR_ORE, Point::new(700.0, 300.0), 50));

        let decision = decide(&world, |gatherer, ctx| {
            gatherer.handle(AgentEvent::UnloadComplete, ctx)
        });
        assert_eq!(decision.transition, Some(RoleKind::Defender));
        assert!(decision.commands.is_empty());
        assert!(decision.broadcast);
    }

    #[test]
    fn unload_heads_back_to_covered_resource() {
        let world = contested(world(HOME))
            .with_asteroid(AsteroidState::new(NEAR_ORE, Point::new(250.0, 90.0), 50));

        let decision = decide(&world, |gatherer, ctx| {
            gatherer.handle(AgentEvent::UnloadComplete, ctx)
        });
        assert_eq!(decision.transition, None);
        assert_eq!(
            decision.commands,
            vec![Command::MoveTo(Target::Asteroid(NEAR_ORE))]
        );
        assert_eq!(decision.target, Some(Target::Asteroid(NEAR_ORE)));
    }

    #[test]
    fn standing_enemy_base_alone_neither_switches_nor_completes() {
        let world = world(HOME);

        let decision = decide(&world, |gatherer, ctx| {
            gatherer.handle(AgentEvent::Stopped, ctx)
        });
        assert_eq!(decision.transition, None);
        assert!(!decision.mission_complete);
        assert_eq!(
            decision.commands,
            vec![Command::MoveTo(Target::HomeBase(MINE))]
        );
    }
}
