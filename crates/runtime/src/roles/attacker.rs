//! Aggressive role: presses enemy agents and home bases from firing range.
use arena_core::{Located, Point, Target, Vector, angle_between, place_near};

use super::offsets::FIRING_OFFSETS;
use super::{Decision, RoleContext, RoleKind, Survey};
use crate::api::{AgentEvent, Command, Result};

/// Roster slot that takes its offset without validation.
const UNCHECKED_SLOT: usize = 1;

#[derive(Clone, Debug, PartialEq)]
pub struct Attacker {
    survey: Survey,
}

impl Attacker {
    pub fn new(ctx: &RoleContext<'_>) -> Self {
        Self {
            survey: Survey::capture(&ctx.scan(), ctx.weapon_range),
        }
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    pub fn activate(&mut self, ctx: &mut RoleContext<'_>) -> Result<Decision> {
        let scan = ctx.scan();
        self.survey.refresh_hostiles(&scan);
        let threat = scan
            .nearest_threat(&self.survey.enemies, ctx.config.threat_safety_distance)
            .or_else(|| {
                self.survey
                    .enemy_home_bases
                    .first()
                    .map(|base| Target::HomeBase(base.item))
            });

        match threat {
            Some(threat) => self.reposition(threat, ctx),
            None => self.reassess(ctx),
        }
    }

    pub fn handle(&mut self, event: AgentEvent, ctx: &mut RoleContext<'_>) -> Result<Decision> {
        match event {
            AgentEvent::Stopped if self.parked_at_home_with_cargo(ctx) => {
                Ok(Decision::command(Command::Unload(ctx.home.team)))
            }
            AgentEvent::ArrivedAtHome if !ctx.agent.cargo.is_empty() => {
                Ok(Decision::command(Command::Unload(ctx.home.team)))
            }
            _ => self.reassess(ctx),
        }
    }

    fn parked_at_home_with_cargo(&self, ctx: &RoleContext<'_>) -> bool {
        ctx.agent.position.coincides(ctx.home.position) && !ctx.agent.cargo.is_empty()
    }

    /// Shared arrival logic: pick the next fight, or hand over.
    fn reassess(&mut self, ctx: &mut RoleContext<'_>) -> Result<Decision> {
        let scan = ctx.scan();
        self.survey.refresh_hostiles(&scan);

        if !self.survey.enemies.is_empty() {
            self.survey.refresh_harvest(&scan, ctx.weapon_range);

            let allies = ctx.living_teammates().count() as f64;
            let enemies_per_team = self.survey.enemies.len() as f64 / ctx.opposing_teams() as f64;
            if allies <= enemies_per_team && !self.survey.enemy_home_bases.is_empty() {
                tracing::debug!(
                    "Agent {} outnumbered ({} allies vs {:.1} enemies per team), falling back",
                    ctx.agent.id,
                    allies,
                    enemies_per_team
                );
                return Ok(Decision::switch_to(RoleKind::Defender));
            }
            if !self.survey.safe_harvest.is_empty() {
                return Ok(Decision::switch_to(RoleKind::Gatherer));
            }

            return match scan.nearest_threat(&self.survey.enemies, ctx.config.threat_safety_distance)
            {
                Some(threat) => self.engage(threat, ctx),
                None => Ok(Decision::switch_to(RoleKind::Gatherer)),
            };
        }

        match self.survey.enemy_home_bases.first() {
            Some(base) => self.engage(Target::HomeBase(base.item), ctx),
            None => {
                tracing::debug!("Agent {} has nothing left to fight", ctx.agent.id);
                Ok(Decision::switch_to(RoleKind::Gatherer))
            }
        }
    }

    /// Fire when the shot is clean, otherwise retreat or reposition.
    fn engage(&mut self, threat: Target, ctx: &mut RoleContext<'_>) -> Result<Decision> {
        if ctx.agent.health < ctx.config.limit_health {
            tracing::debug!("Agent {} withdrawing to heal", ctx.agent.id);
            return Ok(Decision::command(Command::MoveTo(ctx.home_target())));
        }

        let aim = ctx.resolve(&threat)?;
        let me = ctx.agent.position;
        let in_range = me.distance_to(&aim) < ctx.weapon_range;
        let clear_of_home = ctx.agent.distance_to(ctx.home) > ctx.config.home_fire_exclusion;
        if in_range && clear_of_home && !ally_blocking(me, aim, ctx) {
            tracing::debug!("Agent {} firing at {}", ctx.agent.id, threat);
            return Ok(Decision::command(Command::Fire(threat)));
        }
        self.reposition(threat, ctx)
    }

    fn reposition(&mut self, threat: Target, ctx: &mut RoleContext<'_>) -> Result<Decision> {
        let spot = Target::Point(position_near(threat, ctx)?);
        tracing::debug!(
            "Agent {} moving to {} to attack {}",
            ctx.agent.id,
            spot,
            threat
        );
        Ok(Decision::command(Command::MoveTo(spot)).with_target(spot))
    }
}

/// Firing spot near `threat`.
///
/// The candidate sits on the line from the threat to the agent, at weapon
/// range or closer. Arranged angular offsets rotate it around the threat; the
/// first spot inside the arena, clear of partners and with a clean line of
/// fire wins. The arena center is the fallback.
pub(crate) fn position_near(threat: Target, ctx: &mut RoleContext<'_>) -> Result<Point> {
    let aim = ctx.resolve(&threat)?;
    let me = ctx.agent.position;
    let reach = ctx.weapon_range.min(me.distance_to(&aim));
    let candidate = aim + Vector::between(aim, me).normalized().scaled(reach);

    let mut offsets = FIRING_OFFSETS;
    ctx.offsets.arrange(&mut offsets);

    // Kept for formation diversity; this slot never validates its spot.
    if ctx.roster_index == UNCHECKED_SLOT {
        return Ok(place_near(candidate, aim, offsets[UNCHECKED_SLOT]));
    }

    let ctx = &*ctx;
    let arena = ctx.world.arena();
    let spot = offsets
        .iter()
        .map(|&offset| place_near(candidate, aim, offset))
        .find(|&spot| {
            arena.contains(spot)
                && ctx
                    .living_partners()
                    .all(|partner| partner.distance_to(&spot) >= ctx.config.crowding_distance)
                && !ally_blocking(spot, aim, ctx)
        });
    Ok(spot.unwrap_or_else(|| arena.center()))
}

/// A living partner obstructs the shot from `from` to `aim`.
///
/// The partner must lie inside the line-of-fire cone seen from the target,
/// be closer to the target than the shooter, and sit farther than the
/// crowding distance from the shooter and farther than the clearance from
/// the target.
pub(crate) fn ally_blocking(from: Point, aim: Point, ctx: &RoleContext<'_>) -> bool {
    let shot = from.distance_to(&aim);
    let config = ctx.config;
    ctx.living_partners().any(|ally| {
        let ally_to_aim = ally.distance_to(&aim);
        let from_ally = from.distance_to(ally);
        shot > ally_to_aim
            && angle_between(aim, from, ally.position) < config.line_of_fire_cone
            && shot > from_ally
            && ally_to_aim > config.target_clearance
            && from_ally > config.crowding_distance
    })
}
