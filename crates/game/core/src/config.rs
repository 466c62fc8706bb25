/// Tunable thresholds shared by every role.
///
/// Distances are arena units, angles degrees. Health thresholds use the
/// engine's gauge scale, normally 0.0..=1.0.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoleConfig {
    /// Below this health an agent retreats to its home base to heal.
    pub limit_health: f64,
    /// Radius around a home base inside which agents are healed. Formation
    /// and stand-off offsets are expressed in multiples of it.
    pub healing_radius: f64,
    /// A lone enemy this close to its own home base is treated as covered by
    /// the base: the base becomes the threat instead.
    pub threat_safety_distance: f64,
    /// Minimum spacing between a firing position and any teammate.
    pub crowding_distance: f64,
    /// Half-width of the cone, seen from the target, in which a teammate
    /// obstructs the line of fire.
    pub line_of_fire_cone: f64,
    /// Teammates closer than this to the target are not considered blocking.
    pub target_clearance: f64,
    /// Attackers closer than this to their own home base never open fire.
    pub home_fire_exclusion: f64,
    /// Extra reach beyond weapon range within which a defender engages.
    pub engage_buffer: f64,
    /// More enemies than this force gatherers onto unsafe resources while the
    /// home base is poor.
    pub pressure_enemy_count: usize,
    /// Home-base stores below which the pressure rule applies.
    pub pressure_home_payload: u32,
    /// A gatherer with nothing to harvest turns attacker while enemies number
    /// fewer than this many per opposing team; otherwise it defends.
    pub attackers_per_opposing_team: usize,
    /// Maximum role transitions chained within a single callback.
    pub max_role_hops: usize,
}

impl RoleConfig {
    pub const DEFAULT_LIMIT_HEALTH: f64 = 0.5;
    pub const DEFAULT_HEALING_RADIUS: f64 = 200.0;
    pub const DEFAULT_THREAT_SAFETY_DISTANCE: f64 = 200.0;
    pub const DEFAULT_CROWDING_DISTANCE: f64 = 50.0;
    pub const DEFAULT_LINE_OF_FIRE_CONE: f64 = 20.0;
    pub const DEFAULT_TARGET_CLEARANCE: f64 = 10.0;
    pub const DEFAULT_HOME_FIRE_EXCLUSION: f64 = 30.0;
    pub const DEFAULT_ENGAGE_BUFFER: f64 = 100.0;
    pub const DEFAULT_PRESSURE_ENEMY_COUNT: usize = 10;
    pub const DEFAULT_PRESSURE_HOME_PAYLOAD: u32 = 500;
    pub const DEFAULT_ATTACKERS_PER_OPPOSING_TEAM: usize = 3;
    pub const DEFAULT_MAX_ROLE_HOPS: usize = 4;

    pub const fn new() -> Self {
        Self {
            limit_health: Self::DEFAULT_LIMIT_HEALTH,
            healing_radius: Self::DEFAULT_HEALING_RADIUS,
            threat_safety_distance: Self::DEFAULT_THREAT_SAFETY_DISTANCE,
            crowding_distance: Self::DEFAULT_CROWDING_DISTANCE,
            line_of_fire_cone: Self::DEFAULT_LINE_OF_FIRE_CONE,
            target_clearance: Self::DEFAULT_TARGET_CLEARANCE,
            home_fire_exclusion: Self::DEFAULT_HOME_FIRE_EXCLUSION,
            engage_buffer: Self::DEFAULT_ENGAGE_BUFFER,
            pressure_enemy_count: Self::DEFAULT_PRESSURE_ENEMY_COUNT,
            pressure_home_payload: Self::DEFAULT_PRESSURE_HOME_PAYLOAD,
            attackers_per_opposing_team: Self::DEFAULT_ATTACKERS_PER_OPPOSING_TEAM,
            max_role_hops: Self::DEFAULT_MAX_ROLE_HOPS,
        }
    }

    pub fn with_limit_health(mut self, limit_health: f64) -> Self {
        self.limit_health = limit_health;
        self
    }

    pub fn with_healing_radius(mut self, healing_radius: f64) -> Self {
        self.healing_radius = healing_radius;
        self
    }

    /// Checks that every threshold is usable.
    ///
    /// # Errors
    ///
    /// Returns the name of the first offending field.
    pub fn validate(&self) -> Result<(), &'static str> {
        let distances = [
            ("limit_health", self.limit_health),
            ("healing_radius", self.healing_radius),
            ("threat_safety_distance", self.threat_safety_distance),
            ("crowding_distance", self.crowding_distance),
            ("line_of_fire_cone", self.line_of_fire_cone),
            ("target_clearance", self.target_clearance),
            ("home_fire_exclusion", self.home_fire_exclusion),
            ("engage_buffer", self.engage_buffer),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(name);
            }
        }
        Ok(())
    }
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(RoleConfig::default().validate(), Ok(()));
    }

    #[test]
    fn raw_gauge_thresholds_are_valid() {
        assert_eq!(RoleConfig::new().with_limit_health(4.0).validate(), Ok(()));
    }

    #[test]
    fn validate_names_offending_field() {
        let config = RoleConfig::new().with_limit_health(-0.5);
        assert_eq!(config.validate(), Err("limit_health"));

        let config = RoleConfig::new().with_healing_radius(f64::NAN);
        assert_eq!(config.validate(), Err("healing_radius"));
    }
}
