//! Runtime configuration for a squad.
use std::env;

use arena_core::RoleConfig;
use serde::{Deserialize, Serialize};

use crate::api::ConfigError;
use crate::roles::{OffsetOrder, ShuffledOrder};

/// Role tunables plus the source of firing-offset randomness.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub roles: RoleConfig,

    /// Seed for the firing-offset shuffle. `None` seeds from entropy.
    pub offset_seed: Option<u64>,
}

impl RuntimeConfig {
    /// Construct runtime configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_LIMIT_HEALTH` - Retreat threshold of the health gauge (default: 0.5)
    /// - `ARENA_HEALING_RADIUS` - Home-base healing radius (default: 200)
    /// - `ARENA_THREAT_SAFETY_DISTANCE` - Lone-enemy shield distance (default: 200)
    /// - `ARENA_CROWDING_DISTANCE` - Minimum spacing between attackers (default: 50)
    /// - `ARENA_ENGAGE_BUFFER` - Extra defender reach beyond weapon range (default: 100)
    /// - `ARENA_MAX_ROLE_HOPS` - Role transitions allowed per callback (default: 4)
    /// - `ARENA_OFFSET_SEED` - Fixed seed for the firing-offset shuffle
    ///
    /// Unparsable values are ignored. An invalid resulting role config falls
    /// back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        let roles = &mut config.roles;

        if let Some(limit) = read_env::<f64>("ARENA_LIMIT_HEALTH") {
            roles.limit_health = limit;
        }
        if let Some(radius) = read_env::<f64>("ARENA_HEALING_RADIUS") {
            roles.healing_radius = radius;
        }
        if let Some(distance) = read_env::<f64>("ARENA_THREAT_SAFETY_DISTANCE") {
            roles.threat_safety_distance = distance;
        }
        if let Some(distance) = read_env::<f64>("ARENA_CROWDING_DISTANCE") {
            roles.crowding_distance = distance;
        }
        if let Some(buffer) = read_env::<f64>("ARENA_ENGAGE_BUFFER") {
            roles.engage_buffer = buffer;
        }
        if let Some(hops) = read_env::<usize>("ARENA_MAX_ROLE_HOPS") {
            roles.max_role_hops = hops;
        }
        config.offset_seed = read_env::<u64>("ARENA_OFFSET_SEED");

        if let Err(field) = config.roles.validate() {
            tracing::warn!(
                "Ignoring role settings from environment: invalid `{}`",
                field
            );
            config.roles = RoleConfig::default();
        }

        config
    }

    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source).map_err(ConfigError::Parse)?;
        config
            .roles
            .validate()
            .map_err(|field| ConfigError::Invalid { field })?;
        Ok(config)
    }

    /// Offset order matching [`Self::offset_seed`].
    pub fn offset_order(&self) -> Box<dyn OffsetOrder> {
        match self.offset_seed {
            Some(seed) => Box::new(ShuffledOrder::seeded(seed)),
            None => Box::new(ShuffledOrder::from_entropy()),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
