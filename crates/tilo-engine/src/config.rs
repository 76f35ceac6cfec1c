//! Session configuration

use serde::{Deserialize, Serialize};

use crate::rule::RuleVariant;

/// Tunable knobs for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Which goal the session chases
    pub rule: RuleVariant,
    /// Spin speed at session start and the bullet-time restore floor
    pub initial_speed: i32,
    /// How long an activated zone runs
    pub zone_duration_secs: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rule: RuleVariant::Rule1_2943,
            initial_speed: 4,
            zone_duration_secs: 30,
        }
    }
}

impl SessionConfig {
    pub fn new(rule: RuleVariant) -> Self {
        Self {
            rule,
            ..Self::default()
        }
    }

    pub fn with_initial_speed(mut self, speed: i32) -> Self {
        self.initial_speed = speed;
        self
    }

    pub fn with_zone_duration(mut self, secs: u32) -> Self {
        self.zone_duration_secs = secs;
        self
    }
}
