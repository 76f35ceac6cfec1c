//! Zone bonus modes — bullet time and revolution

use serde::{Deserialize, Serialize};

use crate::rng::EngineRng;

/// The two zone modes, drawn with equal odds on activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    /// Spins slow to a crawl so stops are easy to aim
    BulletTime,
    /// Every multi gain is negated until the zone ends
    Revolution,
}

/// Countdown state of the active zone, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneState {
    pub kind: Option<ZoneKind>,
    pub seconds_left: u32,
}

impl ZoneState {
    pub fn is_active(&self) -> bool {
        self.kind.is_some()
    }

    pub fn kind(&self) -> Option<ZoneKind> {
        self.kind
    }

    /// Activate a zone for the given duration, drawing the mode at random.
    /// A fresh activation restarts the clock even if a zone is running.
    pub fn start(&mut self, rng: &mut EngineRng, duration_secs: u32) -> ZoneKind {
        let kind = if rng.coin() {
            ZoneKind::BulletTime
        } else {
            ZoneKind::Revolution
        };
        self.kind = Some(kind);
        self.seconds_left = duration_secs;
        kind
    }

    /// Advance the countdown by one second. Returns the kind that just
    /// expired when the clock reaches zero on this tick.
    pub fn tick(&mut self) -> Option<ZoneKind> {
        if self.kind.is_none() {
            return None;
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left == 0 {
            self.kind.take()
        } else {
            None
        }
    }
}
