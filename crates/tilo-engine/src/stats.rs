//! Lifetime session counters, serialized for the stats screen

use serde::{Deserialize, Serialize};

use crate::rolls::RollId;

/// Hit counts per roll, plus the losing-line count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollCounts {
    pub pinzoro: u32,
    pub arashikabu: u32,
    pub kemono: u32,
    pub triple_seven: u32,
    pub zorome: u32,
    pub shigoro: u32,
    pub hifumi: u32,
    pub pink_ribbon: u32,
    pub pinbasami: u32,
    pub me: u32,
    pub pin: u32,
    pub nizou: u32,
    pub santa: u32,
    pub yotsuya: u32,
    pub goke: u32,
    pub roppou: u32,
    pub shichiken: u32,
    pub oicho: u32,
    pub kabu: u32,
    /// Lines that matched nothing
    pub buta: u32,
}

impl RollCounts {
    /// Bump the counter for a line's outcome; a miss counts as buta
    pub fn record(&mut self, roll: Option<RollId>) {
        let counter = match roll {
            Some(RollId::Pinzoro) => &mut self.pinzoro,
            Some(RollId::Arashikabu) => &mut self.arashikabu,
            Some(RollId::Kemono) => &mut self.kemono,
            Some(RollId::TripleSeven) => &mut self.triple_seven,
            Some(RollId::Zorome) => &mut self.zorome,
            Some(RollId::Shigoro) => &mut self.shigoro,
            Some(RollId::Hifumi) => &mut self.hifumi,
            Some(RollId::PinkRibbon) => &mut self.pink_ribbon,
            Some(RollId::Pinbasami) => &mut self.pinbasami,
            Some(RollId::Me) => &mut self.me,
            Some(RollId::Pin) => &mut self.pin,
            Some(RollId::Nizou) => &mut self.nizou,
            Some(RollId::Santa) => &mut self.santa,
            Some(RollId::Yotsuya) => &mut self.yotsuya,
            Some(RollId::Goke) => &mut self.goke,
            Some(RollId::Roppou) => &mut self.roppou,
            Some(RollId::Shichiken) => &mut self.shichiken,
            Some(RollId::Oicho) => &mut self.oicho,
            Some(RollId::Kabu) => &mut self.kabu,
            None => &mut self.buta,
        };
        *counter += 1;
    }
}

/// Zone activations by kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCounts {
    pub bullet_time: u32,
    pub revolution: u32,
}

/// Outcomes of the triple-seven effect draw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleSevenCounts {
    pub all_1: u32,
    pub all_6: u32,
    pub all_123: u32,
    pub all_456: u32,
    pub triplets: u32,
    pub others: u32,
    pub rollback: u32,
}

/// Easter eggs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggCounts {
    pub ambulance: u32,
}

/// Everything the stats screen shows for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub max_combo: u32,
    pub max_gain: i32,
    pub roll: RollCounts,
    pub zone: ZoneCounts,
    pub triple_seven: TripleSevenCounts,
    pub egg: EggCounts,
}

impl SessionStats {
    pub fn note_combo(&mut self, combo: u32) {
        self.max_combo = self.max_combo.max(combo);
    }

    pub fn note_gain(&mut self, gain: i32) {
        self.max_gain = self.max_gain.max(gain);
    }
}
