//! Roll tables — the 19 winning hands across the Multi, Me and Kabu tiers

use serde::{Deserialize, Serialize};

use crate::lines::Tuple;

/// Which tier a roll belongs to. Multi rolls multiply the running sum,
/// the other two tiers add a flat gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollTier {
    Multi,
    Me,
    Kabu,
}

/// Every recognised roll, across all three tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollId {
    // Multi tier
    Pinzoro,
    Arashikabu,
    Kemono,
    TripleSeven,
    Zorome,
    Shigoro,
    Hifumi,
    // Me tier
    PinkRibbon,
    Pinbasami,
    Me,
    // Kabu tier
    Pin,
    Nizou,
    Santa,
    Yotsuya,
    Goke,
    Roppou,
    Shichiken,
    Oicho,
    Kabu,
}

/// Multi rolls in priority order; earlier entries win over later ones
pub const MULTI_ROLLS: [RollId; 7] = [
    RollId::Pinzoro,
    RollId::Arashikabu,
    RollId::Kemono,
    RollId::TripleSeven,
    RollId::Zorome,
    RollId::Shigoro,
    RollId::Hifumi,
];

/// Me rolls in priority order
pub const ME_ROLLS: [RollId; 3] = [RollId::PinkRibbon, RollId::Pinbasami, RollId::Me];

/// Kabu rolls; exactly one matches for each nonzero mod
pub const KABU_ROLLS: [RollId; 9] = [
    RollId::Pin,
    RollId::Nizou,
    RollId::Santa,
    RollId::Yotsuya,
    RollId::Goke,
    RollId::Roppou,
    RollId::Shichiken,
    RollId::Oicho,
    RollId::Kabu,
];

fn sorted(tuple: Tuple) -> Tuple {
    let mut s = tuple;
    s.sort_unstable();
    s
}

fn is_triple(tuple: Tuple, face: u8) -> bool {
    tuple[0] == tuple[1] && tuple[1] == tuple[2] && tuple[0] == face
}

impl RollId {
    pub fn tier(self) -> RollTier {
        match self {
            RollId::Pinzoro
            | RollId::Arashikabu
            | RollId::Kemono
            | RollId::TripleSeven
            | RollId::Zorome
            | RollId::Shigoro
            | RollId::Hifumi => RollTier::Multi,
            RollId::PinkRibbon | RollId::Pinbasami | RollId::Me => RollTier::Me,
            _ => RollTier::Kabu,
        }
    }

    /// Display odds. `None` for the variable-gain Me rolls.
    pub fn odds(self) -> Option<i32> {
        match self {
            RollId::Pinzoro | RollId::Arashikabu => Some(5),
            RollId::Kemono => Some(-6),
            RollId::TripleSeven | RollId::Zorome => Some(3),
            RollId::Shigoro => Some(2),
            RollId::Hifumi => Some(-2),
            RollId::PinkRibbon => Some(10),
            RollId::Pinbasami | RollId::Me => None,
            RollId::Pin => Some(1),
            RollId::Nizou => Some(2),
            RollId::Santa => Some(3),
            RollId::Yotsuya => Some(4),
            RollId::Goke => Some(5),
            RollId::Roppou => Some(6),
            RollId::Shichiken => Some(7),
            RollId::Oicho => Some(8),
            RollId::Kabu => Some(9),
        }
    }

    /// Pattern description used on payout displays
    pub fn pattern(self) -> &'static str {
        match self {
            RollId::Pinzoro => "111",
            RollId::Arashikabu => "333",
            RollId::Kemono => "666",
            RollId::TripleSeven => "777",
            RollId::Zorome => "000, 222, 444, 555, 888, 999",
            RollId::Shigoro => "456",
            RollId::Hifumi => "123",
            RollId::PinkRibbon => "101",
            RollId::Pinbasami => "1X1",
            _ => "",
        }
    }

    /// Whether this roll matches the given tuple and its mod
    pub fn judge(self, tuple: Tuple, modulus: u8) -> bool {
        match self {
            RollId::Pinzoro => is_triple(tuple, 1),
            RollId::Arashikabu => is_triple(tuple, 3),
            RollId::Kemono => is_triple(tuple, 6),
            RollId::TripleSeven => is_triple(tuple, 7),
            RollId::Zorome => {
                tuple[0] == tuple[1]
                    && tuple[1] == tuple[2]
                    && !matches!(tuple[0], 1 | 3 | 6 | 7)
            }
            RollId::Shigoro => sorted(tuple) == [4, 5, 6],
            RollId::Hifumi => sorted(tuple) == [1, 2, 3],
            RollId::PinkRibbon => tuple == [1, 0, 1],
            RollId::Pinbasami => tuple[0] == 1 && tuple[1] != 1 && tuple[2] == 1,
            RollId::Me => {
                let s = sorted(tuple);
                (s[0] == s[1] && s[1] != s[2] && s[2] >= 2)
                    || (s[0] != s[1] && s[1] == s[2] && s[0] >= 2)
            }
            RollId::Pin => modulus == 1,
            RollId::Nizou => modulus == 2,
            RollId::Santa => modulus == 3,
            RollId::Yotsuya => modulus == 4,
            RollId::Goke => modulus == 5,
            RollId::Roppou => modulus == 6,
            RollId::Shichiken => modulus == 7,
            RollId::Oicho => modulus == 8,
            RollId::Kabu => modulus == 9,
        }
    }

    /// Gain for a matched roll. Multi rolls scale `src`, the running sum
    /// carried between Multi lines; the other tiers ignore it.
    pub fn payout(self, src: i32, tuple: Tuple, modulus: u8) -> i32 {
        match self {
            RollId::Pinzoro => src * 5,
            RollId::Arashikabu | RollId::TripleSeven | RollId::Zorome => src * 3,
            RollId::Kemono => src * -6,
            RollId::Shigoro => src * 2,
            RollId::Hifumi => src * -2,
            RollId::PinkRibbon => 10,
            RollId::Pinbasami => i32::from(tuple[1]),
            RollId::Me => {
                let s = sorted(tuple);
                if s[0] == s[1] && s[1] != s[2] {
                    i32::from(s[2])
                } else if s[0] != s[1] && s[1] == s[2] {
                    i32::from(s[0])
                } else {
                    0
                }
            }
            _ => i32::from(modulus),
        }
    }

    /// Serialized snake_case name, used as the stats counter key
    pub fn as_str(self) -> &'static str {
        match self {
            RollId::Pinzoro => "pinzoro",
            RollId::Arashikabu => "arashikabu",
            RollId::Kemono => "kemono",
            RollId::TripleSeven => "triple_seven",
            RollId::Zorome => "zorome",
            RollId::Shigoro => "shigoro",
            RollId::Hifumi => "hifumi",
            RollId::PinkRibbon => "pink_ribbon",
            RollId::Pinbasami => "pinbasami",
            RollId::Me => "me",
            RollId::Pin => "pin",
            RollId::Nizou => "nizou",
            RollId::Santa => "santa",
            RollId::Yotsuya => "yotsuya",
            RollId::Goke => "goke",
            RollId::Roppou => "roppou",
            RollId::Shichiken => "shichiken",
            RollId::Oicho => "oicho",
            RollId::Kabu => "kabu",
        }
    }
}

/// First matching roll across all tiers, Multi before Me before Kabu
pub fn match_roll(tuple: Tuple, modulus: u8) -> Option<RollId> {
    MULTI_ROLLS
        .iter()
        .chain(&ME_ROLLS)
        .chain(&KABU_ROLLS)
        .copied()
        .find(|roll| roll.judge(tuple, modulus))
}
