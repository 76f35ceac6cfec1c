//! Round scoring — the three-pass gain chain over the 11 lines

use serde::{Deserialize, Serialize};

use crate::lines::{Line, Tuple};
use crate::rolls::{match_roll, RollId, RollTier};

/// Hard cap on a single multi/combo result in either direction
pub const SCORE_CLAMP: i32 = 9999;

/// Scoring for one evaluation line within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub line: Line,
    pub tuple: Tuple,
    /// Digit sum of the tuple modulo 10
    pub modulus: u8,
    /// Matched roll, if the line won anything
    pub roll: Option<RollId>,
    /// Gain contributed by this line
    pub gain: Option<i32>,
    /// Running sum after this line's pass step
    pub sum: Option<i32>,
}

impl Score {
    pub fn won(&self) -> bool {
        self.roll.is_some()
    }
}

fn clamp(value: i32) -> i32 {
    value.clamp(-SCORE_CLAMP, SCORE_CLAMP)
}

/// Score one round of 11 tuples.
///
/// The gain chain runs in three passes over the lines, not in line order:
/// Me gains accumulate first, then Kabu gains; a dead board is bumped to 1
/// so the Multi pass has something to multiply. Each Multi line then scales
/// the running sum, clamps it, flips the sign under revolution, and
/// replaces the sum outright so chained Multi lines compound.
pub fn compute_scores(
    tuples: &[Tuple; 11],
    mods: &[u8; 11],
    revolution: bool,
) -> [Score; 11] {
    let mut scores: [Score; 11] = std::array::from_fn(|i| Score {
        line: Line::ALL[i],
        tuple: tuples[i],
        modulus: mods[i],
        roll: match_roll(tuples[i], mods[i]),
        gain: None,
        sum: None,
    });

    let mut sum = 0i32;

    for tier in [RollTier::Me, RollTier::Kabu] {
        for score in scores.iter_mut() {
            if let Some(roll) = score.roll {
                if roll.tier() == tier {
                    let gain = roll.payout(sum, score.tuple, score.modulus);
                    sum += gain;
                    score.gain = Some(gain);
                    score.sum = Some(sum);
                }
            }
        }
        if tier == RollTier::Kabu && sum == 0 {
            sum = 1;
        }
    }

    for score in scores.iter_mut() {
        if let Some(roll) = score.roll {
            if roll.tier() == RollTier::Multi {
                let mut gain = clamp(roll.payout(sum, score.tuple, score.modulus));
                if revolution {
                    gain = -gain;
                }
                sum = gain;
                score.gain = Some(gain);
                score.sum = Some(sum);
            }
        }
    }

    scores
}

/// The four display slots derived from a scored round: Me subtotal,
/// Kabu subtotal, Multi result, and a combo slot filled in later.
///
/// Each slot falls back to the previous one when its tier never hit.
pub fn compute_current_scores(scores: &[Score; 11]) -> [i32; 4] {
    let tier_sums = |tier: RollTier| {
        scores
            .iter()
            .filter(move |s| s.roll.map(RollId::tier) == Some(tier))
            .map(|s| s.sum.unwrap_or(0))
    };

    let me = tier_sums(RollTier::Me).max().unwrap_or(0);
    let kabu = tier_sums(RollTier::Kabu).max().unwrap_or(me);
    let multi = tier_sums(RollTier::Multi).last().unwrap_or(kabu);

    [me, kabu, multi, 0]
}

/// Fill the combo slot: multiply the Multi result by the combo count
/// (capped at x10) once a streak of 2 or more is running
pub fn add_combo_score(current: [i32; 4], combo: u32) -> [i32; 4] {
    let mut combo_sum = current[2];
    if combo >= 2 {
        combo_sum = clamp(combo_sum.saturating_mul(combo.min(10) as i32));
    }
    [current[0], current[1], current[2], combo_sum]
}

/// Bank the combo slot into the running session total
pub fn compute_total_score(total: i64, current: [i32; 4]) -> i64 {
    total + i64::from(current[3])
}

/// True when any line hit a Multi-tier roll
pub fn is_multi_won(scores: &[Score; 11]) -> bool {
    scores
        .iter()
        .any(|s| s.roll.map(RollId::tier) == Some(RollTier::Multi))
}

/// True when any line hit triple sevens
pub fn is_triple_seven(scores: &[Score; 11]) -> bool {
    scores.iter().any(|s| s.roll == Some(RollId::TripleSeven))
}

/// True when any line hit the pink ribbon
pub fn is_pink_ribbon(scores: &[Score; 11]) -> bool {
    scores.iter().any(|s| s.roll == Some(RollId::PinkRibbon))
}
