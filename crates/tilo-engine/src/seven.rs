//! Triple-seven effects — ring rewrites and rollback stock

use crate::lines::{RingFaces, RING_FACES};
use crate::rng::EngineRng;
use crate::stats::SessionStats;

/// New ring layouts and rollback stock after a triple-seven hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripleSevenEffect {
    pub rings: [RingFaces; 3],
    pub rollback_stock: u8,
}

/// Draw a triple-seven effect.
///
/// A percent draw picks one of seven bands: loaded rings of one kind or
/// another below 50, otherwise an extra rollback charge (wrapping back to
/// one above three). Rings not touched by the band keep a fresh shuffle.
pub fn compute_triple_seven_effect(
    rng: &mut EngineRng,
    rollback_stock: u8,
    stats: &mut SessionStats,
) -> TripleSevenEffect {
    let draw = rng.percent();
    triple_seven_effect_with_draw(rng, draw, rollback_stock, stats)
}

/// Effect selection with the band draw supplied by the caller
pub fn triple_seven_effect_with_draw(
    rng: &mut EngineRng,
    draw: u8,
    mut rollback_stock: u8,
    stats: &mut SessionStats,
) -> TripleSevenEffect {
    let mut rings = [
        rng.shuffle(RING_FACES),
        rng.shuffle(RING_FACES),
        rng.shuffle(RING_FACES),
    ];

    match draw {
        0..5 => {
            rings = [[1; 10]; 3];
            stats.triple_seven.all_1 += 1;
        }
        5..10 => {
            rings = [[6; 10]; 3];
            stats.triple_seven.all_6 += 1;
        }
        10..15 => {
            rings = [RING_FACES; 3];
            stats.triple_seven.triplets += 1;
        }
        15..20 => {
            let shared = rng.shuffle(RING_FACES);
            rings = [shared; 3];
            stats.triple_seven.triplets += 1;
        }
        20..30 => {
            // Low faces shuffled, 7-8-9 pinned to the tail of each ring
            for ring in rings.iter_mut() {
                let mut faces = [0, 1, 2, 3, 4, 5, 6];
                rng.shuffle_slice(&mut faces);
                ring[..7].copy_from_slice(&faces);
                ring[7..].copy_from_slice(&[7, 8, 9]);
            }
            stats.triple_seven.others += 1;
        }
        30..40 => {
            for ring in rings.iter_mut() {
                *ring = [1, 2, 3, 1, 2, 3, 1, 2, 3, 1];
                rng.shuffle_slice(ring);
            }
            stats.triple_seven.all_123 += 1;
        }
        40..50 => {
            for ring in rings.iter_mut() {
                *ring = [4, 5, 6, 4, 5, 6, 4, 5, 6, 6];
                rng.shuffle_slice(ring);
            }
            stats.triple_seven.all_456 += 1;
        }
        _ => {
            rollback_stock += 1;
            if rollback_stock > 3 {
                rollback_stock = 1;
            }
            stats.triple_seven.rollback += 1;
        }
    }

    TripleSevenEffect {
        rings,
        rollback_stock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_of(ring: &RingFaces, face: u8) -> usize {
        ring.iter().filter(|&&f| f == face).count()
    }

    #[test]
    fn test_all_ones_band() {
        let mut rng = EngineRng::new(Some(1));
        let mut stats = SessionStats::default();
        let effect = triple_seven_effect_with_draw(&mut rng, 3, 0, &mut stats);
        assert_eq!(effect.rings, [[1; 10]; 3]);
        assert_eq!(effect.rollback_stock, 0);
        assert_eq!(stats.triple_seven.all_1, 1);
    }

    #[test]
    fn test_all_sixes_band() {
        let mut rng = EngineRng::new(Some(1));
        let mut stats = SessionStats::default();
        let effect = triple_seven_effect_with_draw(&mut rng, 7, 0, &mut stats);
        assert_eq!(effect.rings, [[6; 10]; 3]);
        assert_eq!(stats.triple_seven.all_6, 1);
    }

    #[test]
    fn test_triplet_bands_share_one_layout() {
        let mut rng = EngineRng::new(Some(5));
        let mut stats = SessionStats::default();
        let effect = triple_seven_effect_with_draw(&mut rng, 12, 0, &mut stats);
        assert_eq!(effect.rings, [RING_FACES; 3]);

        let effect = triple_seven_effect_with_draw(&mut rng, 17, 0, &mut stats);
        assert_eq!(effect.rings[0], effect.rings[1]);
        assert_eq!(effect.rings[1], effect.rings[2]);
        let mut sorted = effect.rings[0];
        sorted.sort_unstable();
        assert_eq!(sorted, RING_FACES);
        assert_eq!(stats.triple_seven.triplets, 2);
    }

    #[test]
    fn test_high_faces_pinned_band() {
        let mut rng = EngineRng::new(Some(8));
        let mut stats = SessionStats::default();
        let effect = triple_seven_effect_with_draw(&mut rng, 25, 0, &mut stats);
        for ring in &effect.rings {
            assert_eq!(&ring[7..], &[7, 8, 9]);
            let mut low: Vec<u8> = ring[..7].to_vec();
            low.sort_unstable();
            assert_eq!(low, vec![0, 1, 2, 3, 4, 5, 6]);
        }
        assert_eq!(stats.triple_seven.others, 1);
    }

    #[test]
    fn test_loaded_multiset_bands() {
        let mut rng = EngineRng::new(Some(2));
        let mut stats = SessionStats::default();

        let effect = triple_seven_effect_with_draw(&mut rng, 35, 0, &mut stats);
        for ring in &effect.rings {
            assert_eq!(count_of(ring, 1), 4);
            assert_eq!(count_of(ring, 2), 3);
            assert_eq!(count_of(ring, 3), 3);
        }
        assert_eq!(stats.triple_seven.all_123, 1);

        let effect = triple_seven_effect_with_draw(&mut rng, 45, 0, &mut stats);
        for ring in &effect.rings {
            assert_eq!(count_of(ring, 4), 3);
            assert_eq!(count_of(ring, 5), 3);
            assert_eq!(count_of(ring, 6), 4);
        }
        assert_eq!(stats.triple_seven.all_456, 1);
    }

    #[test]
    fn test_rollback_band_wraps_stock() {
        let mut rng = EngineRng::new(Some(4));
        let mut stats = SessionStats::default();

        let effect = triple_seven_effect_with_draw(&mut rng, 99, 0, &mut stats);
        assert_eq!(effect.rollback_stock, 1);
        let effect = triple_seven_effect_with_draw(&mut rng, 50, 3, &mut stats);
        assert_eq!(effect.rollback_stock, 1);
        assert_eq!(stats.triple_seven.rollback, 2);

        // Rings still get fresh shuffles in this band
        for ring in &effect.rings {
            let mut sorted = *ring;
            sorted.sort_unstable();
            assert_eq!(sorted, RING_FACES);
        }
    }
}
