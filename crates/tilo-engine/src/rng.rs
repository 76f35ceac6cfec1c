//! Seedable randomness source shared by ring shuffles and zone draws

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::lines::RingFaces;

/// Deterministic RNG wrapper. A fixed seed reproduces a whole session.
pub struct EngineRng {
    rng: ChaCha8Rng,
    seed: Option<u64>,
}

impl EngineRng {
    /// Create a new source, seeded for reproducibility or from OS entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self { rng, seed }
    }

    /// The seed this source was created with, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// A freshly shuffled copy of the given ring layout
    pub fn shuffle(&mut self, faces: RingFaces) -> RingFaces {
        let mut out = faces;
        out.shuffle(&mut self.rng);
        out
    }

    /// In-place shuffle of an arbitrary face slice
    pub fn shuffle_slice(&mut self, faces: &mut [u8]) {
        faces.shuffle(&mut self.rng);
    }

    /// Uniform draw in 0..100, used for effect-band selection
    pub fn percent(&mut self) -> u8 {
        self.rng.random_range(0..100)
    }

    /// Uniform draw in the given range
    pub fn range(&mut self, lo: u8, hi: u8) -> u8 {
        self.rng.random_range(lo..hi)
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}

impl std::fmt::Debug for EngineRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRng").field("seed", &self.seed).finish()
    }
}
