//! Evaluation lines — tuples, mods, reaches and zone patterns

use serde::{Deserialize, Serialize};

/// The 5 face values read from a ring's stopped display window, in display order
pub type Eyes = [u8; 5];

/// One evaluation triple, one face per ring
pub type Tuple = [u8; 3];

/// A full ring layout: 10 faces, normally a permutation of 0-9
pub type RingFaces = [u8; 10];

/// Canonical ring layout before shuffling
pub const RING_FACES: RingFaces = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];

/// One of the 11 fixed evaluation lines, labelled a-k for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Line {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
}

impl Line {
    /// All lines in evaluation order
    pub const ALL: [Line; 11] = [
        Line::A,
        Line::B,
        Line::C,
        Line::D,
        Line::E,
        Line::F,
        Line::G,
        Line::H,
        Line::I,
        Line::J,
        Line::K,
    ];

    /// Index offsets into (eyes1, eyes2, eyes3).
    ///
    /// Lines a-e are the straight columns, f-h the stagger diagonals and
    /// i-k the reverse-stagger diagonals.
    pub fn offsets(self) -> [usize; 3] {
        match self {
            Line::A => [0, 0, 0],
            Line::B => [1, 1, 1],
            Line::C => [2, 2, 2],
            Line::D => [3, 3, 3],
            Line::E => [4, 4, 4],
            Line::F => [2, 1, 0],
            Line::G => [3, 2, 1],
            Line::H => [4, 3, 2],
            Line::I => [0, 1, 2],
            Line::J => [1, 2, 3],
            Line::K => [2, 3, 4],
        }
    }

    /// 0-based line index
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display letter (a-k)
    pub fn letter(self) -> char {
        (b'a' + self as u8) as char
    }
}

/// The 9 three-digit zone codes that trigger bonus modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneCode {
    Z110,
    Z359,
    Z427,
    Z488,
    Z501,
    Z564,
    Z712,
    Z893,
    Z931,
}

impl ZoneCode {
    /// All zone codes in scan order
    pub const ALL: [ZoneCode; 9] = [
        ZoneCode::Z110,
        ZoneCode::Z359,
        ZoneCode::Z427,
        ZoneCode::Z488,
        ZoneCode::Z501,
        ZoneCode::Z564,
        ZoneCode::Z712,
        ZoneCode::Z893,
        ZoneCode::Z931,
    ];

    /// The full tuple pattern this code matches
    pub fn pattern(self) -> Tuple {
        match self {
            ZoneCode::Z110 => [1, 1, 0],
            ZoneCode::Z359 => [3, 5, 9],
            ZoneCode::Z427 => [4, 2, 7],
            ZoneCode::Z488 => [4, 8, 8],
            ZoneCode::Z501 => [5, 0, 1],
            ZoneCode::Z564 => [5, 6, 4],
            ZoneCode::Z712 => [7, 1, 2],
            ZoneCode::Z893 => [8, 9, 3],
            ZoneCode::Z931 => [9, 3, 1],
        }
    }

    /// Three-digit display code
    pub fn digits(self) -> &'static str {
        match self {
            ZoneCode::Z110 => "110",
            ZoneCode::Z359 => "359",
            ZoneCode::Z427 => "427",
            ZoneCode::Z488 => "488",
            ZoneCode::Z501 => "501",
            ZoneCode::Z564 => "564",
            ZoneCode::Z712 => "712",
            ZoneCode::Z893 => "893",
            ZoneCode::Z931 => "931",
        }
    }
}

/// Derive the 11 evaluation tuples from the three stopped windows
pub fn compute_tuples(eyes1: Eyes, eyes2: Eyes, eyes3: Eyes) -> [Tuple; 11] {
    debug_assert!(
        eyes1.iter().chain(&eyes2).chain(&eyes3).all(|&f| f <= 9),
        "face values must be 0-9"
    );
    std::array::from_fn(|i| {
        let [o1, o2, o3] = Line::ALL[i].offsets();
        [eyes1[o1], eyes2[o2], eyes3[o3]]
    })
}

/// Digit-sum modulo 10 of one tuple
pub fn mod_of(tuple: Tuple) -> u8 {
    (tuple[0] + tuple[1] + tuple[2]) % 10
}

/// Mods of all 11 tuples
pub fn compute_mods(tuples: &[Tuple; 11]) -> [u8; 11] {
    std::array::from_fn(|i| mod_of(tuples[i]))
}

/// Cross pairs that count as a near-miss in either order, besides identical pairs
const CROSS_REACH_PAIRS: [(u8, u8); 6] = [(4, 5), (4, 6), (5, 6), (1, 2), (1, 3), (2, 3)];

fn is_reach_pair(eye1: u8, eye2: u8) -> bool {
    eye1 == eye2
        || CROSS_REACH_PAIRS
            .iter()
            .any(|&(a, b)| (eye1, eye2) == (a, b) || (eye1, eye2) == (b, a))
}

/// Near-miss lines after the first two rings have stopped.
///
/// A line reaches when its ring-1/ring-2 pair is identical or one of the
/// whitelisted cross pairs, in either order.
pub fn detect_reaches(eyes1: Eyes, eyes2: Eyes) -> Vec<Line> {
    Line::ALL
        .iter()
        .copied()
        .filter(|line| {
            let [o1, o2, _] = line.offsets();
            is_reach_pair(eyes1[o1], eyes2[o2])
        })
        .collect()
}

/// Zone codes whose first two digits match a line's ring-1/ring-2 pair.
///
/// Unlike [`detect_reaches`] this is directional: only the exact digit order
/// of the code counts. Drives a sound cue only, never state.
pub fn detect_zone_reaches(eyes1: Eyes, eyes2: Eyes) -> Vec<ZoneCode> {
    let mut out = Vec::new();
    for line in Line::ALL {
        let [o1, o2, _] = line.offsets();
        let (eye1, eye2) = (eyes1[o1], eyes2[o2]);
        if let Some(code) = ZoneCode::ALL.iter().copied().find(|code| {
            let p = code.pattern();
            p[0] == eye1 && p[1] == eye2
        }) {
            out.push(code);
        }
    }
    out
}

/// Zone codes fully present among the 11 tuples; each is a candidate
/// zone-activation trigger for the next round
pub fn detect_zone_rolls(tuples: &[Tuple; 11]) -> Vec<ZoneCode> {
    let mut out = Vec::new();
    for tuple in tuples {
        if let Some(code) = ZoneCode::ALL
            .iter()
            .copied()
            .find(|code| code.pattern() == *tuple)
        {
            out.push(code);
        }
    }
    out
}

/// Emergency-number tuples that trigger the ambulance easter egg
const AMBULANCE_TUPLES: [Tuple; 4] = [[1, 1, 9], [9, 1, 1], [1, 2, 0], [1, 1, 2]];

/// True when any tuple spells one of the emergency numbers
pub fn is_ambulance(tuples: &[Tuple; 11]) -> bool {
    tuples
        .iter()
        .any(|tuple| AMBULANCE_TUPLES.contains(tuple))
}
