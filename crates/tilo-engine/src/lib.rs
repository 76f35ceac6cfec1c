//! Tilo engine — a deterministic three-ring scoring engine.
//!
//! Three rings of ten faces spin and stop one at a time; the stopped
//! windows form 11 evaluation lines scored against three roll tiers.
//! [`Session`] drives a whole playthrough as a phase machine, fed by
//! external stop/eyes/clock signals so it stays free of any UI or timer
//! dependency. Seed it for bit-identical replays.
//!
//! ```
//! use tilo_engine::{Phase, RuleVariant, Session, SessionConfig};
//!
//! let mut session = Session::with_seed(SessionConfig::new(RuleVariant::Rule1_2943), 42);
//! session.advance().unwrap(); // ready
//! session.advance().unwrap(); // all three rings spinning
//! assert_eq!(session.phase(), Phase::Spinning { rings: 3 });
//! ```

pub mod config;
pub mod lines;
pub mod rng;
pub mod rolls;
pub mod rule;
pub mod score;
pub mod session;
pub mod seven;
pub mod speed;
pub mod stats;
pub mod zone;

pub use config::SessionConfig;
pub use lines::{Eyes, Line, RingFaces, Tuple, ZoneCode, RING_FACES};
pub use rolls::{RollId, RollTier};
pub use rule::{Goal, RuleVariant};
pub use score::{Score, SCORE_CLAMP};
pub use session::{Phase, RoundResult, Session, SessionError};
pub use stats::SessionStats;
pub use zone::{ZoneKind, ZoneState};
