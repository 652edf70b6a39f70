//! Shared engine primitives: RNG, action log, and the per-player side.

pub mod log;
pub mod rng;
pub mod side;

pub use log::{ActionLog, LOG_CAPACITY};
pub use rng::GameRng;
pub use side::{Seat, Side, DEFAULT_LIFE, MANA_CAP};
