//! The authoritative match engine.
//!
//! [`MatchEngine`] owns all rule enforcement: turn structure, mana, card
//! play, combat, and win detection. Callers (the session layer, bots,
//! tests) only ever submit actions and read state back; no rule lives
//! outside this module.

pub mod combat;
pub mod error;
pub mod match_state;
pub mod spells;

pub use combat::can_intercept;
pub use error::GameError;
pub use match_state::{
    AttackTarget, DeclareOutcome, MatchEngine, PendingCombat, Phase, SideSetup, OPENING_HAND,
    OPENING_HAND_DRAW_PASSIVE,
};
pub use spells::FREEZE_DURATION;
