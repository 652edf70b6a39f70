//! Pluggable decision making.
//!
//! The engine never decides anything; a [`DecisionPolicy`] does. Policies
//! drive solo play against a bot, fill in for a departed player, and give
//! tests a deterministic opponent. A policy only reads the match through
//! the public engine accessors and hands back plain action data, so the
//! same contract serves an in-process bot and a remote player alike.

pub mod greedy;
pub mod local;

use rustc_hash::FxHashMap;

use crate::cards::SpellTargetRef;
use crate::core::Seat;
use crate::engine::{AttackTarget, MatchEngine};

pub use greedy::GreedyPolicy;
pub use local::{LocalMatch, MatchReport};

/// One card play: a hand index and, for targeted spells, where it goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayChoice {
    pub hand_index: usize,
    pub target: Option<SpellTargetRef>,
}

/// A seat's decision maker.
///
/// The driver calls `choose_play` repeatedly within one main phase until it
/// returns `None`, then `choose_attacks` once, then ends the turn. When the
/// opponent's attack suspends the match, `choose_blockers` answers it.
pub trait DecisionPolicy {
    /// The next card to play, or `None` to stop playing cards this turn.
    /// Indices refer to the hand as it currently stands.
    fn choose_play(&mut self, seat: Seat, engine: &MatchEngine) -> Option<PlayChoice>;

    /// Attacks for this turn; an empty vec declares none.
    fn choose_attacks(&mut self, seat: Seat, engine: &MatchEngine) -> Vec<(usize, AttackTarget)>;

    /// Blocker assignments for a suspended combat: waiting attacker index
    /// to blocker index. Unmapped attackers go unblocked.
    fn choose_blockers(
        &mut self,
        seat: Seat,
        engine: &MatchEngine,
        attackers: &[usize],
    ) -> FxHashMap<usize, usize>;

    /// Active-zone indices whose activated ability should fire this turn.
    fn choose_activations(&mut self, _seat: Seat, _engine: &MatchEngine) -> Vec<usize> {
        Vec::new()
    }
}

/// Does nothing: no plays, no attacks, no blocks.
///
/// Stands in for a disconnected player and anchors policy tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassPolicy;

impl DecisionPolicy for PassPolicy {
    fn choose_play(&mut self, _seat: Seat, _engine: &MatchEngine) -> Option<PlayChoice> {
        None
    }

    fn choose_attacks(&mut self, _seat: Seat, _engine: &MatchEngine) -> Vec<(usize, AttackTarget)> {
        Vec::new()
    }

    fn choose_blockers(
        &mut self,
        _seat: Seat,
        _engine: &MatchEngine,
        _attackers: &[usize],
    ) -> FxHashMap<usize, usize> {
        FxHashMap::default()
    }
}
