//! An in-process match driver.
//!
//! Runs a full match between two policies with no session layer involved.
//! Backs bot games, balance experiments, and the end-to-end engine tests.

use crate::core::{GameRng, Seat};
use crate::engine::{DeclareOutcome, GameError, MatchEngine, SideSetup};

use super::DecisionPolicy;

/// Turn cap after which a match is called a draw. High enough that any
/// real game ends on life or deck exhaustion first.
pub const DEFAULT_TURN_CAP: usize = 200;

/// Outcome of a driven match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchReport {
    /// `None` when the turn cap was hit.
    pub winner: Option<Seat>,
    /// Turns actually played.
    pub turns: usize,
}

fn pick<'a>(
    seat: Seat,
    host: &'a mut Box<dyn DecisionPolicy>,
    guest: &'a mut Box<dyn DecisionPolicy>,
) -> &'a mut dyn DecisionPolicy {
    match seat {
        Seat::A => host.as_mut(),
        Seat::B => guest.as_mut(),
    }
}

/// Two policies and an engine, driven to completion.
pub struct LocalMatch {
    engine: MatchEngine,
    host: Box<dyn DecisionPolicy>,
    guest: Box<dyn DecisionPolicy>,
    turn_cap: usize,
}

impl LocalMatch {
    pub fn new(
        host_setup: SideSetup,
        guest_setup: SideSetup,
        host: Box<dyn DecisionPolicy>,
        guest: Box<dyn DecisionPolicy>,
        rng: &mut GameRng,
    ) -> Self {
        Self {
            engine: MatchEngine::new(host_setup, guest_setup, rng),
            host,
            guest,
            turn_cap: DEFAULT_TURN_CAP,
        }
    }

    #[must_use]
    pub fn with_turn_cap(mut self, cap: usize) -> Self {
        self.turn_cap = cap;
        self
    }

    #[must_use]
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Play the match out. A policy returning an action the engine rejects
    /// simply forfeits that action; the match itself always terminates.
    pub fn run(mut self) -> Result<MatchReport, GameError> {
        let mut turns = 0;
        while !self.engine.is_over() && turns < self.turn_cap {
            turns += 1;
            let seat = self.engine.turn_owner();
            self.take_turn(seat)?;
            if !self.engine.is_over() {
                self.engine.end_turn(seat)?;
            }
        }
        Ok(MatchReport {
            winner: self.engine.winner(),
            turns,
        })
    }

    fn take_turn(&mut self, seat: Seat) -> Result<(), GameError> {
        let Self {
            engine,
            host,
            guest,
            ..
        } = self;

        // Card plays: the policy is re-consulted after each play so its
        // indices track the shrinking hand.
        let hand_limit = engine.side(seat).hand.len();
        for _ in 0..hand_limit {
            let choice = match pick(seat, host, guest).choose_play(seat, engine) {
                Some(choice) => choice,
                None => break,
            };
            if engine
                .play_card(seat, choice.hand_index, choice.target)
                .is_err()
            {
                break;
            }
            if engine.is_over() {
                return Ok(());
            }
        }

        for index in pick(seat, host, guest).choose_activations(seat, engine) {
            // A rejected activation is skipped, not fatal.
            let _ = engine.activate_ability(seat, index);
        }

        let attacks = pick(seat, host, guest).choose_attacks(seat, engine);
        if attacks.is_empty() {
            return Ok(());
        }
        match engine.declare_attackers(seat, &attacks) {
            Ok(DeclareOutcome::BlockersRequested { attackers }) => {
                let defender = seat.opponent();
                let blocks =
                    pick(defender, host, guest).choose_blockers(defender, engine, &attackers);
                engine.declare_blockers(defender, &blocks)?;
            }
            Ok(DeclareOutcome::Resolved) => {}
            // A policy that mis-declares loses its combat step.
            Err(_) => {}
        }
        Ok(())
    }
}
