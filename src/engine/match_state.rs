//! The match state machine.
//!
//! `MatchEngine` exclusively owns all match state. Rooms and local drivers
//! mutate it only through the action methods here and in the `combat` and
//! `spells` modules; every method validates fully before touching state, so
//! a failed action leaves the match exactly as it was.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::GameError;
use crate::cards::{Ability, Card, Deck, SpellTargetRef};
use crate::champions::{Champion, PassiveKind};
use crate::core::{ActionLog, GameRng, Seat, Side};

/// Opening hand size without a draw passive.
pub const OPENING_HAND: usize = 5;

/// Opening hand size with a Tacticus-style draw passive.
pub const OPENING_HAND_DRAW_PASSIVE: usize = 6;

/// Where an attack is aimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttackTarget {
    /// The opposing side directly (may be intercepted by blockers).
    Side,
    /// A specific card in the opposing active zone (never blockable).
    Card { index: usize },
}

/// Coarse match phase.
///
/// The untap/draw/passive steps of a turn run atomically inside
/// `start_turn`, so between actions a match is always in one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// The turn owner may play cards, activate abilities, and attack.
    Main,
    /// Attacks at the defending side are declared; the match is suspended
    /// until the defender answers (or times out).
    AwaitingBlockers,
    /// Terminal. Entered exactly once.
    GameOver { winner: Seat },
}

/// Combat suspended while the defender picks blockers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PendingCombat {
    /// The seat whose attack is waiting.
    pub attacker: Seat,
    /// Active-zone indices of the attackers aimed at the defending side.
    pub attackers: SmallVec<[usize; 4]>,
}

/// Result of an attack declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclareOutcome {
    /// Every declared attack resolved; the turn owner may continue.
    Resolved,
    /// Attacks at the defending side remain suspended; the defender must
    /// answer with `declare_blockers` (an empty map is a valid answer).
    /// Carries the active-zone indices of the waiting attackers.
    BlockersRequested { attackers: Vec<usize> },
}

/// Deck and champion for one seat at match construction.
#[derive(Debug)]
pub struct SideSetup {
    pub deck: Deck,
    pub champion: Option<&'static Champion>,
}

/// The authoritative engine for one match.
#[derive(Debug)]
pub struct MatchEngine {
    sides: [Side; 2],
    turn_owner: Seat,
    phase: Phase,
    pending_combat: Option<PendingCombat>,
    log: ActionLog,
    initialized: bool,
}

impl MatchEngine {
    /// Build a match: shuffle both decks, deal opening hands, and give the
    /// host (seat A) its first turn's mana. The guest stays at zero so its
    /// first `start_turn` also nets one.
    #[must_use]
    pub fn new(host: SideSetup, guest: SideSetup, rng: &mut GameRng) -> Self {
        let mut side_a = Side::new(host.deck, host.champion);
        let mut side_b = Side::new(guest.deck, guest.champion);
        side_a.deck.shuffle(rng);
        side_b.deck.shuffle(rng);

        for side in [&mut side_a, &mut side_b] {
            let hand_size = if side.has_passive(PassiveKind::CardDraw) {
                OPENING_HAND_DRAW_PASSIVE
            } else {
                OPENING_HAND
            };
            for _ in 0..hand_size {
                side.draw_card();
            }
        }

        side_a.max_mana = 1;
        side_a.mana = 1;

        let mut log = ActionLog::new();
        for (seat, side) in [(Seat::A, &side_a), (Seat::B, &side_b)] {
            if let Some(champion) = side.champion {
                log.push(format!(
                    "{seat} champion: {} - {}",
                    champion.name, champion.passive_name
                ));
            }
        }

        Self {
            sides: [side_a, side_b],
            turn_owner: Seat::A,
            phase: Phase::Main,
            pending_combat: None,
            log,
            initialized: true,
        }
    }

    /// Assemble a match from fully prepared sides: no shuffling, no opening
    /// draws, no initial mana assignment. Seat A owns the first turn.
    ///
    /// Used by tests and offline tooling that need exact positions.
    #[must_use]
    pub fn from_sides(side_a: Side, side_b: Side) -> Self {
        Self {
            sides: [side_a, side_b],
            turn_owner: Seat::A,
            phase: Phase::Main,
            pending_combat: None,
            log: ActionLog::new(),
            initialized: true,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn side(&self, seat: Seat) -> &Side {
        match seat {
            Seat::A => &self.sides[0],
            Seat::B => &self.sides[1],
        }
    }

    pub(crate) fn side_mut(&mut self, seat: Seat) -> &mut Side {
        match seat {
            Seat::A => &mut self.sides[0],
            Seat::B => &mut self.sides[1],
        }
    }

    /// Both sides at once: `(seat's side, opponent's side)`.
    pub(crate) fn sides_mut(&mut self, seat: Seat) -> (&mut Side, &mut Side) {
        let (left, right) = self.sides.split_at_mut(1);
        match seat {
            Seat::A => (&mut left[0], &mut right[0]),
            Seat::B => (&mut right[0], &mut left[0]),
        }
    }

    #[must_use]
    pub fn turn_owner(&self) -> Seat {
        self.turn_owner
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn pending_combat(&self) -> Option<&PendingCombat> {
        self.pending_combat.as_ref()
    }

    #[must_use]
    pub fn winner(&self) -> Option<Seat> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    #[must_use]
    pub fn action_log(&self) -> &ActionLog {
        &self.log
    }

    pub(crate) fn log(&mut self, entry: impl Into<String>) {
        self.log.push(entry.into());
    }

    /// The caller must own the turn and the match must be in `Main`.
    pub(crate) fn require_main_phase(&self, seat: Seat) -> Result<(), GameError> {
        match self.phase {
            Phase::Main if self.turn_owner == seat => Ok(()),
            _ => Err(GameError::NotYourTurn),
        }
    }

    // === Operations ===

    /// Hand the turn to the opponent and run their turn start.
    pub fn end_turn(&mut self, seat: Seat) -> Result<(), GameError> {
        self.require_main_phase(seat)?;
        self.turn_owner = seat.opponent();
        self.start_turn(self.turn_owner)
    }

    /// Run the turn-start sequence for `seat`: mana refill, untap (with
    /// freeze countdown and regeneration), reset of combat counters, card
    /// draw, and start-of-turn champion passives.
    pub fn start_turn(&mut self, seat: Seat) -> Result<(), GameError> {
        self.require_main_phase(seat)?;

        let side = self.side_mut(seat);
        side.refill_mana();

        let mut thawed = Vec::new();
        let mut regenerated = Vec::new();
        for card in &mut side.active_zone {
            card.blocked_this_combat = false;
            if card.frozen_turns > 0 {
                card.frozen_turns -= 1;
                if card.frozen_turns > 0 {
                    card.ready = false;
                    card.attacked_count = 0;
                    continue;
                }
                thawed.push(card.name.clone());
            }
            card.ready = true;
            card.attacked_count = 0;
            if card.has_ability(Ability::Regenerate) && card.heal(1) > 0 {
                regenerated.push(card.name.clone());
            }
        }

        let draw_count = if side.has_passive(PassiveKind::CardDraw) {
            side.passive_value()
        } else {
            1
        };
        for _ in 0..draw_count {
            side.draw_card();
        }

        if side.has_passive(PassiveKind::SummonToken) {
            side.active_zone.push(Card::token());
        }
        if side.has_passive(PassiveKind::HealTroops) {
            let amount = side.passive_value();
            for card in &mut side.active_zone {
                card.heal(amount);
            }
        }
        let active_count = side.active_zone.len();

        for name in thawed {
            self.log(format!("{name} is no longer frozen"));
        }
        for name in regenerated {
            self.log(format!("{name} regenerates 1 health"));
        }
        self.log(format!(
            "{seat} starts turn, draws {draw_count}, {active_count} active cards"
        ));
        Ok(())
    }

    /// Play a card from hand: a troop enters the active zone tapped, a
    /// spell resolves immediately and goes to the graveyard.
    pub fn play_card(
        &mut self,
        seat: Seat,
        hand_index: usize,
        target: Option<SpellTargetRef>,
    ) -> Result<(), GameError> {
        self.require_main_phase(seat)?;

        let side = self.side(seat);
        let card = side.hand.get(hand_index).ok_or(GameError::InvalidIndex)?;
        let cost = self.effective_cost(seat, card);
        if cost > side.mana {
            return Err(GameError::InsufficientMana);
        }
        if card.is_spell() {
            // Targets are checked before any mutation.
            let spec = card
                .spell
                .ok_or_else(|| GameError::target("spell card has no effect"))?;
            self.validate_spell_target(seat, spec, target)?;
        }

        let side = self.side_mut(seat);
        side.mana -= cost;
        let card = side.hand.remove(hand_index);

        if card.is_spell() {
            let name = card.name.clone();
            self.resolve_spell(seat, &card, target);
            self.side_mut(seat).graveyard.push(card);
            self.log(format!("{seat} casts {name} (cost {cost})"));
            self.trigger_absorb_magic(seat.opponent());
            self.check_end();
        } else {
            let mut card = card;
            card.ready = false;
            card.current_health = card.max_health;
            self.apply_champion_passives(seat, &mut card);
            let name = card.name.clone();
            let heals_on_play = card.has_ability(Ability::HealOnPlay);
            self.side_mut(seat).active_zone.push(card);
            if heals_on_play {
                let side = self.side_mut(seat);
                let before = side.life;
                side.life = (side.life + 3).min(side.max_life);
                let healed = side.life - before;
                self.log(format!("{name} heals {seat} for {healed} life"));
            }
            self.log(format!("{seat} plays {name} (cost {cost})"));
        }
        Ok(())
    }

    /// Tap a card to use its activated ability.
    pub fn activate_ability(&mut self, seat: Seat, zone_index: usize) -> Result<(), GameError> {
        self.require_main_phase(seat)?;

        let side = self.side(seat);
        let card = side
            .active_zone
            .get(zone_index)
            .ok_or(GameError::InvalidIndex)?;
        if !card.ready {
            return Err(GameError::target("card is tapped"));
        }
        if !card.has_ability(Ability::SummonToken) {
            return Err(GameError::target("card has no activated ability"));
        }

        let side = self.side_mut(seat);
        side.active_zone[zone_index].ready = false;
        let name = side.active_zone[zone_index].name.clone();
        side.active_zone.push(Card::token());
        self.log(format!("{seat} activates {name}: summons a 1/1 token"));
        Ok(())
    }

    /// Concede: drops the caller's life to zero and runs the end check.
    /// Valid at any point, including while combat is suspended.
    pub fn surrender(&mut self, seat: Seat) {
        if self.is_over() {
            return;
        }
        self.side_mut(seat).life = 0;
        self.log(format!("{seat} surrenders"));
        self.pending_combat = None;
        self.check_end();
    }

    /// Evaluate the win condition. No-op before initialization and after
    /// the terminal transition, which fires exactly once.
    pub fn check_end(&mut self) {
        if !self.initialized || self.is_over() {
            return;
        }
        for side in &mut self.sides {
            if side.life < 0 {
                side.life = 0;
            }
        }
        if self.sides[0].life == 0 || self.sides[1].life == 0 {
            let winner = if self.sides[0].life == 0 {
                Seat::B
            } else {
                Seat::A
            };
            self.pending_combat = None;
            self.phase = Phase::GameOver { winner };
            self.log(format!("game over: {winner} wins"));
        }
    }

    // === Champion hooks ===

    /// Base cost adjusted by a spell-discount passive (spells only).
    #[must_use]
    pub fn effective_cost(&self, seat: Seat, card: &Card) -> i32 {
        let side = self.side(seat);
        if card.is_spell() && side.has_passive(PassiveKind::SpellDiscount) {
            (card.cost - side.passive_value()).max(1)
        } else {
            card.cost
        }
    }

    /// One-shot champion buffs applied when a troop is played. Never
    /// retroactive.
    fn apply_champion_passives(&self, seat: Seat, card: &mut Card) {
        let side = self.side(seat);
        let Some(champion) = side.champion else {
            return;
        };
        match champion.passive {
            PassiveKind::TroopAttackBuff => card.attack += champion.passive_value,
            PassiveKind::CheapTroopBuff => {
                if card.cost <= champion.passive_value {
                    card.attack += 1;
                    card.ready = true;
                }
            }
            PassiveKind::AllFury => {
                if !card.has_ability(Ability::Fury) {
                    card.abilities.push(Ability::Fury);
                }
            }
            PassiveKind::BigTroopBuff => {
                if card.max_health >= champion.passive_value {
                    card.buff(1, 1);
                }
            }
            _ => {}
        }
    }

    /// +1/+1 to every AbsorbMagic card on the side that did NOT cast.
    fn trigger_absorb_magic(&mut self, seat: Seat) {
        let mut absorbed = Vec::new();
        let side = self.side_mut(seat);
        for card in &mut side.active_zone {
            if card.has_ability(Ability::AbsorbMagic) {
                card.buff(1, 1);
                absorbed.push(format!(
                    "{} absorbs magic, now {}/{}",
                    card.name, card.attack, card.current_health
                ));
            }
        }
        for entry in absorbed {
            self.log(entry);
        }
    }

    pub(crate) fn set_pending_combat(&mut self, pending: PendingCombat) {
        self.pending_combat = Some(pending);
        self.phase = Phase::AwaitingBlockers;
    }

    pub(crate) fn clear_pending_combat(&mut self) {
        self.pending_combat = None;
        if !self.is_over() {
            self.phase = Phase::Main;
        }
    }
}
