//! Per-player match state.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Deck};
use crate::champions::Champion;

/// Which of the two seats a player occupies.
///
/// Seat A is the host (completed matchmaking first) and takes the first
/// turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    A,
    B,
}

impl Seat {
    #[must_use]
    pub fn opponent(self) -> Seat {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::A => write!(f, "Side A"),
            Seat::B => write!(f, "Side B"),
        }
    }
}

/// Ceiling for `max_mana`.
pub const MANA_CAP: i32 = 10;

/// Life total when no champion is chosen.
pub const DEFAULT_LIFE: i32 = 20;

/// One player's state within a match.
///
/// Invariants (enforced by the engine): `mana <= max_mana` outside the
/// sacrifice bonus window, `life` clamped to >= 0 before end checks, every
/// card in `active_zone` is a troop.
#[derive(Clone, Debug, Serialize)]
pub struct Side {
    pub life: i32,
    pub max_life: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub hand: Vec<Card>,
    pub active_zone: Vec<Card>,
    pub graveyard: Vec<Card>,
    pub deck: Deck,
    pub champion: Option<&'static Champion>,
}

impl Side {
    /// Create a side with its deck and optional champion.
    ///
    /// Life comes from the champion; mana starts at zero and is assigned by
    /// match construction (host 1, guest 0).
    #[must_use]
    pub fn new(deck: Deck, champion: Option<&'static Champion>) -> Self {
        let life = champion.map_or(DEFAULT_LIFE, |c| c.starting_life);
        Self {
            life,
            max_life: life,
            mana: 0,
            max_mana: 0,
            hand: Vec::new(),
            active_zone: Vec::new(),
            graveyard: Vec::new(),
            deck,
            champion,
        }
    }

    /// Draw one card into hand. Drawing from an empty deck is a no-op;
    /// returns whether a card actually moved.
    pub fn draw_card(&mut self) -> bool {
        match self.deck.draw() {
            Some(card) => {
                self.hand.push(card);
                true
            }
            None => false,
        }
    }

    /// Raise `max_mana` by one (capped) and refill.
    pub fn refill_mana(&mut self) {
        self.max_mana = (self.max_mana + 1).min(MANA_CAP);
        self.mana = self.max_mana;
    }

    /// Move the card at `index` from the active zone to the graveyard.
    ///
    /// Out-of-range indices are ignored.
    pub fn destroy_at(&mut self, index: usize) {
        if index < self.active_zone.len() {
            let card = self.active_zone.remove(index);
            self.graveyard.push(card);
        }
    }

    /// Clamp life into `0..=max_life`.
    pub fn clamp_life(&mut self) {
        self.life = self.life.clamp(0, self.max_life);
    }

    /// Indices of cards able to block right now (untapped, not frozen).
    #[must_use]
    pub fn eligible_blockers(&self) -> Vec<usize> {
        self.active_zone
            .iter()
            .enumerate()
            .filter(|(_, c)| c.can_act())
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether this side's champion passive matches `kind`.
    #[must_use]
    pub fn has_passive(&self, kind: crate::champions::PassiveKind) -> bool {
        self.champion.is_some_and(|c| c.passive == kind)
    }

    /// The champion's passive value, or 0 without a champion.
    #[must_use]
    pub fn passive_value(&self) -> i32 {
        self.champion.map_or(0, |c| c.passive_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::champions::champion_by_name;

    fn small_deck() -> Deck {
        Deck::new(vec![
            Card::troop("Goblin", 1, 2, 2),
            Card::troop("Archer", 2, 3, 3),
        ])
    }

    #[test]
    fn test_life_comes_from_champion() {
        let side = Side::new(small_deck(), champion_by_name("Ragnar"));
        assert_eq!(side.life, 40);
        assert_eq!(side.max_life, 40);

        let plain = Side::new(small_deck(), None);
        assert_eq!(plain.life, DEFAULT_LIFE);
    }

    #[test]
    fn test_refill_mana_caps_at_ten() {
        let mut side = Side::new(small_deck(), None);
        for _ in 0..15 {
            side.refill_mana();
        }
        assert_eq!(side.max_mana, MANA_CAP);
        assert_eq!(side.mana, MANA_CAP);
    }

    #[test]
    fn test_draw_from_empty_deck_keeps_hand() {
        let mut side = Side::new(Deck::new(Vec::new()), None);
        side.draw_card();
        assert!(side.hand.is_empty());
    }

    #[test]
    fn test_destroy_moves_to_graveyard() {
        let mut side = Side::new(Deck::new(Vec::new()), None);
        side.active_zone.push(Card::troop("Wall", 2, 1, 4));
        side.destroy_at(0);
        assert!(side.active_zone.is_empty());
        assert_eq!(side.graveyard.len(), 1);

        // out of range is ignored
        side.destroy_at(5);
        assert_eq!(side.graveyard.len(), 1);
    }

    #[test]
    fn test_eligible_blockers_skip_tapped_and_frozen() {
        let mut side = Side::new(Deck::new(Vec::new()), None);
        let mut ready = Card::troop("Guardian", 3, 3, 4);
        ready.ready = true;
        let tapped = Card::troop("Wall", 2, 1, 4);
        let mut frozen = Card::troop("Wolf", 2, 2, 3);
        frozen.ready = true;
        frozen.frozen_turns = 1;
        side.active_zone.extend([ready, tapped, frozen]);
        assert_eq!(side.eligible_blockers(), vec![0]);
    }
}
