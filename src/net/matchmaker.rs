//! Matchmaking queues.
//!
//! One FIFO queue per [`QueueMode`]. Entries hold a fully validated deck
//! and champion, so pairing two of them is nothing more than popping the
//! front twice; all rejection happens at enqueue time while the client is
//! still around to hear about it.

use std::collections::VecDeque;

use crate::cards::{build_random_deck, spell_template, troop_template, Deck};
use crate::champions::{champion_by_name, random_champion};
use crate::core::GameRng;
use crate::engine::{GameError, SideSetup};

use super::protocol::{DeckSubmission, QueueMode};

/// Smallest deck a custom submission may bring.
pub const MIN_DECK_SIZE: usize = 30;

/// Deck size and spell share handed to quick-queue players.
const QUICK_DECK_SIZE: usize = 30;
const QUICK_SPELL_RATIO: f64 = 0.3;

/// A player waiting in a queue.
#[derive(Debug)]
pub struct QueueEntry {
    pub connection_id: String,
    pub player_name: String,
    pub setup: SideSetup,
}

/// Both FIFO queues. Not synchronized; the session manager serializes
/// access behind its own lock.
#[derive(Debug, Default)]
pub struct Matchmaker {
    quick: VecDeque<QueueEntry>,
    custom: VecDeque<QueueEntry>,
}

impl Matchmaker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Join a queue. Returns the paired opponents as soon as two entries
    /// wait in the same queue, host first.
    pub fn enqueue(
        &mut self,
        mode: QueueMode,
        entry: QueueEntry,
    ) -> Option<(QueueEntry, QueueEntry)> {
        let queue = self.queue_mut(mode);
        queue.push_back(entry);
        if queue.len() >= 2 {
            let host = queue.pop_front()?;
            let guest = queue.pop_front()?;
            Some((host, guest))
        } else {
            None
        }
    }

    /// Drop a waiting entry by connection id. Returns whether one was
    /// removed from either queue.
    pub fn remove(&mut self, connection_id: &str) -> bool {
        let before = self.quick.len() + self.custom.len();
        self.quick.retain(|e| e.connection_id != connection_id);
        self.custom.retain(|e| e.connection_id != connection_id);
        self.quick.len() + self.custom.len() != before
    }

    #[must_use]
    pub fn waiting(&self, mode: QueueMode) -> usize {
        match mode {
            QueueMode::Quick => self.quick.len(),
            QueueMode::Custom => self.custom.len(),
        }
    }

    fn queue_mut(&mut self, mode: QueueMode) -> &mut VecDeque<QueueEntry> {
        match mode {
            QueueMode::Quick => &mut self.quick,
            QueueMode::Custom => &mut self.custom,
        }
    }
}

/// A random deck and champion for the quick queue.
#[must_use]
pub fn quick_setup(rng: &mut GameRng) -> SideSetup {
    SideSetup {
        deck: build_random_deck(QUICK_DECK_SIZE, QUICK_SPELL_RATIO, rng),
        champion: Some(random_champion(rng)),
    }
}

/// Resolve a custom submission against the catalog.
///
/// Rejected whole when the deck is too small, a card name is unknown, or
/// the champion does not exist. Troop stats are rolled here, once, so both
/// players' randomness comes from the same match RNG.
pub fn custom_setup(
    submission: &DeckSubmission,
    rng: &mut GameRng,
) -> Result<SideSetup, GameError> {
    if submission.cards.len() < MIN_DECK_SIZE {
        return Err(GameError::deck(format!(
            "deck has {} cards, minimum is {MIN_DECK_SIZE}",
            submission.cards.len()
        )));
    }
    let champion = champion_by_name(&submission.champion)
        .ok_or_else(|| GameError::deck(format!("unknown champion '{}'", submission.champion)))?;

    let mut cards = Vec::with_capacity(submission.cards.len());
    for name in &submission.cards {
        if let Some(troop) = troop_template(name) {
            cards.push(troop.instantiate(rng));
        } else if let Some(spell) = spell_template(name) {
            cards.push(spell.instantiate());
        } else {
            return Err(GameError::deck(format!("unknown card '{name}'")));
        }
    }

    Ok(SideSetup {
        deck: Deck::new(cards),
        champion: Some(champion),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, rng: &mut GameRng) -> QueueEntry {
        QueueEntry {
            connection_id: id.to_owned(),
            player_name: format!("player-{id}"),
            setup: quick_setup(rng),
        }
    }

    #[test]
    fn test_two_entries_in_one_queue_pair_up_fifo() {
        let mut rng = GameRng::new(1);
        let mut mm = Matchmaker::new();
        assert!(mm.enqueue(QueueMode::Quick, entry("a", &mut rng)).is_none());
        let (host, guest) = mm
            .enqueue(QueueMode::Quick, entry("b", &mut rng))
            .unwrap();
        assert_eq!(host.connection_id, "a");
        assert_eq!(guest.connection_id, "b");
        assert_eq!(mm.waiting(QueueMode::Quick), 0);
    }

    #[test]
    fn test_queues_do_not_cross_pair() {
        let mut rng = GameRng::new(1);
        let mut mm = Matchmaker::new();
        assert!(mm.enqueue(QueueMode::Quick, entry("a", &mut rng)).is_none());
        assert!(mm.enqueue(QueueMode::Custom, entry("b", &mut rng)).is_none());
        assert_eq!(mm.waiting(QueueMode::Quick), 1);
        assert_eq!(mm.waiting(QueueMode::Custom), 1);
    }

    #[test]
    fn test_cancel_removes_a_waiting_entry() {
        let mut rng = GameRng::new(1);
        let mut mm = Matchmaker::new();
        mm.enqueue(QueueMode::Quick, entry("a", &mut rng));
        assert!(mm.remove("a"));
        assert!(!mm.remove("a"));
        assert_eq!(mm.waiting(QueueMode::Quick), 0);
    }

    #[test]
    fn test_custom_setup_rejects_small_decks() {
        let mut rng = GameRng::new(1);
        let submission = DeckSubmission {
            cards: vec!["Goblin".to_owned(); MIN_DECK_SIZE - 1],
            champion: "Brutus".to_owned(),
        };
        let err = custom_setup(&submission, &mut rng).unwrap_err();
        assert!(matches!(err, GameError::InvalidDeck { .. }));
    }

    #[test]
    fn test_custom_setup_rejects_unknown_names() {
        let mut rng = GameRng::new(1);
        let mut cards = vec!["Goblin".to_owned(); MIN_DECK_SIZE - 1];
        cards.push("Definitely Not A Card".to_owned());
        let err = custom_setup(
            &DeckSubmission {
                cards,
                champion: "Brutus".to_owned(),
            },
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, GameError::InvalidDeck { .. }));

        let err = custom_setup(
            &DeckSubmission {
                cards: vec!["Goblin".to_owned(); MIN_DECK_SIZE],
                champion: "Nobody".to_owned(),
            },
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, GameError::InvalidDeck { .. }));
    }

    #[test]
    fn test_custom_setup_resolves_catalog_names_case_insensitively() {
        let mut rng = GameRng::new(1);
        let mut cards = vec!["goblin".to_owned(); MIN_DECK_SIZE - 1];
        cards.push("LIGHTNING BOLT".to_owned());
        let setup = custom_setup(
            &DeckSubmission {
                cards,
                champion: "brutus".to_owned(),
            },
            &mut rng,
        );
        assert!(setup.is_ok());
    }
}
