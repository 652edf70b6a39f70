//! Decks - ordered, shuffled card sequences.

use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::core::rng::GameRng;

/// An ordered deck of cards. The top of the deck is the end of the vec.
///
/// Drawing from an empty deck is not an error; it simply yields nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create a deck from a card list without shuffling.
    ///
    /// Used when the order is already decided (tests, custom payloads that
    /// get shuffled at match construction).
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Create a deck and shuffle it with the supplied RNG.
    #[must_use]
    pub fn shuffled(mut cards: Vec<Card>, rng: &mut GameRng) -> Self {
        rng.shuffle(&mut cards);
        Self { cards }
    }

    /// Shuffle in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Remove and return the top card, or `None` when empty.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
