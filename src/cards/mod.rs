//! Card model: card records, decks, and the static catalog.

pub mod card;
pub mod catalog;
pub mod deck;

pub use card::{Ability, Card, CardKind, SpellEffect, SpellSpec, SpellTargetKind, SpellTargetRef};
pub use catalog::{
    build_random_deck, build_themed_deck, spell_template, troop_template, DeckTheme,
    SpellTemplate, TroopTemplate, SPELL_TEMPLATES, TROOP_TEMPLATES,
};
pub use deck::Deck;
