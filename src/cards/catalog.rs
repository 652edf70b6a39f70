//! The static card catalog and deck builders.
//!
//! Templates are data, not behavior: the engine interprets abilities and
//! spell specs, the catalog only declares them. Troop health is rolled at
//! deck-build time as `attack + rng(0..=2)`, so two copies of the same
//! template can differ slightly.

use super::card::{Ability, Card, SpellEffect, SpellSpec, SpellTargetKind};
use super::deck::Deck;
use crate::core::rng::GameRng;

/// A troop template: name, cost, attack, abilities, rules text.
pub struct TroopTemplate {
    pub name: &'static str,
    pub cost: i32,
    pub attack: i32,
    pub abilities: &'static [Ability],
    pub text: Option<&'static str>,
}

/// A spell template: name, cost, and resolved payload.
pub struct SpellTemplate {
    pub name: &'static str,
    pub cost: i32,
    pub spec: SpellSpec,
    pub text: &'static str,
}

pub const TROOP_TEMPLATES: &[TroopTemplate] = &[
    // Vanilla bodies
    TroopTemplate { name: "Goblin", cost: 1, attack: 2, abilities: &[], text: None },
    TroopTemplate { name: "Slinger", cost: 1, attack: 1, abilities: &[], text: None },
    TroopTemplate { name: "Archer", cost: 2, attack: 3, abilities: &[], text: None },
    TroopTemplate { name: "Knight", cost: 3, attack: 5, abilities: &[], text: None },
    TroopTemplate { name: "Mage", cost: 4, attack: 7, abilities: &[], text: None },
    TroopTemplate { name: "Golem", cost: 5, attack: 9, abilities: &[], text: None },
    // Keyword troops
    TroopTemplate {
        name: "Berserker",
        cost: 3,
        attack: 4,
        abilities: &[Ability::Fury],
        text: Some("Can attack twice per turn"),
    },
    TroopTemplate {
        name: "Wolf",
        cost: 2,
        attack: 2,
        abilities: &[Ability::Fury],
        text: Some("Can attack twice per turn"),
    },
    TroopTemplate {
        name: "Dragon",
        cost: 5,
        attack: 6,
        abilities: &[Ability::Flying],
        text: Some("Can only be blocked by other Flying cards"),
    },
    TroopTemplate {
        name: "Eagle",
        cost: 2,
        attack: 2,
        abilities: &[Ability::Flying],
        text: Some("Can only be blocked by other Flying cards"),
    },
    TroopTemplate {
        name: "Bat",
        cost: 1,
        attack: 1,
        abilities: &[Ability::Flying],
        text: Some("Can only be blocked by other Flying cards"),
    },
    TroopTemplate {
        name: "Guardian",
        cost: 3,
        attack: 3,
        abilities: &[Ability::Taunt],
        text: Some("Attackers must strike this card first"),
    },
    TroopTemplate {
        name: "Wall",
        cost: 2,
        attack: 1,
        abilities: &[Ability::Taunt],
        text: Some("Attackers must strike this card first"),
    },
    // Activated abilities
    TroopTemplate {
        name: "Necromancer",
        cost: 4,
        attack: 3,
        abilities: &[Ability::SummonToken],
        text: Some("Tap: summon a 1/1 token"),
    },
    TroopTemplate {
        name: "Shaman",
        cost: 3,
        attack: 2,
        abilities: &[Ability::SummonToken],
        text: Some("Tap: summon a 1/1 token"),
    },
    // Support troops
    TroopTemplate {
        name: "Forest Warden",
        cost: 3,
        attack: 2,
        abilities: &[Ability::Taunt, Ability::Regenerate],
        text: Some("Blocks first and regenerates 1 health at the start of your turn"),
    },
    TroopTemplate {
        name: "Healing Fairy",
        cost: 2,
        attack: 1,
        abilities: &[Ability::HealOnPlay],
        text: Some("When played, heals your champion for 3 life"),
    },
    TroopTemplate {
        name: "Beast Hunter",
        cost: 3,
        attack: 3,
        abilities: &[Ability::Debuff],
        text: Some("On hitting the enemy champion, reduces their max life by 1"),
    },
    TroopTemplate {
        name: "Soul Thief",
        cost: 4,
        attack: 3,
        abilities: &[Ability::AbsorbMagic],
        text: Some("Whenever the opponent casts a spell, gains +1/+1"),
    },
];

pub const SPELL_TEMPLATES: &[SpellTemplate] = &[
    // Direct damage (troop or player)
    SpellTemplate {
        name: "Lightning Bolt",
        cost: 2,
        spec: SpellSpec {
            target: SpellTargetKind::EnemyCardOrSide,
            effect: SpellEffect::Damage,
            magnitude: 3,
        },
        text: "Deal 3 damage to a troop or player",
    },
    SpellTemplate {
        name: "Fireball",
        cost: 3,
        spec: SpellSpec {
            target: SpellTargetKind::EnemyCardOrSide,
            effect: SpellEffect::Damage,
            magnitude: 4,
        },
        text: "Deal 4 damage to a troop or player",
    },
    SpellTemplate {
        name: "Shock",
        cost: 1,
        spec: SpellSpec {
            target: SpellTargetKind::EnemyCardOrSide,
            effect: SpellEffect::Damage,
            magnitude: 2,
        },
        text: "Deal 2 damage to a troop or player",
    },
    // Area damage
    SpellTemplate {
        name: "Arrow Volley",
        cost: 3,
        spec: SpellSpec {
            target: SpellTargetKind::AllEnemyCards,
            effect: SpellEffect::Damage,
            magnitude: 1,
        },
        text: "Deal 1 damage to every enemy troop",
    },
    SpellTemplate {
        name: "Firestorm",
        cost: 5,
        spec: SpellSpec {
            target: SpellTargetKind::AllEnemyCards,
            effect: SpellEffect::Damage,
            magnitude: 2,
        },
        text: "Deal 2 damage to every enemy troop",
    },
    // Healing
    SpellTemplate {
        name: "Mend",
        cost: 1,
        spec: SpellSpec {
            target: SpellTargetKind::OwnSide,
            effect: SpellEffect::Heal,
            magnitude: 3,
        },
        text: "Restore 3 life",
    },
    SpellTemplate {
        name: "Greater Mend",
        cost: 3,
        spec: SpellSpec {
            target: SpellTargetKind::OwnSide,
            effect: SpellEffect::Heal,
            magnitude: 7,
        },
        text: "Restore 7 life",
    },
    // Removal
    SpellTemplate {
        name: "Banish",
        cost: 4,
        spec: SpellSpec {
            target: SpellTargetKind::EnemyCard,
            effect: SpellEffect::Destroy { damaged_only: false },
            magnitude: 0,
        },
        text: "Destroy an enemy troop",
    },
    SpellTemplate {
        name: "Execute",
        cost: 2,
        spec: SpellSpec {
            target: SpellTargetKind::EnemyCard,
            effect: SpellEffect::Destroy { damaged_only: true },
            magnitude: 0,
        },
        text: "Destroy a damaged enemy troop",
    },
    // Utility
    SpellTemplate {
        name: "Divination",
        cost: 2,
        spec: SpellSpec {
            target: SpellTargetKind::OwnSide,
            effect: SpellEffect::Draw,
            magnitude: 2,
        },
        text: "Draw 2 cards",
    },
    SpellTemplate {
        name: "Light Prison",
        cost: 2,
        spec: SpellSpec {
            target: SpellTargetKind::EnemyCard,
            effect: SpellEffect::Freeze,
            magnitude: 0,
        },
        text: "Freeze an enemy troop for 2 turns (cannot attack or block)",
    },
    SpellTemplate {
        name: "Blood Pact",
        cost: 3,
        spec: SpellSpec {
            target: SpellTargetKind::FriendlyCard,
            effect: SpellEffect::Sacrifice,
            magnitude: 0,
        },
        text: "Destroy a friendly troop. Draw 2 cards and gain +2 mana this turn",
    },
];

impl TroopTemplate {
    /// Instantiate this template, rolling health as attack + rng(0..=2).
    #[must_use]
    pub fn instantiate(&self, rng: &mut GameRng) -> Card {
        let health = self.attack + rng.gen_range(0..3);
        let mut card = Card::troop(self.name, self.cost, self.attack, health)
            .with_abilities(self.abilities);
        if let Some(text) = self.text {
            card = card.with_text(text);
        }
        card
    }
}

impl SpellTemplate {
    #[must_use]
    pub fn instantiate(&self) -> Card {
        Card::spell(self.name, self.cost, self.spec).with_text(self.text)
    }
}

/// Look up a troop template by name (case-insensitive).
#[must_use]
pub fn troop_template(name: &str) -> Option<&'static TroopTemplate> {
    TROOP_TEMPLATES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Look up a spell template by name (case-insensitive).
#[must_use]
pub fn spell_template(name: &str) -> Option<&'static SpellTemplate> {
    SPELL_TEMPLATES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Build a random deck of `size` cards with roughly `spell_ratio` spells.
#[must_use]
pub fn build_random_deck(size: usize, spell_ratio: f64, rng: &mut GameRng) -> Deck {
    let num_spells = (size as f64 * spell_ratio) as usize;
    let num_troops = size - num_spells;

    let mut cards = Vec::with_capacity(size);
    for _ in 0..num_troops {
        let idx = rng.gen_range_usize(0..TROOP_TEMPLATES.len());
        cards.push(TROOP_TEMPLATES[idx].instantiate(rng));
    }
    for _ in 0..num_spells {
        let idx = rng.gen_range_usize(0..SPELL_TEMPLATES.len());
        cards.push(SPELL_TEMPLATES[idx].instantiate());
    }

    Deck::shuffled(cards, rng)
}

/// Deck archetypes used by themed building.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeckTheme {
    /// Cheap bodies and Fury.
    Aggro,
    /// Flying and cheap support.
    Flying,
    /// Taunt and expensive bodies.
    Defensive,
    /// Anything goes.
    Mixed,
}

/// Build a troop deck biased toward a theme.
#[must_use]
pub fn build_themed_deck(theme: DeckTheme, size: usize, rng: &mut GameRng) -> Deck {
    let pool: Vec<&TroopTemplate> = TROOP_TEMPLATES
        .iter()
        .filter(|t| match theme {
            DeckTheme::Aggro => t.cost <= 3 || t.abilities.contains(&Ability::Fury),
            DeckTheme::Flying => t.abilities.contains(&Ability::Flying) || t.cost <= 2,
            DeckTheme::Defensive => t.abilities.contains(&Ability::Taunt) || t.cost >= 3,
            DeckTheme::Mixed => true,
        })
        .collect();

    let mut cards = Vec::with_capacity(size);
    for _ in 0..size {
        let idx = rng.gen_range_usize(0..pool.len());
        cards.push(pool[idx].instantiate(rng));
    }
    Deck::shuffled(cards, rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_troop_health_in_rolled_range() {
        let mut rng = GameRng::new(11);
        let template = troop_template("Golem").unwrap();
        for _ in 0..32 {
            let card = template.instantiate(&mut rng);
            assert!(card.max_health >= card.attack);
            assert!(card.max_health <= card.attack + 2);
            assert_eq!(card.current_health, card.max_health);
        }
    }

    #[test]
    fn test_spell_templates_resolve() {
        let bolt = spell_template("Lightning Bolt").unwrap().instantiate();
        assert!(bolt.is_spell());
        assert_eq!(
            bolt.spell.unwrap().target,
            SpellTargetKind::EnemyCardOrSide
        );
        assert_eq!(bolt.spell.unwrap().magnitude, 3);
    }

    #[test]
    fn test_random_deck_has_requested_composition() {
        let mut rng = GameRng::new(3);
        let deck = build_random_deck(40, 0.3, &mut rng);
        assert_eq!(deck.len(), 40);
        let spells = deck.cards().iter().filter(|c| c.is_spell()).count();
        assert_eq!(spells, 12);
    }

    #[test]
    fn test_themed_deck_respects_pool() {
        let mut rng = GameRng::new(5);
        let deck = build_themed_deck(DeckTheme::Defensive, 20, &mut rng);
        for card in deck.cards() {
            assert!(card.has_ability(Ability::Taunt) || card.cost >= 3);
        }
    }

    #[test]
    fn test_template_lookup_is_case_insensitive() {
        assert!(troop_template("goblin").is_some());
        assert!(spell_template("FIREBALL").is_some());
        assert!(troop_template("Nonexistent").is_none());
    }
}
