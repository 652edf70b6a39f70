//! The champion passive table.
//!
//! A champion is a per-match passive modifier chosen by each side, not
//! itself a card. Champions are immutable after creation; the engine
//! consults their passive kind and value at the relevant moments.

use serde::{Deserialize, Serialize};

use crate::core::rng::GameRng;

/// The passive effect a champion grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassiveKind {
    /// Spells cost `value` less, floored at 1.
    SpellDiscount,
    /// Played troops get +`value` attack.
    TroopAttackBuff,
    /// A 1/1 token is summoned at the start of each turn.
    SummonToken,
    /// Troops costing <= `value` get +1 attack and enter ready.
    CheapTroopBuff,
    /// Own troops heal `value` at the start of each turn.
    HealTroops,
    /// Opening hand of 6; draws `value` cards per turn.
    CardDraw,
    /// All troops gain Fury; this side cannot declare blockers.
    AllFury,
    /// Troops with >= `value` max health get +1/+1 when played.
    BigTroopBuff,
}

/// An immutable champion definition.
///
/// Serializes for the wire; clients refer to champions by name, so no
/// deserialization is needed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Champion {
    pub name: &'static str,
    pub title: &'static str,
    pub starting_life: i32,
    pub passive: PassiveKind,
    pub passive_value: i32,
    pub passive_name: &'static str,
    pub passive_description: &'static str,
}

pub const CHAMPIONS: &[Champion] = &[
    Champion {
        name: "Arcanus",
        title: "Battle Mage",
        starting_life: 25,
        passive: PassiveKind::SpellDiscount,
        passive_value: 1,
        passive_name: "Arcane Mastery",
        passive_description: "Spells cost 1 less mana (minimum 1)",
    },
    Champion {
        name: "Brutus",
        title: "Warlord",
        starting_life: 35,
        passive: PassiveKind::TroopAttackBuff,
        passive_value: 1,
        passive_name: "Bloodlust",
        passive_description: "All your troops have +1 attack",
    },
    Champion {
        name: "Mystara",
        title: "Summoner",
        starting_life: 28,
        passive: PassiveKind::SummonToken,
        passive_value: 1,
        passive_name: "Endless Army",
        passive_description: "At the start of your turn, summon a 1/1 token",
    },
    Champion {
        name: "Shadowblade",
        title: "Assassin",
        starting_life: 22,
        passive: PassiveKind::CheapTroopBuff,
        passive_value: 3,
        passive_name: "Lethal Strike",
        passive_description: "Troops costing 3 or less get +1 attack and Haste",
    },
    Champion {
        name: "Lumina",
        title: "Cleric",
        starting_life: 32,
        passive: PassiveKind::HealTroops,
        passive_value: 1,
        passive_name: "Divine Blessing",
        passive_description: "At the start of your turn, heal all your troops for 1",
    },
    Champion {
        name: "Tacticus",
        title: "Strategist",
        starting_life: 30,
        passive: PassiveKind::CardDraw,
        passive_value: 2,
        passive_name: "Tactical Vision",
        passive_description: "Start with 6 cards, draw 2 at the start of your turn",
    },
    Champion {
        name: "Ragnar",
        title: "Berserker",
        starting_life: 40,
        passive: PassiveKind::AllFury,
        passive_value: 0,
        passive_name: "Unstoppable Rage",
        passive_description: "You cannot block. All your troops have Fury",
    },
    Champion {
        name: "Sylvana",
        title: "Druid",
        starting_life: 28,
        passive: PassiveKind::BigTroopBuff,
        passive_value: 4,
        passive_name: "Wild Growth",
        passive_description: "Troops with 4 or more health gain +1/+1",
    },
];

/// Look up a champion by name (case-insensitive).
#[must_use]
pub fn champion_by_name(name: &str) -> Option<&'static Champion> {
    CHAMPIONS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Pick a random champion for quick matches.
#[must_use]
pub fn random_champion(rng: &mut GameRng) -> &'static Champion {
    let idx = rng.gen_range_usize(0..CHAMPIONS.len());
    &CHAMPIONS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_case_insensitive() {
        assert_eq!(champion_by_name("arcanus").unwrap().name, "Arcanus");
        assert_eq!(champion_by_name("RAGNAR").unwrap().passive, PassiveKind::AllFury);
        assert!(champion_by_name("Nobody").is_none());
    }

    #[test]
    fn test_table_is_complete() {
        assert_eq!(CHAMPIONS.len(), 8);
        for champion in CHAMPIONS {
            assert!(champion.starting_life >= 22);
            assert!(champion.starting_life <= 40);
        }
    }

    #[test]
    fn test_random_champion_is_deterministic_per_seed() {
        let mut a = GameRng::new(4);
        let mut b = GameRng::new(4);
        assert_eq!(random_champion(&mut a).name, random_champion(&mut b).name);
    }
}
