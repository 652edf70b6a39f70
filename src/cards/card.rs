//! Card records - the mutable unit of game state.
//!
//! A `Card` is instantiated from a catalog template and mutated by the
//! engine: damage, tapping, freezing, and combat bookkeeping all live here.
//! Spells never track health; their payload is the attached [`SpellSpec`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// What a card fundamentally is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// Permanent that occupies the active zone and can attack or block.
    Troop,
    /// One-shot card resolved immediately and discarded.
    Spell,
}

/// Keyword abilities carried by troops.
///
/// A card carries zero, one, or (rarely) two of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    /// May attack twice per turn.
    Fury,
    /// Only blockable by other Flying cards.
    Flying,
    /// Attacks aimed at this card's owner are redirected here first.
    Taunt,
    /// Restores 1 health (up to max) at its owner's untap.
    Regenerate,
    /// Heals the owner for 3 life when played.
    HealOnPlay,
    /// On hitting the enemy side, shaves 1 off their max life (floor 1).
    Debuff,
    /// Gains +1/+1 whenever the opponent casts a spell.
    AbsorbMagic,
    /// Activated: tap to summon a 1/1 token.
    SummonToken,
}

impl Ability {
    /// Whether this ability is used by tapping the card.
    #[must_use]
    pub fn is_activated(self) -> bool {
        matches!(self, Ability::SummonToken)
    }
}

/// What a spell does when it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellEffect {
    /// Deal `magnitude` damage to the target.
    Damage,
    /// Restore `magnitude` health/life to the target, capped at max.
    Heal,
    /// Remove the target outright. The finisher variant only works on
    /// already-damaged targets.
    Destroy { damaged_only: bool },
    /// Caster draws `magnitude` cards.
    Draw,
    /// Target cannot act for two of its owner's turns and is tapped now.
    Freeze,
    /// Destroy a friendly troop, then draw 2 and gain +2 mana this turn.
    Sacrifice,
}

/// What a spell is allowed to aim at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellTargetKind {
    /// The caster's own side (no card target).
    OwnSide,
    /// One friendly troop.
    FriendlyCard,
    /// One enemy troop.
    EnemyCard,
    /// One enemy troop or the enemy side, caster's choice.
    EnemyCardOrSide,
    /// Every enemy troop at once (no target argument).
    AllEnemyCards,
}

/// The resolved payload of a spell card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSpec {
    pub target: SpellTargetKind,
    pub effect: SpellEffect,
    /// Damage dealt, health restored, or cards drawn, depending on effect.
    pub magnitude: i32,
}

/// A target chosen by the caster for a spell.
///
/// Replaces the original client convention of sign-encoded indices with an
/// explicit tagged value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpellTargetRef {
    /// The relevant player side (own for heals, enemy for damage).
    Player,
    /// A troop in the caster's active zone.
    FriendlyCard { index: usize },
    /// A troop in the opponent's active zone.
    EnemyCard { index: usize },
}

/// A card in a match.
///
/// Invariants maintained by the engine:
/// - `current_health <= max_health`
/// - spells never hold health (`max_health == current_health == 0`)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub cost: i32,
    pub attack: i32,
    pub max_health: i32,
    pub current_health: i32,
    pub kind: CardKind,
    /// Untapped and available to act.
    pub ready: bool,
    #[serde(default)]
    pub abilities: SmallVec<[Ability; 2]>,
    /// Present iff `kind == Spell`.
    pub spell: Option<SpellSpec>,
    /// Rules text shown to players.
    pub text: Option<String>,
    /// Attacks made this turn (Fury allows two).
    #[serde(default)]
    pub attacked_count: u8,
    /// Owner turns remaining until this card thaws.
    #[serde(default)]
    pub frozen_turns: u8,
    /// Set while this card is blocking in the current combat.
    #[serde(default)]
    pub blocked_this_combat: bool,
}

impl Card {
    /// Create a troop card.
    #[must_use]
    pub fn troop(name: impl Into<String>, cost: i32, attack: i32, max_health: i32) -> Self {
        Self {
            name: name.into(),
            cost,
            attack,
            max_health,
            current_health: max_health,
            kind: CardKind::Troop,
            ready: false,
            abilities: SmallVec::new(),
            spell: None,
            text: None,
            attacked_count: 0,
            frozen_turns: 0,
            blocked_this_combat: false,
        }
    }

    /// Create a spell card.
    #[must_use]
    pub fn spell(name: impl Into<String>, cost: i32, spec: SpellSpec) -> Self {
        Self {
            name: name.into(),
            cost,
            attack: 0,
            max_health: 0,
            current_health: 0,
            kind: CardKind::Spell,
            ready: false,
            abilities: SmallVec::new(),
            spell: Some(spec),
            text: None,
            attacked_count: 0,
            frozen_turns: 0,
            blocked_this_combat: false,
        }
    }

    /// The 1/1 token summoned by champion and card abilities.
    ///
    /// Tokens enter play tapped, like any other played troop.
    #[must_use]
    pub fn token() -> Self {
        Self::troop("Token", 0, 1, 1)
    }

    /// Attach abilities (builder style, used by the catalog).
    #[must_use]
    pub fn with_abilities(mut self, abilities: &[Ability]) -> Self {
        self.abilities = abilities.iter().copied().collect();
        self
    }

    /// Attach rules text (builder style, used by the catalog).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn is_troop(&self) -> bool {
        self.kind == CardKind::Troop
    }

    #[must_use]
    pub fn is_spell(&self) -> bool {
        self.kind == CardKind::Spell
    }

    #[must_use]
    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen_turns > 0
    }

    /// Ready to attack or block: untapped and not frozen.
    #[must_use]
    pub fn can_act(&self) -> bool {
        self.ready && !self.is_frozen()
    }

    /// Whether this card may still declare an attack this turn.
    ///
    /// Fury grants a second attack; everything else gets one.
    #[must_use]
    pub fn may_attack_again(&self) -> bool {
        self.has_ability(Ability::Fury) && self.attacked_count < 2
    }

    /// Apply damage. Returns true if the card died.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.current_health -= amount;
        self.current_health <= 0
    }

    /// Restore health, capped at `max_health`. Returns the amount restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current_health;
        self.current_health = (self.current_health + amount).min(self.max_health);
        self.current_health - before
    }

    /// Permanent +attack/+health buff (champion passives, AbsorbMagic).
    pub fn buff(&mut self, attack: i32, health: i32) {
        self.attack += attack;
        self.max_health += health;
        self.current_health += health;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_troop_enters_with_full_health() {
        let card = Card::troop("Knight", 3, 5, 6);
        assert_eq!(card.current_health, 6);
        assert_eq!(card.max_health, 6);
        assert!(card.is_troop());
        assert!(!card.ready);
    }

    #[test]
    fn test_spell_holds_no_health() {
        let spec = SpellSpec {
            target: SpellTargetKind::EnemyCardOrSide,
            effect: SpellEffect::Damage,
            magnitude: 3,
        };
        let card = Card::spell("Lightning Bolt", 2, spec);
        assert!(card.is_spell());
        assert_eq!(card.current_health, 0);
        assert_eq!(card.max_health, 0);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut card = Card::troop("Golem", 5, 9, 10);
        card.current_health = 7;
        assert_eq!(card.heal(5), 3);
        assert_eq!(card.current_health, 10);
    }

    #[test]
    fn test_take_damage_reports_death() {
        let mut card = Card::troop("Goblin", 1, 2, 2);
        assert!(!card.take_damage(1));
        assert!(card.take_damage(1));
    }

    #[test]
    fn test_fury_allows_two_attacks() {
        let mut card = Card::troop("Berserker", 3, 4, 5).with_abilities(&[Ability::Fury]);
        assert!(card.may_attack_again());
        card.attacked_count = 1;
        assert!(card.may_attack_again());
        card.attacked_count = 2;
        assert!(!card.may_attack_again());
    }

    #[test]
    fn test_frozen_card_cannot_act() {
        let mut card = Card::troop("Wolf", 2, 2, 3);
        card.ready = true;
        assert!(card.can_act());
        card.frozen_turns = 2;
        assert!(!card.can_act());
    }

    #[test]
    fn test_buff_raises_current_and_max() {
        let mut card = Card::troop("Soul Thief", 4, 3, 4);
        card.buff(1, 1);
        assert_eq!(card.attack, 4);
        assert_eq!(card.max_health, 5);
        assert_eq!(card.current_health, 5);
    }

    #[test]
    fn test_spell_target_ref_serialization() {
        let target = SpellTargetRef::EnemyCard { index: 2 };
        let json = serde_json::to_string(&target).unwrap();
        assert_eq!(json, r#"{"kind":"enemy_card","index":2}"#);
        let back: SpellTargetRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, target);
    }
}
