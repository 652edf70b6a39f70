//! A greedy baseline policy.
//!
//! Plays the most expensive affordable card each step, aims removal at the
//! biggest threat, takes favorable trades in combat, and otherwise goes for
//! the face. No lookahead; state is read fresh on every call, so shifting
//! hand and zone indices never go stale.

use rustc_hash::FxHashMap;

use crate::cards::{Card, SpellEffect, SpellSpec, SpellTargetKind, SpellTargetRef};
use crate::core::Seat;
use crate::engine::{AttackTarget, MatchEngine};

use super::{DecisionPolicy, PlayChoice};

#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    /// Where a spell should go, or `None` when casting it now would be a
    /// waste (healing at full life, removal into an empty board).
    fn spell_target(
        seat: Seat,
        engine: &MatchEngine,
        spec: SpellSpec,
    ) -> Option<Option<SpellTargetRef>> {
        let side = engine.side(seat);
        let enemy = engine.side(seat.opponent());

        let biggest_enemy = || {
            enemy
                .active_zone
                .iter()
                .enumerate()
                .max_by_key(|(_, c)| c.attack)
                .map(|(i, _)| i)
        };

        match spec.effect {
            SpellEffect::Damage => match spec.target {
                SpellTargetKind::AllEnemyCards => {
                    if enemy.active_zone.is_empty() {
                        None
                    } else {
                        Some(None)
                    }
                }
                SpellTargetKind::EnemyCardOrSide => {
                    // Prefer the biggest troop the spell kills outright,
                    // otherwise go face.
                    let kill = enemy
                        .active_zone
                        .iter()
                        .enumerate()
                        .filter(|(_, c)| c.current_health <= spec.magnitude)
                        .max_by_key(|(_, c)| c.attack)
                        .map(|(i, _)| i);
                    match kill {
                        Some(index) => Some(Some(SpellTargetRef::EnemyCard { index })),
                        None => Some(Some(SpellTargetRef::Player)),
                    }
                }
                _ => biggest_enemy().map(|index| Some(SpellTargetRef::EnemyCard { index })),
            },
            SpellEffect::Heal => {
                if side.life < side.max_life {
                    Some(None)
                } else {
                    None
                }
            }
            SpellEffect::Destroy { damaged_only } => enemy
                .active_zone
                .iter()
                .enumerate()
                .filter(|(_, c)| !damaged_only || c.current_health < c.max_health)
                .max_by_key(|(_, c)| c.attack)
                .map(|(index, _)| Some(SpellTargetRef::EnemyCard { index })),
            SpellEffect::Draw => Some(None),
            SpellEffect::Freeze => enemy
                .active_zone
                .iter()
                .enumerate()
                .filter(|(_, c)| c.can_act())
                .max_by_key(|(_, c)| c.attack)
                .map(|(index, _)| Some(SpellTargetRef::EnemyCard { index })),
            SpellEffect::Sacrifice => side
                .active_zone
                .iter()
                .enumerate()
                .min_by_key(|(_, c)| c.attack)
                .map(|(index, _)| Some(SpellTargetRef::FriendlyCard { index })),
        }
    }

    /// A trade is worth taking when the attacker kills the defender and
    /// walks away.
    fn favorable_trade(attacker: &Card, enemy_zone: &[Card]) -> Option<usize> {
        enemy_zone
            .iter()
            .enumerate()
            .filter(|(_, c)| attacker.attack >= c.current_health && c.attack < attacker.current_health)
            .max_by_key(|(_, c)| c.attack)
            .map(|(i, _)| i)
    }
}

impl DecisionPolicy for GreedyPolicy {
    fn choose_play(&mut self, seat: Seat, engine: &MatchEngine) -> Option<PlayChoice> {
        let side = engine.side(seat);
        let mut best: Option<(i32, PlayChoice)> = None;

        for (hand_index, card) in side.hand.iter().enumerate() {
            let cost = engine.effective_cost(seat, card);
            if cost > side.mana {
                continue;
            }
            let target = if let Some(spec) = card.spell {
                match Self::spell_target(seat, engine, spec) {
                    Some(target) => target,
                    None => continue,
                }
            } else {
                None
            };
            if best.map_or(true, |(c, _)| cost > c) {
                best = Some((cost, PlayChoice { hand_index, target }));
            }
        }

        best.map(|(_, choice)| choice)
    }

    fn choose_attacks(&mut self, seat: Seat, engine: &MatchEngine) -> Vec<(usize, AttackTarget)> {
        let side = engine.side(seat);
        let enemy_zone = &engine.side(seat.opponent()).active_zone;
        let mut attacks = Vec::new();

        for (index, card) in side.active_zone.iter().enumerate() {
            if !card.can_act() {
                continue;
            }
            let swings = if card.may_attack_again() || card.attacked_count == 0 {
                let max = if card.has_ability(crate::cards::Ability::Fury) { 2 } else { 1 };
                max - usize::from(card.attacked_count)
            } else {
                0
            };
            for _ in 0..swings {
                let target = match Self::favorable_trade(card, enemy_zone) {
                    Some(enemy_index) => AttackTarget::Card { index: enemy_index },
                    None => AttackTarget::Side,
                };
                attacks.push((index, target));
            }
        }
        attacks
    }

    fn choose_blockers(
        &mut self,
        seat: Seat,
        engine: &MatchEngine,
        attackers: &[usize],
    ) -> FxHashMap<usize, usize> {
        let side = engine.side(seat);
        let enemy_zone = &engine.side(seat.opponent()).active_zone;
        let incoming: i32 = attackers
            .iter()
            .filter_map(|&i| enemy_zone.get(i))
            .map(|c| c.attack)
            .sum();
        let desperate = incoming >= side.life;

        let mut blocks = FxHashMap::default();
        for &attacker_index in attackers {
            let Some(attacker) = enemy_zone.get(attacker_index) else {
                continue;
            };
            let pick = side
                .active_zone
                .iter()
                .enumerate()
                .filter(|(_, b)| crate::engine::can_intercept(attacker, b))
                .find(|(_, b)| {
                    // Survive the hit, or kill the attacker, or chump when
                    // the face cannot afford the damage.
                    b.current_health > attacker.attack
                        || b.attack >= attacker.current_health
                        || desperate
                });
            if let Some((blocker_index, _)) = pick {
                blocks.insert(attacker_index, blocker_index);
            }
        }
        blocks
    }

    fn choose_activations(&mut self, seat: Seat, engine: &MatchEngine) -> Vec<usize> {
        engine
            .side(seat)
            .active_zone
            .iter()
            .enumerate()
            .filter(|(_, c)| c.can_act() && c.abilities.iter().any(|a| a.is_activated()))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Ability, Deck};
    use crate::champions::champion_by_name;
    use crate::core::Side;

    fn bare_engine(hand_a: Vec<Card>, zone_b: Vec<Card>) -> MatchEngine {
        let mut a = Side::new(Deck::new(Vec::new()), champion_by_name("Tacticus"));
        a.hand = hand_a;
        a.mana = 10;
        a.max_mana = 10;
        let mut b = Side::new(Deck::new(Vec::new()), champion_by_name("Tacticus"));
        b.active_zone = zone_b;
        MatchEngine::from_sides(a, b)
    }

    #[test]
    fn plays_the_most_expensive_affordable_card() {
        let engine = bare_engine(
            vec![
                Card::troop("Cheap", 1, 1, 1),
                Card::troop("Big", 6, 6, 6),
                Card::troop("Mid", 3, 3, 3),
            ],
            vec![],
        );
        let choice = GreedyPolicy.choose_play(Seat::A, &engine).unwrap();
        assert_eq!(choice.hand_index, 1);
    }

    #[test]
    fn skips_heal_at_full_life() {
        let mend = Card::spell(
            "Mend",
            1,
            SpellSpec {
                target: SpellTargetKind::OwnSide,
                effect: SpellEffect::Heal,
                magnitude: 3,
            },
        );
        let engine = bare_engine(vec![mend], vec![]);
        assert!(GreedyPolicy.choose_play(Seat::A, &engine).is_none());
    }

    #[test]
    fn aims_lethal_damage_at_the_biggest_killable_troop() {
        let bolt = Card::spell(
            "Bolt",
            2,
            SpellSpec {
                target: SpellTargetKind::EnemyCardOrSide,
                effect: SpellEffect::Damage,
                magnitude: 3,
            },
        );
        let engine = bare_engine(
            vec![bolt],
            vec![Card::troop("Tank", 6, 2, 8), Card::troop("Glass", 4, 5, 2)],
        );
        let choice = GreedyPolicy.choose_play(Seat::A, &engine).unwrap();
        assert_eq!(choice.target, Some(SpellTargetRef::EnemyCard { index: 1 }));
    }

    #[test]
    fn goes_face_when_nothing_dies_to_the_spell() {
        let bolt = Card::spell(
            "Bolt",
            2,
            SpellSpec {
                target: SpellTargetKind::EnemyCardOrSide,
                effect: SpellEffect::Damage,
                magnitude: 3,
            },
        );
        let engine = bare_engine(vec![bolt], vec![Card::troop("Tank", 6, 2, 8)]);
        let choice = GreedyPolicy.choose_play(Seat::A, &engine).unwrap();
        assert_eq!(choice.target, Some(SpellTargetRef::Player));
    }

    #[test]
    fn attacks_into_a_favorable_trade_before_the_face() {
        let mut knight = Card::troop("Knight", 3, 4, 4);
        knight.ready = true;
        let mut engine = bare_engine(vec![], vec![Card::troop("Glass", 4, 2, 3)]);
        engine.side_mut(Seat::A).active_zone.push(knight);
        let attacks = GreedyPolicy.choose_attacks(Seat::A, &engine);
        assert_eq!(attacks, vec![(0, AttackTarget::Card { index: 0 })]);
    }

    #[test]
    fn fury_troop_declares_two_swings() {
        let mut berserker = Card::troop("Berserker", 3, 2, 3).with_abilities(&[Ability::Fury]);
        berserker.ready = true;
        let mut engine = bare_engine(vec![], vec![]);
        engine.side_mut(Seat::A).active_zone.push(berserker);
        let attacks = GreedyPolicy.choose_attacks(Seat::A, &engine);
        assert_eq!(attacks.len(), 2);
    }

    #[test]
    fn blocks_when_the_hit_would_be_lethal() {
        let mut engine = bare_engine(vec![], vec![]);
        let mut attacker = Card::troop("Giant", 6, 8, 8);
        attacker.ready = true;
        engine.side_mut(Seat::B).active_zone.push(attacker);
        let mut chump = Card::troop("Token", 0, 1, 1);
        chump.ready = true;
        engine.side_mut(Seat::A).active_zone.push(chump);
        engine.side_mut(Seat::A).life = 5;
        let blocks = GreedyPolicy.choose_blockers(Seat::A, &engine, &[0]);
        assert_eq!(blocks.get(&0), Some(&0));
    }

    #[test]
    fn declines_a_pointless_chump_block() {
        let mut engine = bare_engine(vec![], vec![]);
        let mut attacker = Card::troop("Giant", 6, 8, 8);
        attacker.ready = true;
        engine.side_mut(Seat::B).active_zone.push(attacker);
        let mut chump = Card::troop("Token", 0, 1, 1);
        chump.ready = true;
        engine.side_mut(Seat::A).active_zone.push(chump);
        engine.side_mut(Seat::A).life = 30;
        let blocks = GreedyPolicy.choose_blockers(Seat::A, &engine, &[0]);
        assert!(blocks.is_empty());
    }
}
