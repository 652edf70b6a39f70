//! Attack declaration and blocker resolution.
//!
//! A declaration is validated in full before anything moves, then resolved
//! as one batch: card-targeted attacks trade damage immediately, attacks at
//! the defending side either land unblocked (when the defender has no
//! answer) or suspend the match until `declare_blockers`. Dead cards are
//! swept to graveyards only after the whole batch, so declared indices stay
//! stable throughout resolution.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::cards::{Ability, Card};
use crate::champions::PassiveKind;
use crate::core::Seat;

use super::error::GameError;
use super::match_state::{AttackTarget, DeclareOutcome, MatchEngine, PendingCombat, Phase};

/// Whether `blocker` may intercept `attacker`: it must be able to act, and
/// a Flying attacker is only caught by another Flying card.
#[must_use]
pub fn can_intercept(attacker: &Card, blocker: &Card) -> bool {
    blocker.can_act() && (!attacker.has_ability(Ability::Flying) || blocker.has_ability(Ability::Flying))
}

/// The Taunt troop an attacker cannot walk past: alive, untapped and not
/// frozen, and visible to the attacker under the Flying rule. A tapped or
/// frozen Taunt exerts no pull.
fn taunt_wall(attacker: &Card, defender_zone: &[Card]) -> Option<usize> {
    defender_zone.iter().position(|troop| {
        troop.current_health > 0
            && troop.can_act()
            && troop.has_ability(Ability::Taunt)
            && (!attacker.has_ability(Ability::Flying) || troop.has_ability(Ability::Flying))
    })
}

impl MatchEngine {
    /// Declare a batch of attacks for the turn owner.
    ///
    /// ## Validation
    /// Every entry is checked before any damage is dealt: the attacker must
    /// be an in-range, ready, unfrozen troop with attacks left this turn
    /// (one, or two with Fury), and a card target must exist. An invalid
    /// entry rejects the whole batch unchanged.
    ///
    /// ## Resolution
    /// Attacks aimed at a card trade damage simultaneously. Attacks aimed
    /// at the side are redirected onto a visible Taunt troop if one stands,
    /// land unblocked when the defender has no eligible interceptor (or its
    /// champion forbids blocking), and otherwise suspend the match for
    /// `declare_blockers`.
    pub fn declare_attackers(
        &mut self,
        seat: Seat,
        attacks: &[(usize, AttackTarget)],
    ) -> Result<DeclareOutcome, GameError> {
        self.require_main_phase(seat)?;

        let (side, enemy) = (self.side(seat), self.side(seat.opponent()));
        let mut uses: FxHashMap<usize, u8> = FxHashMap::default();
        for &(index, target) in attacks {
            let attacker = side.active_zone.get(index).ok_or(GameError::InvalidIndex)?;
            if !attacker.can_act() {
                return Err(GameError::target("attacker is tapped or frozen"));
            }
            let spent = uses.entry(index).or_insert(attacker.attacked_count);
            let allowed = if attacker.has_ability(Ability::Fury) { 2 } else { 1 };
            if *spent >= allowed {
                return Err(GameError::target("attacker has no attacks left"));
            }
            *spent += 1;
            if let AttackTarget::Card { index } = target {
                if index >= enemy.active_zone.len() {
                    return Err(GameError::InvalidIndex);
                }
            }
        }

        let defender_blocks = !enemy.has_passive(PassiveKind::AllFury);
        let defender = seat.opponent();
        let mut pending: SmallVec<[usize; 4]> = SmallVec::new();

        for &(index, declared) in attacks {
            let (own, enemy) = self.sides_mut(seat);
            let attacker = &own.active_zone[index];
            if attacker.current_health <= 0 {
                // Died to retaliation earlier in this batch.
                continue;
            }
            let attacker_name = attacker.name.clone();
            let attack = attacker.attack;
            let flying = attacker.has_ability(Ability::Flying);
            let debuffs = attacker.has_ability(Ability::Debuff);

            // Taunt pulls side attacks (and mis-aimed card attacks) onto
            // itself.
            let target = match taunt_wall(attacker, &enemy.active_zone) {
                Some(wall) if declared != (AttackTarget::Card { index: wall }) => {
                    AttackTarget::Card { index: wall }
                }
                _ => declared,
            };
            if target != declared {
                if let AttackTarget::Card { index } = target {
                    let name = enemy.active_zone[index].name.clone();
                    self.log(format!("{attacker_name} is pulled onto {name} (taunt)"));
                }
            }

            let (own, enemy) = self.sides_mut(seat);
            match target {
                AttackTarget::Card { index: defender_index } => {
                    if enemy.active_zone[defender_index].current_health <= 0 {
                        // Already dead this batch; the attack fizzles but
                        // still spends the attacker's swing.
                        Self::mark_attacked(&mut own.active_zone[index]);
                        continue;
                    }
                    let retaliation = enemy.active_zone[defender_index].attack;
                    let killed = enemy.active_zone[defender_index].take_damage(attack);
                    let died = own.active_zone[index].take_damage(retaliation);
                    Self::mark_attacked(&mut own.active_zone[index]);
                    let defender_name = enemy.active_zone[defender_index].name.clone();
                    self.log(format!(
                        "{attacker_name} and {defender_name} trade blows ({})",
                        match (killed, died) {
                            (true, true) => "both die",
                            (true, false) => "defender dies",
                            (false, true) => "attacker dies",
                            (false, false) => "both survive",
                        }
                    ));
                }
                AttackTarget::Side => {
                    let answerable = defender_blocks
                        && enemy
                            .active_zone
                            .iter()
                            .any(|blocker| {
                                blocker.can_act()
                                    && (!flying || blocker.has_ability(Ability::Flying))
                            });
                    if answerable {
                        Self::mark_attacked(&mut own.active_zone[index]);
                        pending.push(index);
                    } else {
                        Self::mark_attacked(&mut own.active_zone[index]);
                        Self::land_unblocked(enemy, attack, debuffs);
                        self.log(format!(
                            "{attacker_name} hits {defender} for {attack} (unblocked)"
                        ));
                    }
                }
            }
        }

        self.sweep_and_retarget(seat, &mut pending);
        self.check_end();

        if self.is_over() || pending.is_empty() {
            Ok(DeclareOutcome::Resolved)
        } else {
            let attackers = pending.to_vec();
            self.set_pending_combat(PendingCombat {
                attacker: seat,
                attackers: pending,
            });
            self.log(format!("{defender} is asked for blockers"));
            Ok(DeclareOutcome::BlockersRequested { attackers })
        }
    }

    /// Answer a suspended combat as the defending seat.
    ///
    /// `blocks` maps a waiting attacker's index to the blocker's index in
    /// the defending zone. Unmapped or ineligible assignments resolve as no
    /// block; a blocker may intercept several attackers and does not tap.
    /// Afterwards the match returns to the attacker's main phase.
    pub fn declare_blockers(
        &mut self,
        seat: Seat,
        blocks: &FxHashMap<usize, usize>,
    ) -> Result<(), GameError> {
        let pending = match self.phase() {
            Phase::AwaitingBlockers => self
                .pending_combat()
                .cloned()
                .ok_or_else(|| GameError::target("no combat is waiting for blockers"))?,
            _ => return Err(GameError::target("no combat is waiting for blockers")),
        };
        if seat != pending.attacker.opponent() {
            return Err(GameError::NotYourTurn);
        }

        let attacker_seat = pending.attacker;
        for &attacker_index in &pending.attackers {
            let (defender, attackers) = self.sides_mut(seat);
            let attacker = &attackers.active_zone[attacker_index];
            if attacker.current_health <= 0 {
                continue;
            }
            let attacker_name = attacker.name.clone();
            let attack = attacker.attack;
            let debuffs = attacker.has_ability(Ability::Debuff);

            let blocker_index = blocks.get(&attacker_index).copied().filter(|&b| {
                defender
                    .active_zone
                    .get(b)
                    .is_some_and(|blocker| {
                        blocker.current_health > 0 && can_intercept(attacker, blocker)
                    })
            });

            match blocker_index {
                Some(blocker_index) => {
                    let retaliation = defender.active_zone[blocker_index].attack;
                    defender.active_zone[blocker_index].blocked_this_combat = true;
                    let blocker_died = defender.active_zone[blocker_index].take_damage(attack);
                    let attacker_died =
                        attackers.active_zone[attacker_index].take_damage(retaliation);
                    let blocker_name = defender.active_zone[blocker_index].name.clone();
                    self.log(format!(
                        "{blocker_name} blocks {attacker_name} ({})",
                        match (blocker_died, attacker_died) {
                            (true, true) => "both die",
                            (true, false) => "blocker dies",
                            (false, true) => "attacker dies",
                            (false, false) => "both survive",
                        }
                    ));
                }
                None => {
                    Self::land_unblocked(defender, attack, debuffs);
                    self.log(format!("{attacker_name} hits {seat} for {attack}"));
                }
            }
        }

        let mut no_pending: SmallVec<[usize; 4]> = SmallVec::new();
        self.sweep_and_retarget(attacker_seat, &mut no_pending);
        self.clear_pending_combat();
        self.check_end();
        Ok(())
    }

    /// Spend one of the attacker's swings; Fury keeps it ready for the
    /// second one.
    fn mark_attacked(card: &mut Card) {
        card.attacked_count += 1;
        card.ready = card.may_attack_again();
    }

    /// An unblocked hit on the defending side: life loss, plus the max-life
    /// debuff some attackers carry.
    fn land_unblocked(defender: &mut crate::core::Side, attack: i32, debuffs: bool) {
        defender.life -= attack;
        if debuffs {
            defender.max_life = (defender.max_life - 1).max(1);
        }
        defender.clamp_life();
    }

    /// Move every dead card on both sides to its graveyard and rewrite the
    /// surviving pending attacker indices to match the compacted zone.
    fn sweep_and_retarget(&mut self, attacker_seat: Seat, pending: &mut SmallVec<[usize; 4]>) {
        let (own, enemy) = self.sides_mut(attacker_seat);
        let mut removed_below = vec![0usize; own.active_zone.len()];
        let mut removed = 0;
        for (index, card) in own.active_zone.iter().enumerate() {
            removed_below[index] = removed;
            if card.current_health <= 0 {
                removed += 1;
            }
        }

        pending.retain(|index| own.active_zone[*index].current_health > 0);
        for index in pending.iter_mut() {
            *index -= removed_below[*index];
        }

        for zone_owner in [own, enemy] {
            let mut index = 0;
            while index < zone_owner.active_zone.len() {
                if zone_owner.active_zone[index].current_health <= 0 {
                    zone_owner.destroy_at(index);
                } else {
                    index += 1;
                }
            }
        }

        for card in &mut self.sides_mut(attacker_seat).1.active_zone {
            card.blocked_this_combat = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;
    use crate::champions::champion_by_name;
    use crate::core::Side;

    fn ready(mut card: Card) -> Card {
        card.ready = true;
        card
    }

    fn side_with_zone(zone: Vec<Card>) -> Side {
        let mut side = Side::new(Deck::new(Vec::new()), champion_by_name("Tacticus"));
        side.active_zone = zone;
        side
    }

    fn engine(zone_a: Vec<Card>, zone_b: Vec<Card>) -> MatchEngine {
        MatchEngine::from_sides(side_with_zone(zone_a), side_with_zone(zone_b))
    }

    #[test]
    fn card_attack_trades_damage_simultaneously() {
        let mut engine = engine(
            vec![ready(Card::troop("Knight", 3, 3, 4))],
            vec![Card::troop("Ogre", 4, 2, 5)],
        );
        let outcome = engine
            .declare_attackers(Seat::A, &[(0, AttackTarget::Card { index: 0 })])
            .unwrap();
        assert_eq!(outcome, DeclareOutcome::Resolved);
        assert_eq!(engine.side(Seat::A).active_zone[0].current_health, 2);
        assert_eq!(engine.side(Seat::B).active_zone[0].current_health, 2);
        assert!(!engine.side(Seat::A).active_zone[0].ready);
    }

    #[test]
    fn lethal_trade_buries_both_cards() {
        let mut engine = engine(
            vec![ready(Card::troop("Knight", 3, 3, 2))],
            vec![Card::troop("Ogre", 4, 4, 3)],
        );
        engine
            .declare_attackers(Seat::A, &[(0, AttackTarget::Card { index: 0 })])
            .unwrap();
        assert!(engine.side(Seat::A).active_zone.is_empty());
        assert!(engine.side(Seat::B).active_zone.is_empty());
        assert_eq!(engine.side(Seat::A).graveyard.len(), 1);
        assert_eq!(engine.side(Seat::B).graveyard.len(), 1);
    }

    #[test]
    fn tapped_attacker_rejects_the_whole_batch() {
        let mut engine = engine(
            vec![ready(Card::troop("Knight", 3, 3, 4)), Card::troop("Late", 1, 1, 1)],
            vec![Card::troop("Ogre", 4, 2, 5)],
        );
        let err = engine
            .declare_attackers(
                Seat::A,
                &[
                    (0, AttackTarget::Card { index: 0 }),
                    (1, AttackTarget::Card { index: 0 }),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidTarget { .. }));
        // nothing moved
        assert_eq!(engine.side(Seat::B).active_zone[0].current_health, 5);
        assert!(engine.side(Seat::A).active_zone[0].ready);
    }

    #[test]
    fn second_attack_requires_fury() {
        let mut engine = engine(
            vec![ready(Card::troop("Knight", 3, 1, 9))],
            vec![Card::troop("Wall", 2, 0, 9)],
        );
        let err = engine
            .declare_attackers(
                Seat::A,
                &[
                    (0, AttackTarget::Card { index: 0 }),
                    (0, AttackTarget::Card { index: 0 }),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidTarget { .. }));

        let furious = ready(Card::troop("Berserker", 3, 1, 9).with_abilities(&[Ability::Fury]));
        let mut engine = self::engine(vec![furious], vec![Card::troop("Wall", 2, 0, 9)]);
        engine
            .declare_attackers(
                Seat::A,
                &[
                    (0, AttackTarget::Card { index: 0 }),
                    (0, AttackTarget::Card { index: 0 }),
                ],
            )
            .unwrap();
        assert_eq!(engine.side(Seat::B).active_zone[0].current_health, 7);
        assert_eq!(engine.side(Seat::A).active_zone[0].attacked_count, 2);
        assert!(!engine.side(Seat::A).active_zone[0].ready);
    }

    #[test]
    fn side_attack_with_no_defenders_lands_immediately() {
        let mut engine = engine(vec![ready(Card::troop("Knight", 3, 3, 4))], vec![]);
        let before = engine.side(Seat::B).life;
        let outcome = engine
            .declare_attackers(Seat::A, &[(0, AttackTarget::Side)])
            .unwrap();
        assert_eq!(outcome, DeclareOutcome::Resolved);
        assert_eq!(engine.side(Seat::B).life, before - 3);
        assert_eq!(engine.phase(), Phase::Main);
    }

    #[test]
    fn side_attack_with_an_untapped_defender_requests_blockers() {
        let mut engine = engine(
            vec![ready(Card::troop("Knight", 3, 3, 4))],
            vec![ready(Card::troop("Guard", 2, 1, 5))],
        );
        let outcome = engine
            .declare_attackers(Seat::A, &[(0, AttackTarget::Side)])
            .unwrap();
        assert_eq!(
            outcome,
            DeclareOutcome::BlockersRequested { attackers: vec![0] }
        );
        assert_eq!(engine.phase(), Phase::AwaitingBlockers);
        // attacker is tapped while waiting
        assert!(!engine.side(Seat::A).active_zone[0].ready);
    }

    #[test]
    fn flying_attacker_ignores_grounded_blockers() {
        let eagle = ready(Card::troop("Eagle", 3, 2, 3).with_abilities(&[Ability::Flying]));
        let mut engine = engine(vec![eagle], vec![ready(Card::troop("Guard", 2, 1, 5))]);
        let before = engine.side(Seat::B).life;
        let outcome = engine
            .declare_attackers(Seat::A, &[(0, AttackTarget::Side)])
            .unwrap();
        assert_eq!(outcome, DeclareOutcome::Resolved);
        assert_eq!(engine.side(Seat::B).life, before - 2);
    }

    #[test]
    fn taunt_pulls_a_side_attack_onto_itself() {
        let wall = ready(Card::troop("Wall", 2, 0, 6).with_abilities(&[Ability::Taunt]));
        let mut engine = engine(vec![ready(Card::troop("Knight", 3, 3, 4))], vec![wall]);
        let before = engine.side(Seat::B).life;
        engine
            .declare_attackers(Seat::A, &[(0, AttackTarget::Side)])
            .unwrap();
        assert_eq!(engine.side(Seat::B).life, before);
        assert_eq!(engine.side(Seat::B).active_zone[0].current_health, 3);
    }

    #[test]
    fn tapped_taunt_exerts_no_pull() {
        let wall = Card::troop("Wall", 2, 0, 6).with_abilities(&[Ability::Taunt]);
        let mut engine = engine(vec![ready(Card::troop("Knight", 3, 3, 4))], vec![wall]);
        let before = engine.side(Seat::B).life;
        let outcome = engine
            .declare_attackers(Seat::A, &[(0, AttackTarget::Side)])
            .unwrap();
        // tapped wall neither redirects nor blocks
        assert_eq!(outcome, DeclareOutcome::Resolved);
        assert_eq!(engine.side(Seat::B).life, before - 3);
        assert_eq!(engine.side(Seat::B).active_zone[0].current_health, 6);
    }

    #[test]
    fn flying_attacker_ignores_grounded_taunt() {
        let wall = ready(Card::troop("Wall", 2, 0, 6).with_abilities(&[Ability::Taunt]));
        let eagle = ready(Card::troop("Eagle", 3, 2, 3).with_abilities(&[Ability::Flying]));
        let mut engine = engine(vec![eagle], vec![wall]);
        let before = engine.side(Seat::B).life;
        engine
            .declare_attackers(Seat::A, &[(0, AttackTarget::Side)])
            .unwrap();
        // grounded taunt cannot catch a flyer, and cannot block it either
        assert_eq!(engine.side(Seat::B).life, before - 2);
        assert_eq!(engine.side(Seat::B).active_zone[0].current_health, 6);
    }

    #[test]
    fn all_fury_champion_cannot_block() {
        let mut defender = side_with_zone(vec![ready(Card::troop("Guard", 2, 1, 5))]);
        defender.champion = champion_by_name("Ragnar");
        let mut engine = MatchEngine::from_sides(
            side_with_zone(vec![ready(Card::troop("Knight", 3, 3, 4))]),
            defender,
        );
        let before = engine.side(Seat::B).life;
        let outcome = engine
            .declare_attackers(Seat::A, &[(0, AttackTarget::Side)])
            .unwrap();
        assert_eq!(outcome, DeclareOutcome::Resolved);
        assert_eq!(engine.side(Seat::B).life, before - 3);
    }

    #[test]
    fn debuff_attacker_shrinks_max_life_on_unblocked_hits() {
        let hunter = ready(Card::troop("Hunter", 3, 2, 3).with_abilities(&[Ability::Debuff]));
        let mut engine = engine(vec![hunter], vec![]);
        let max_before = engine.side(Seat::B).max_life;
        engine
            .declare_attackers(Seat::A, &[(0, AttackTarget::Side)])
            .unwrap();
        assert_eq!(engine.side(Seat::B).max_life, max_before - 1);
    }

    #[test]
    fn blocker_intercepts_and_does_not_tap() {
        let mut engine = engine(
            vec![ready(Card::troop("Knight", 3, 3, 4))],
            vec![ready(Card::troop("Guard", 2, 1, 5))],
        );
        engine
            .declare_attackers(Seat::A, &[(0, AttackTarget::Side)])
            .unwrap();
        let mut blocks = FxHashMap::default();
        blocks.insert(0, 0);
        let before = engine.side(Seat::B).life;
        engine.declare_blockers(Seat::B, &blocks).unwrap();
        assert_eq!(engine.side(Seat::B).life, before);
        assert_eq!(engine.side(Seat::B).active_zone[0].current_health, 2);
        assert!(engine.side(Seat::B).active_zone[0].ready);
        assert_eq!(engine.side(Seat::A).active_zone[0].current_health, 3);
        assert_eq!(engine.phase(), Phase::Main);
        assert_eq!(engine.turn_owner(), Seat::A);
    }

    #[test]
    fn unmapped_attacker_lands_on_the_face() {
        let mut engine = engine(
            vec![
                ready(Card::troop("Knight", 3, 3, 4)),
                ready(Card::troop("Rogue", 2, 2, 2)),
            ],
            vec![ready(Card::troop("Guard", 2, 1, 5))],
        );
        engine
            .declare_attackers(
                Seat::A,
                &[(0, AttackTarget::Side), (1, AttackTarget::Side)],
            )
            .unwrap();
        let mut blocks = FxHashMap::default();
        blocks.insert(0, 0);
        let before = engine.side(Seat::B).life;
        engine.declare_blockers(Seat::B, &blocks).unwrap();
        // Knight blocked, Rogue through
        assert_eq!(engine.side(Seat::B).life, before - 2);
    }

    #[test]
    fn ineligible_blocker_assignment_resolves_as_no_block() {
        let eagle = ready(Card::troop("Eagle", 3, 2, 3).with_abilities(&[Ability::Flying]));
        let mut engine = engine(vec![eagle], vec![ready(Card::troop("Guard", 2, 1, 5))]);
        // a grounded guard plus a flying eagle: blockers are requested only
        // if someone can intercept, so give the defender a flyer too
        engine
            .side_mut(Seat::B)
            .active_zone
            .push(ready(Card::troop("Bat", 1, 1, 1).with_abilities(&[Ability::Flying])));
        engine
            .declare_attackers(Seat::A, &[(0, AttackTarget::Side)])
            .unwrap();
        let mut blocks = FxHashMap::default();
        blocks.insert(0, 0); // the grounded guard cannot catch a flyer
        let before = engine.side(Seat::B).life;
        engine.declare_blockers(Seat::B, &blocks).unwrap();
        assert_eq!(engine.side(Seat::B).life, before - 2);
        assert_eq!(engine.side(Seat::B).active_zone.len(), 2);
    }

    #[test]
    fn one_blocker_may_intercept_several_attackers() {
        let mut engine = engine(
            vec![
                ready(Card::troop("Knight", 3, 2, 4)),
                ready(Card::troop("Rogue", 2, 2, 4)),
            ],
            vec![ready(Card::troop("Golem", 5, 1, 9))],
        );
        engine
            .declare_attackers(
                Seat::A,
                &[(0, AttackTarget::Side), (1, AttackTarget::Side)],
            )
            .unwrap();
        let mut blocks = FxHashMap::default();
        blocks.insert(0, 0);
        blocks.insert(1, 0);
        let before = engine.side(Seat::B).life;
        engine.declare_blockers(Seat::B, &blocks).unwrap();
        assert_eq!(engine.side(Seat::B).life, before);
        assert_eq!(engine.side(Seat::B).active_zone[0].current_health, 5);
        assert_eq!(engine.side(Seat::A).active_zone[0].current_health, 3);
        assert_eq!(engine.side(Seat::A).active_zone[1].current_health, 3);
    }

    #[test]
    fn attacker_actions_are_rejected_while_blockers_are_awaited() {
        let mut engine = engine(
            vec![ready(Card::troop("Knight", 3, 3, 4))],
            vec![ready(Card::troop("Guard", 2, 1, 5))],
        );
        engine
            .declare_attackers(Seat::A, &[(0, AttackTarget::Side)])
            .unwrap();
        assert_eq!(engine.end_turn(Seat::A).unwrap_err(), GameError::NotYourTurn);
        assert_eq!(
            engine
                .declare_attackers(Seat::A, &[(0, AttackTarget::Side)])
                .unwrap_err(),
            GameError::NotYourTurn
        );
    }

    #[test]
    fn blockers_without_pending_combat_are_rejected() {
        let mut engine = engine(vec![], vec![]);
        let err = engine
            .declare_blockers(Seat::B, &FxHashMap::default())
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidTarget { .. }));
    }

    #[test]
    fn dead_attackers_are_dropped_from_pending_and_indices_compact() {
        // Index 0 dies attacking a big card; index 1 waits on the side.
        let mut engine = engine(
            vec![
                ready(Card::troop("Sacrifice", 1, 1, 1)),
                ready(Card::troop("Knight", 3, 3, 4)),
            ],
            vec![ready(Card::troop("Golem", 5, 4, 9))],
        );
        let outcome = engine
            .declare_attackers(
                Seat::A,
                &[
                    (0, AttackTarget::Card { index: 0 }),
                    (1, AttackTarget::Side),
                ],
            )
            .unwrap();
        // Sacrifice died and was swept, so Knight now sits at index 0.
        assert_eq!(
            outcome,
            DeclareOutcome::BlockersRequested { attackers: vec![0] }
        );
        assert_eq!(engine.side(Seat::A).active_zone.len(), 1);
        let mut blocks = FxHashMap::default();
        blocks.insert(0, 0);
        engine.declare_blockers(Seat::B, &blocks).unwrap();
        assert_eq!(engine.side(Seat::B).active_zone[0].current_health, 5);
    }

    #[test]
    fn lethal_side_damage_ends_the_match() {
        let mut engine = engine(vec![ready(Card::troop("Knight", 3, 3, 4))], vec![]);
        engine.side_mut(Seat::B).life = 3;
        let outcome = engine
            .declare_attackers(Seat::A, &[(0, AttackTarget::Side)])
            .unwrap();
        assert_eq!(outcome, DeclareOutcome::Resolved);
        assert_eq!(engine.winner(), Some(Seat::A));
        assert_eq!(engine.end_turn(Seat::A).unwrap_err(), GameError::NotYourTurn);
    }
}
