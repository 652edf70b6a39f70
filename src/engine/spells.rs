//! Spell targeting and resolution.
//!
//! Targets are validated in full before `play_card` spends any mana, so a
//! rejected spell leaves the match untouched. Resolution itself is
//! infallible: by the time [`MatchEngine::resolve_spell`] runs, the target
//! reference has already been checked against the current board.

use crate::cards::{Card, SpellEffect, SpellSpec, SpellTargetKind, SpellTargetRef};
use crate::core::Seat;

use super::error::GameError;
use super::match_state::MatchEngine;

/// Turns a frozen card sits out, counted at its owner's turn starts.
pub const FREEZE_DURATION: u8 = 2;

/// Cards drawn and mana refunded by a sacrifice effect.
const SACRIFICE_DRAW: usize = 2;
const SACRIFICE_MANA: i32 = 2;

impl MatchEngine {
    /// Check a spell's target reference against its targeting rule and the
    /// current board. Side-wide and untargeted spells accept a missing
    /// reference; card-targeted spells require an in-range index.
    pub(crate) fn validate_spell_target(
        &self,
        seat: Seat,
        spec: SpellSpec,
        target: Option<SpellTargetRef>,
    ) -> Result<(), GameError> {
        match spec.target {
            SpellTargetKind::OwnSide | SpellTargetKind::AllEnemyCards => match target {
                None | Some(SpellTargetRef::Player) => Ok(()),
                Some(_) => Err(GameError::target("this spell does not target a card")),
            },
            SpellTargetKind::FriendlyCard => match target {
                Some(SpellTargetRef::FriendlyCard { index }) => {
                    if index < self.side(seat).active_zone.len() {
                        Ok(())
                    } else {
                        Err(GameError::InvalidIndex)
                    }
                }
                _ => Err(GameError::target("this spell targets a friendly troop")),
            },
            SpellTargetKind::EnemyCard => {
                let index = match target {
                    Some(SpellTargetRef::EnemyCard { index }) => index,
                    _ => return Err(GameError::target("this spell targets an enemy troop")),
                };
                let enemy = self
                    .side(seat.opponent())
                    .active_zone
                    .get(index)
                    .ok_or(GameError::InvalidIndex)?;
                if let SpellEffect::Destroy { damaged_only: true } = spec.effect {
                    if enemy.current_health >= enemy.max_health {
                        return Err(GameError::target("target troop is undamaged"));
                    }
                }
                Ok(())
            }
            SpellTargetKind::EnemyCardOrSide => match target {
                Some(SpellTargetRef::Player) => Ok(()),
                Some(SpellTargetRef::EnemyCard { index }) => {
                    if index < self.side(seat.opponent()).active_zone.len() {
                        Ok(())
                    } else {
                        Err(GameError::InvalidIndex)
                    }
                }
                _ => Err(GameError::target(
                    "this spell targets an enemy troop or the enemy player",
                )),
            },
        }
    }

    /// Apply a validated spell to the board. Dead troops are moved to their
    /// owner's graveyard here; win detection runs in `play_card` afterwards.
    pub(crate) fn resolve_spell(&mut self, seat: Seat, card: &Card, target: Option<SpellTargetRef>) {
        let Some(spec) = card.spell else { return };
        let magnitude = spec.magnitude;

        match spec.effect {
            SpellEffect::Damage => match (spec.target, target) {
                (SpellTargetKind::AllEnemyCards, _) => {
                    let enemy = self.side_mut(seat.opponent());
                    let mut died = Vec::new();
                    for (index, troop) in enemy.active_zone.iter_mut().enumerate() {
                        if troop.take_damage(magnitude) {
                            died.push(index);
                        }
                    }
                    for index in died.into_iter().rev() {
                        let corpse = enemy.active_zone.remove(index);
                        enemy.graveyard.push(corpse);
                    }
                    self.log(format!(
                        "{} hits every enemy troop for {magnitude}",
                        card.name
                    ));
                }
                (_, Some(SpellTargetRef::EnemyCard { index })) => {
                    let enemy = self.side_mut(seat.opponent());
                    let name = enemy.active_zone[index].name.clone();
                    if enemy.active_zone[index].take_damage(magnitude) {
                        enemy.destroy_at(index);
                        self.log(format!("{} destroys {name}", card.name));
                    } else {
                        self.log(format!("{} hits {name} for {magnitude}", card.name));
                    }
                }
                _ => {
                    let enemy = self.side_mut(seat.opponent());
                    enemy.life -= magnitude;
                    enemy.clamp_life();
                    self.log(format!(
                        "{} hits {} for {magnitude}",
                        card.name,
                        seat.opponent()
                    ));
                }
            },
            SpellEffect::Heal => match target {
                Some(SpellTargetRef::FriendlyCard { index }) => {
                    let side = self.side_mut(seat);
                    let restored = side.active_zone[index].heal(magnitude);
                    let name = side.active_zone[index].name.clone();
                    self.log(format!("{} restores {restored} health to {name}", card.name));
                }
                _ => {
                    let side = self.side_mut(seat);
                    let before = side.life;
                    side.life = (side.life + magnitude).min(side.max_life);
                    let restored = side.life - before;
                    self.log(format!("{} restores {restored} life to {seat}", card.name));
                }
            },
            SpellEffect::Destroy { .. } => {
                if let Some(SpellTargetRef::EnemyCard { index }) = target {
                    let enemy = self.side_mut(seat.opponent());
                    let name = enemy.active_zone[index].name.clone();
                    enemy.destroy_at(index);
                    self.log(format!("{} destroys {name}", card.name));
                }
            }
            SpellEffect::Draw => {
                let side = self.side_mut(seat);
                let mut drawn = 0;
                for _ in 0..magnitude.max(0) {
                    if side.draw_card() {
                        drawn += 1;
                    }
                }
                self.log(format!("{seat} draws {drawn} with {}", card.name));
            }
            SpellEffect::Freeze => {
                if let Some(SpellTargetRef::EnemyCard { index }) = target {
                    let enemy = self.side_mut(seat.opponent());
                    let troop = &mut enemy.active_zone[index];
                    troop.frozen_turns = FREEZE_DURATION;
                    troop.ready = false;
                    let name = troop.name.clone();
                    self.log(format!(
                        "{} freezes {name} for {FREEZE_DURATION} turns",
                        card.name
                    ));
                }
            }
            SpellEffect::Sacrifice => {
                if let Some(SpellTargetRef::FriendlyCard { index }) = target {
                    let side = self.side_mut(seat);
                    let name = side.active_zone[index].name.clone();
                    side.destroy_at(index);
                    for _ in 0..SACRIFICE_DRAW {
                        side.draw_card();
                    }
                    // A one-shot refund: current mana may exceed max_mana
                    // until the next refill.
                    side.mana += SACRIFICE_MANA;
                    self.log(format!(
                        "{seat} sacrifices {name}, draws {SACRIFICE_DRAW} and gains {SACRIFICE_MANA} mana"
                    ));
                }
            }
        }
    }
}
