//! Perspective-filtered match snapshots.
//!
//! The engine holds one authoritative state; each player receives a
//! projection of it. Your own hand arrives card by card, the opponent's
//! hand only as a count, and both deck contents stay hidden. Clients
//! render entirely from the latest snapshot, so a dropped push is healed
//! by the next one.

use serde::Serialize;

use crate::cards::Card;
use crate::champions::Champion;
use crate::core::{Seat, Side};
use crate::engine::{MatchEngine, Phase};

/// The champion as shown to either player (both are public).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChampionView {
    pub name: String,
    pub title: String,
    pub passive_name: String,
    pub passive_description: String,
}

impl ChampionView {
    #[must_use]
    pub fn of(champion: Option<&'static Champion>) -> Option<Self> {
        champion.map(|c| Self {
            name: c.name.to_owned(),
            title: c.title.to_owned(),
            passive_name: c.passive_name.to_owned(),
            passive_description: c.passive_description.to_owned(),
        })
    }
}

/// The receiving player's own side: full hand, full board.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OwnView {
    pub life: i32,
    pub max_life: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub hand: Vec<Card>,
    pub active_zone: Vec<Card>,
    pub deck_count: usize,
    pub graveyard_count: usize,
    pub champion: Option<ChampionView>,
}

/// The opposing side with hidden zones reduced to counts.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OpponentView {
    pub life: i32,
    pub max_life: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub hand_count: usize,
    pub active_zone: Vec<Card>,
    pub deck_count: usize,
    pub graveyard_count: usize,
    pub champion: Option<ChampionView>,
}

/// One player's complete picture of the match.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub seat: Seat,
    pub you: OwnView,
    pub opponent: OpponentView,
    pub your_turn: bool,
    pub phase: Phase,
    /// Most recent action log entries, oldest first.
    pub log: Vec<String>,
}

fn own_view(side: &Side) -> OwnView {
    OwnView {
        life: side.life,
        max_life: side.max_life,
        mana: side.mana,
        max_mana: side.max_mana,
        hand: side.hand.clone(),
        active_zone: side.active_zone.clone(),
        deck_count: side.deck.len(),
        graveyard_count: side.graveyard.len(),
        champion: ChampionView::of(side.champion),
    }
}

fn opponent_view(side: &Side) -> OpponentView {
    OpponentView {
        life: side.life,
        max_life: side.max_life,
        mana: side.mana,
        max_mana: side.max_mana,
        hand_count: side.hand.len(),
        active_zone: side.active_zone.clone(),
        deck_count: side.deck.len(),
        graveyard_count: side.graveyard.len(),
        champion: ChampionView::of(side.champion),
    }
}

impl MatchSnapshot {
    /// Project the match as `seat` is allowed to see it.
    #[must_use]
    pub fn for_seat(engine: &MatchEngine, seat: Seat) -> Self {
        Self {
            seat,
            you: own_view(engine.side(seat)),
            opponent: opponent_view(engine.side(seat.opponent())),
            your_turn: engine.turn_owner() == seat,
            phase: engine.phase(),
            log: engine.action_log().iter().map(str::to_owned).collect(),
        }
    }
}
