//! # arena-ccg
//!
//! An authoritative server and engine for a two-player collectible card
//! game: troops and spells, champion passives, a blocker step, and a
//! matchmade room per match.
//!
//! ## Design Principles
//!
//! 1. **Server-Authoritative**: Clients send intents with bare indices;
//!    every rule is enforced in [`engine::MatchEngine`]. Nothing a client
//!    says is trusted past deserialization.
//!
//! 2. **Atomic Actions**: An action either applies fully or leaves the
//!    match untouched. Validation always runs before the first mutation.
//!
//! 3. **Perspective-Filtered Sync**: Each player receives their own
//!    projection of the state after every accepted action; hidden zones
//!    leave the server only as counts.
//!
//! ## Modules
//!
//! - `cards`: Card model, decks, and the troop/spell catalog
//! - `champions`: The champion table and passive kinds
//! - `core`: Seats, sides, the seeded RNG, and the action log
//! - `engine`: Turn structure, card play, combat, spells, win detection
//! - `policy`: Pluggable decision making and an in-process match driver
//! - `net`: Matchmaking, rooms, snapshots, and the WebSocket server

pub mod cards;
pub mod champions;
pub mod core;
pub mod engine;
pub mod net;
pub mod policy;

pub use crate::cards::{
    build_random_deck, build_themed_deck, Ability, Card, CardKind, Deck, DeckTheme, SpellEffect,
    SpellSpec, SpellTargetKind, SpellTargetRef,
};

pub use crate::champions::{champion_by_name, random_champion, Champion, PassiveKind, CHAMPIONS};

pub use crate::core::{ActionLog, GameRng, Seat, Side, DEFAULT_LIFE, MANA_CAP};

pub use crate::engine::{
    AttackTarget, DeclareOutcome, GameError, MatchEngine, PendingCombat, Phase, SideSetup,
};

pub use crate::policy::{DecisionPolicy, GreedyPolicy, LocalMatch, PassPolicy};

pub use crate::net::{ClientMessage, MatchSnapshot, ServerEvent, SessionManager};
