//! Multiplayer plumbing: matchmaking, rooms, state sync, and the server.
//!
//! Nothing in here knows a game rule. The engine decides; this layer
//! routes decisions to it and projections of its state back out.

pub mod manager;
pub mod matchmaker;
pub mod protocol;
pub mod room;
pub mod server;
pub mod snapshot;

pub use manager::{ConnectionId, EventReceiver, EventSender, SessionManager};
pub use matchmaker::{custom_setup, quick_setup, Matchmaker, QueueEntry, MIN_DECK_SIZE};
pub use protocol::{ClientMessage, DeckSubmission, EndReason, QueueMode, ServerEvent};
pub use room::{PlayerSlot, Room, RoomId, RoomRegistry};
pub use server::{routes, run, ServerConfig};
pub use snapshot::{ChampionView, MatchSnapshot, OpponentView, OwnView};
