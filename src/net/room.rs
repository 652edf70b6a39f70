//! Rooms and the room registry.
//!
//! A room is one running match plus its two participants. The engine sits
//! behind an async mutex, making the room a single-writer object: every
//! action in a match is serialized through that lock while different rooms
//! run in parallel. The registry is the only index from room ids (and
//! connection ids) to rooms.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

use crate::core::Seat;
use crate::engine::MatchEngine;

pub type RoomId = String;

/// One seat's occupant.
#[derive(Clone, Debug)]
pub struct PlayerSlot {
    pub connection_id: String,
    pub name: String,
    pub connected: bool,
}

/// A match in progress.
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    engine: AsyncMutex<MatchEngine>,
    players: Mutex<[PlayerSlot; 2]>,
    /// Bumped every time a combat suspends; a blocker-timeout task only
    /// fires if the generation it captured is still current.
    blocker_generation: AtomicU64,
}

impl Room {
    #[must_use]
    pub fn new(engine: MatchEngine, host: PlayerSlot, guest: PlayerSlot) -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4().to_string(),
            engine: AsyncMutex::new(engine),
            players: Mutex::new([host, guest]),
            blocker_generation: AtomicU64::new(0),
        })
    }

    #[must_use]
    pub fn id(&self) -> &RoomId {
        &self.id
    }

    #[must_use]
    pub fn engine(&self) -> &AsyncMutex<MatchEngine> {
        &self.engine
    }

    /// Which seat a connection occupies, if any.
    #[must_use]
    pub fn seat_of(&self, connection_id: &str) -> Option<Seat> {
        let players = self.players_guard();
        if players[0].connection_id == connection_id {
            Some(Seat::A)
        } else if players[1].connection_id == connection_id {
            Some(Seat::B)
        } else {
            None
        }
    }

    #[must_use]
    pub fn slot(&self, seat: Seat) -> PlayerSlot {
        let players = self.players_guard();
        match seat {
            Seat::A => players[0].clone(),
            Seat::B => players[1].clone(),
        }
    }

    pub fn set_connected(&self, seat: Seat, connected: bool) {
        let mut players = self.players_guard();
        let slot = match seat {
            Seat::A => &mut players[0],
            Seat::B => &mut players[1],
        };
        slot.connected = connected;
    }

    /// Rebind a seat to a new connection (reconnect support).
    pub fn rebind(&self, seat: Seat, connection_id: impl Into<String>) {
        let mut players = self.players_guard();
        let slot = match seat {
            Seat::A => &mut players[0],
            Seat::B => &mut players[1],
        };
        slot.connection_id = connection_id.into();
        slot.connected = true;
    }

    /// Start a new blocker window, invalidating any outstanding timeout.
    pub fn next_blocker_generation(&self) -> u64 {
        self.blocker_generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    #[must_use]
    pub fn blocker_generation(&self) -> u64 {
        self.blocker_generation.load(Ordering::Acquire)
    }

    fn players_guard(&self) -> std::sync::MutexGuard<'_, [PlayerSlot; 2]> {
        match self.players.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// All live rooms, indexed by id.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: RwLock<FxHashMap<RoomId, Arc<Room>>>,
}

impl RoomRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, room: Arc<Room>) {
        self.write_guard().insert(room.id().clone(), room);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<Room>> {
        self.read_guard().get(id).cloned()
    }

    /// The room a connection is seated in, if any.
    #[must_use]
    pub fn find_by_connection(&self, connection_id: &str) -> Option<Arc<Room>> {
        self.read_guard()
            .values()
            .find(|room| room.seat_of(connection_id).is_some())
            .cloned()
    }

    pub fn remove(&self, id: &str) -> Option<Arc<Room>> {
        self.write_guard().remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_guard(&self) -> std::sync::RwLockReadGuard<'_, FxHashMap<RoomId, Arc<Room>>> {
        match self.rooms.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_guard(&self) -> std::sync::RwLockWriteGuard<'_, FxHashMap<RoomId, Arc<Room>>> {
        match self.rooms.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
