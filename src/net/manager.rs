//! The session manager: connections, queues, rooms, and event push.
//!
//! One instance serves the whole process. Connections register an
//! unbounded sender for server events; everything the manager wants a
//! client to know is pushed through it, so a slow socket never stalls a
//! match. Per-room actions funnel through the room's engine lock; the
//! manager itself only holds its own short-lived locks around the queue,
//! the registry, and the connection table.

use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use rustc_hash::FxHashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::core::{GameRng, Seat};
use crate::engine::{DeclareOutcome, GameError, MatchEngine, Phase};

use super::matchmaker::{custom_setup, quick_setup, Matchmaker, QueueEntry};
use super::protocol::{ClientMessage, DeckSubmission, EndReason, QueueMode, ServerEvent};
use super::room::{PlayerSlot, Room, RoomRegistry};
use super::snapshot::{ChampionView, MatchSnapshot};

pub type ConnectionId = String;
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<ServerEvent>;

/// How long a defender gets to answer `request_blockers`.
pub const DEFAULT_BLOCKER_TIMEOUT: Duration = Duration::from_secs(30);
/// How long a dropped player may reconnect before forfeiting.
pub const DEFAULT_DISCONNECT_GRACE: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct SessionManager {
    connections: RwLock<FxHashMap<ConnectionId, EventSender>>,
    matchmaker: Mutex<Matchmaker>,
    rooms: RoomRegistry,
    rng: Mutex<GameRng>,
    blocker_timeout: Duration,
    disconnect_grace: Duration,
}

impl SessionManager {
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeouts(DEFAULT_BLOCKER_TIMEOUT, DEFAULT_DISCONNECT_GRACE)
    }

    #[must_use]
    pub fn with_timeouts(blocker_timeout: Duration, disconnect_grace: Duration) -> Self {
        Self {
            connections: RwLock::new(FxHashMap::default()),
            matchmaker: Mutex::new(Matchmaker::new()),
            rooms: RoomRegistry::new(),
            rng: Mutex::new(GameRng::from_entropy()),
            blocker_timeout,
            disconnect_grace,
        }
    }

    /// Seed the manager's RNG; tests use this to make quick decks and
    /// champion picks reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(GameRng::new(seed));
        self
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Register a connection and hand back the event stream for it.
    pub fn connect(&self, connection_id: &str) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections_mut().insert(connection_id.to_owned(), tx);
        debug!(connection_id, "connection registered");
        rx
    }

    /// Dispatch one client message.
    pub async fn handle_message(
        self: &Arc<Self>,
        connection_id: &str,
        message: ClientMessage,
    ) {
        match message {
            ClientMessage::RequestMatch { name, mode, deck } => {
                self.request_match(connection_id, &name, mode, deck.as_ref())
                    .await;
            }
            ClientMessage::CancelQueue => {
                if self.matchmaker_guard().remove(connection_id) {
                    self.send(connection_id, ServerEvent::QueueCancelled);
                }
            }
            ClientMessage::ChatMessage { room_id, message } => {
                self.relay_chat(connection_id, &room_id, message);
            }
            other => self.room_action(connection_id, other).await,
        }
    }

    /// Tear down a dropped connection. A queued player just leaves the
    /// queue; a seated player gets a grace window to reconnect before the
    /// match is forfeited.
    pub fn handle_disconnect(self: &Arc<Self>, connection_id: &str) {
        self.connections_mut().remove(connection_id);
        self.matchmaker_guard().remove(connection_id);

        let Some(room) = self.rooms.find_by_connection(connection_id) else {
            return;
        };
        let Some(seat) = room.seat_of(connection_id) else {
            return;
        };
        room.set_connected(seat, false);
        info!(room_id = %room.id(), %seat, "player disconnected, grace window open");

        let opponent = room.slot(seat.opponent());
        self.send(
            &opponent.connection_id,
            ServerEvent::OpponentDisconnected {
                grace_ms: self.disconnect_grace.as_millis() as u64,
            },
        );

        let manager = Arc::clone(self);
        let room_id = room.id().clone();
        tokio::spawn(async move {
            tokio::time::sleep(manager.disconnect_grace).await;
            manager.forfeit_if_still_gone(&room_id, seat).await;
        });
    }

    /// A returning player takes their old seat back mid-match.
    pub async fn reconnect(&self, connection_id: &str, room_id: &str) -> Result<Seat, GameError> {
        let room = self.rooms.get(room_id).ok_or(GameError::RoomNotFound)?;
        let seat = match (
            room.slot(Seat::A).connected,
            room.slot(Seat::B).connected,
        ) {
            (false, _) => Seat::A,
            (_, false) => Seat::B,
            _ => return Err(GameError::NotInRoom),
        };
        room.rebind(seat, connection_id);
        let engine = room.engine().lock().await;
        self.send(
            connection_id,
            ServerEvent::GameStateUpdate {
                snapshot: MatchSnapshot::for_seat(&engine, seat),
            },
        );
        Ok(seat)
    }

    // === Matchmaking ===

    async fn request_match(
        self: &Arc<Self>,
        connection_id: &str,
        name: &str,
        mode: QueueMode,
        deck: Option<&DeckSubmission>,
    ) {
        let setup = match mode {
            QueueMode::Quick => quick_setup(&mut self.rng_guard()),
            QueueMode::Custom => {
                let Some(submission) = deck else {
                    self.send(
                        connection_id,
                        ServerEvent::Error {
                            error: GameError::deck("custom queue requires a deck"),
                        },
                    );
                    return;
                };
                match custom_setup(submission, &mut self.rng_guard()) {
                    Ok(setup) => setup,
                    Err(error) => {
                        self.send(connection_id, ServerEvent::Error { error });
                        return;
                    }
                }
            }
        };

        let entry = QueueEntry {
            connection_id: connection_id.to_owned(),
            player_name: name.to_owned(),
            setup,
        };
        let paired = self.matchmaker_guard().enqueue(mode, entry);
        match paired {
            None => self.send(connection_id, ServerEvent::WaitingForOpponent { mode }),
            Some((host, guest)) => self.open_room(host, guest).await,
        }
    }

    async fn open_room(&self, host: QueueEntry, guest: QueueEntry) {
        let engine = {
            let mut rng = self.rng_guard();
            MatchEngine::new(host.setup, guest.setup, &mut rng)
        };
        let room = Room::new(
            engine,
            PlayerSlot {
                connection_id: host.connection_id,
                name: host.player_name,
                connected: true,
            },
            PlayerSlot {
                connection_id: guest.connection_id,
                name: guest.player_name,
                connected: true,
            },
        );
        self.rooms.insert(Arc::clone(&room));
        info!(room_id = %room.id(), "match started");

        let engine = room.engine().lock().await;
        for seat in [Seat::A, Seat::B] {
            let slot = room.slot(seat);
            let opponent = room.slot(seat.opponent());
            self.send(
                &slot.connection_id,
                ServerEvent::MatchFound {
                    room_id: room.id().clone(),
                    seat,
                    is_host: seat == Seat::A,
                    champion: ChampionView::of(engine.side(seat).champion),
                    opponent_champion: ChampionView::of(engine.side(seat.opponent()).champion),
                    opponent_name: opponent.name,
                },
            );
        }
        self.push_snapshots(&room, &engine);
    }

    // === In-room actions ===

    async fn room_action(self: &Arc<Self>, connection_id: &str, message: ClientMessage) {
        let Some(room_id) = message.room_id() else {
            return;
        };
        let Some(room) = self.rooms.get(room_id) else {
            self.send(
                connection_id,
                ServerEvent::Error {
                    error: GameError::RoomNotFound,
                },
            );
            return;
        };
        let Some(seat) = room.seat_of(connection_id) else {
            self.send(
                connection_id,
                ServerEvent::Error {
                    error: GameError::NotInRoom,
                },
            );
            return;
        };

        let is_surrender = matches!(message, ClientMessage::Surrender { .. });
        let mut engine = room.engine().lock().await;
        let result = match message {
            ClientMessage::PlayCard {
                hand_index, target, ..
            } => engine.play_card(seat, hand_index, target),
            ClientMessage::DeclareAttacks { attacks, .. } => {
                match engine.declare_attackers(seat, &attacks) {
                    Ok(DeclareOutcome::Resolved) => Ok(()),
                    Ok(DeclareOutcome::BlockersRequested { attackers }) => {
                        self.open_blocker_window(&room, seat.opponent(), attackers);
                        Ok(())
                    }
                    Err(error) => Err(error),
                }
            }
            ClientMessage::DeclareBlockers { blocks, .. } => {
                let map: FxHashMap<usize, usize> = blocks.into_iter().collect();
                engine.declare_blockers(seat, &map)
            }
            ClientMessage::ActivateAbility { index, .. } => {
                engine.activate_ability(seat, index)
            }
            ClientMessage::EndTurn { .. } => engine.end_turn(seat),
            ClientMessage::Surrender { .. } => {
                engine.surrender(seat);
                Ok(())
            }
            // Non-room messages never reach here.
            _ => Ok(()),
        };

        match result {
            Err(error) => self.send(connection_id, ServerEvent::Error { error }),
            Ok(()) => {
                self.push_snapshots(&room, &engine);
                let reason = if is_surrender {
                    EndReason::Surrender
                } else {
                    EndReason::LifeReachedZero
                };
                drop(engine);
                self.close_room_if_over(&room, reason).await;
            }
        }
    }

    /// Tell the defender to pick blockers and arm the timeout that answers
    /// for them if they never do.
    fn open_blocker_window(
        self: &Arc<Self>,
        room: &Arc<Room>,
        defender: Seat,
        attackers: Vec<usize>,
    ) {
        let generation = room.next_blocker_generation();
        let slot = room.slot(defender);
        self.send(
            &slot.connection_id,
            ServerEvent::RequestBlockers {
                attackers,
                deadline_ms: self.blocker_timeout.as_millis() as u64,
            },
        );

        let manager = Arc::clone(self);
        let room = Arc::clone(room);
        tokio::spawn(async move {
            tokio::time::sleep(manager.blocker_timeout).await;
            if room.blocker_generation() != generation {
                return;
            }
            let mut engine = room.engine().lock().await;
            if engine.phase() != Phase::AwaitingBlockers {
                return;
            }
            warn!(room_id = %room.id(), "blocker window expired, resolving unblocked");
            if engine.declare_blockers(defender, &FxHashMap::default()).is_ok() {
                manager.push_snapshots(&room, &engine);
                drop(engine);
                manager
                    .close_room_if_over(&room, EndReason::LifeReachedZero)
                    .await;
            }
        });
    }

    async fn forfeit_if_still_gone(self: &Arc<Self>, room_id: &str, seat: Seat) {
        let Some(room) = self.rooms.get(room_id) else {
            return;
        };
        if room.slot(seat).connected {
            return;
        }
        info!(room_id, %seat, "grace expired, forfeiting");
        {
            let mut engine = room.engine().lock().await;
            engine.surrender(seat);
            self.push_snapshots(&room, &engine);
        }
        self.close_room_if_over(&room, EndReason::OpponentLeft).await;
    }

    // === Event push ===

    /// Push each player their own projection of the state. A closed
    /// receiver is skipped; the disconnect path owns the cleanup.
    fn push_snapshots(&self, room: &Arc<Room>, engine: &MatchEngine) {
        for seat in [Seat::A, Seat::B] {
            let slot = room.slot(seat);
            if !slot.connected {
                continue;
            }
            self.send(
                &slot.connection_id,
                ServerEvent::GameStateUpdate {
                    snapshot: MatchSnapshot::for_seat(engine, seat),
                },
            );
        }
    }

    async fn close_room_if_over(&self, room: &Arc<Room>, reason: EndReason) {
        let winner = {
            let engine = room.engine().lock().await;
            if !engine.is_over() {
                return;
            }
            engine.winner()
        };
        info!(room_id = %room.id(), ?winner, ?reason, "match over, closing room");
        for seat in [Seat::A, Seat::B] {
            let slot = room.slot(seat);
            self.send(
                &slot.connection_id,
                ServerEvent::MatchEnded { winner, reason },
            );
        }
        self.rooms.remove(room.id());
    }

    fn relay_chat(&self, connection_id: &str, room_id: &str, message: String) {
        let Some(room) = self.rooms.get(room_id) else {
            self.send(
                connection_id,
                ServerEvent::Error {
                    error: GameError::RoomNotFound,
                },
            );
            return;
        };
        let Some(seat) = room.seat_of(connection_id) else {
            self.send(
                connection_id,
                ServerEvent::Error {
                    error: GameError::NotInRoom,
                },
            );
            return;
        };
        let sender = room.slot(seat).name;
        for target in [seat, seat.opponent()] {
            let slot = room.slot(target);
            self.send(
                &slot.connection_id,
                ServerEvent::ChatMessage {
                    sender: sender.clone(),
                    message: message.clone(),
                    is_me: target == seat,
                },
            );
        }
    }

    fn send(&self, connection_id: &str, event: ServerEvent) {
        let sent = self
            .connections_read()
            .get(connection_id)
            .map(|tx| tx.send(event).is_ok());
        if sent != Some(true) {
            debug!(connection_id, "event dropped, receiver gone");
        }
    }

    // === Lock plumbing ===

    fn connections_read(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, FxHashMap<ConnectionId, EventSender>> {
        match self.connections.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn connections_mut(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, FxHashMap<ConnectionId, EventSender>> {
        match self.connections.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn matchmaker_guard(&self) -> std::sync::MutexGuard<'_, Matchmaker> {
        match self.matchmaker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn rng_guard(&self) -> std::sync::MutexGuard<'_, GameRng> {
        match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
