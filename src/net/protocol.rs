//! Wire protocol: what clients send and what the server pushes back.
//!
//! Everything crosses the socket as a single JSON object with a `type`
//! tag. Room-scoped actions always carry the room id; the server checks
//! the sender actually occupies a seat there before anything reaches the
//! engine, and every index is re-validated against the authoritative
//! state.

use serde::{Deserialize, Serialize};

use crate::cards::SpellTargetRef;
use crate::core::Seat;
use crate::engine::{AttackTarget, GameError};

use super::snapshot::{ChampionView, MatchSnapshot};

/// Queue the client wants to join.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueMode {
    /// Server-built random deck and champion.
    Quick,
    /// Client-supplied deck list and champion.
    Custom,
}

/// A custom deck as the client submits it: card names resolved against the
/// catalog, champion resolved by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSubmission {
    pub cards: Vec<String>,
    pub champion: String,
}

/// Client-to-server messages.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Enter a matchmaking queue. `deck` is required for `Custom`.
    RequestMatch {
        name: String,
        mode: QueueMode,
        deck: Option<DeckSubmission>,
    },
    /// Leave the queue before a match is found.
    CancelQueue,
    PlayCard {
        room_id: String,
        hand_index: usize,
        target: Option<SpellTargetRef>,
    },
    DeclareAttacks {
        room_id: String,
        attacks: Vec<(usize, AttackTarget)>,
    },
    /// Answer to `request_blockers`: pairs of (attacker index, blocker
    /// index). Unmapped attackers go unblocked.
    DeclareBlockers {
        room_id: String,
        blocks: Vec<(usize, usize)>,
    },
    ActivateAbility {
        room_id: String,
        index: usize,
    },
    EndTurn {
        room_id: String,
    },
    Surrender {
        room_id: String,
    },
    ChatMessage {
        room_id: String,
        message: String,
    },
}

impl ClientMessage {
    /// The room a message is addressed to, for room-scoped actions.
    #[must_use]
    pub fn room_id(&self) -> Option<&str> {
        match self {
            Self::RequestMatch { .. } | Self::CancelQueue => None,
            Self::PlayCard { room_id, .. }
            | Self::DeclareAttacks { room_id, .. }
            | Self::DeclareBlockers { room_id, .. }
            | Self::ActivateAbility { room_id, .. }
            | Self::EndTurn { room_id }
            | Self::Surrender { room_id }
            | Self::ChatMessage { room_id, .. } => Some(room_id),
        }
    }
}

/// Why a match ended, beyond who won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    LifeReachedZero,
    Surrender,
    OpponentLeft,
}

/// Server-to-client messages.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// No opponent yet; the entry sits in the queue.
    WaitingForOpponent { mode: QueueMode },
    /// Queue entry abandoned.
    QueueCancelled,
    /// A match was made. `seat` is the receiver's own seat; champions are
    /// public, deck contents are not.
    MatchFound {
        room_id: String,
        seat: Seat,
        is_host: bool,
        champion: Option<ChampionView>,
        opponent_champion: Option<ChampionView>,
        opponent_name: String,
    },
    /// Full perspective-filtered state. Sent after every accepted action
    /// and on turn changes; clients render from this alone.
    GameStateUpdate { snapshot: MatchSnapshot },
    /// The receiver must pick blockers within the deadline or the attack
    /// resolves unblocked.
    RequestBlockers {
        attackers: Vec<usize>,
        deadline_ms: u64,
    },
    /// An action was rejected; state is unchanged.
    Error { error: GameError },
    ChatMessage {
        sender: String,
        message: String,
        is_me: bool,
    },
    /// The opponent's connection dropped; the match holds for a grace
    /// period before being forfeited.
    OpponentDisconnected { grace_ms: u64 },
    MatchEnded {
        winner: Option<Seat>,
        reason: EndReason,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_round_trips_from_json() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"type":"play_card","room_id":"r1","hand_index":2,"target":{"kind":"enemy_card","index":1}}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            ClientMessage::PlayCard {
                room_id: "r1".to_owned(),
                hand_index: 2,
                target: Some(SpellTargetRef::EnemyCard { index: 1 }),
            }
        );
        assert_eq!(msg.room_id(), Some("r1"));
    }

    #[test]
    fn test_attack_declaration_parses_side_and_card_targets() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"type":"declare_attacks","room_id":"r1","attacks":[[0,{"kind":"side"}],[1,{"kind":"card","index":3}]]}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            ClientMessage::DeclareAttacks {
                room_id: "r1".to_owned(),
                attacks: vec![
                    (0, AttackTarget::Side),
                    (1, AttackTarget::Card { index: 3 }),
                ],
            }
        );
    }

    #[test]
    fn test_queue_messages_carry_no_room() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"cancel_queue"}"#).unwrap();
        assert_eq!(msg, ClientMessage::CancelQueue);
        assert_eq!(msg.room_id(), None);
    }

    #[test]
    fn test_server_event_tags_with_type() {
        let json = serde_json::to_string(&ServerEvent::WaitingForOpponent {
            mode: QueueMode::Quick,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"waiting_for_opponent","mode":"quick"}"#);
    }

    #[test]
    fn test_error_event_carries_the_code() {
        let json = serde_json::to_string(&ServerEvent::Error {
            error: GameError::InsufficientMana,
        })
        .unwrap();
        assert!(json.contains(r#""code":"insufficient_mana""#));
    }
}
