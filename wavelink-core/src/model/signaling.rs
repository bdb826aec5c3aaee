use crate::model::connection::ConnectionId;
use crate::model::participant::{ConnectionQuality, ParticipantSummary};
use serde::{Deserialize, Serialize};

/// Control-plane messages a client sends to the relay.
///
/// Session-negotiation payloads (offer/answer/candidate) are opaque JSON:
/// the relay forwards them untouched and never inspects their shape.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String, username: String },
    Offer {
        to: ConnectionId,
        offer: serde_json::Value,
    },
    Answer {
        to: ConnectionId,
        answer: serde_json::Value,
    },
    IceCandidate {
        to: ConnectionId,
        candidate: serde_json::Value,
    },
    #[serde(rename_all = "camelCase")]
    ChatMessage {
        room_id: String,
        username: String,
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    ConnectionQuality {
        room_id: String,
        quality: ConnectionQuality,
    },
}

/// Control-plane messages the relay sends to a client.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Sent once right after accept: tells the client its assigned id.
    #[serde(rename_all = "camelCase")]
    Welcome { socket_id: ConnectionId },
    /// Reply to join-room: room membership at the instant of join,
    /// never including the joiner itself.
    ExistingUsers { users: Vec<ParticipantSummary> },
    #[serde(rename_all = "camelCase")]
    UserJoined {
        socket_id: ConnectionId,
        username: String,
    },
    Offer {
        from: ConnectionId,
        offer: serde_json::Value,
    },
    Answer {
        from: ConnectionId,
        answer: serde_json::Value,
    },
    IceCandidate {
        from: ConnectionId,
        candidate: serde_json::Value,
    },
    ChatMessage {
        username: String,
        message: String,
        timestamp: u64,
    },
    #[serde(rename_all = "camelCase")]
    UserQualityUpdate {
        socket_id: ConnectionId,
        quality: ConnectionQuality,
    },
    #[serde(rename_all = "camelCase")]
    UserLeft {
        socket_id: ConnectionId,
        username: String,
    },
}
