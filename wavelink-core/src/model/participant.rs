use crate::model::connection::ConnectionId;
use serde::{Deserialize, Serialize};

/// Coarse link-quality tag a client reports about its own media path.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionQuality {
    #[default]
    Good,
    Fair,
    Poor,
}

/// One active connection inside a room. Owned by the session registry:
/// created on join, quality mutated on quality-update, dropped on leave.
#[derive(Debug, Clone)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub username: String,
    pub room_id: String,
    pub quality: ConnectionQuality,
    pub joined_at_ms: u64,
}

impl Participant {
    pub fn summary(&self) -> ParticipantSummary {
        ParticipantSummary {
            socket_id: self.connection_id.clone(),
            username: self.username.clone(),
        }
    }
}

/// What presence snapshots and broadcasts carry about a participant.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSummary {
    pub socket_id: ConnectionId,
    pub username: String,
}
