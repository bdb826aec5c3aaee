use thiserror::Error;
use wavelink_core::ConnectionId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The connection id is already a member of the room.
    #[error("participant {participant} already present in room {room}")]
    DuplicateParticipant {
        room: String,
        participant: ConnectionId,
    },

    /// The room does not exist, or the sender is not a member of it.
    /// Always swallowed by the router: real-time updates for an unjoined
    /// room are dropped, never bounced back to the sender.
    #[error("room {0} not found")]
    RoomNotFound(String),
}
