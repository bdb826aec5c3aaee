use wavelink_core::ConnectionId;

/// Where a connection currently stands: freshly connected, inside exactly
/// one room, or terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    InRoom { room_id: String },
    Terminated,
}

/// Per-connection state machine: Connected -> InRoom -> Terminated.
///
/// Termination yields its cleanup data exactly once; re-processing a
/// disconnect for an already-terminated connection is a no-op.
#[derive(Debug)]
pub struct ConnectionLifecycle {
    id: ConnectionId,
    state: ConnectionState,
}

impl ConnectionLifecycle {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            state: ConnectionState::Connected,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn current_room(&self) -> Option<&str> {
        match &self.state {
            ConnectionState::InRoom { room_id } => Some(room_id),
            _ => None,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.state == ConnectionState::Terminated
    }

    /// Move into a room. A connection belongs to at most one room at a
    /// time, so the previous room (if any) is returned and the caller must
    /// complete the leave there. No-op once terminated.
    pub fn enter_room(&mut self, room_id: &str) -> Option<String> {
        if self.is_terminated() {
            return None;
        }
        match std::mem::replace(
            &mut self.state,
            ConnectionState::InRoom {
                room_id: room_id.to_owned(),
            },
        ) {
            ConnectionState::InRoom { room_id } => Some(room_id),
            _ => None,
        }
    }

    /// Enter the terminal state. Returns the room needing registry cleanup
    /// the first time only; later calls (and terminating a connection that
    /// never joined) return None.
    pub fn terminate(&mut self) -> Option<String> {
        match std::mem::replace(&mut self.state, ConnectionState::Terminated) {
            ConnectionState::InRoom { room_id } => Some(room_id),
            _ => None,
        }
    }
}
