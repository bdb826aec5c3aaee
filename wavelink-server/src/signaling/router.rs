use crate::connection::ConnectionLifecycle;
use crate::registry::SessionRegistry;
use crate::signaling::SignalingOutput;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use wavelink_core::{ClientMessage, ConnectionId, Participant, ServerMessage};

pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Stateless relay over an already-open control connection.
///
/// Decodes nothing itself: it receives already-parsed ClientMessages and
/// dispatches them by explicit match, mutating the registry and fanning
/// notifications out to other room members.
pub struct SignalingRouter {
    registry: Arc<SessionRegistry>,
    output: Arc<dyn SignalingOutput>,
}

impl SignalingRouter {
    pub fn new(registry: Arc<SessionRegistry>, output: Arc<dyn SignalingOutput>) -> Self {
        Self { registry, output }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn handle_message(&self, conn: &mut ConnectionLifecycle, msg: ClientMessage) {
        if conn.is_terminated() {
            debug!("Dropping message from terminated connection {}", conn.id());
            return;
        }

        match msg {
            ClientMessage::JoinRoom { room_id, username } => {
                self.handle_join(conn, room_id, username);
            }
            ClientMessage::Offer { to, offer } => {
                self.output.send_to(
                    &to,
                    &ServerMessage::Offer {
                        from: conn.id().clone(),
                        offer,
                    },
                );
            }
            ClientMessage::Answer { to, answer } => {
                self.output.send_to(
                    &to,
                    &ServerMessage::Answer {
                        from: conn.id().clone(),
                        answer,
                    },
                );
            }
            ClientMessage::IceCandidate { to, candidate } => {
                self.output.send_to(
                    &to,
                    &ServerMessage::IceCandidate {
                        from: conn.id().clone(),
                        candidate,
                    },
                );
            }
            ClientMessage::ChatMessage {
                room_id,
                username,
                message,
            } => {
                // The whole room hears chat, the sender included.
                let broadcast = ServerMessage::ChatMessage {
                    username,
                    message,
                    timestamp: now_ms(),
                };
                for member in self.registry.members(&room_id) {
                    self.output.send_to(&member, &broadcast);
                }
            }
            ClientMessage::ConnectionQuality { room_id, quality } => {
                match self.registry.update_quality(&room_id, conn.id(), quality) {
                    Ok(others) => {
                        let update = ServerMessage::UserQualityUpdate {
                            socket_id: conn.id().clone(),
                            quality,
                        };
                        for member in others {
                            self.output.send_to(&member, &update);
                        }
                    }
                    // Quality updates for an unjoined room are ignored.
                    Err(e) => debug!("Dropping quality update from {}: {}", conn.id(), e),
                }
            }
        }
    }

    /// Transport-level disconnect. Idempotent: the lifecycle hands out its
    /// room exactly once, so a replayed disconnect broadcasts nothing.
    pub fn handle_disconnect(&self, conn: &mut ConnectionLifecycle) {
        let Some(room_id) = conn.terminate() else {
            return;
        };
        self.leave_room(&room_id, conn.id());
    }

    fn handle_join(&self, conn: &mut ConnectionLifecycle, room_id: String, username: String) {
        // One room per connection: a re-join moves the connection, leaving
        // the previous room first.
        if let Some(previous) = conn.enter_room(&room_id) {
            self.leave_room(&previous, conn.id());
        }

        let participant = Participant {
            connection_id: conn.id().clone(),
            username: username.clone(),
            room_id,
            quality: Default::default(),
            joined_at_ms: now_ms(),
        };

        let joined = ServerMessage::UserJoined {
            socket_id: conn.id().clone(),
            username,
        };
        let reply_to = conn.id().clone();

        let result = self.registry.join(participant, |others| {
            // Enqueued under the room lock: the snapshot reflects membership
            // at the instant of join and cannot be overtaken by a later
            // joiner's user-joined.
            self.output.send_to(
                &reply_to,
                &ServerMessage::ExistingUsers {
                    users: others.to_vec(),
                },
            );
            for other in others {
                self.output.send_to(&other.socket_id, &joined);
            }
        });

        if let Err(e) = result {
            warn!("Join rejected for {}: {}", conn.id(), e);
        }
    }

    fn leave_room(&self, room_id: &str, id: &ConnectionId) {
        let Some(departure) = self.registry.leave(room_id, id) else {
            return;
        };

        let left = ServerMessage::UserLeft {
            socket_id: id.clone(),
            username: departure.participant.username,
        };
        for member in departure.remaining {
            self.output.send_to(&member, &left);
        }
    }
}
