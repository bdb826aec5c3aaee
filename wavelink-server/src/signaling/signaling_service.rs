use crate::signaling::SignalingOutput;
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};
use wavelink_core::{ConnectionId, ServerMessage};

struct ServiceInner {
    peers: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

/// Holds the outbound half of every live WebSocket connection and turns
/// ServerMessages into JSON frames on the right socket queue.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<ServiceInner>,
}

impl SignalingService {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                peers: DashMap::new(),
            }),
        }
    }

    pub fn add_peer(&self, id: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(id, tx);
    }

    pub fn remove_peer(&self, id: &ConnectionId) {
        self.inner.peers.remove(id);
    }

    pub fn is_connected(&self, id: &ConnectionId) -> bool {
        self.inner.peers.contains_key(id)
    }
}

impl Default for SignalingService {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalingOutput for SignalingService {
    fn send_to(&self, target: &ConnectionId, msg: &ServerMessage) {
        let Some(peer) = self.inner.peers.get(target) else {
            // Stale negotiation data is meaningless after the fact:
            // no queueing, no retry, no error back to the sender.
            debug!("Dropping message for disconnected target {}", target);
            return;
        };

        match serde_json::to_string(msg) {
            Ok(json) => {
                if peer.send(Message::Text(json.into())).is_err() {
                    debug!("Socket queue for {} already closed", target);
                }
            }
            Err(e) => error!("Failed to serialize server message: {}", e),
        }
    }
}
