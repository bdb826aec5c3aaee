use wavelink_core::{ConnectionId, ServerMessage};

/// Implemented by the transport layer so the router can push control
/// messages to connected clients.
///
/// Delivery is best-effort fire-and-forget: a disconnected or slow
/// recipient simply misses the message. Implementations must be
/// non-blocking enqueues, because the router calls this while holding a
/// room's registry lock to keep presence snapshots ordered.
pub trait SignalingOutput: Send + Sync {
    fn send_to(&self, target: &ConnectionId, msg: &ServerMessage);
}
