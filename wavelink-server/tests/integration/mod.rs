
use std::sync::Arc;
use tracing::Level;

use wavelink_core::{ClientMessage, ConnectionId};
use wavelink_server::{ConnectionLifecycle, SessionRegistry, SignalingRouter};

use crate::utils::MockSignalingOutput;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub struct TestRelay {
    pub registry: Arc<SessionRegistry>,
    pub output: MockSignalingOutput,
    pub router: SignalingRouter,
}

pub fn create_test_relay() -> TestRelay {
    let registry = Arc::new(SessionRegistry::new());
    let output = MockSignalingOutput::new();
    let router = SignalingRouter::new(registry.clone(), Arc::new(output.clone()));

    TestRelay {
        registry,
        output,
        router,
    }
}

pub fn new_connection() -> ConnectionLifecycle {
    ConnectionLifecycle::new(ConnectionId::new())
}

pub fn join(relay: &TestRelay, conn: &mut ConnectionLifecycle, room: &str, username: &str) {
    relay.router.handle_message(
        conn,
        ClientMessage::JoinRoom {
            room_id: room.to_owned(),
            username: username.to_owned(),
        },
    );
}
