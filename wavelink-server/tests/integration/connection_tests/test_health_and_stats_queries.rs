use axum::extract::State;
use wavelink_core::{ClientMessage, ConnectionId};
use wavelink_server::{ConnectionLifecycle, RelayState, health_handler, stats_handler};

use crate::integration::init_tracing;

fn join(state: &RelayState, conn: &mut ConnectionLifecycle, room: &str, username: &str) {
    state.router.handle_message(
        conn,
        ClientMessage::JoinRoom {
            room_id: room.to_owned(),
            username: username.to_owned(),
        },
    );
}

#[tokio::test]
async fn health_reports_live_room_count() {
    init_tracing();

    let state = RelayState::new();
    let mut alice = ConnectionLifecycle::new(ConnectionId::new());
    join(&state, &mut alice, "R1", "alice");

    let health = health_handler(State(state.clone())).await.0;
    assert_eq!(health.status, "ok");
    assert_eq!(health.room_count, 1);
    assert!(health.timestamp > 0);

    state.router.handle_disconnect(&mut alice);
    let health = health_handler(State(state)).await.0;
    assert_eq!(health.room_count, 0);
}

#[tokio::test]
async fn stats_list_rooms_with_usernames() {
    init_tracing();

    let state = RelayState::new();
    let mut alice = ConnectionLifecycle::new(ConnectionId::new());
    let mut bob = ConnectionLifecycle::new(ConnectionId::new());
    join(&state, &mut alice, "R1", "alice");
    join(&state, &mut bob, "R1", "bob");

    let stats = stats_handler(State(state)).await.0;
    assert_eq!(stats.total_rooms, 1);
    assert_eq!(stats.rooms[0].room_id, "R1");
    assert_eq!(stats.rooms[0].user_count, 2);
    assert_eq!(stats.rooms[0].usernames, vec!["alice", "bob"]);
}
