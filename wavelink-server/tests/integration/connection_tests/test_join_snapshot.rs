use wavelink_core::ServerMessage;

use crate::integration::{create_test_relay, init_tracing, join, new_connection};

#[test]
fn first_joiner_receives_an_empty_snapshot() {
    init_tracing();

    let relay = create_test_relay();
    let mut alice = new_connection();

    join(&relay, &mut alice, "R1", "alice");

    let messages = relay.output.messages_for(alice.id());
    assert_eq!(
        messages,
        vec![ServerMessage::ExistingUsers { users: vec![] }]
    );
}

#[test]
fn second_joiner_sees_the_first_but_never_itself() {
    init_tracing();

    let relay = create_test_relay();
    let mut alice = new_connection();
    let mut bob = new_connection();

    join(&relay, &mut alice, "R1", "alice");
    join(&relay, &mut bob, "R1", "bob");

    let bob_messages = relay.output.messages_for(bob.id());
    let ServerMessage::ExistingUsers { users } = &bob_messages[0] else {
        panic!("expected existing-users, got {:?}", bob_messages[0]);
    };
    assert_eq!(users.len(), 1);
    assert_eq!(&users[0].socket_id, alice.id());
    assert_eq!(users[0].username, "alice");

    // The earlier member hears about the newcomer.
    let alice_messages = relay.output.messages_for(alice.id());
    assert_eq!(
        alice_messages.last(),
        Some(&ServerMessage::UserJoined {
            socket_id: bob.id().clone(),
            username: "bob".to_owned(),
        })
    );
}

#[test]
fn snapshot_is_enqueued_before_the_user_joined_broadcast() {
    init_tracing();

    let relay = create_test_relay();
    let mut alice = new_connection();
    let mut bob = new_connection();

    join(&relay, &mut alice, "R1", "alice");
    join(&relay, &mut bob, "R1", "bob");

    // Global enqueue order: bob's snapshot strictly precedes the
    // user-joined broadcast announcing him.
    let all = relay.output.all();
    let snapshot_pos = all
        .iter()
        .position(|(target, msg)| {
            target == bob.id() && matches!(msg, ServerMessage::ExistingUsers { .. })
        })
        .expect("bob got a snapshot");
    let joined_pos = all
        .iter()
        .position(|(target, msg)| {
            target == alice.id() && matches!(msg, ServerMessage::UserJoined { .. })
        })
        .expect("alice was notified");
    assert!(snapshot_pos < joined_pos);
}
