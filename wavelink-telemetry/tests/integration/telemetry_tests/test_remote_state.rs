use wavelink_core::{SpectrumPoint, TelemetryMessage};

use crate::integration::{create_exchange, init_tracing};

#[tokio::test]
async fn peer_message_overwrites_the_remote_mirror_wholesale() {
    init_tracing();

    let (exchange, _transport) = create_exchange(vec![]);
    let remote = exchange.remote_state();
    assert!(!remote.borrow().is_transmitting);

    let first = TelemetryMessage::Signal {
        is_transmitting: true,
        frequency: 440,
        signal_strength: 73.5,
        spectrum_slice: vec![SpectrumPoint {
            frequency: 440,
            amplitude: 200,
        }],
    };
    exchange.handle_incoming(&serde_json::to_vec(&first).unwrap());

    {
        let state = remote.borrow();
        assert!(state.is_transmitting);
        assert_eq!(state.frequency, 440);
        assert_eq!(state.signal_strength, 73.5);
        assert_eq!(state.spectrum_slice.len(), 1);
    }

    // Last message wins: the peer stopping zeroes the mirror in one step.
    exchange.handle_incoming(&serde_json::to_vec(&TelemetryMessage::stopped()).unwrap());

    let state = remote.borrow();
    assert!(!state.is_transmitting);
    assert_eq!(state.frequency, 0);
    assert!(state.spectrum_slice.is_empty());
}

#[tokio::test]
async fn malformed_peer_frames_are_dropped() {
    init_tracing();

    let (exchange, _transport) = create_exchange(vec![]);

    let valid = TelemetryMessage::Signal {
        is_transmitting: true,
        frequency: 880,
        signal_strength: 12.0,
        spectrum_slice: vec![],
    };
    exchange.handle_incoming(&serde_json::to_vec(&valid).unwrap());

    exchange.handle_incoming(b"not json at all");
    exchange.handle_incoming(br#"{"kind":"unknown"}"#);

    let remote = exchange.remote_state();
    let state = remote.borrow();
    assert_eq!(state.frequency, 880);
    assert!(state.is_transmitting);
}
