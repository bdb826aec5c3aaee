use std::sync::Arc;
use tokio::sync::mpsc;

use wavelink_telemetry::TelemetryExchange;

use crate::integration::{init_tracing, wait_for};
use crate::utils::{MockTransport, ScriptedCapture, tone_frame};

#[tokio::test]
async fn frames_are_dropped_while_the_data_path_is_closed() {
    init_tracing();

    let capture = Arc::new(ScriptedCapture::new(vec![
        tone_frame(10, 256, 48_000),
        tone_frame(10, 256, 48_000),
    ]));
    let transport = Arc::new(MockTransport::closed());
    let exchange = TelemetryExchange::new(capture, transport.clone());

    let (refresh_tx, refresh_rx) = mpsc::channel(8);
    let handle = exchange.start(refresh_rx).expect("capture available");

    refresh_tx.send(()).await.unwrap();
    // Extraction still happens locally even though nothing ships.
    assert!(wait_for(|| exchange.history_snapshot().len() == 1, 2_000).await);
    assert_eq!(transport.sent_count(), 0);

    // The path opening mid-session lets the next cycle through.
    transport.set_open(true);
    refresh_tx.send(()).await.unwrap();
    assert!(wait_for(|| transport.sent_count() == 1, 2_000).await);

    handle.stop().await;
}
