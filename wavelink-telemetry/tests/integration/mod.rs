
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

use wavelink_telemetry::{AudioFrame, TelemetryExchange};

use crate::utils::{MockTransport, ScriptedCapture};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_exchange(
    frames: Vec<AudioFrame>,
) -> (TelemetryExchange, Arc<MockTransport>) {
    let capture = Arc::new(ScriptedCapture::new(frames));
    let transport = Arc::new(MockTransport::new());
    let exchange = TelemetryExchange::new(capture, transport.clone());
    (exchange, transport)
}

/// Poll until `cond` holds or the timeout elapses.
pub async fn wait_for<F>(cond: F, timeout_ms: u64) -> bool
where
    F: Fn() -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
    while tokio::time::Instant::now() < deadline {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    cond()
}
