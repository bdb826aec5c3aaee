use crate::capture::MediaCapture;
use crate::error::TelemetryError;
use crate::extractor::{ExtractorConfig, TelemetryExtractor};
use crate::history::HistoryBuffer;
use crate::transport::RealTimeTransport;
use bytes::Bytes;
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use wavelink_core::{HistoryEntry, RemoteState, SignalSample, TelemetryMessage};

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

struct ExchangeShared {
    capture: Arc<dyn MediaCapture>,
    transport: Arc<dyn RealTimeTransport>,
    extractor: TelemetryExtractor,
    // Single-writer: only the telemetry loop pushes; everyone else reads.
    history: RwLock<HistoryBuffer>,
    local: watch::Sender<Option<SignalSample>>,
    remote: watch::Sender<RemoteState>,
}

/// Serializes locally extracted samples onto the peer data path and mirrors
/// the peer's samples into [`RemoteState`].
///
/// No acknowledgement, retry or sequence numbering on either direction:
/// last message wins, since stale telemetry is superseded by the next cycle.
#[derive(Clone)]
pub struct TelemetryExchange {
    shared: Arc<ExchangeShared>,
}

impl TelemetryExchange {
    pub fn new(capture: Arc<dyn MediaCapture>, transport: Arc<dyn RealTimeTransport>) -> Self {
        Self::with_config(capture, transport, ExtractorConfig::default())
    }

    pub fn with_config(
        capture: Arc<dyn MediaCapture>,
        transport: Arc<dyn RealTimeTransport>,
        config: ExtractorConfig,
    ) -> Self {
        let (local, _) = watch::channel(None);
        let (remote, _) = watch::channel(RemoteState::default());
        Self {
            shared: Arc::new(ExchangeShared {
                capture,
                transport,
                extractor: TelemetryExtractor::new(config),
                history: RwLock::new(HistoryBuffer::new()),
                local,
                remote,
            }),
        }
    }

    /// Begin transmitting: one extraction cycle per pulse on `refresh_rx`.
    ///
    /// Fails up-front with [`TelemetryError::CaptureUnavailable`] when the
    /// device is absent or denied; that is the one failure surfaced to the
    /// operator.
    pub fn start(
        &self,
        refresh_rx: mpsc::Receiver<()>,
    ) -> Result<TelemetryHandle, TelemetryError> {
        if !self.shared.capture.is_available() {
            return Err(TelemetryError::CaptureUnavailable);
        }

        let (stop_tx, stop_rx) = mpsc::channel(1);
        let task = tokio::spawn(run_loop(self.shared.clone(), refresh_rx, stop_rx));
        Ok(TelemetryHandle { stop_tx, task })
    }

    /// Apply one frame received from the peer. The remote mirror is
    /// overwritten wholesale; readers never observe a partial update.
    /// Malformed frames are dropped.
    pub fn handle_incoming(&self, data: &[u8]) {
        match serde_json::from_slice::<TelemetryMessage>(data) {
            Ok(msg) => {
                self.shared.remote.send_replace(RemoteState::from(&msg));
            }
            Err(e) => warn!("Dropping malformed telemetry frame: {}", e),
        }
    }

    /// Read-only view of the peer's last reported state.
    pub fn remote_state(&self) -> watch::Receiver<RemoteState> {
        self.shared.remote.subscribe()
    }

    /// Read-only view of the most recent locally extracted sample.
    /// None while not transmitting.
    pub fn local_sample(&self) -> watch::Receiver<Option<SignalSample>> {
        self.shared.local.subscribe()
    }

    pub fn history_snapshot(&self) -> Vec<HistoryEntry> {
        self.shared
            .history
            .read()
            .map(|history| history.snapshot())
            .unwrap_or_default()
    }
}

/// Control handle for a running telemetry loop. Dropping it stops the loop
/// through the same path as [`TelemetryHandle::stop`].
#[derive(Debug)]
pub struct TelemetryHandle {
    stop_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl TelemetryHandle {
    /// Stop transmitting and wait for the final not-transmitting frame to
    /// go out. An in-flight cycle may still complete, but no further cycle
    /// is scheduled once the stop signal is observed.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(()).await;
        let _ = self.task.await;
    }
}

async fn run_loop(
    shared: Arc<ExchangeShared>,
    mut refresh_rx: mpsc::Receiver<()>,
    mut stop_rx: mpsc::Receiver<()>,
) {
    info!("Telemetry loop started");

    loop {
        tokio::select! {
            biased;

            _ = stop_rx.recv() => break,

            refresh = refresh_rx.recv() => match refresh {
                Some(()) => run_cycle(&shared).await,
                // Capture side dropped its refresh handle: same shutdown
                // path as an explicit stop.
                None => break,
            },
        }
    }

    // Exactly one final frame announcing the stop, metrics zeroed.
    send_frame(&shared, &TelemetryMessage::stopped()).await;
    shared.local.send_replace(None);

    info!("Telemetry loop stopped");
}

async fn run_cycle(shared: &ExchangeShared) {
    // No fresh samples this cycle: produce nothing, not an error.
    let Some(frame) = shared.capture.poll_frame() else {
        return;
    };
    let Some(sample) = shared.extractor.extract(&frame, now_ms()) else {
        return;
    };

    if let Ok(mut history) = shared.history.write() {
        history.push(HistoryEntry {
            timestamp_ms: sample.timestamp_ms,
            signal_strength: sample.signal_strength,
            snr_db: sample.snr_db,
        });
    }

    let msg = TelemetryMessage::Signal {
        is_transmitting: true,
        frequency: sample.dominant_frequency_hz,
        signal_strength: sample.signal_strength,
        spectrum_slice: sample.spectrum_slice.clone(),
    };
    shared.local.send_replace(Some(sample));

    send_frame(shared, &msg).await;
}

async fn send_frame(shared: &ExchangeShared, msg: &TelemetryMessage) {
    if !shared.transport.is_open() {
        debug!("Data path not open, dropping telemetry frame");
        return;
    }

    match serde_json::to_vec(msg) {
        Ok(encoded) => {
            if let Err(e) = shared.transport.send(Bytes::from(encoded)).await {
                debug!("Telemetry send dropped: {}", e);
            }
        }
        Err(e) => warn!("Failed to serialize telemetry frame: {}", e),
    }
}
