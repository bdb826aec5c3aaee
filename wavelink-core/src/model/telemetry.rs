use serde::{Deserialize, Serialize};

/// One point of the down-sampled magnitude spectrum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SpectrumPoint {
    /// Bin centre frequency, rounded to the nearest Hz.
    pub frequency: u32,
    /// Raw bin magnitude (byte scale, 0-255).
    pub amplitude: u8,
}

/// Metrics extracted from one capture cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSample {
    pub timestamp_ms: u64,
    pub dominant_frequency_hz: u32,
    /// Bounded [0, 100] display value. The mapping from dB is an empirical
    /// affine rescale, not a physical unit.
    pub signal_strength: f32,
    pub noise_floor: f32,
    pub snr_db: f32,
    pub spectrum_slice: Vec<SpectrumPoint>,
}

/// Compact strength/SNR trace kept for the local dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryEntry {
    pub timestamp_ms: u64,
    pub signal_strength: f32,
    pub snr_db: f32,
}

/// Mirror of the peer's last telemetry message. Overwritten wholesale on
/// every receipt; readers never observe a partial update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoteState {
    pub is_transmitting: bool,
    pub frequency: u32,
    pub signal_strength: f32,
    pub spectrum_slice: Vec<SpectrumPoint>,
}

/// Data-path wire message exchanged between the two endpoints.
///
/// Best-effort, last-message-wins: no acknowledgement, retry or sequence
/// numbering, since stale telemetry is superseded by the next cycle.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TelemetryMessage {
    #[serde(rename_all = "camelCase")]
    Signal {
        is_transmitting: bool,
        frequency: u32,
        signal_strength: f32,
        spectrum_slice: Vec<SpectrumPoint>,
    },
}

impl TelemetryMessage {
    /// The single final message sent when transmission stops.
    pub fn stopped() -> Self {
        Self::Signal {
            is_transmitting: false,
            frequency: 0,
            signal_strength: 0.0,
            spectrum_slice: Vec::new(),
        }
    }
}

impl From<&TelemetryMessage> for RemoteState {
    fn from(msg: &TelemetryMessage) -> Self {
        let TelemetryMessage::Signal {
            is_transmitting,
            frequency,
            signal_strength,
            spectrum_slice,
        } = msg;
        Self {
            is_transmitting: *is_transmitting,
            frequency: *frequency,
            signal_strength: *signal_strength,
            spectrum_slice: spectrum_slice.clone(),
        }
    }
}
