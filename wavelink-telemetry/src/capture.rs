/// One refresh cycle's worth of raw analyser output: byte-scale
/// time-domain samples (midpoint 128) and frequency-bin magnitudes.
#[derive(Debug, Clone)]
pub struct AudioFrame {
    pub time_domain: Vec<u8>,
    pub frequency_bins: Vec<u8>,
    pub sample_rate: u32,
}

/// Raw audio capture. Device handling and permission prompts belong to the
/// collaborator behind this trait; the telemetry loop only polls it for
/// fresh frames.
pub trait MediaCapture: Send + Sync {
    /// False when the device is absent or permission was denied.
    fn is_available(&self) -> bool;

    /// The frame captured since the previous poll, if any. None is not an
    /// error: the cycle simply produces nothing.
    fn poll_frame(&self) -> Option<AudioFrame>;
}
