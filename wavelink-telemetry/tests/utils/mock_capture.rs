use std::collections::VecDeque;
use std::sync::Mutex;
use wavelink_telemetry::{AudioFrame, MediaCapture};

/// Capture stub that hands out a scripted sequence of frames, then runs dry.
pub struct ScriptedCapture {
    frames: Mutex<VecDeque<AudioFrame>>,
    available: bool,
}

impl ScriptedCapture {
    pub fn new(frames: Vec<AudioFrame>) -> Self {
        Self {
            frames: Mutex::new(frames.into()),
            available: true,
        }
    }

    /// A device that is absent or was denied by the operator.
    pub fn unavailable() -> Self {
        Self {
            frames: Mutex::new(VecDeque::new()),
            available: false,
        }
    }
}

impl MediaCapture for ScriptedCapture {
    fn is_available(&self) -> bool {
        self.available
    }

    fn poll_frame(&self) -> Option<AudioFrame> {
        self.frames.lock().unwrap().pop_front()
    }
}

/// A frame with a full-range square wave and a single dominant bin at `k`.
pub fn tone_frame(k: usize, bin_count: usize, sample_rate: u32) -> AudioFrame {
    let time_domain: Vec<u8> = (0..bin_count)
        .map(|i| if i % 2 == 0 { 0 } else { 255 })
        .collect();
    let mut frequency_bins = vec![3u8; bin_count];
    frequency_bins[k] = 220;
    AudioFrame {
        time_domain,
        frequency_bins,
        sample_rate,
    }
}
