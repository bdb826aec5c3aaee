use crate::capture::AudioFrame;
use wavelink_core::{SignalSample, SpectrumPoint};

/// Tuning constants for the per-cycle analysis.
///
/// The dB rescaling (`db_offset`, `db_scale`) and the noise-floor fraction
/// are empirical display-mapping constants, not physical units; they are
/// kept as named configuration rather than derived values.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Added to the RMS before taking the log, so silence stays finite.
    pub rms_epsilon: f32,
    /// dB offset of the [0, 100] display mapping.
    pub db_offset: f32,
    /// dB scale of the [0, 100] display mapping.
    pub db_scale: f32,
    /// Share of the lowest-magnitude bins averaged into the noise floor.
    pub noise_floor_fraction: f32,
    /// Length of the down-sampled spectrum shipped to the peer.
    pub spectrum_points: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            rms_epsilon: 1e-4,
            db_offset: 60.0,
            db_scale: 1.67,
            noise_floor_fraction: 0.1,
            spectrum_points: 50,
        }
    }
}

/// Turns one raw capture frame into a structured metric sample.
#[derive(Debug, Default)]
pub struct TelemetryExtractor {
    config: ExtractorConfig,
}

impl TelemetryExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// One extraction cycle. Empty buffers produce nothing (not an error):
    /// the capture collaborator simply had no fresh samples.
    pub fn extract(&self, frame: &AudioFrame, timestamp_ms: u64) -> Option<SignalSample> {
        if frame.time_domain.is_empty() || frame.frequency_bins.is_empty() {
            return None;
        }

        let bins = &frame.frequency_bins;
        let nyquist = frame.sample_rate as f32 / 2.0;

        let signal_strength = self.signal_strength(&frame.time_domain);

        let (peak_index, peak) = bins
            .iter()
            .copied()
            .enumerate()
            .fold((0usize, 0u8), |best, (i, v)| if v > best.1 { (i, v) } else { best });
        let dominant_frequency_hz = bin_frequency(peak_index, bins.len(), nyquist);

        let noise_floor = self.noise_floor(bins);
        let snr_db = if peak > 0 {
            20.0 * (peak as f32 / (noise_floor + 1.0)).log10()
        } else {
            0.0
        };

        Some(SignalSample {
            timestamp_ms,
            dominant_frequency_hz,
            signal_strength,
            noise_floor,
            snr_db,
            spectrum_slice: self.spectrum_slice(bins, nyquist),
        })
    }

    /// RMS of the normalized samples mapped onto the [0, 100] display range.
    fn signal_strength(&self, time_domain: &[u8]) -> f32 {
        let sum_of_squares: f32 = time_domain
            .iter()
            .map(|&s| {
                let normalized = (s as f32 - 128.0) / 128.0;
                normalized * normalized
            })
            .sum();
        let rms = (sum_of_squares / time_domain.len() as f32).sqrt();
        let db = 20.0 * (rms + self.config.rms_epsilon).log10();
        ((db + self.config.db_offset) * self.config.db_scale).clamp(0.0, 100.0)
    }

    /// Mean of the lowest-magnitude tail of the sorted bins. Heuristic:
    /// background noise is assumed to occupy that tail.
    fn noise_floor(&self, bins: &[u8]) -> f32 {
        let mut sorted = bins.to_vec();
        sorted.sort_unstable();
        let take = ((bins.len() as f32 * self.config.noise_floor_fraction) as usize).max(1);
        let sum: u32 = sorted[..take].iter().map(|&b| u32::from(b)).sum();
        sum as f32 / take as f32
    }

    /// Uniform stride down to `spectrum_points` points. The stride is
    /// clamped so buffers shorter than the slice still yield valid indices.
    fn spectrum_slice(&self, bins: &[u8], nyquist: f32) -> Vec<SpectrumPoint> {
        let step = (bins.len() / self.config.spectrum_points).max(1);
        (0..self.config.spectrum_points)
            .map(|i| {
                let index = (i * step).min(bins.len() - 1);
                SpectrumPoint {
                    frequency: bin_frequency(index, bins.len(), nyquist),
                    amplitude: bins[index],
                }
            })
            .collect()
    }
}

fn bin_frequency(index: usize, bin_count: usize, nyquist: f32) -> u32 {
    ((index as f32 * nyquist) / bin_count as f32).round() as u32
}
