use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TelemetryError {
    /// Device denied or absent. The only failure surfaced to the operator,
    /// since it blocks the whole feature; transmission never starts.
    #[error("audio capture unavailable")]
    CaptureUnavailable,
}
