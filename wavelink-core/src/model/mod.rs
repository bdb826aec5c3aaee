mod connection;
mod participant;
mod signaling;
mod telemetry;

pub use connection::ConnectionId;
pub use participant::{ConnectionQuality, Participant, ParticipantSummary};
pub use signaling::{ClientMessage, ServerMessage};
pub use telemetry::{HistoryEntry, RemoteState, SignalSample, SpectrumPoint, TelemetryMessage};
