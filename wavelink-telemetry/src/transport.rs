use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// Send attempted before the data path opened. The frame is dropped,
    /// never queued.
    #[error("data path not open")]
    NotReady,

    #[error("transport send failed: {0}")]
    Send(String),
}

/// The point-to-point data path between the two endpoints. Connection
/// establishment, encryption and NAT traversal all live behind this seam.
#[async_trait]
pub trait RealTimeTransport: Send + Sync {
    /// Whether the data path is currently open.
    fn is_open(&self) -> bool;

    /// Ship one frame to the remote endpoint, best-effort.
    async fn send(&self, data: Bytes) -> Result<(), TransportError>;
}
