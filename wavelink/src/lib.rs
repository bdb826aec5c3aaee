pub use wavelink_core::model::ConnectionId;

pub mod model {
    pub use wavelink_core::model::*;
}

#[cfg(feature = "relay")]
pub mod relay {
    pub use wavelink_server::*;
}

#[cfg(feature = "telemetry")]
pub mod telemetry {
    pub use wavelink_telemetry::*;
}
