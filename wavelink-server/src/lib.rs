mod connection;
mod error;
mod registry;
mod signaling;

pub use connection::*;
pub use error::*;
pub use registry::*;
pub use signaling::*;
