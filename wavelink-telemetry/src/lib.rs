mod capture;
mod error;
mod exchange;
mod extractor;
mod history;
mod transport;

pub use capture::*;
pub use error::*;
pub use exchange::*;
pub use extractor::*;
pub use history::*;
pub use transport::*;
