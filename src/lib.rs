pub mod cli;
pub mod error;
pub mod forge;
pub mod orchestrator;
pub mod prompt;
pub mod registry;
pub mod result;

pub use error::RoundupError;
pub use result::Result;
