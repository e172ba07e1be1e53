// This module re-exports important pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod exposure;
pub mod logging;
pub mod types;

pub use exposure::*;
pub use logging::*;
pub use types::*;
