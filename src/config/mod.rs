// This module re-exports important pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod app_config;
pub mod config;
pub mod loader;
pub mod logging;

pub use app_config::*;
pub use config::*;
pub use loader::*;
pub use logging::*;
