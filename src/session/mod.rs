//! Shared authentication state and the operations that change it.

mod endpoints;
mod navigator;
mod profile;
#[allow(clippy::module_inception)]
mod session;
mod store;

pub use endpoints::AuthEndpoints;
pub use navigator::{Navigator, WindowLocation};
pub use profile::{HttpProfileSource, ProfileSource};
pub use session::{Session, SessionStatus};
pub use store::{RefreshOutcome, SessionStore};
