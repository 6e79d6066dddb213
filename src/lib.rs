//! Library exports for testapi-ui, shared between the binary and tests.

pub mod authorization;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod session;
pub mod startup;
pub mod state;
pub mod utils;
