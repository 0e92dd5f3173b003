//! Library exports for copypasta, shared between the binary and tests.

pub mod config;
pub mod identity;
pub mod metrics;
pub mod models;
pub mod page;
pub mod routes;
pub mod session;
pub mod startup;
pub mod state;
pub mod store;
pub mod utils;
