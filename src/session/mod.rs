//! Per-browser transient state carried in a signed cookie.

pub mod cookie_store;
pub mod session;

pub use cookie_store::SessionStore;
pub use session::Session;
