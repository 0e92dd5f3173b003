//! Everything that talks to, or interprets data from, the federated identity provider.

pub mod client;
pub mod id_token;

pub use client::IdentityClient;
pub use id_token::decode_id_token;
