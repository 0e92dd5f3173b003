pub mod message;
pub mod token;

pub use message::{CopyRequest, Message};
pub use token::{ClaimSet, Token, ValidationResponse};
