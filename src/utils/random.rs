use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes behind each anti-forgery state token.
pub const STATE_TOKEN_BYTES: usize = 64;

/// Returns `length` bytes from the OS RNG, base64 encoded with padding.
pub fn random_string(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    OsRng.fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

/// A fresh anti-forgery state token.
pub fn state_token() -> String {
    random_string(STATE_TOKEN_BYTES)
}
