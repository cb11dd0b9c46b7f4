//! Built-in cipher suites.

pub mod p256;

#[cfg(feature = "secp256k1")]
pub mod secp256k1;
