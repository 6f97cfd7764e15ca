//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Cryptographic utilities (secure random tokens, SHA-256, encodings)
//! - Password hashing (Argon2id with build-time fixed cost)

pub mod crypto;
pub mod password;
