//! Cryptographic primitives for field encryption.
//!
//! This module provides:
//! - Argon2id passphrase key derivation
//! - AES-256-CBC and AES-256-GCM ciphers
//! - The shared framed-ciphertext layout

mod cbc_cipher;
pub mod frame;
mod gcm_cipher;
mod kdf;

pub use cbc_cipher::CbcCipher;
pub use frame::{inspect, is_encrypted, FrameInfo};
pub use gcm_cipher::GcmCipher;
pub use kdf::{DerivedKey, KeyDerivation, Secret};
