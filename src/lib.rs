//! Field-level encryption
//!
//! Symmetric encryption of individual values (database columns, config
//! entries) at rest, keyed from a single passphrase.
//!
//! # Features
//!
//! - **Two cipher modes**: AES-256-GCM (authenticated, default) and AES-256-CBC
//!   (kept for reading existing data)
//! - **Argon2id key derivation**: the passphrase is stretched once per encryptor
//! - **Self-describing output**: every ciphertext starts with the same magic
//!   prefix, so callers can tell encrypted values apart without knowing the mode
//! - **Bytes and text**: [`BytesEncryptor`] works on raw bytes, [`StringEncryptor`]
//!   wraps it with UTF-8 and base64
//!
//! # Layout
//!
//! ```text
//! CBC:  PREFIX || IV (16) || ciphertext (PKCS#7 padded)
//! GCM:  PREFIX || nonce (12) || ciphertext || tag (16)
//! ```
//!
//! # Example
//!
//! ```rust
//! use field_crypt::StringEncryptor;
//!
//! let encryptor = StringEncryptor::gcm("MySuperSecretKey").unwrap();
//!
//! let encrypted = encryptor.encrypt("Hello World!!!").unwrap();
//! assert_ne!(encrypted, "Hello World!!!");
//! assert_eq!(encryptor.decrypt(&encrypted).unwrap(), "Hello World!!!");
//! ```

pub mod config;
pub mod crypto;
pub mod encryptor;
pub mod error;

pub use config::{CipherMode, EncryptorConfig, ENCRYPTION_PREFIX};
pub use crypto::{is_encrypted, Secret};
pub use encryptor::{BytesEncryptor, StringEncryptor};
pub use error::{Error, Result};
