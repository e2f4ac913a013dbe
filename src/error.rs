//! Error types for field encryption.

use thiserror::Error;

/// Result type alias for field encryption operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while deriving keys, encrypting or decrypting.
#[derive(Error, Debug)]
pub enum Error {
    /// Empty secret or unsupported key derivation parameters.
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Input is not a recognized framed ciphertext, or is truncated.
    #[error("Invalid encrypted value: {0}")]
    Format(String),

    /// GCM tag did not verify.
    #[error("Authentication failed: ciphertext has been tampered with or is corrupt")]
    Authentication,

    /// CBC padding did not verify.
    ///
    /// Reported with the same message as any other decryption failure so the
    /// caller cannot act as a padding oracle.
    #[error("Decryption failed: wrong secret or corrupted data")]
    Padding,

    /// Underlying cipher refused to encrypt.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Unknown cipher mode name.
    #[error("Unknown cipher mode: {0} (expected 'cbc' or 'gcm')")]
    UnknownMode(String),

    /// I/O error while reading or writing values.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error::Format(format!("invalid base64: {}", e))
    }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Error::Format(format!("invalid hex: {}", e))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(_: std::string::FromUtf8Error) -> Self {
        Error::Format("decrypted value is not valid UTF-8".to_string())
    }
}
