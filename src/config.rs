//! Configuration constants and types for field encryption.

use crate::crypto::Secret;
use crate::encryptor::{BytesEncryptor, StringEncryptor};
use crate::error::{Error, Result};
use argon2::Params;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Magic prefix carried by every encrypted value: "$ENC" in bytes.
pub const ENCRYPTION_PREFIX: [u8; 4] = [0x24, 0x45, 0x4E, 0x43];

/// AES block size, also the CBC IV length.
pub const BLOCK_SIZE: usize = 16;

/// CBC initialization vector size (128 bits).
pub const IV_SIZE: usize = 16;

/// GCM nonce size (96 bits).
pub const NONCE_SIZE: usize = 12;

/// GCM authentication tag size (128 bits).
pub const TAG_SIZE: usize = 16;

/// AES-256 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// Domain label mixed into the per-mode key derivation salt.
pub const SALT_DOMAIN: &[u8] = b"field-crypt/v1/salt";

/// Environment variable the CLI reads the secret from.
pub const SECRET_ENV: &str = "FIELD_CRYPT_SECRET";

/// Environment variable the CLI reads the replacement secret from when rekeying.
pub const NEW_SECRET_ENV: &str = "FIELD_CRYPT_NEW_SECRET";

/// Argon2id parameters for key derivation.
pub mod argon2_params {
    /// Memory cost in KiB (19 MiB).
    pub const MEMORY_COST: u32 = 19 * 1024;

    /// Time cost (iterations).
    pub const TIME_COST: u32 = 2;

    /// Parallelism factor.
    pub const PARALLELISM: u32 = 1;

    /// Salt length in bytes.
    pub const SALT_LENGTH: usize = 16;
}

/// Cipher mode an encryptor is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherMode {
    /// AES-256-CBC with PKCS#7 padding. Unauthenticated; kept for existing data.
    Cbc,
    /// AES-256-GCM. Authenticated; the default for new data.
    #[default]
    Gcm,
}

impl CipherMode {
    /// Lowercase name, also used as the salt label.
    pub fn as_str(&self) -> &'static str {
        match self {
            CipherMode::Cbc => "cbc",
            CipherMode::Gcm => "gcm",
        }
    }
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CipherMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cbc" => Ok(CipherMode::Cbc),
            "gcm" => Ok(CipherMode::Gcm),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

/// Encryptor construction settings, loadable from an application config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptorConfig {
    /// Cipher mode for new encryptors.
    #[serde(default)]
    pub mode: CipherMode,
}

impl EncryptorConfig {
    /// Create a configuration for the given mode.
    pub fn new(mode: CipherMode) -> Self {
        Self { mode }
    }

    /// Validate the configuration.
    ///
    /// Checks that the key derivation parameters the encryptors will use are
    /// accepted by Argon2 and produce an AES-256 key.
    pub fn validate(&self) -> Result<()> {
        Params::new(
            argon2_params::MEMORY_COST,
            argon2_params::TIME_COST,
            argon2_params::PARALLELISM,
            Some(KEY_SIZE),
        )
        .map_err(|e| Error::KeyDerivation(format!("invalid {} parameters: {}", self.mode, e)))?;

        if argon2_params::SALT_LENGTH < argon2::MIN_SALT_LEN {
            return Err(Error::KeyDerivation(format!(
                "salt length must be at least {} bytes",
                argon2::MIN_SALT_LEN
            )));
        }
        Ok(())
    }

    /// Build a bytes encryptor for this configuration.
    pub fn build_bytes(&self, secret: Secret) -> Result<BytesEncryptor> {
        self.validate()?;
        BytesEncryptor::new(self.mode, secret)
    }

    /// Build a string encryptor for this configuration.
    pub fn build_string(&self, secret: Secret) -> Result<StringEncryptor> {
        self.validate()?;
        StringEncryptor::new(self.mode, secret)
    }
}
