//! Argon2id key derivation from a passphrase.

use crate::config::{argon2_params, CipherMode, KEY_SIZE, SALT_DOMAIN};
use crate::error::{Error, Result};
use argon2::{Algorithm, Argon2, Params, Version};
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::Zeroizing;

/// Passphrase an encryptor derives its key from.
///
/// Owned and not `Clone`; the backing buffer is wiped on drop and `Debug`
/// never prints it.
pub struct Secret(Zeroizing<String>);

impl Secret {
    /// Wrap a passphrase.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// Whether the passphrase is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<String> for Secret {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

impl From<&str> for Secret {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// 256-bit key material derived from a [`Secret`]. Wiped on drop.
pub struct DerivedKey(Zeroizing<[u8; KEY_SIZE]>);

impl DerivedKey {
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(***)")
    }
}

/// Key derivation using Argon2id.
#[derive(Debug, Clone)]
pub struct KeyDerivation {
    salt: [u8; argon2_params::SALT_LENGTH],
}

impl KeyDerivation {
    /// Create a KDF from an existing salt.
    pub fn from_salt(salt: [u8; argon2_params::SALT_LENGTH]) -> Self {
        Self { salt }
    }

    /// KDF with the fixed salt used by encryptors of `mode`.
    ///
    /// Framed ciphertexts carry no salt, so the salt must be reproducible from
    /// the mode alone. It differs per mode so CBC and GCM never share a key.
    pub fn for_mode(mode: CipherMode) -> Self {
        let digest = Sha256::new()
            .chain_update(SALT_DOMAIN)
            .chain_update(mode.as_str().as_bytes())
            .finalize();

        let mut salt = [0u8; argon2_params::SALT_LENGTH];
        salt.copy_from_slice(&digest[..argon2_params::SALT_LENGTH]);
        Self { salt }
    }

    /// Get the salt for storage.
    pub fn salt(&self) -> &[u8; argon2_params::SALT_LENGTH] {
        &self.salt
    }

    /// Derive a 256-bit key from a secret.
    pub fn derive_key(&self, secret: &Secret) -> Result<DerivedKey> {
        let bytes = self.derive_bytes(secret, KEY_SIZE)?;

        let mut key = Zeroizing::new([0u8; KEY_SIZE]);
        key.copy_from_slice(&bytes);
        Ok(DerivedKey(key))
    }

    /// Derive `len` bytes of key material.
    ///
    /// Only AES key sizes (16, 24 or 32 bytes) are accepted.
    pub fn derive_bytes(&self, secret: &Secret, len: usize) -> Result<Zeroizing<Vec<u8>>> {
        if secret.is_empty() {
            return Err(Error::KeyDerivation("secret must not be empty".to_string()));
        }
        if !matches!(len, 16 | 24 | 32) {
            return Err(Error::KeyDerivation(format!(
                "unsupported key length: {} bytes",
                len
            )));
        }

        let params = Params::new(
            argon2_params::MEMORY_COST,
            argon2_params::TIME_COST,
            argon2_params::PARALLELISM,
            Some(len),
        )
        .map_err(|e| Error::KeyDerivation(e.to_string()))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut out = Zeroizing::new(vec![0u8; len]);
        argon2
            .hash_password_into(secret.expose(), &self.salt, &mut out)
            .map_err(|e| Error::KeyDerivation(e.to_string()))?;

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation_deterministic() {
        let kdf = KeyDerivation::from_salt([1u8; 16]);

        let key1 = kdf.derive_key(&Secret::from("password123")).unwrap();
        let key2 = kdf.derive_key(&Secret::from("password123")).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_secrets_different_keys() {
        let kdf = KeyDerivation::from_salt([2u8; 16]);

        let key1 = kdf.derive_key(&Secret::from("password1")).unwrap();
        let key2 = kdf.derive_key(&Secret::from("password2")).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_modes_use_different_salts() {
        let cbc = KeyDerivation::for_mode(CipherMode::Cbc);
        let gcm = KeyDerivation::for_mode(CipherMode::Gcm);

        assert_ne!(cbc.salt(), gcm.salt());
        assert_eq!(cbc.salt(), KeyDerivation::for_mode(CipherMode::Cbc).salt());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let result = KeyDerivation::for_mode(CipherMode::Gcm).derive_key(&Secret::from(""));
        assert!(matches!(result, Err(Error::KeyDerivation(_))));
    }

    #[test]
    fn test_unsupported_length_rejected() {
        let kdf = KeyDerivation::for_mode(CipherMode::Cbc);
        let secret = Secret::from("password");

        assert!(matches!(
            kdf.derive_bytes(&secret, 20),
            Err(Error::KeyDerivation(_))
        ));
        assert_eq!(kdf.derive_bytes(&secret, 16).unwrap().len(), 16);
    }

    #[test]
    fn test_debug_redacts() {
        let secret = Secret::from("hunter2");
        assert_eq!(format!("{:?}", secret), "Secret(***)");
    }
}
