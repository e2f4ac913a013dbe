//! Byte-oriented encryptor over either cipher mode.

use crate::config::CipherMode;
use crate::crypto::{frame, CbcCipher, GcmCipher, KeyDerivation, Secret};
use crate::error::Result;
use tracing::{debug, trace};
use zeroize::Zeroizing;

/// Encrypts and decrypts raw byte values into framed ciphertext.
///
/// Built once from a secret and then shared freely; every call is independent
/// and draws a fresh IV or nonce.
pub enum BytesEncryptor {
    /// AES-256-CBC, unauthenticated.
    Cbc(CbcCipher),
    /// AES-256-GCM, authenticated.
    Gcm(GcmCipher),
}

impl BytesEncryptor {
    /// Build an encryptor for `mode`, deriving its key from `secret`.
    pub fn new(mode: CipherMode, secret: impl Into<Secret>) -> Result<Self> {
        let secret = secret.into();
        let key = KeyDerivation::for_mode(mode).derive_key(&secret)?;
        debug!(%mode, "derived encryptor key");

        Ok(match mode {
            CipherMode::Cbc => BytesEncryptor::Cbc(CbcCipher::new(key)),
            CipherMode::Gcm => BytesEncryptor::Gcm(GcmCipher::new(key)),
        })
    }

    /// AES-256-CBC encryptor.
    pub fn cbc(secret: impl Into<Secret>) -> Result<Self> {
        Self::new(CipherMode::Cbc, secret)
    }

    /// AES-256-GCM encryptor.
    pub fn gcm(secret: impl Into<Secret>) -> Result<Self> {
        Self::new(CipherMode::Gcm, secret)
    }

    /// Mode this encryptor was built for.
    pub fn mode(&self) -> CipherMode {
        match self {
            BytesEncryptor::Cbc(_) => CipherMode::Cbc,
            BytesEncryptor::Gcm(_) => CipherMode::Gcm,
        }
    }

    /// Encrypt `plaintext` into a framed ciphertext.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        trace!(mode = %self.mode(), len = plaintext.len(), "encrypt");
        match self {
            BytesEncryptor::Cbc(cipher) => cipher.encrypt(plaintext),
            BytesEncryptor::Gcm(cipher) => cipher.encrypt(plaintext),
        }
    }

    /// Decrypt a framed ciphertext produced by an encryptor of the same mode and secret.
    pub fn decrypt(&self, framed: &[u8]) -> Result<Vec<u8>> {
        trace!(mode = %self.mode(), len = framed.len(), "decrypt");
        match self {
            BytesEncryptor::Cbc(cipher) => cipher.decrypt(framed),
            BytesEncryptor::Gcm(cipher) => cipher.decrypt(framed),
        }
    }

    /// Whether `value` carries the encryption prefix.
    pub fn is_encrypted(&self, value: &[u8]) -> bool {
        frame::is_encrypted(value)
    }

    /// Decrypt with `self` and encrypt the result with `target`.
    pub fn reencrypt(&self, framed: &[u8], target: &BytesEncryptor) -> Result<Vec<u8>> {
        let plaintext = Zeroizing::new(self.decrypt(framed)?);
        target.encrypt(&plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENCRYPTION_PREFIX;
    use crate::error::Error;

    #[test]
    fn test_mode_dispatch() {
        assert_eq!(BytesEncryptor::cbc("secret").unwrap().mode(), CipherMode::Cbc);
        assert_eq!(BytesEncryptor::gcm("secret").unwrap().mode(), CipherMode::Gcm);
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            BytesEncryptor::gcm(""),
            Err(Error::KeyDerivation(_))
        ));
        assert!(matches!(
            BytesEncryptor::cbc(String::new()),
            Err(Error::KeyDerivation(_))
        ));
    }

    #[test]
    fn test_reencrypt_cbc_to_gcm() {
        let cbc = BytesEncryptor::cbc("old secret").unwrap();
        let gcm = BytesEncryptor::gcm("new secret").unwrap();

        let legacy = cbc.encrypt(b"account number").unwrap();
        let migrated = cbc.reencrypt(&legacy, &gcm).unwrap();

        assert!(migrated.starts_with(&ENCRYPTION_PREFIX));
        assert_eq!(gcm.decrypt(&migrated).unwrap(), b"account number");
    }

    #[test]
    fn test_encryptor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BytesEncryptor>();
    }
}
