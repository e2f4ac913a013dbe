//! AES-256-GCM authenticated encryption.

use crate::config::{NONCE_SIZE, TAG_SIZE};
use crate::crypto::frame;
use crate::crypto::kdf::DerivedKey;
use crate::error::{Error, Result};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::warn;

/// AES-256-GCM cipher producing framed output.
pub struct GcmCipher {
    cipher: Aes256Gcm,
}

impl GcmCipher {
    /// Create a new cipher from a derived key, consuming it.
    pub fn new(key: DerivedKey) -> Self {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
        Self { cipher }
    }

    /// Encrypt data with a random nonce.
    ///
    /// Returns: PREFIX || nonce (12 bytes) || ciphertext || tag (16 bytes)
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| Error::Encryption(e.to_string()))?;

        Ok(frame::seal(&nonce_bytes, &ciphertext))
    }

    /// Decrypt data that was encrypted with `encrypt`.
    ///
    /// The tag is verified before any plaintext is returned.
    pub fn decrypt(&self, framed: &[u8]) -> Result<Vec<u8>> {
        let (nonce_bytes, ciphertext) = frame::open(framed, NONCE_SIZE)?;
        if ciphertext.len() < TAG_SIZE {
            return Err(Error::Format(format!(
                "truncated ciphertext: need at least {} bytes, have {}",
                TAG_SIZE,
                ciphertext.len()
            )));
        }

        let nonce = Nonce::from_slice(nonce_bytes);
        self.cipher.decrypt(nonce, ciphertext).map_err(|_| {
            warn!("GCM tag verification failed");
            Error::Authentication
        })
    }
}
