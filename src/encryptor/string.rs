//! Text encryptor: UTF-8 in, base64 framed ciphertext out.

use crate::config::CipherMode;
use crate::crypto::{frame, Secret};
use crate::encryptor::BytesEncryptor;
use crate::error::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encrypts text values into printable base64 strings.
pub struct StringEncryptor {
    inner: BytesEncryptor,
}

impl StringEncryptor {
    /// Build an encryptor for `mode`, deriving its key from `secret`.
    pub fn new(mode: CipherMode, secret: impl Into<Secret>) -> Result<Self> {
        Ok(Self::from_bytes_encryptor(BytesEncryptor::new(mode, secret)?))
    }

    /// AES-256-CBC text encryptor.
    pub fn cbc(secret: impl Into<Secret>) -> Result<Self> {
        Self::new(CipherMode::Cbc, secret)
    }

    /// AES-256-GCM text encryptor.
    pub fn gcm(secret: impl Into<Secret>) -> Result<Self> {
        Self::new(CipherMode::Gcm, secret)
    }

    /// Wrap an existing bytes encryptor.
    pub fn from_bytes_encryptor(inner: BytesEncryptor) -> Self {
        Self { inner }
    }

    /// The wrapped bytes encryptor.
    pub fn bytes_encryptor(&self) -> &BytesEncryptor {
        &self.inner
    }

    /// Mode of the wrapped bytes encryptor.
    pub fn mode(&self) -> CipherMode {
        self.inner.mode()
    }

    /// Encrypt `text`, returning base64 of the framed ciphertext.
    pub fn encrypt(&self, text: &str) -> Result<String> {
        let framed = self.inner.encrypt(text.as_bytes())?;
        Ok(STANDARD.encode(framed))
    }

    /// Decrypt a value produced by [`StringEncryptor::encrypt`].
    pub fn decrypt(&self, encoded: &str) -> Result<String> {
        let framed = STANDARD.decode(encoded.trim())?;
        let plaintext = self.inner.decrypt(&framed)?;
        Ok(String::from_utf8(plaintext)?)
    }

    /// Whether `encoded` is base64 of a prefixed value.
    pub fn is_encrypted(&self, encoded: &str) -> bool {
        STANDARD
            .decode(encoded.trim())
            .map(|framed| frame::is_encrypted(&framed))
            .unwrap_or(false)
    }

    /// Decrypt with `self` and encrypt the result with `target`.
    pub fn reencrypt(&self, encoded: &str, target: &StringEncryptor) -> Result<String> {
        let framed = STANDARD.decode(encoded.trim())?;
        let migrated = self.inner.reencrypt(&framed, &target.inner)?;
        Ok(STANDARD.encode(migrated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_roundtrip_unicode() {
        let encryptor = StringEncryptor::gcm("secret").unwrap();
        let text = "Grüße, 世界 🌍";

        let encrypted = encryptor.encrypt(text).unwrap();
        assert_ne!(encrypted, text);
        assert_eq!(encryptor.decrypt(&encrypted).unwrap(), text);
    }

    #[test]
    fn test_invalid_base64_is_format_error() {
        let encryptor = StringEncryptor::cbc("secret").unwrap();
        assert!(matches!(
            encryptor.decrypt("not base64 at all!"),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_base64_without_prefix_is_format_error() {
        let encryptor = StringEncryptor::gcm("secret").unwrap();
        let encoded = STANDARD.encode(b"plain bytes, never encrypted");

        assert!(matches!(encryptor.decrypt(&encoded), Err(Error::Format(_))));
    }

    #[test]
    fn test_is_encrypted() {
        let encryptor = StringEncryptor::gcm("secret").unwrap();
        let encrypted = encryptor.encrypt("value").unwrap();

        assert!(encryptor.is_encrypted(&encrypted));
        assert!(!encryptor.is_encrypted("value"));
        assert!(!encryptor.is_encrypted(&STANDARD.encode("value")));
    }

    #[test]
    fn test_non_utf8_plaintext_is_format_error() {
        let encryptor = StringEncryptor::gcm("secret").unwrap();
        let framed = encryptor
            .bytes_encryptor()
            .encrypt(&[0xff, 0xfe, 0xfd])
            .unwrap();

        assert!(matches!(
            encryptor.decrypt(&STANDARD.encode(framed)),
            Err(Error::Format(_))
        ));
    }
}
