//! AES-256-CBC with PKCS#7 padding.
//!
//! This mode has no integrity protection. It exists so values written by
//! older deployments stay readable; new data should use GCM.

use crate::config::{BLOCK_SIZE, IV_SIZE};
use crate::crypto::frame;
use crate::crypto::kdf::DerivedKey;
use crate::error::{Error, Result};
use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES-256-CBC cipher producing framed output.
pub struct CbcCipher {
    key: DerivedKey,
}

impl CbcCipher {
    /// Create a new cipher that owns `key`.
    pub fn new(key: DerivedKey) -> Self {
        Self { key }
    }

    /// Encrypt data with a random IV.
    ///
    /// Returns: PREFIX || IV (16 bytes) || padded ciphertext
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut iv = [0u8; IV_SIZE];
        OsRng.fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new(self.key.as_bytes().into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        Ok(frame::seal(&iv, &ciphertext))
    }

    /// Decrypt data that was encrypted with `encrypt`.
    pub fn decrypt(&self, framed: &[u8]) -> Result<Vec<u8>> {
        let (iv, ciphertext) = frame::open(framed, IV_SIZE)?;
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(Error::Format(format!(
                "ciphertext length {} is not a positive multiple of {}",
                ciphertext.len(),
                BLOCK_SIZE
            )));
        }

        let mut iv_block = [0u8; IV_SIZE];
        iv_block.copy_from_slice(iv);

        Aes256CbcDec::new(self.key.as_bytes().into(), &iv_block.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| Error::Padding)
    }
}
