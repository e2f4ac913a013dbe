//! Framed ciphertext layout: `PREFIX || header || cipher output`.

use crate::config::ENCRYPTION_PREFIX;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Whether `value` starts with the encryption prefix.
pub fn is_encrypted(value: &[u8]) -> bool {
    value.starts_with(&ENCRYPTION_PREFIX)
}

/// Build a frame from a mode header and cipher output.
pub fn seal(header: &[u8], body: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(ENCRYPTION_PREFIX.len() + header.len() + body.len());
    framed.extend_from_slice(&ENCRYPTION_PREFIX);
    framed.extend_from_slice(header);
    framed.extend_from_slice(body);
    framed
}

/// Strip the prefix and split off a `header_len` header.
///
/// Returns `(header, body)`. Fails if the prefix is missing or the frame is
/// too short to hold the header.
pub fn open(framed: &[u8], header_len: usize) -> Result<(&[u8], &[u8])> {
    let rest = framed
        .strip_prefix(&ENCRYPTION_PREFIX[..])
        .ok_or_else(|| Error::Format("unrecognized header".to_string()))?;

    if rest.len() < header_len {
        return Err(Error::Format(format!(
            "truncated header: need {} bytes, have {}",
            header_len,
            rest.len()
        )));
    }

    Ok(rest.split_at(header_len))
}

/// Summary of a possibly-encrypted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInfo {
    /// Value carries the encryption prefix.
    pub encrypted: bool,
    /// Total length in bytes.
    pub total_len: usize,
    /// Bytes after the prefix (header and cipher output).
    pub payload_len: usize,
}

/// Inspect a value without decrypting it.
pub fn inspect(value: &[u8]) -> FrameInfo {
    let encrypted = is_encrypted(value);
    let payload_len = if encrypted {
        value.len() - ENCRYPTION_PREFIX.len()
    } else {
        0
    };

    FrameInfo {
        encrypted,
        total_len: value.len(),
        payload_len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_then_open() {
        let framed = seal(&[1, 2, 3], &[9, 9]);
        assert!(framed.starts_with(&ENCRYPTION_PREFIX));

        let (header, body) = open(&framed, 3).unwrap();
        assert_eq!(header, &[1, 2, 3]);
        assert_eq!(body, &[9, 9]);
    }

    #[test]
    fn test_open_missing_prefix() {
        let result = open(b"plain value", 3);
        assert!(matches!(result, Err(Error::Format(_))));
    }

    #[test]
    fn test_open_truncated_header() {
        let framed = seal(&[1, 2], &[]);
        assert!(matches!(open(&framed, 16), Err(Error::Format(_))));
    }

    #[test]
    fn test_open_prefix_only_partial() {
        assert!(matches!(
            open(&ENCRYPTION_PREFIX[..2], 0),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_inspect() {
        let info = inspect(&seal(&[0; 12], &[0; 20]));
        assert!(info.encrypted);
        assert_eq!(info.total_len, 36);
        assert_eq!(info.payload_len, 32);

        let info = inspect(b"hello");
        assert!(!info.encrypted);
        assert_eq!(info.payload_len, 0);
    }
}
