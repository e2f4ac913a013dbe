//! Encryptor facades for byte and text values.

mod bytes;
mod string;

pub use bytes::BytesEncryptor;
pub use string::StringEncryptor;
