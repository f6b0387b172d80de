//! PKCS#8: Private-Key Information Syntax Specification
//!
//! This module implements [RFC 5958](https://datatracker.ietf.org/doc/html/rfc5958) (Asymmetric Key Packages)
//! which obsoletes RFC 5208 (PKCS#8 v1.2), and the PBES2 scheme of
//! [RFC 8018](https://datatracker.ietf.org/doc/html/rfc8018) used by
//! `ENCRYPTED PRIVATE KEY` blocks.
//!
//! Provides a generic format for storing private keys with algorithm identification.

mod encrypted;
mod pbes2;
mod types;

pub use encrypted::EncryptedPrivateKeyInfo;
pub use pbes2::{Cipher, Pbes2Parameters, Pbkdf2Parameters, Prf};
pub use types::{PrivateKeyInfo, Version};
