//! # kagi
//!
//! Core conversion trait used by the kagi private key toolkit.
//!
//! Loading a private key is a chain of small, typed conversions:
//!
//! ```text
//! text → Pem → DER bytes → PKCS#1 / SEC1 / PKCS#8 structure → PrivateKeyRecord
//! ```
//!
//! Each format structure is produced from its DER payload through the
//! [`decoder::Decoder`] trait, so the destination type alone selects the
//! decoder:
//!
//! ```ignore
//! use kagi::decoder::Decoder;
//! use kagi_pkcs::pkcs1::RSAPrivateKey;
//!
//! let key: RSAPrivateKey = der_bytes.decode()?;
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
