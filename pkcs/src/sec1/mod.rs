//! SEC1 - Elliptic Curve Private Key Structure
//!
//! This module implements the ECPrivateKey structure as defined in
//! [RFC 5915](https://datatracker.ietf.org/doc/html/rfc5915) (Elliptic Curve Private Key Format).
//!
//! The same structure appears standalone under the `EC PRIVATE KEY` label
//! and nested inside PKCS#8 for `id-ecPublicKey` keys.

mod types;

pub use types::{ECPrivateKey, EcParameters};
