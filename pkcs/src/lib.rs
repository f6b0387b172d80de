//! Private key decoding for PEM documents.
//!
//! Supports PKCS#1 (`RSA PRIVATE KEY`), SEC1 (`EC PRIVATE KEY`), PKCS#8
//! (`PRIVATE KEY`) and PBES2 encrypted PKCS#8 (`ENCRYPTED PRIVATE KEY`).
//! See [`parse`] for the main entry point.

pub mod algorithm;
pub mod curve;
pub mod error;
pub mod oid;
pub mod pkcs1;
pub mod pkcs8;
mod private_key;
mod record;
pub mod sec1;

pub use curve::{CurveParameters, curve_by_name, resolve_curve};
pub use error::{Error, KeyLoadError, Result, Unsupported};
pub use private_key::{
    PrivateKey, load, load_all, parse, parse_all, parse_with_password, private_key_blocks,
};
pub use record::{
    DsaKey, EcKey, KeyAlgorithm, KeyMaterial, PrivateKeyRecord, RawKey, RawKeyKind, RsaKey,
};
