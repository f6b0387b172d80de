//! The normalized result of parsing a private key.
//!
//! Whatever encoding a key arrives in (PKCS#1, SEC1, PKCS#8 or encrypted
//! PKCS#8), it ends up as a [`PrivateKeyRecord`]. Two records for the same
//! key compare equal regardless of the source format.

use std::fmt::Display;

use kagi_pem::{Label, Pem};
use num_bigint::BigUint;

use crate::curve::CurveParameters;
use crate::error::Result;
use crate::oid::{self, AlgorithmKind};
use crate::pkcs8::PrivateKeyInfo;

/// Key algorithm family of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    /// RSA encryption
    Rsa,
    /// RSA restricted to RSASSA-PSS signatures
    RsaPss,
    /// DSA
    Dsa,
    /// Elliptic curve over a named Weierstrass curve
    Ec,
    /// Ed25519 or Ed448
    EdDsa,
    /// X25519 or X448
    Xdh,
}

impl KeyAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            KeyAlgorithm::Rsa => "RSA",
            KeyAlgorithm::RsaPss => "RSASSA-PSS",
            KeyAlgorithm::Dsa => "DSA",
            KeyAlgorithm::Ec => "EC",
            KeyAlgorithm::EdDsa => "EdDSA",
            KeyAlgorithm::Xdh => "XDH",
        }
    }
}

impl Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawKeyKind {
    Ed25519,
    Ed448,
    X25519,
    X448,
}

impl RawKeyKind {
    pub fn name(&self) -> &'static str {
        match self {
            RawKeyKind::Ed25519 => "Ed25519",
            RawKeyKind::Ed448 => "Ed448",
            RawKeyKind::X25519 => "X25519",
            RawKeyKind::X448 => "X448",
        }
    }

    pub fn bits(&self) -> u64 {
        match self {
            RawKeyKind::Ed25519 | RawKeyKind::X25519 => 256,
            RawKeyKind::Ed448 | RawKeyKind::X448 => 448,
        }
    }

    pub(crate) fn algorithm_kind(&self) -> AlgorithmKind {
        match self {
            RawKeyKind::Ed25519 => AlgorithmKind::Ed25519,
            RawKeyKind::Ed448 => AlgorithmKind::Ed448,
            RawKeyKind::X25519 => AlgorithmKind::X25519,
            RawKeyKind::X448 => AlgorithmKind::X448,
        }
    }
}

impl Display for RawKeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// RSA private key components (two-prime form).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaKey {
    pub modulus: BigUint,
    pub public_exponent: BigUint,
    pub private_exponent: BigUint,
    pub prime1: BigUint,
    pub prime2: BigUint,
    pub exponent1: BigUint,
    pub exponent2: BigUint,
    pub coefficient: BigUint,
    /// DER of the RSASSA-PSS-params, kept for identification only.
    pub pss_parameters: Option<Vec<u8>>,
}

/// DSA private key with its domain parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DsaKey {
    pub p: BigUint,
    pub q: BigUint,
    pub g: BigUint,
    pub x: BigUint,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcKey {
    /// Private scalar as fixed-width big-endian octets.
    pub private_key: Vec<u8>,
    /// Public point as encoded by the key file, usually uncompressed.
    pub public_key: Option<Vec<u8>>,
}

/// Edwards or Montgomery curve key in its raw byte form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawKey {
    pub kind: RawKeyKind,
    pub private_key: Vec<u8>,
    pub public_key: Option<Vec<u8>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyMaterial {
    Rsa(RsaKey),
    Dsa(DsaKey),
    Ec(EcKey),
    Raw(RawKey),
}

/// A parsed private key.
///
/// `curve` is set exactly when the algorithm is [`KeyAlgorithm::Ec`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKeyRecord {
    algorithm: KeyAlgorithm,
    curve: Option<&'static CurveParameters>,
    material: KeyMaterial,
}

impl PrivateKeyRecord {
    pub(crate) fn rsa(key: RsaKey) -> Self {
        PrivateKeyRecord {
            algorithm: KeyAlgorithm::Rsa,
            curve: None,
            material: KeyMaterial::Rsa(key),
        }
    }

    /// RSASSA-PSS key, with or without parameters.
    pub(crate) fn rsa_pss(key: RsaKey) -> Self {
        PrivateKeyRecord {
            algorithm: KeyAlgorithm::RsaPss,
            curve: None,
            material: KeyMaterial::Rsa(key),
        }
    }

    pub(crate) fn dsa(key: DsaKey) -> Self {
        PrivateKeyRecord {
            algorithm: KeyAlgorithm::Dsa,
            curve: None,
            material: KeyMaterial::Dsa(key),
        }
    }

    pub(crate) fn ec(curve: &'static CurveParameters, key: EcKey) -> Self {
        PrivateKeyRecord {
            algorithm: KeyAlgorithm::Ec,
            curve: Some(curve),
            material: KeyMaterial::Ec(key),
        }
    }

    pub(crate) fn raw(key: RawKey) -> Self {
        PrivateKeyRecord {
            algorithm: key.kind.algorithm_kind().key_algorithm(),
            curve: None,
            material: KeyMaterial::Raw(key),
        }
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    pub fn curve(&self) -> Option<&'static CurveParameters> {
        self.curve
    }

    pub fn material(&self) -> &KeyMaterial {
        &self.material
    }

    /// Encoding every record can be exported to, whatever it was read from.
    pub fn format(&self) -> &'static str {
        "PKCS#8"
    }

    /// Key size in bits.
    pub fn key_size(&self) -> u64 {
        match (&self.material, self.curve) {
            (KeyMaterial::Rsa(key), _) => key.modulus.bits(),
            (KeyMaterial::Dsa(key), _) => key.p.bits(),
            (KeyMaterial::Ec(_), Some(curve)) => curve.field_size as u64,
            (KeyMaterial::Ec(_), None) => 0,
            (KeyMaterial::Raw(key), _) => key.kind.bits(),
        }
    }

    /// Public key bytes when the source carried them.
    pub fn public_key(&self) -> Option<&[u8]> {
        match &self.material {
            KeyMaterial::Ec(key) => key.public_key.as_deref(),
            KeyMaterial::Raw(key) => key.public_key.as_deref(),
            KeyMaterial::Rsa(_) | KeyMaterial::Dsa(_) => None,
        }
    }

    /// Re-encodes the key as an unencrypted PKCS#8 `PrivateKeyInfo`.
    pub fn to_pkcs8_der(&self) -> Result<Vec<u8>> {
        Ok(PrivateKeyInfo::from_record(self)?.to_der())
    }

    pub fn to_pkcs8_pem(&self) -> Result<Pem> {
        Ok(Pem::from_bytes(Label::PrivateKey, &self.to_pkcs8_der()?))
    }

    /// Dotted OID of the PKCS#8 `privateKeyAlgorithm`.
    pub fn algorithm_oid(&self) -> &'static str {
        match &self.material {
            KeyMaterial::Rsa(_) if self.algorithm == KeyAlgorithm::RsaPss => oid::RSASSA_PSS,
            KeyMaterial::Rsa(_) => oid::RSA_ENCRYPTION,
            KeyMaterial::Dsa(_) => oid::DSA,
            KeyMaterial::Ec(_) => oid::EC_PUBLIC_KEY,
            KeyMaterial::Raw(key) => key.kind.algorithm_kind().oid(),
        }
    }
}
