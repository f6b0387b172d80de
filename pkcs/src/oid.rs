//! Object identifiers understood by the decoders.
//!
//! Resolution is a closed mapping: any OID not listed here resolves to
//! `None`, which callers report as an unsupported format.

use kagi_der::ObjectIdentifier;

use crate::record::{KeyAlgorithm, RawKeyKind};

// Key algorithms
pub const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
pub const RSASSA_PSS: &str = "1.2.840.113549.1.1.10";
pub const DSA: &str = "1.2.840.10040.4.1";
pub const EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
pub const X25519: &str = "1.3.101.110";
pub const X448: &str = "1.3.101.111";
pub const ED25519: &str = "1.3.101.112";
pub const ED448: &str = "1.3.101.113";

// Named curves
pub const SECP224R1: &str = "1.3.132.0.33";
pub const SECP256R1: &str = "1.2.840.10045.3.1.7";
pub const SECP256K1: &str = "1.3.132.0.10";
pub const SECP384R1: &str = "1.3.132.0.34";
pub const SECP521R1: &str = "1.3.132.0.35";
pub const BRAINPOOL_P256R1: &str = "1.3.36.3.3.2.8.1.1.7";
pub const BRAINPOOL_P320R1: &str = "1.3.36.3.3.2.8.1.1.9";
pub const BRAINPOOL_P384R1: &str = "1.3.36.3.3.2.8.1.1.11";
pub const BRAINPOOL_P512R1: &str = "1.3.36.3.3.2.8.1.1.13";

// RFC 8018 password based encryption
pub const PBES2: &str = "1.2.840.113549.1.5.13";
pub const PBKDF2: &str = "1.2.840.113549.1.5.12";
pub const HMAC_WITH_SHA1: &str = "1.2.840.113549.2.7";
pub const HMAC_WITH_SHA224: &str = "1.2.840.113549.2.8";
pub const HMAC_WITH_SHA256: &str = "1.2.840.113549.2.9";
pub const HMAC_WITH_SHA384: &str = "1.2.840.113549.2.10";
pub const HMAC_WITH_SHA512: &str = "1.2.840.113549.2.11";
pub const AES128_CBC: &str = "2.16.840.1.101.3.4.1.2";
pub const AES192_CBC: &str = "2.16.840.1.101.3.4.1.22";
pub const AES256_CBC: &str = "2.16.840.1.101.3.4.1.42";
pub const DES_EDE3_CBC: &str = "1.2.840.113549.3.7";

/// Key algorithm named by a PKCS#8 `privateKeyAlgorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    Rsa,
    RsaPss,
    Dsa,
    Ec,
    Ed25519,
    Ed448,
    X25519,
    X448,
}

impl AlgorithmKind {
    pub fn oid(&self) -> &'static str {
        match self {
            AlgorithmKind::Rsa => RSA_ENCRYPTION,
            AlgorithmKind::RsaPss => RSASSA_PSS,
            AlgorithmKind::Dsa => DSA,
            AlgorithmKind::Ec => EC_PUBLIC_KEY,
            AlgorithmKind::Ed25519 => ED25519,
            AlgorithmKind::Ed448 => ED448,
            AlgorithmKind::X25519 => X25519,
            AlgorithmKind::X448 => X448,
        }
    }

    pub fn key_algorithm(&self) -> KeyAlgorithm {
        match self {
            AlgorithmKind::Rsa => KeyAlgorithm::Rsa,
            AlgorithmKind::RsaPss => KeyAlgorithm::RsaPss,
            AlgorithmKind::Dsa => KeyAlgorithm::Dsa,
            AlgorithmKind::Ec => KeyAlgorithm::Ec,
            AlgorithmKind::Ed25519 | AlgorithmKind::Ed448 => KeyAlgorithm::EdDsa,
            AlgorithmKind::X25519 | AlgorithmKind::X448 => KeyAlgorithm::Xdh,
        }
    }

    /// The raw-key variant for the Edwards and Montgomery families.
    pub fn raw_kind(&self) -> Option<RawKeyKind> {
        match self {
            AlgorithmKind::Ed25519 => Some(RawKeyKind::Ed25519),
            AlgorithmKind::Ed448 => Some(RawKeyKind::Ed448),
            AlgorithmKind::X25519 => Some(RawKeyKind::X25519),
            AlgorithmKind::X448 => Some(RawKeyKind::X448),
            _ => None,
        }
    }
}

pub fn resolve_algorithm(oid: &ObjectIdentifier) -> Option<AlgorithmKind> {
    match oid.to_string().as_str() {
        RSA_ENCRYPTION => Some(AlgorithmKind::Rsa),
        RSASSA_PSS => Some(AlgorithmKind::RsaPss),
        DSA => Some(AlgorithmKind::Dsa),
        EC_PUBLIC_KEY => Some(AlgorithmKind::Ec),
        ED25519 => Some(AlgorithmKind::Ed25519),
        ED448 => Some(AlgorithmKind::Ed448),
        X25519 => Some(AlgorithmKind::X25519),
        X448 => Some(AlgorithmKind::X448),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use kagi_der::ObjectIdentifier;
    use rstest::rstest;

    use super::{AlgorithmKind, resolve_algorithm};
    use crate::record::KeyAlgorithm;

    #[rstest]
    #[case("1.2.840.113549.1.1.1", Some(AlgorithmKind::Rsa))]
    #[case("1.2.840.113549.1.1.10", Some(AlgorithmKind::RsaPss))]
    #[case("1.2.840.10040.4.1", Some(AlgorithmKind::Dsa))]
    #[case("1.2.840.10045.2.1", Some(AlgorithmKind::Ec))]
    #[case("1.3.101.110", Some(AlgorithmKind::X25519))]
    #[case("1.3.101.111", Some(AlgorithmKind::X448))]
    #[case("1.3.101.112", Some(AlgorithmKind::Ed25519))]
    #[case("1.3.101.113", Some(AlgorithmKind::Ed448))]
    // sha256WithRSAEncryption is a signature, not a key algorithm
    #[case("1.2.840.113549.1.1.11", None)]
    #[case("1.2.840.10045.3.1.7", None)]
    fn test_resolve_algorithm(#[case] oid: &str, #[case] expected: Option<AlgorithmKind>) {
        let oid = ObjectIdentifier::from_str(oid).unwrap();
        let actual = resolve_algorithm(&oid);
        assert_eq!(expected, actual);
        if let Some(kind) = actual {
            assert!(oid == kind.oid());
        }
    }

    #[rstest]
    #[case(AlgorithmKind::Ed25519, KeyAlgorithm::EdDsa)]
    #[case(AlgorithmKind::Ed448, KeyAlgorithm::EdDsa)]
    #[case(AlgorithmKind::X25519, KeyAlgorithm::Xdh)]
    #[case(AlgorithmKind::X448, KeyAlgorithm::Xdh)]
    #[case(AlgorithmKind::RsaPss, KeyAlgorithm::RsaPss)]
    fn test_key_algorithm(#[case] kind: AlgorithmKind, #[case] expected: KeyAlgorithm) {
        assert_eq!(expected, kind.key_algorithm());
    }
}
