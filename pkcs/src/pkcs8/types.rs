use std::str::FromStr;

use kagi::decoder::{DecodableFrom, Decoder};
use kagi_der::{BitString, ObjectIdentifier, Reader, Tag, Writer};
use tracing::debug;

use crate::algorithm::AlgorithmIdentifier;
use crate::error::{Error, Result, Unsupported};
use crate::oid::{AlgorithmKind, resolve_algorithm};
use crate::pkcs1::RSAPrivateKey;
use crate::record::{DsaKey, KeyAlgorithm, KeyMaterial, PrivateKeyRecord, RawKey, RawKeyKind};
use crate::sec1::{ECPrivateKey, EcParameters};

/*
RFC 5958 - Asymmetric Key Packages

OneAsymmetricKey ::= SEQUENCE {
    version                   Version,
    privateKeyAlgorithm       PrivateKeyAlgorithmIdentifier,
    privateKey                PrivateKey,
    attributes            [0] Attributes OPTIONAL,
    ...,
    [[2: publicKey        [1] PublicKey OPTIONAL ]],
    ...
}

PrivateKeyInfo ::= OneAsymmetricKey

Version ::= INTEGER { v1(0), v2(1) } (v1, ..., v2)

PrivateKey ::= OCTET STRING

PublicKey ::= BIT STRING

RFC 3279 - DSA

Dss-Parms ::= SEQUENCE { p INTEGER, q INTEGER, g INTEGER }
DSAPrivateKey ::= INTEGER

RFC 8410 - Edwards and Montgomery curves

CurvePrivateKey ::= OCTET STRING
*/

const ATTRIBUTES_TAG: Tag = Tag::ContextSpecific {
    slot: 0,
    constructed: true,
};
const PUBLIC_KEY_TAG: Tag = Tag::ContextSpecific {
    slot: 1,
    constructed: false,
};
const NULL_PARAMETERS: [u8; 2] = [0x05, 0x00];

/// PKCS#8 OneAsymmetricKey version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    /// Version 1 (no public key)
    V1 = 0,
    /// Version 2 (with public key)
    V2 = 1,
}

impl TryFrom<u64> for Version {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self> {
        match value {
            0 => Ok(Version::V1),
            1 => Ok(Version::V2),
            _ => Err(Unsupported::Version(value).into()),
        }
    }
}

/// PKCS#8 private key (`OneAsymmetricKey`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKeyInfo {
    pub version: Version,
    pub algorithm: AlgorithmIdentifier,
    /// Algorithm specific private key encoding
    pub private_key: Vec<u8>,
    /// Content of the `[0]` attributes SET, kept undecoded
    pub attributes: Option<Vec<u8>>,
    /// `[1]` public key (v2 only)
    pub public_key: Option<BitString>,
}

impl PrivateKeyInfo {
    /// Interprets the inner private key according to the algorithm OID.
    pub fn to_record(&self) -> Result<PrivateKeyRecord> {
        let kind = resolve_algorithm(&self.algorithm.oid)
            .ok_or_else(|| Unsupported::Algorithm(self.algorithm.oid.to_string()))?;
        debug!(algorithm = ?kind, version = ?self.version, "decoding PKCS#8 private key");

        match kind {
            AlgorithmKind::Rsa => {
                let key: RSAPrivateKey = self.private_key.as_slice().decode()?;
                Ok(PrivateKeyRecord::rsa(key.into_key()))
            }
            AlgorithmKind::RsaPss => {
                let key: RSAPrivateKey = self.private_key.as_slice().decode()?;
                let mut key = key.into_key();
                key.pss_parameters = self
                    .algorithm
                    .parameters()
                    .and(self.algorithm.parameters.clone());
                Ok(PrivateKeyRecord::rsa_pss(key))
            }
            AlgorithmKind::Dsa => self.dsa_record(),
            AlgorithmKind::Ec => self.ec_record(),
            AlgorithmKind::Ed25519
            | AlgorithmKind::Ed448
            | AlgorithmKind::X25519
            | AlgorithmKind::X448 => {
                let raw_kind = kind
                    .raw_kind()
                    .ok_or_else(|| Unsupported::Algorithm(self.algorithm.oid.to_string()))?;
                self.raw_record(raw_kind)
            }
        }
    }

    fn dsa_record(&self) -> Result<PrivateKeyRecord> {
        let mut parameters = self.algorithm.parameters().ok_or_else(|| {
            Error::MalformedFormat("DSA key without domain parameters".to_string())
        })?;
        let mut dss = parameters.read_sequence()?;
        parameters.finish()?;
        let p = dss.read_unsigned()?;
        let q = dss.read_unsigned()?;
        let g = dss.read_unsigned()?;
        dss.finish()?;

        let mut inner = Reader::new(&self.private_key);
        let x = inner.read_unsigned()?;
        inner.finish()?;

        Ok(PrivateKeyRecord::dsa(DsaKey { p, q, g, x }))
    }

    fn ec_record(&self) -> Result<PrivateKeyRecord> {
        let mut parameters = self.algorithm.parameters().ok_or_else(|| {
            Error::MalformedFormat("EC key without curve parameters".to_string())
        })?;
        let curve = EcParameters::read(&mut parameters)?;
        parameters.finish()?;
        let curve = curve.resolve()?;

        let mut key: ECPrivateKey = if Reader::new(&self.private_key).peek_tag() == Some(Tag::Sequence) {
            self.private_key.as_slice().decode()?
        } else {
            // bare scalar without the ECPrivateKey wrapper
            ECPrivateKey {
                private_key: self.private_key.clone(),
                parameters: None,
                public_key: None,
            }
        };
        if key.public_key.is_none() {
            key.public_key = self.public_key.clone();
        }
        key.into_record(Some(curve))
    }

    fn raw_record(&self, kind: RawKeyKind) -> Result<PrivateKeyRecord> {
        // The private key is wrapped once more in an OCTET STRING.
        let mut inner = Reader::new(&self.private_key);
        let seed = inner.read_octet_string()?;
        inner.finish()?;

        let expected = match kind {
            RawKeyKind::Ed25519 | RawKeyKind::X25519 => 32,
            RawKeyKind::Ed448 => 57,
            RawKeyKind::X448 => 56,
        };
        if seed.len() != expected {
            return Err(Error::MalformedFormat(format!(
                "{} private key must be {} bytes, got {}",
                kind,
                expected,
                seed.len()
            )));
        }

        Ok(PrivateKeyRecord::raw(RawKey {
            kind,
            private_key: seed.to_vec(),
            public_key: self.public_key.as_ref().map(|bits| bits.data.clone()),
        }))
    }

    /// Builds the unencrypted PKCS#8 form of a record.
    pub fn from_record(record: &PrivateKeyRecord) -> Result<Self> {
        let oid = parse_oid(record.algorithm_oid())?;
        let (parameters, private_key, public_key) = match record.material() {
            KeyMaterial::Rsa(key) => {
                let parameters = match record.algorithm() {
                    KeyAlgorithm::RsaPss => key.pss_parameters.clone(),
                    _ => Some(NULL_PARAMETERS.to_vec()),
                };
                (parameters, RSAPrivateKey::from(key).to_der(), None)
            }
            KeyMaterial::Dsa(key) => {
                let mut parameters = Writer::new();
                parameters.write_sequence(|w| {
                    w.write_unsigned(&key.p)
                        .write_unsigned(&key.q)
                        .write_unsigned(&key.g);
                });
                let mut private_key = Writer::new();
                private_key.write_unsigned(&key.x);
                (Some(parameters.finish()), private_key.finish(), None)
            }
            KeyMaterial::Ec(key) => {
                let curve = record.curve().ok_or_else(|| {
                    Error::MalformedFormat("EC key without curve parameters".to_string())
                })?;
                let mut parameters = Writer::new();
                parameters.write_object_identifier(&parse_oid(curve.oid)?);
                let inner = ECPrivateKey {
                    private_key: key.private_key.clone(),
                    parameters: None,
                    public_key: key.public_key.clone().map(|data| BitString {
                        unused_bits: 0,
                        data,
                    }),
                };
                (Some(parameters.finish()), inner.to_der(), None)
            }
            KeyMaterial::Raw(key) => {
                let mut private_key = Writer::new();
                private_key.write_octet_string(&key.private_key);
                let public_key = key.public_key.clone().map(|data| BitString {
                    unused_bits: 0,
                    data,
                });
                (None, private_key.finish(), public_key)
            }
        };

        Ok(PrivateKeyInfo {
            version: if public_key.is_some() {
                Version::V2
            } else {
                Version::V1
            },
            algorithm: AlgorithmIdentifier { oid, parameters },
            private_key,
            attributes: None,
            public_key,
        })
    }

    pub fn to_der(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        writer.write_sequence(|w| {
            w.write_u64(self.version as u64);
            self.algorithm.write(w);
            w.write_octet_string(&self.private_key);
            if let Some(attributes) = &self.attributes {
                w.write_tagged(ATTRIBUTES_TAG, attributes);
            }
            if let Some(public_key) = &self.public_key {
                let mut content = vec![public_key.unused_bits];
                content.extend_from_slice(&public_key.data);
                w.write_tagged(PUBLIC_KEY_TAG, &content);
            }
        });
        writer.finish()
    }
}

fn parse_oid(oid: &str) -> Result<ObjectIdentifier> {
    Ok(ObjectIdentifier::from_str(oid)?)
}

impl DecodableFrom<[u8]> for PrivateKeyInfo {}

impl Decoder<[u8], PrivateKeyInfo> for [u8] {
    type Error = Error;

    fn decode(&self) -> Result<PrivateKeyInfo> {
        let mut outer = Reader::new(self);
        let mut seq = outer.read_sequence()?;
        outer.finish()?;

        let version = Version::try_from(seq.read_u64()?)?;
        let algorithm = AlgorithmIdentifier::read(&mut seq)?;
        let private_key = seq.read_octet_string()?.to_vec();

        let attributes = if seq.peek_tag() == Some(ATTRIBUTES_TAG) {
            let (_, content) = seq.read_any()?;
            Some(content.to_vec())
        } else {
            None
        };

        let public_key = if seq.peek_tag() == Some(PUBLIC_KEY_TAG) {
            let (_, content) = seq.read_any()?;
            let (&unused_bits, data) = content.split_first().ok_or_else(|| {
                kagi_der::Error::InvalidBitString("missing unused bits octet".to_string())
            })?;
            Some(BitString {
                unused_bits,
                data: data.to_vec(),
            })
        } else {
            None
        };

        seq.finish()?;

        Ok(PrivateKeyInfo {
            version,
            algorithm,
            private_key,
            attributes,
            public_key,
        })
    }
}
