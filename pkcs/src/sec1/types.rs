use kagi::decoder::{DecodableFrom, Decoder};
use kagi_der::{BitString, ObjectIdentifier, Reader, Tag, Writer};

use crate::curve::{CurveParameters, resolve_curve};
use crate::error::{Error, Result, Unsupported};
use crate::record::{EcKey, PrivateKeyRecord};

/*
RFC 5915 - Elliptic Curve Private Key Structure

ECPrivateKey ::= SEQUENCE {
    version        INTEGER { ecPrivkeyVer1(1) } (ecPrivkeyVer1),
    privateKey     OCTET STRING,
    parameters [0] ECParameters {{ NamedCurve }} OPTIONAL,
    publicKey  [1] BIT STRING OPTIONAL
}

RFC 5480

ECParameters ::= CHOICE {
    namedCurve         OBJECT IDENTIFIER
    -- implicitCurve   NULL
    -- specifiedCurve  SpecifiedECDomain
}
*/

const EC_PRIVKEY_VER1: u64 = 1;

/// Curve selection carried by SEC1 keys and EC algorithm identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcParameters {
    NamedCurve(ObjectIdentifier),
    ImplicitCurve,
    /// Full domain parameters, kept as DER.
    SpecifiedCurve(Vec<u8>),
}

impl EcParameters {
    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        match reader.peek_tag() {
            Some(Tag::ObjectIdentifier) => {
                Ok(EcParameters::NamedCurve(reader.read_object_identifier()?))
            }
            Some(Tag::Null) => {
                reader.read_null()?;
                Ok(EcParameters::ImplicitCurve)
            }
            Some(Tag::Sequence) => Ok(EcParameters::SpecifiedCurve(
                reader.read_element()?.to_vec(),
            )),
            Some(actual) => Err(kagi_der::Error::UnexpectedTag {
                expected: Tag::ObjectIdentifier,
                actual,
            }
            .into()),
            None => Err(kagi_der::Error::UnexpectedEnd.into()),
        }
    }

    /// Resolves the parameters to one of the supported named curves.
    pub fn resolve(&self) -> Result<&'static CurveParameters> {
        match self {
            EcParameters::NamedCurve(oid) => {
                resolve_curve(oid).ok_or_else(|| Unsupported::Curve(oid.to_string()).into())
            }
            EcParameters::ImplicitCurve => Err(Error::MalformedFormat(
                "implicitly defined curve parameters".to_string(),
            )),
            EcParameters::SpecifiedCurve(_) => Err(Unsupported::ExplicitCurve.into()),
        }
    }
}

/// SEC1 EC Private Key structure (RFC 5915)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ECPrivateKey {
    /// Private scalar octets
    pub private_key: Vec<u8>,
    /// EC parameters - OPTIONAL [0]
    pub parameters: Option<EcParameters>,
    /// Public key - OPTIONAL [1]
    pub public_key: Option<BitString>,
}

impl ECPrivateKey {
    /// Builds a record for this key.
    ///
    /// `outer` is the curve named by an enclosing PKCS#8 algorithm
    /// identifier. Without it the key has to carry its own `[0]` parameters.
    pub fn into_record(self, outer: Option<&'static CurveParameters>) -> Result<PrivateKeyRecord> {
        let inner = self.parameters.as_ref().map(EcParameters::resolve).transpose()?;
        let curve = match (outer, inner) {
            (Some(outer), Some(inner)) if outer != inner => {
                return Err(Error::MalformedFormat(format!(
                    "curve mismatch: {} and {}",
                    outer, inner
                )));
            }
            (Some(curve), _) | (None, Some(curve)) => curve,
            (None, None) => {
                return Err(Error::MalformedFormat(
                    "EC private key without curve parameters".to_string(),
                ));
            }
        };

        if self.private_key.is_empty() || self.private_key.len() > curve.scalar_len() {
            return Err(Error::MalformedFormat(format!(
                "{} byte private key for {}",
                self.private_key.len(),
                curve
            )));
        }

        Ok(PrivateKeyRecord::ec(
            curve,
            EcKey {
                private_key: self.private_key,
                public_key: self.public_key.map(|bits| bits.data),
            },
        ))
    }

    pub fn to_der(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        writer.write_sequence(|w| {
            w.write_u64(EC_PRIVKEY_VER1)
                .write_octet_string(&self.private_key);
            if let Some(parameters) = &self.parameters {
                w.write_context_tag(0, |w| match parameters {
                    EcParameters::NamedCurve(oid) => {
                        w.write_object_identifier(oid);
                    }
                    EcParameters::ImplicitCurve => {
                        w.write_null();
                    }
                    EcParameters::SpecifiedCurve(der) => {
                        w.write_raw(der);
                    }
                });
            }
            if let Some(public_key) = &self.public_key {
                w.write_context_tag(1, |w| {
                    w.write_bit_string(public_key.unused_bits, &public_key.data);
                });
            }
        });
        writer.finish()
    }
}

impl DecodableFrom<[u8]> for ECPrivateKey {}

impl Decoder<[u8], ECPrivateKey> for [u8] {
    type Error = Error;

    fn decode(&self) -> Result<ECPrivateKey> {
        let mut outer = Reader::new(self);
        let mut seq = outer.read_sequence()?;
        outer.finish()?;

        let version = seq.read_u64()?;
        if version != EC_PRIVKEY_VER1 {
            return Err(Error::MalformedFormat(format!(
                "ECPrivateKey version must be 1, got {}",
                version
            )));
        }

        let private_key = seq.read_octet_string()?.to_vec();

        let parameters = seq
            .read_optional_context_tag(0)?
            .map(|mut explicit| {
                let parameters = EcParameters::read(&mut explicit)?;
                explicit.finish()?;
                Ok::<_, Error>(parameters)
            })
            .transpose()?;

        let public_key = seq
            .read_optional_context_tag(1)?
            .map(|mut explicit| {
                let bits = explicit.read_bit_string()?;
                explicit.finish()?;
                Ok::<_, Error>(bits)
            })
            .transpose()?;

        seq.finish()?;

        Ok(ECPrivateKey {
            private_key,
            parameters,
            public_key,
        })
    }
}
