use kagi::decoder::{DecodableFrom, Decoder};
use kagi_der::{Reader, Writer};
use num_bigint::BigUint;

use crate::error::{Error, Result, Unsupported};
use crate::record::RsaKey;

/*
RFC 8017 - PKCS #1: RSA Cryptography Specifications

RSAPrivateKey ::= SEQUENCE {
    version           Version,
    modulus           INTEGER,  -- n
    publicExponent    INTEGER,  -- e
    privateExponent   INTEGER,  -- d
    prime1            INTEGER,  -- p
    prime2            INTEGER,  -- q
    exponent1         INTEGER,  -- d mod (p-1)
    exponent2         INTEGER,  -- d mod (q-1)
    coefficient       INTEGER,  -- (inverse of q) mod p
    otherPrimeInfos   OtherPrimeInfos OPTIONAL
}

Version ::= INTEGER { two-prime(0), multi(1) }
    (CONSTRAINED BY {-- version must be multi if otherPrimeInfos present --})
*/

/// PKCS#1 RSAPrivateKey version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    TwoPrime = 0,
    Multi = 1,
}

impl TryFrom<u64> for Version {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self> {
        match value {
            0 => Ok(Version::TwoPrime),
            1 => Ok(Version::Multi),
            _ => Err(Error::MalformedFormat(format!(
                "RSAPrivateKey version must be 0 or 1, got {}",
                value
            ))),
        }
    }
}

/// PKCS#1 RSA private key.
///
/// Only the two-prime form is accepted; multi-prime keys are reported as
/// unsupported rather than partially decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RSAPrivateKey {
    pub modulus: BigUint,
    pub public_exponent: BigUint,
    pub private_exponent: BigUint,
    pub prime1: BigUint,
    pub prime2: BigUint,
    pub exponent1: BigUint,
    pub exponent2: BigUint,
    pub coefficient: BigUint,
}

impl RSAPrivateKey {
    pub fn to_der(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        writer.write_sequence(|w| {
            w.write_u64(Version::TwoPrime as u64)
                .write_unsigned(&self.modulus)
                .write_unsigned(&self.public_exponent)
                .write_unsigned(&self.private_exponent)
                .write_unsigned(&self.prime1)
                .write_unsigned(&self.prime2)
                .write_unsigned(&self.exponent1)
                .write_unsigned(&self.exponent2)
                .write_unsigned(&self.coefficient);
        });
        writer.finish()
    }

    /// Key material for a record, with no RSASSA-PSS parameters attached.
    pub fn into_key(self) -> RsaKey {
        RsaKey {
            modulus: self.modulus,
            public_exponent: self.public_exponent,
            private_exponent: self.private_exponent,
            prime1: self.prime1,
            prime2: self.prime2,
            exponent1: self.exponent1,
            exponent2: self.exponent2,
            coefficient: self.coefficient,
            pss_parameters: None,
        }
    }
}

impl From<&RsaKey> for RSAPrivateKey {
    fn from(key: &RsaKey) -> Self {
        RSAPrivateKey {
            modulus: key.modulus.clone(),
            public_exponent: key.public_exponent.clone(),
            private_exponent: key.private_exponent.clone(),
            prime1: key.prime1.clone(),
            prime2: key.prime2.clone(),
            exponent1: key.exponent1.clone(),
            exponent2: key.exponent2.clone(),
            coefficient: key.coefficient.clone(),
        }
    }
}

impl DecodableFrom<[u8]> for RSAPrivateKey {}

impl Decoder<[u8], RSAPrivateKey> for [u8] {
    type Error = Error;

    fn decode(&self) -> Result<RSAPrivateKey> {
        let mut outer = Reader::new(self);
        let mut seq = outer.read_sequence()?;
        outer.finish()?;

        let version = Version::try_from(seq.read_u64()?)?;
        if version == Version::Multi {
            return Err(Unsupported::MultiPrimeRsa.into());
        }

        let key = RSAPrivateKey {
            modulus: seq.read_unsigned()?,
            public_exponent: seq.read_unsigned()?,
            private_exponent: seq.read_unsigned()?,
            prime1: seq.read_unsigned()?,
            prime2: seq.read_unsigned()?,
            exponent1: seq.read_unsigned()?,
            exponent2: seq.read_unsigned()?,
            coefficient: seq.read_unsigned()?,
        };
        seq.finish()?;
        Ok(key)
    }
}
