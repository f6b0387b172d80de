use std::{fmt::Display, str::FromStr};

use crate::error::{Error, Result};

/// OBJECT IDENTIFIER as a list of arcs.
///
/// Construction always validates the first two arcs, so every value can be
/// encoded back to DER.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    inner: Vec<u64>,
}

impl ObjectIdentifier {
    pub fn from_arcs(arcs: &[u64]) -> Result<Self> {
        match arcs {
            [first, second, ..] if *first < 2 && *second >= 40 => Err(
                Error::InvalidObjectIdentifier(format!("arc {} out of range", second)),
            ),
            [first, _, ..] if *first > 2 => Err(Error::InvalidObjectIdentifier(format!(
                "first arc {} out of range",
                first
            ))),
            [first, second, ..] if first.checked_mul(40).and_then(|v| v.checked_add(*second)).is_none() => {
                Err(Error::InvalidObjectIdentifier("arc overflow".to_string()))
            }
            [_, _, ..] => Ok(ObjectIdentifier {
                inner: arcs.to_vec(),
            }),
            _ => Err(Error::InvalidObjectIdentifier(
                "at least two arcs are required".to_string(),
            )),
        }
    }

    pub fn arcs(&self) -> &[u64] {
        &self.inner
    }

    /// Decodes the content octets of an OBJECT IDENTIFIER.
    pub fn from_der_content(value: &[u8]) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::InvalidObjectIdentifier(
                "object identifier cannot be empty".to_string(),
            ));
        }

        let mut subidentifiers = Vec::new();
        let mut val = 0u64;
        let mut started = false;
        for &b in value {
            if !started && b == 0x80 {
                return Err(Error::InvalidObjectIdentifier(
                    "non-minimal subidentifier".to_string(),
                ));
            }
            if val > (u64::MAX >> 7) {
                return Err(Error::InvalidObjectIdentifier("arc overflow".to_string()));
            }
            val = (val << 7) | (b & 0x7f) as u64;
            started = true;
            if b & 0x80 == 0 {
                // continuation bit is clear, this subidentifier is complete
                subidentifiers.push(val);
                val = 0;
                started = false;
            }
        }
        if started {
            return Err(Error::InvalidObjectIdentifier(
                "incomplete encoding".to_string(),
            ));
        }

        // The first subidentifier packs the first two arcs.
        let first = subidentifiers[0];
        let (a, b) = match first {
            0..40 => (0, first),
            40..80 => (1, first - 40),
            _ => (2, first - 80),
        };
        let mut inner = Vec::with_capacity(subidentifiers.len() + 1);
        inner.push(a);
        inner.push(b);
        inner.extend_from_slice(&subidentifiers[1..]);
        Ok(ObjectIdentifier { inner })
    }

    /// Encodes the arcs as OBJECT IDENTIFIER content octets.
    pub fn to_der_content(&self) -> Vec<u8> {
        let mut result = Vec::new();
        let first = self.inner[0] * 40 + self.inner[1];
        encode_subidentifier(first, &mut result);
        for &v in &self.inner[2..] {
            encode_subidentifier(v, &mut result);
        }
        result
    }
}

fn encode_subidentifier(mut value: u64, buf: &mut Vec<u8>) {
    let mut encoded = vec![(value & 0x7f) as u8];
    value >>= 7;
    while value > 0 {
        encoded.push((value & 0x7f) as u8 | 0x80);
        value >>= 7;
    }
    buf.extend(encoded.iter().rev());
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self.inner.first() {
            Some(n) => self.inner[1..]
                .iter()
                .fold(n.to_string(), |s, n| s + "." + &n.to_string()),
            None => String::new(),
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split('.')
            .map(|arc| {
                arc.parse::<u64>()
                    .map_err(|e| Error::InvalidObjectIdentifier(format!("{}: {}", s, e)))
            })
            .collect::<Result<Vec<u64>>>()?;
        ObjectIdentifier::from_arcs(&values)
    }
}

impl PartialEq<&str> for ObjectIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

impl PartialEq<ObjectIdentifier> for &str {
    fn eq(&self, other: &ObjectIdentifier) -> bool {
        *self == other.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::ObjectIdentifier;
    use crate::Error;

    #[rstest(input, expected,
        case(vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01], "1.2.840.113549.1.1.1"),
        case(vec![0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01], "1.2.840.10045.2.1"),
        case(vec![0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07], "1.2.840.10045.3.1.7"),
        case(vec![0x2b, 0x81, 0x04, 0x00, 0x22], "1.3.132.0.34"),
        case(vec![0x2b, 0x65, 0x70], "1.3.101.112"),
        case(vec![0x2b, 0x24, 0x03, 0x03, 0x02, 0x08, 0x01, 0x01, 0x07], "1.3.36.3.3.2.8.1.1.7"),
        case(vec![0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x2a], "2.16.840.1.101.3.4.1.42"),
        case(vec![0x88, 0x37, 0x03], "2.999.3"),
    )]
    fn test_oid_decode_encode(input: Vec<u8>, expected: &str) {
        let oid = ObjectIdentifier::from_der_content(&input).unwrap();
        assert_eq!(expected, oid.to_string());
        assert!(oid == expected);
        assert_eq!(input, oid.to_der_content());
        assert_eq!(oid, ObjectIdentifier::from_str(expected).unwrap());
    }

    #[rstest(input,
        case(vec![]),
        case(vec![0x2a, 0x86]),
        case(vec![0x2a, 0x80, 0x01]),
        case(vec![0x2a, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f]),
    )]
    fn test_oid_decode_with_error(input: Vec<u8>) {
        assert!(matches!(
            ObjectIdentifier::from_der_content(&input),
            Err(Error::InvalidObjectIdentifier(_))
        ));
    }

    #[rstest(input,
        case(""),
        case("1"),
        case("1.2.x"),
        case("3.1"),
        case("0.40"),
    )]
    fn test_oid_from_str_with_error(input: &str) {
        assert!(ObjectIdentifier::from_str(input).is_err());
    }
}
