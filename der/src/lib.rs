//! Minimal DER support for private key structures.
//!
//! Only the handful of universal types that key formats use are understood:
//! INTEGER, BIT STRING, OCTET STRING, NULL, OBJECT IDENTIFIER, SEQUENCE and
//! context-specific tags. [`Reader`] walks a buffer element by element and
//! [`Writer`] produces the same constructs.

use std::fmt::{Display, Formatter};

use nom::{IResult, Parser};

pub mod error;
mod oid;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use oid::ObjectIdentifier;
pub use reader::{BitString, Reader};
pub use writer::Writer;

const CONTEXT_SPECIFIC: u8 = 0x80;
const CONSTRUCTED: u8 = 0x20;
const TAG_NUMBER_MASK: u8 = 0x1f;
const MAX_LENGTH_OCTETS: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    Sequence,
    Set,
    ContextSpecific { slot: u8, constructed: bool },
    Other(u8),
}

impl Tag {
    /// Explicitly tagged `[slot]`, which always wraps a constructed value.
    pub const fn context(slot: u8) -> Self {
        Tag::ContextSpecific {
            slot,
            constructed: true,
        }
    }
}

impl From<u8> for Tag {
    fn from(value: u8) -> Self {
        match value {
            0x02 => Tag::Integer,
            0x03 => Tag::BitString,
            0x04 => Tag::OctetString,
            0x05 => Tag::Null,
            0x06 => Tag::ObjectIdentifier,
            0x30 => Tag::Sequence,
            0x31 => Tag::Set,
            v if v & 0xc0 == CONTEXT_SPECIFIC => Tag::ContextSpecific {
                slot: v & TAG_NUMBER_MASK,
                constructed: v & CONSTRUCTED != 0,
            },
            v => Tag::Other(v),
        }
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::Integer => 0x02,
            Tag::BitString => 0x03,
            Tag::OctetString => 0x04,
            Tag::Null => 0x05,
            Tag::ObjectIdentifier => 0x06,
            Tag::Sequence => 0x30,
            Tag::Set => 0x31,
            Tag::ContextSpecific { slot, constructed } => {
                let constructed = if constructed { CONSTRUCTED } else { 0 };
                CONTEXT_SPECIFIC | constructed | (slot & TAG_NUMBER_MASK)
            }
            Tag::Other(v) => v,
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Tag::Integer => write!(f, "INTEGER"),
            Tag::BitString => write!(f, "BIT STRING"),
            Tag::OctetString => write!(f, "OCTET STRING"),
            Tag::Null => write!(f, "NULL"),
            Tag::ObjectIdentifier => write!(f, "OBJECT IDENTIFIER"),
            Tag::Sequence => write!(f, "SEQUENCE"),
            Tag::Set => write!(f, "SET"),
            Tag::ContextSpecific { slot, .. } => write!(f, "[{}]", slot),
            Tag::Other(v) => write!(f, "tag 0x{:02x}", v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Length {
    Definite(u64),
    Indefinite,
}

fn parse_tag(input: &[u8]) -> IResult<&[u8], Tag> {
    let (rest, n) = nom::number::be_u8().parse(input)?;
    if n & TAG_NUMBER_MASK == TAG_NUMBER_MASK {
        // high tag number form, never used by key structures
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }
    Ok((rest, Tag::from(n)))
}

fn parse_length(input: &[u8]) -> IResult<&[u8], Length> {
    let (input, n) = nom::number::be_u8().parse(input)?;
    if n == 0x80 {
        return Ok((input, Length::Indefinite));
    }
    if n & 0x80 == 0x80 {
        // long form
        // First 1 bit is a marker for long form.
        // Other bits represent bytes length of the length field.
        let count = n & 0x7f;
        if count > MAX_LENGTH_OCTETS {
            return Err(nom::Err::Failure(nom::error::Error::new(
                input,
                nom::error::ErrorKind::TooLarge,
            )));
        }
        let (input, bs) = nom::bytes::complete::take(count).parse(input)?;
        let n = bs.iter().fold(0u64, |n, &b| (n << 8) | b as u64);
        return Ok((input, Length::Definite(n)));
    }
    // short form: 0-127
    Ok((input, Length::Definite(n as u64)))
}

/// Splits off one element header and returns `(rest, tag, content length)`.
///
/// The content length is guaranteed to fit in `rest`.
fn parse_header(input: &[u8]) -> Result<(&[u8], Tag, usize)> {
    let (input, tag) = parse_tag(input)?;
    let (input, length) = parse_length(input)?;
    let declared = match length {
        Length::Definite(n) => n,
        Length::Indefinite => return Err(Error::IndefiniteLength),
    };
    let length = usize::try_from(declared)
        .ok()
        .filter(|&n| n <= input.len())
        .ok_or(Error::Truncated {
            declared,
            remaining: input.len(),
        })?;
    Ok((input, tag, length))
}

fn encode_length(length: usize, buf: &mut Vec<u8>) {
    if length < 0x80 {
        buf.push(length as u8);
        return;
    }
    let bytes = length.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    buf.push(0x80 | (bytes.len() - skip) as u8);
    buf.extend_from_slice(&bytes[skip..]);
}
