use num_bigint::{BigInt, BigUint};

use crate::{
    ObjectIdentifier, Tag,
    error::{Error, Result},
    parse_header,
};

/// BIT STRING content split into its unused-bit count and data octets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    pub unused_bits: u8,
    pub data: Vec<u8>,
}

/// Sequential cursor over DER elements.
///
/// Every read checks the tag it expects and consumes exactly one element.
/// Constructed types hand back a new `Reader` over their content, so nested
/// structures are walked with the same API.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    input: &'a [u8],
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Reader { input }
    }

    /// Bytes not consumed yet.
    pub fn remaining(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn peek_tag(&self) -> Option<Tag> {
        self.input.first().map(|&b| Tag::from(b))
    }

    /// Fails with [`Error::TrailingData`] unless everything was consumed.
    pub fn finish(self) -> Result<()> {
        if self.input.is_empty() {
            Ok(())
        } else {
            Err(Error::TrailingData(self.input.len()))
        }
    }

    /// Reads one element of any type and returns its tag and content.
    pub fn read_any(&mut self) -> Result<(Tag, &'a [u8])> {
        let (rest, tag, length) = parse_header(self.input)?;
        let (content, rest) = rest.split_at(length);
        self.input = rest;
        Ok((tag, content))
    }

    /// Reads one element and returns its full encoding, header included.
    pub fn read_element(&mut self) -> Result<&'a [u8]> {
        let start = self.input;
        self.read_any()?;
        Ok(&start[..start.len() - self.input.len()])
    }

    fn read_expected(&mut self, expected: Tag) -> Result<&'a [u8]> {
        let actual = self.peek_tag().ok_or(Error::UnexpectedEnd)?;
        if actual != expected {
            return Err(Error::UnexpectedTag { expected, actual });
        }
        let (_, content) = self.read_any()?;
        Ok(content)
    }

    pub fn read_sequence(&mut self) -> Result<Reader<'a>> {
        self.read_expected(Tag::Sequence).map(Reader::new)
    }

    /// Raw two's complement content of an INTEGER.
    pub fn read_integer(&mut self) -> Result<&'a [u8]> {
        let content = self.read_expected(Tag::Integer)?;
        if content.is_empty() {
            return Err(Error::EmptyInteger);
        }
        Ok(content)
    }

    pub fn read_unsigned(&mut self) -> Result<BigUint> {
        let content = self.read_integer()?;
        BigInt::from_signed_bytes_be(content)
            .to_biguint()
            .ok_or(Error::NegativeInteger)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let content = self.read_integer()?;
        if content[0] & 0x80 != 0 {
            return Err(Error::NegativeInteger);
        }
        let digits = content
            .iter()
            .position(|&b| b != 0)
            .map_or(&[][..], |i| &content[i..]);
        if digits.len() > 8 {
            return Err(Error::IntegerOverflow);
        }
        Ok(digits.iter().fold(0u64, |n, &b| (n << 8) | b as u64))
    }

    pub fn read_octet_string(&mut self) -> Result<&'a [u8]> {
        self.read_expected(Tag::OctetString)
    }

    pub fn read_bit_string(&mut self) -> Result<BitString> {
        let content = self.read_expected(Tag::BitString)?;
        let (&unused_bits, data) = content
            .split_first()
            .ok_or_else(|| Error::InvalidBitString("missing unused bits octet".to_string()))?;
        if unused_bits > 7 || (data.is_empty() && unused_bits != 0) {
            return Err(Error::InvalidBitString(format!(
                "{} unused bits",
                unused_bits
            )));
        }
        Ok(BitString {
            unused_bits,
            data: data.to_vec(),
        })
    }

    pub fn read_null(&mut self) -> Result<()> {
        let content = self.read_expected(Tag::Null)?;
        if !content.is_empty() {
            return Err(Error::InvalidNull);
        }
        Ok(())
    }

    pub fn read_object_identifier(&mut self) -> Result<ObjectIdentifier> {
        let content = self.read_expected(Tag::ObjectIdentifier)?;
        ObjectIdentifier::from_der_content(content)
    }

    /// Reads an explicitly tagged `[slot]` element and returns a reader over
    /// the wrapped value.
    pub fn read_context_tag(&mut self, slot: u8) -> Result<Reader<'a>> {
        self.read_expected(Tag::context(slot)).map(Reader::new)
    }

    /// Like [`Reader::read_context_tag`] but yields `None` when the next
    /// element is not `[slot]`.
    pub fn read_optional_context_tag(&mut self, slot: u8) -> Result<Option<Reader<'a>>> {
        if self.peek_tag() == Some(Tag::context(slot)) {
            self.read_context_tag(slot).map(Some)
        } else {
            Ok(None)
        }
    }
}
