use num_bigint::BigUint;

use crate::{ObjectIdentifier, Tag, encode_length};

/// Appends DER elements to a buffer.
///
/// Constructed values are written through closures so their length can be
/// computed once the content is known.
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Writer::default()
    }

    /// Writes `content` under any tag, which is how IMPLICIT tagged
    /// fields are produced.
    pub fn write_tagged(&mut self, tag: Tag, content: &[u8]) -> &mut Self {
        self.buf.push(u8::from(tag));
        encode_length(content.len(), &mut self.buf);
        self.buf.extend_from_slice(content);
        self
    }

    /// INTEGER from an unsigned magnitude, with a leading zero octet when the
    /// high bit would otherwise mark it negative.
    pub fn write_unsigned(&mut self, value: &BigUint) -> &mut Self {
        let mut content = value.to_bytes_be();
        if content[0] & 0x80 != 0 {
            content.insert(0, 0x00);
        }
        self.write_tagged(Tag::Integer, &content)
    }

    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        self.write_unsigned(&BigUint::from(value))
    }

    pub fn write_octet_string(&mut self, data: &[u8]) -> &mut Self {
        self.write_tagged(Tag::OctetString, data)
    }

    pub fn write_bit_string(&mut self, unused_bits: u8, data: &[u8]) -> &mut Self {
        let mut content = Vec::with_capacity(data.len() + 1);
        content.push(unused_bits);
        content.extend_from_slice(data);
        self.write_tagged(Tag::BitString, &content)
    }

    pub fn write_null(&mut self) -> &mut Self {
        self.write_tagged(Tag::Null, &[])
    }

    pub fn write_object_identifier(&mut self, oid: &ObjectIdentifier) -> &mut Self {
        self.write_tagged(Tag::ObjectIdentifier, &oid.to_der_content())
    }

    pub fn write_sequence(&mut self, f: impl FnOnce(&mut Writer)) -> &mut Self {
        let mut inner = Writer::new();
        f(&mut inner);
        self.write_tagged(Tag::Sequence, &inner.buf)
    }

    /// Explicitly tagged `[slot]` wrapping whatever `f` writes.
    pub fn write_context_tag(&mut self, slot: u8, f: impl FnOnce(&mut Writer)) -> &mut Self {
        let mut inner = Writer::new();
        f(&mut inner);
        self.write_tagged(Tag::context(slot), &inner.buf)
    }

    /// Appends an already encoded element as is.
    pub fn write_raw(&mut self, element: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(element);
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}
