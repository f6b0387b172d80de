use kagi::decoder::{DecodableFrom, Decoder};
use kagi_der::{ObjectIdentifier, Reader, Tag, Writer};

use crate::error::{Error, Result};

/// AlgorithmIdentifier
///
/// ```asn1
/// AlgorithmIdentifier ::= SEQUENCE {
///     algorithm   OBJECT IDENTIFIER,
///     parameters  ANY DEFINED BY algorithm OPTIONAL
/// }
/// ```
///
/// `parameters` keeps the full DER encoding of the element so that it can be
/// decoded later by whoever knows its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmIdentifier {
    pub oid: ObjectIdentifier,
    pub parameters: Option<Vec<u8>>,
}

impl AlgorithmIdentifier {
    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let mut seq = reader.read_sequence()?;
        let oid = seq.read_object_identifier()?;
        let parameters = if seq.is_empty() {
            None
        } else {
            Some(seq.read_element()?.to_vec())
        };
        seq.finish()?;
        Ok(AlgorithmIdentifier { oid, parameters })
    }

    pub(crate) fn write(&self, writer: &mut Writer) {
        writer.write_sequence(|w| {
            w.write_object_identifier(&self.oid);
            if let Some(parameters) = &self.parameters {
                w.write_raw(parameters);
            }
        });
    }

    /// Reader over the parameters, `None` when they are absent or NULL.
    pub fn parameters(&self) -> Option<Reader<'_>> {
        self.parameters
            .as_deref()
            .map(Reader::new)
            .filter(|r| r.peek_tag() != Some(Tag::Null))
    }

    /// The parameters as an OBJECT IDENTIFIER, as used by EC keys.
    pub fn parameters_oid(&self) -> Result<Option<ObjectIdentifier>> {
        match self.parameters() {
            Some(mut reader) if reader.peek_tag() == Some(Tag::ObjectIdentifier) => {
                let oid = reader.read_object_identifier()?;
                reader.finish()?;
                Ok(Some(oid))
            }
            Some(_) => Ok(None),
            None => Ok(None),
        }
    }
}

impl DecodableFrom<[u8]> for AlgorithmIdentifier {}

impl Decoder<[u8], AlgorithmIdentifier> for [u8] {
    type Error = Error;

    fn decode(&self) -> Result<AlgorithmIdentifier> {
        let mut reader = Reader::new(self);
        let algorithm = AlgorithmIdentifier::read(&mut reader)?;
        reader.finish()?;
        Ok(algorithm)
    }
}
