use thiserror::Error;

use crate::Tag;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("unexpected tag: expected {expected}, got {actual}")]
    UnexpectedTag { expected: Tag, actual: Tag },
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("declared length {declared} exceeds remaining {remaining} bytes")]
    Truncated { declared: u64, remaining: usize },
    #[error("indefinite length is not allowed in DER")]
    IndefiniteLength,
    #[error("length field is too long")]
    LengthTooLong,
    #[error("high tag number form is not supported")]
    HighTagNumber,
    #[error("INTEGER has no content")]
    EmptyInteger,
    #[error("negative INTEGER where an unsigned value is required")]
    NegativeInteger,
    #[error("INTEGER does not fit in 64 bits")]
    IntegerOverflow,
    #[error("NULL must have no content")]
    InvalidNull,
    #[error("invalid BIT STRING: {0}")]
    InvalidBitString(String),
    #[error("invalid object identifier: {0}")]
    InvalidObjectIdentifier(String),
    #[error("{0} trailing bytes after the last element")]
    TrailingData(usize),
    #[error("parser error {0:?}")]
    Parser(nom::error::ErrorKind),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<nom::Err<nom::error::Error<&[u8]>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        match err {
            nom::Err::Incomplete(_) => Error::UnexpectedEnd,
            nom::Err::Error(e) | nom::Err::Failure(e) => match e.code {
                nom::error::ErrorKind::Eof => Error::UnexpectedEnd,
                nom::error::ErrorKind::Tag => Error::HighTagNumber,
                nom::error::ErrorKind::TooLarge => Error::LengthTooLong,
                kind => Error::Parser(kind),
            },
        }
    }
}
