use std::fmt::Display;

use thiserror::Error;

use crate::config::Shape;
use crate::value::ValueKind;

/// Grammar violations found while decoding. Every variant carries the byte offset
/// at which the violation was detected.
#[derive(PartialEq, Debug, Error)]
pub enum DecodeError {
    #[error("unterminated string at index {0}: expected {1} bytes, got {2}")]
    UnterminatedString(usize, usize, usize),
    #[error("zero-padded string length at index {0}")]
    ZeroPaddedLength(usize),
    #[error("string length at index {0} is too large")]
    InvalidLength(usize),
    #[error("missing colon in string at index {0}")]
    MissingColon(usize),
    #[error("unterminated integer at index {0}")]
    UnterminatedInt(usize),
    #[error("empty integer at index {0}")]
    EmptyInt(usize),
    #[error("non-digit character in integer at index {0}")]
    InvalidInt(usize),
    #[error("zero-padded integer at index {0}")]
    ZeroPaddedInt(usize),
    #[error("negative zero at index {0}")]
    NegativeZero(usize),
    #[error("integer at index {0} does not fit in 64 bits")]
    IntOverflow(usize),
    #[error("unterminated list opened at index {0}")]
    UnterminatedList(usize),
    #[error("unterminated dictionary opened at index {0}")]
    UnterminatedDict(usize),
    #[error("dictionary key at index {0} is not a string")]
    NonStringKey(usize),
    #[error("duplicate dictionary key at index {0}")]
    DuplicateKey(usize),
    #[error("dictionary key has no value at index {0}")]
    OrphanedKey(usize),
    #[error("unknown entity {1:?} at index {0}")]
    UnknownEntity(usize, char),
    #[error("trailing data at index {0}")]
    TrailingData(usize),
    #[error("unexpected end of input at index {0}")]
    UnexpectedEof(usize),
    #[error("nesting deeper than {0} levels")]
    NestingTooDeep(usize),
}

impl DecodeError {
    /// Byte offset into the input where decoding stopped.
    pub fn offset(&self) -> Option<usize> {
        match *self {
            Self::UnterminatedString(pos, _, _)
            | Self::ZeroPaddedLength(pos)
            | Self::InvalidLength(pos)
            | Self::MissingColon(pos)
            | Self::UnterminatedInt(pos)
            | Self::EmptyInt(pos)
            | Self::InvalidInt(pos)
            | Self::ZeroPaddedInt(pos)
            | Self::NegativeZero(pos)
            | Self::IntOverflow(pos)
            | Self::UnterminatedList(pos)
            | Self::UnterminatedDict(pos)
            | Self::NonStringKey(pos)
            | Self::DuplicateKey(pos)
            | Self::OrphanedKey(pos)
            | Self::UnknownEntity(pos, _)
            | Self::TrailingData(pos)
            | Self::UnexpectedEof(pos) => Some(pos),
            Self::NestingTooDeep(_) => None,
        }
    }
}

/// Values whose type has no place in the bencode value model.
#[derive(PartialEq, Debug, Error)]
pub enum TypeError {
    #[error("expected a byte string to decode, got {0}")]
    NotScalar(ValueKind),
    #[error("decoding into {0} shape is not implemented")]
    UnimplementedShape(Shape),
    #[error("{0} cannot be encoded")]
    Unsupported(&'static str),
    #[error("{0} cannot be used as a dictionary key")]
    UnsupportedKey(&'static str),
    #[error("duplicate dictionary key {0:?}")]
    DuplicateKey(String),
    #[error("integer {0} does not fit in 64 bits")]
    IntOutOfRange(String),
    #[error("{0}")]
    Custom(String),
}

impl serde::ser::Error for TypeError {
    fn custom<T: Display>(msg: T) -> Self {
        TypeError::Custom(msg.to_string())
    }
}

#[derive(PartialEq, Debug, Error)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(#[from] DecodeError),
    #[error("type error: {0}")]
    Type(#[from] TypeError),
}
