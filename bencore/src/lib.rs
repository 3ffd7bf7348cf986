//! Strict bencode decoding and encoding.
//!
//! Bencode is the self-delimiting format used by peer-to-peer metadata (`.torrent`
//! files, tracker responses, DHT messages). It has four kinds of values:
//!
//! | Kind | Form | Example |
//! |------|------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte string | `<length>:<bytes>` | `4:spam` → "spam" |
//! | List | `l<values>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Decoding is all-or-nothing: the whole input must be exactly one well-formed
//! value, anything else is a [`DecodeError`].
//!
//! ```
//! let v = bencore::decode("d3:foo3:bare").unwrap();
//! assert_eq!(v.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
//!
//! assert!(bencore::decode("i042e").is_err());
//! ```
//!
//! Encoding takes anything serde can serialize. Structs come out with their fields
//! sorted by name, maps keep their own order:
//!
//! ```
//! #[derive(serde::Serialize)]
//! struct Record {
//!     string: &'static str,
//!     integer: i64,
//! }
//!
//! let encoded = bencore::encode(&Record { string: "foo", integer: 42 }).unwrap();
//! assert_eq!(encoded, b"d7:integeri42e6:string3:fooe");
//! ```

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod ser;
pub mod value;

mod parser;
mod stack;

use bytes::Bytes;
use serde::Serialize;

pub use config::{Config, Shape};
pub use decoder::Decoder;
pub use encoder::{Encoder, encode_value};
pub use error::{DecodeError, Error, TypeError};
pub use parser::Token;
pub use value::{ByteString, Dictionary, Value, ValueKind};

/// Scalar byte or text forms accepted by [`decode`].
pub trait Input {
    fn as_input(&self) -> Result<&[u8], TypeError>;
}

impl Input for [u8] {
    fn as_input(&self) -> Result<&[u8], TypeError> {
        Ok(self)
    }
}

impl<const N: usize> Input for [u8; N] {
    fn as_input(&self) -> Result<&[u8], TypeError> {
        Ok(self)
    }
}

impl Input for str {
    fn as_input(&self) -> Result<&[u8], TypeError> {
        Ok(self.as_bytes())
    }
}

impl Input for Vec<u8> {
    fn as_input(&self) -> Result<&[u8], TypeError> {
        Ok(self)
    }
}

impl Input for String {
    fn as_input(&self) -> Result<&[u8], TypeError> {
        Ok(self.as_bytes())
    }
}

impl Input for ByteString {
    fn as_input(&self) -> Result<&[u8], TypeError> {
        Ok(self.as_slice())
    }
}

impl Input for Bytes {
    fn as_input(&self) -> Result<&[u8], TypeError> {
        Ok(self)
    }
}

/// Only a byte string holds something to decode, e.g. a bencoded payload nested in
/// another message.
impl Input for Value {
    fn as_input(&self) -> Result<&[u8], TypeError> {
        match self {
            Value::String(s) => Ok(s.as_slice()),
            v => Err(TypeError::NotScalar(v.kind())),
        }
    }
}

/// Decodes one value with the default [`Config`].
pub fn decode<I: Input + ?Sized>(input: &I) -> Result<Value, Error> {
    decode_with(input, &Config::default())
}

pub fn decode_with<I: Input + ?Sized>(input: &I, config: &Config) -> Result<Value, Error> {
    let src = input.as_input()?;

    if config.shape == Shape::Structural {
        return Err(TypeError::UnimplementedShape(config.shape).into());
    }

    tracing::trace!(len = src.len(), max_depth = config.max_depth, "decoding");

    Decoder::new(src)
        .with_max_depth(config.max_depth)
        .decode()
        .map_err(|e| {
            tracing::debug!(error = %e, offset = ?e.offset(), "bencode decode failed");
            e.into()
        })
}

/// Classifies `value` into the bencode model and encodes it.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, Error> {
    let v = to_value(value)?;
    let out = encode_value(&v);
    tracing::trace!(len = out.len(), kind = %v.kind(), "encoded");
    Ok(out)
}

pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, Error> {
    Ok(ser::to_value(value)?)
}
