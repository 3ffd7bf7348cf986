use std::borrow::Borrow;
use std::fmt::{self, Display};
use std::ops::Deref;

use base64::{Engine, engine::general_purpose::STANDARD};

/// ByteString - bencoded string as byte sequence.
///
/// Serializes as bytes, so `encode` writes it as `<len>:<bytes>`. A bare `Vec<u8>`
/// goes through serde as a sequence and would come out as a list of integers.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug, Default)]
pub struct ByteString(Vec<u8>);

impl ByteString {
    pub fn new() -> ByteString {
        ByteString(Vec::new())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for ByteString {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for ByteString {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(value: Vec<u8>) -> Self {
        ByteString(value)
    }
}

impl From<&[u8]> for ByteString {
    fn from(value: &[u8]) -> Self {
        ByteString(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for ByteString {
    fn from(value: &[u8; N]) -> Self {
        ByteString(value.to_vec())
    }
}

impl From<&str> for ByteString {
    fn from(value: &str) -> Self {
        ByteString(value.as_bytes().to_vec())
    }
}

impl From<String> for ByteString {
    fn from(value: String) -> Self {
        ByteString(value.into_bytes())
    }
}

impl From<ByteString> for Vec<u8> {
    fn from(value: ByteString) -> Self {
        value.0
    }
}

impl PartialEq<[u8]> for ByteString {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

impl PartialEq<&[u8]> for ByteString {
    fn eq(&self, other: &&[u8]) -> bool {
        self.0 == *other
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Value {
    Int(i64),
    String(ByteString),
    List(Vec<Value>),
    Dictionary(Dictionary),
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    Integer,
    String,
    List,
    Dictionary,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Integer,
            Self::String(_) => ValueKind::String,
            Self::List(_) => ValueKind::List,
            Self::Dictionary(_) => ValueKind::Dictionary,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::String(s) => Some(s.as_slice()),
            _ => None,
        }
    }

    /// Returns the byte string as UTF-8, if it is one and the bytes are valid text.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Self::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_dict(self) -> Option<Dictionary> {
        match self {
            Self::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a dictionary.
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }

    /// True when every dictionary at any depth has its keys in ascending byte order.
    /// A decoded value with sorted keys re-encodes to its canonical form.
    pub fn has_sorted_keys(&self) -> bool {
        let mut pending = vec![self];
        while let Some(v) = pending.pop() {
            match v {
                Self::List(l) => pending.extend(l),
                Self::Dictionary(d) => {
                    if !d.keys_sorted() {
                        return false;
                    }
                    pending.extend(d.values());
                }
                Self::Int(_) | Self::String(_) => {}
            }
        }
        true
    }
}

/// Dictionary keeps its entries in insertion order and never holds the same key twice.
///
/// Order is the one established at construction: decoding keeps the order found in the
/// input and encoding writes entries back in that same order, sorted or not.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Dictionary {
    entries: Vec<(ByteString, Value)>,
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(cap: usize) -> Dictionary {
        Dictionary {
            entries: Vec::with_capacity(cap),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Inserts an entry, replacing the value of an existing key in place.
    /// Returns the replaced value.
    pub fn insert<K: Into<ByteString>>(&mut self, key: K, value: Value) -> Option<Value> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Appends an entry unless the key is already present, in which case the entry is
    /// handed back untouched.
    pub fn try_insert<K: Into<ByteString>>(
        &mut self,
        key: K,
        value: Value,
    ) -> Result<(), (ByteString, Value)> {
        let key = key.into();
        if self.contains_key(&key) {
            return Err((key, value));
        }
        self.entries.push((key, value));
        Ok(())
    }

    /// Appends without the duplicate scan. Callers guarantee `key` is new.
    pub(crate) fn push_unchecked(&mut self, key: ByteString, value: Value) {
        self.entries.push((key, value));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_slice(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(|(k, _)| k.as_slice())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Whether this dictionary's own keys are in ascending byte order.
    pub fn keys_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].0 < w[1].0)
    }
}

impl<K: Into<ByteString>> FromIterator<(K, Value)> for Dictionary {
    /// Later entries overwrite earlier ones with the same key.
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let mut dict = Dictionary::new();
        for (k, v) in iter {
            dict.insert(k, v);
        }
        dict
    }
}

impl IntoIterator for Dictionary {
    type Item = (ByteString, Value);
    type IntoIter = std::vec::IntoIter<(ByteString, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a (ByteString, Value);
    type IntoIter = std::slice::Iter<'a, (ByteString, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn fmt_bytes(b: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match std::str::from_utf8(b) {
        Ok(s) => write!(f, "{:?}", s),
        Err(_) => write!(f, "b64:{}", STANDARD.encode(b)),
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::String(s) => fmt_bytes(s, f),
            Self::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Self::Dictionary(d) => write!(f, "{}", d),
        }
    }
}

impl Display for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            fmt_bytes(k, f)?;
            write!(f, ": {}", v)?;
        }
        write!(f, "}}")
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::String(value.into())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::String(value.into())
    }
}

impl From<ByteString> for Value {
    fn from(value: ByteString) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl<K: Into<ByteString>> From<Vec<(K, Value)>> for Value {
    fn from(value: Vec<(K, Value)>) -> Self {
        Self::Dictionary(value.into_iter().collect())
    }
}

impl From<Dictionary> for Value {
    fn from(value: Dictionary) -> Self {
        Self::Dictionary(value)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Self::Int(v) if v == other)
    }
}

impl PartialEq<ByteString> for Value {
    fn eq(&self, other: &ByteString) -> bool {
        matches!(self, Self::String(v) if v == other)
    }
}

impl PartialEq<&[u8]> for Value {
    fn eq(&self, other: &&[u8]) -> bool {
        matches!(self, Self::String(v) if v.as_slice() == *other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Self::String(v) if v.as_slice() == other.as_bytes())
    }
}

impl PartialEq<Vec<Value>> for Value {
    fn eq(&self, other: &Vec<Value>) -> bool {
        matches!(self, Self::List(l) if l == other)
    }
}
