//! Classifies native Rust values into the bencode [`Value`] model through serde.
//!
//! Dispatch follows the declared type reported to the serializer, never the content:
//! a `&str` holding `"1"` becomes a byte string, an `i64` holding `1` an integer.
//!
//! | Native shape | Value |
//! |--------------|-------|
//! | signed/unsigned integers | `Int` (outside `i64` is an error) |
//! | `str`, `char`, [`ByteString`], `Bytes`, `serde_bytes` types | `String` |
//! | sequences, tuples, tuple structs | `List` |
//! | maps | `Dictionary`, in the map's own iteration order |
//! | structs | `Dictionary`, fields sorted by name |
//! | enum variants | variant name, or `{variant: payload}` |
//!
//! `bool`, floats, `None` and unit values have no bencode form and are rejected.
//!
//! Serde hands `Vec<u8>`, `&[u8]` and `[u8; N]` over as sequences of `u8`, so they
//! encode as lists of integers. Binary data meant as a byte string goes in a
//! [`ByteString`], or in a field marked `#[serde(with = "serde_bytes")]`.

use std::collections::HashSet;

use serde::ser::{self, Impossible, Serialize, SerializeMap, Serializer};

use crate::error::TypeError;
use crate::value::{ByteString, Dictionary, Value};

/// Converts any serializable value into a [`Value`].
pub fn to_value<T: ?Sized + Serialize>(value: &T) -> Result<Value, TypeError> {
    value.serialize(ValueSerializer)
}

pub struct ValueSerializer;

fn int_out_of_range<T: ToString>(v: T) -> TypeError {
    TypeError::IntOutOfRange(v.to_string())
}

fn wrap_variant(variant: &'static str, v: Value) -> Value {
    let mut d = Dictionary::with_capacity(1);
    d.push_unchecked(variant.into(), v);
    Value::Dictionary(d)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = TypeError;

    type SerializeSeq = SerializeList;
    type SerializeTuple = SerializeList;
    type SerializeTupleStruct = SerializeList;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeDictionary;
    type SerializeStruct = SerializeRecord;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, _v: bool) -> Result<Value, TypeError> {
        Err(TypeError::Unsupported("bool"))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, TypeError> {
        Ok(Value::Int(v.into()))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, TypeError> {
        Ok(Value::Int(v.into()))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, TypeError> {
        Ok(Value::Int(v.into()))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, TypeError> {
        Ok(Value::Int(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, TypeError> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| int_out_of_range(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, TypeError> {
        Ok(Value::Int(v.into()))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, TypeError> {
        Ok(Value::Int(v.into()))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, TypeError> {
        Ok(Value::Int(v.into()))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, TypeError> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| int_out_of_range(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, TypeError> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| int_out_of_range(v))
    }

    fn serialize_f32(self, _v: f32) -> Result<Value, TypeError> {
        Err(TypeError::Unsupported("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Value, TypeError> {
        Err(TypeError::Unsupported("f64"))
    }

    fn serialize_char(self, v: char) -> Result<Value, TypeError> {
        let mut buf = [0u8; 4];
        Ok(Value::from(&*v.encode_utf8(&mut buf)))
    }

    fn serialize_str(self, v: &str) -> Result<Value, TypeError> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, TypeError> {
        Ok(Value::from(v))
    }

    fn serialize_none(self) -> Result<Value, TypeError> {
        Err(TypeError::Unsupported("none"))
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value, TypeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, TypeError> {
        Err(TypeError::Unsupported("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, TypeError> {
        Err(TypeError::Unsupported("unit struct"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, TypeError> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, TypeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, TypeError> {
        Ok(wrap_variant(variant, value.serialize(self)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeList, TypeError> {
        Ok(SerializeList {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeList, TypeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeList, TypeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant, TypeError> {
        Ok(SerializeTupleVariant {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeDictionary, TypeError> {
        let cap = len.unwrap_or(0);
        Ok(SerializeDictionary {
            dict: Dictionary::with_capacity(cap),
            seen: HashSet::with_capacity(cap),
            pending_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeRecord, TypeError> {
        Ok(SerializeRecord {
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant, TypeError> {
        Ok(SerializeStructVariant {
            variant,
            record: self.serialize_struct(name, len)?,
        })
    }
}

pub struct SerializeList {
    items: Vec<Value>,
}

impl ser::SerializeSeq for SerializeList {
    type Ok = Value;
    type Error = TypeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), TypeError> {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, TypeError> {
        Ok(Value::List(self.items))
    }
}

impl ser::SerializeTuple for SerializeList {
    type Ok = Value;
    type Error = TypeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), TypeError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, TypeError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeList {
    type Ok = Value;
    type Error = TypeError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), TypeError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, TypeError> {
        ser::SerializeSeq::end(self)
    }
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    items: Vec<Value>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = TypeError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), TypeError> {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, TypeError> {
        Ok(wrap_variant(self.variant, Value::List(self.items)))
    }
}

/// Map entries are kept in the order the map yields them.
pub struct SerializeDictionary {
    dict: Dictionary,
    seen: HashSet<ByteString>,
    pending_key: Option<ByteString>,
}

impl ser::SerializeMap for SerializeDictionary {
    type Ok = Value;
    type Error = TypeError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), TypeError> {
        let key = key.serialize(KeySerializer)?;
        if !self.seen.insert(key.clone()) {
            return Err(TypeError::DuplicateKey(
                String::from_utf8_lossy(&key).into_owned(),
            ));
        }
        self.pending_key = Some(key);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), TypeError> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| TypeError::Custom("map value serialized before its key".into()))?;
        self.dict.push_unchecked(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, TypeError> {
        Ok(Value::Dictionary(self.dict))
    }
}

/// Struct fields, collected in declaration order and sorted by name on `end`.
pub struct SerializeRecord {
    fields: Vec<(&'static str, Value)>,
}

impl SerializeRecord {
    fn into_dictionary(mut self) -> Result<Dictionary, TypeError> {
        self.fields
            .sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));

        let mut dict = Dictionary::with_capacity(self.fields.len());
        for (name, v) in self.fields {
            dict.try_insert(name, v)
                .map_err(|_| TypeError::DuplicateKey(name.to_string()))?;
        }
        Ok(dict)
    }
}

impl ser::SerializeStruct for SerializeRecord {
    type Ok = Value;
    type Error = TypeError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), TypeError> {
        self.fields.push((key, value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Value, TypeError> {
        Ok(Value::Dictionary(self.into_dictionary()?))
    }
}

pub struct SerializeStructVariant {
    variant: &'static str,
    record: SerializeRecord,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = TypeError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), TypeError> {
        ser::SerializeStruct::serialize_field(&mut self.record, key, value)
    }

    fn end(self) -> Result<Value, TypeError> {
        let dict = self.record.into_dictionary()?;
        Ok(wrap_variant(self.variant, Value::Dictionary(dict)))
    }
}

/// Dictionary keys: text and bytes as-is, integers as their decimal text.
struct KeySerializer;

impl KeySerializer {
    fn decimal<T: ToString>(v: T) -> Result<ByteString, TypeError> {
        Ok(v.to_string().into())
    }
}

impl ser::Serializer for KeySerializer {
    type Ok = ByteString;
    type Error = TypeError;

    type SerializeSeq = Impossible<ByteString, TypeError>;
    type SerializeTuple = Impossible<ByteString, TypeError>;
    type SerializeTupleStruct = Impossible<ByteString, TypeError>;
    type SerializeTupleVariant = Impossible<ByteString, TypeError>;
    type SerializeMap = Impossible<ByteString, TypeError>;
    type SerializeStruct = Impossible<ByteString, TypeError>;
    type SerializeStructVariant = Impossible<ByteString, TypeError>;

    fn serialize_bool(self, _v: bool) -> Result<ByteString, TypeError> {
        Err(TypeError::UnsupportedKey("bool"))
    }

    fn serialize_i8(self, v: i8) -> Result<ByteString, TypeError> {
        Self::decimal(v)
    }

    fn serialize_i16(self, v: i16) -> Result<ByteString, TypeError> {
        Self::decimal(v)
    }

    fn serialize_i32(self, v: i32) -> Result<ByteString, TypeError> {
        Self::decimal(v)
    }

    fn serialize_i64(self, v: i64) -> Result<ByteString, TypeError> {
        Self::decimal(v)
    }

    fn serialize_i128(self, v: i128) -> Result<ByteString, TypeError> {
        Self::decimal(v)
    }

    fn serialize_u8(self, v: u8) -> Result<ByteString, TypeError> {
        Self::decimal(v)
    }

    fn serialize_u16(self, v: u16) -> Result<ByteString, TypeError> {
        Self::decimal(v)
    }

    fn serialize_u32(self, v: u32) -> Result<ByteString, TypeError> {
        Self::decimal(v)
    }

    fn serialize_u64(self, v: u64) -> Result<ByteString, TypeError> {
        Self::decimal(v)
    }

    fn serialize_u128(self, v: u128) -> Result<ByteString, TypeError> {
        Self::decimal(v)
    }

    fn serialize_f32(self, _v: f32) -> Result<ByteString, TypeError> {
        Err(TypeError::UnsupportedKey("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<ByteString, TypeError> {
        Err(TypeError::UnsupportedKey("f64"))
    }

    fn serialize_char(self, v: char) -> Result<ByteString, TypeError> {
        let mut buf = [0u8; 4];
        Ok(ByteString::from(&*v.encode_utf8(&mut buf)))
    }

    fn serialize_str(self, v: &str) -> Result<ByteString, TypeError> {
        Ok(v.into())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<ByteString, TypeError> {
        Ok(v.into())
    }

    fn serialize_none(self) -> Result<ByteString, TypeError> {
        Err(TypeError::UnsupportedKey("none"))
    }

    fn serialize_some<T: ?Sized + Serialize>(self, _value: &T) -> Result<ByteString, TypeError> {
        Err(TypeError::UnsupportedKey("option"))
    }

    fn serialize_unit(self) -> Result<ByteString, TypeError> {
        Err(TypeError::UnsupportedKey("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<ByteString, TypeError> {
        Err(TypeError::UnsupportedKey("unit struct"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<ByteString, TypeError> {
        Ok(variant.into())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<ByteString, TypeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<ByteString, TypeError> {
        Err(TypeError::UnsupportedKey("enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, TypeError> {
        Err(TypeError::UnsupportedKey("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, TypeError> {
        Err(TypeError::UnsupportedKey("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, TypeError> {
        Err(TypeError::UnsupportedKey("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, TypeError> {
        Err(TypeError::UnsupportedKey("enum variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, TypeError> {
        Err(TypeError::UnsupportedKey("map"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, TypeError> {
        Err(TypeError::UnsupportedKey("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, TypeError> {
        Err(TypeError::UnsupportedKey("enum variant"))
    }
}

/// Byte-string key of a [`Dictionary`] entry.
impl Serialize for ByteString {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_bytes::serialize(self.as_slice(), serializer)
    }
}

impl Serialize for Dictionary {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(serde_bytes::Bytes::new(k), v)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::String(s) => s.serialize(serializer),
            Value::List(l) => l.serialize(serializer),
            Value::Dictionary(d) => d.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod test_ser {
    use std::collections::BTreeMap;

    use bytes::Bytes;
    use serde::Serialize;

    use super::*;
    use crate::encoder::encode_value;

    /// Map serialized in exactly the order given.
    struct Ordered<K, V>(Vec<(K, V)>);

    impl<K: Serialize, V: Serialize> Serialize for Ordered<K, V> {
        fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.0.len()))?;
            for (k, v) in &self.0 {
                map.serialize_entry(k, v)?;
            }
            map.end()
        }
    }

    fn encode<T: ?Sized + Serialize>(v: &T) -> Result<Vec<u8>, TypeError> {
        to_value(v).map(|v| encode_value(&v))
    }

    #[test]
    fn scalars() {
        assert_eq!(encode(&42u8).unwrap(), b"i42e");
        assert_eq!(encode(&-42i32).unwrap(), b"i-42e");
        assert_eq!(encode(&0i64).unwrap(), b"i0e");
        assert_eq!(encode("string").unwrap(), b"6:string");
        assert_eq!(encode(&'é').unwrap(), "2:é".as_bytes());
        assert_eq!(
            encode(&Bytes::from_static(b"\x00\xff")).unwrap(),
            b"2:\x00\xff"
        );
    }

    #[test]
    fn byte_strings() {
        assert_eq!(encode(&ByteString::from(b"foo")).unwrap(), b"3:foo");
        assert_eq!(
            encode(&ByteString::from(vec![0xffu8, 0])).unwrap(),
            b"2:\xff\x00"
        );
        assert_eq!(encode(serde_bytes::Bytes::new(b"ab")).unwrap(), b"2:ab");
        assert_eq!(
            encode(&serde_bytes::ByteBuf::from(vec![1u8])).unwrap(),
            b"1:\x01"
        );
        // a bare byte vector is a sequence as far as serde is concerned
        assert_eq!(encode(&vec![1u8, 2]).unwrap(), b"li1ei2ee");
    }

    #[test]
    fn byte_string_keys() {
        let m = Ordered(vec![(ByteString::from(b"\x00k"), 1)]);
        assert_eq!(encode(&m).unwrap(), b"d2:\x00ki1ee");
    }

    #[test]
    fn numeric_text_stays_text() {
        assert_eq!(encode("1").unwrap(), b"1:1");
        assert_eq!(encode(&String::from("42")).unwrap(), b"2:42");
    }

    #[test]
    fn list() {
        assert_eq!(encode(&["foo", "bar"]).unwrap(), b"l3:foo3:bare");
        assert_eq!(encode(&vec![1u32, 2, 3]).unwrap(), b"li1ei2ei3ee");
        assert_eq!(encode(&(1, "a")).unwrap(), b"li1e1:ae");
        assert_eq!(encode(&Vec::<i64>::new()).unwrap(), b"le");
    }

    #[test]
    fn map_keeps_its_order() {
        let m = Ordered(vec![("foo", "bar")]);
        assert_eq!(encode(&m).unwrap(), b"d3:foo3:bare");

        let m = Ordered(vec![("zz", 1), ("aa", 2)]);
        assert_eq!(encode(&m).unwrap(), b"d2:zzi1e2:aai2ee");
    }

    #[test]
    fn numeric_string_keys_and_values() {
        let m = Ordered(vec![
            ("Numeric string value", "1"),
            ("1", "Numeric string key"),
        ]);
        assert_eq!(
            encode(&m).unwrap(),
            b"d20:Numeric string value1:11:118:Numeric string keye"
        );
    }

    #[test]
    fn integer_keys_become_text() {
        let m: BTreeMap<u32, &str> = [(10, "b"), (1, "a"), (2, "c")].into_iter().collect();
        // BTreeMap yields numeric order, which is kept as-is
        assert_eq!(encode(&m).unwrap(), b"d1:11:a1:21:c2:101:be");

        let m = Ordered(vec![(-1i64, "x")]);
        assert_eq!(encode(&m).unwrap(), b"d2:-11:xe");
    }

    #[test]
    fn colliding_keys_fail() {
        let m = Ordered(vec![("a", 1), ("a", 2)]);
        assert_eq!(
            to_value(&m).unwrap_err(),
            TypeError::DuplicateKey("a".into())
        );
    }

    #[test]
    fn unsupported_keys_fail() {
        let m = Ordered(vec![(true, 1)]);
        assert_eq!(to_value(&m).unwrap_err(), TypeError::UnsupportedKey("bool"));

        let m = Ordered(vec![(vec![1], 1)]);
        assert_eq!(
            to_value(&m).unwrap_err(),
            TypeError::UnsupportedKey("sequence")
        );
    }

    #[derive(Serialize)]
    struct Record {
        string: String,
        integer: i64,
    }

    #[test]
    fn record_fields_are_sorted() {
        let r = Record {
            string: "foo".into(),
            integer: 42,
        };
        assert_eq!(encode(&r).unwrap(), b"d7:integeri42e6:string3:fooe");
    }

    #[derive(Serialize)]
    struct Nested {
        zeta: Vec<Record>,
        #[serde(rename = "Alpha")]
        alpha: u8,
        #[serde(with = "serde_bytes")]
        blob: Vec<u8>,
    }

    #[test]
    fn nested_records() {
        let n = Nested {
            zeta: vec![Record {
                string: "s".into(),
                integer: 1,
            }],
            alpha: 7,
            blob: vec![0, 1],
        };
        // uppercase sorts before lowercase by byte value
        assert_eq!(
            encode(&n).unwrap(),
            b"d5:Alphai7e4:blob2:\x00\x014:zetald7:integeri1e6:string1:seee"
        );
    }

    #[derive(Serialize)]
    enum Message {
        Ping,
        Get(u32),
        Pair(u8, u8),
        Announce { port: u16, id: String },
    }

    #[test]
    fn enums() {
        assert_eq!(encode(&Message::Ping).unwrap(), b"4:Ping");
        assert_eq!(encode(&Message::Get(3)).unwrap(), b"d3:Geti3ee");
        assert_eq!(encode(&Message::Pair(1, 2)).unwrap(), b"d4:Pairli1ei2eee");
        assert_eq!(
            encode(&Message::Announce {
                port: 6881,
                id: "x".into()
            })
            .unwrap(),
            b"d8:Announced2:id1:x4:porti6881eeee"
        );
    }

    #[test]
    fn unsupported_values_fail() {
        assert_eq!(to_value(&true).unwrap_err(), TypeError::Unsupported("bool"));
        assert_eq!(to_value(&1.5f64).unwrap_err(), TypeError::Unsupported("f64"));
        assert_eq!(
            to_value(&Option::<i64>::None).unwrap_err(),
            TypeError::Unsupported("none")
        );
        assert_eq!(to_value(&()).unwrap_err(), TypeError::Unsupported("unit"));
        assert_eq!(to_value(&Some(5)).unwrap(), Value::Int(5));
    }

    #[test]
    fn integers_out_of_range_fail() {
        assert_eq!(
            to_value(&u64::MAX).unwrap_err(),
            TypeError::IntOutOfRange(u64::MAX.to_string())
        );
        assert_eq!(
            to_value(&(i64::MAX as u64)).unwrap(),
            Value::Int(i64::MAX)
        );
        assert!(to_value(&i128::MIN).is_err());
    }

    #[test]
    fn value_passes_through_unchanged() {
        let v = Value::from(vec![
            (b"z".to_vec(), Value::List(vec![Value::Int(1), Value::from("x")])),
            (b"a".to_vec(), Value::from(vec![0xffu8])),
        ]);
        assert_eq!(to_value(&v).unwrap(), v);
        assert_eq!(encode(&v).unwrap(), encode_value(&v));
    }
}
