use bytes::{BufMut, Bytes, BytesMut};

use crate::value::Value;

/// Writes values in bencode form into a growable buffer.
///
/// Dictionaries are written in their own entry order. Nothing is re-sorted here, so a
/// dictionary built out of canonical order comes out non-canonical (but decodable).
pub struct Encoder {
    buf: BytesMut,
}

impl Encoder {
    pub fn new() -> Encoder {
        Encoder {
            buf: BytesMut::new(),
        }
    }

    pub fn with_capacity(cap: usize) -> Encoder {
        Encoder {
            buf: BytesMut::with_capacity(cap),
        }
    }

    pub fn encode_value(&mut self, v: &Value) {
        match v {
            Value::Int(i) => self.put_int(*i),
            Value::String(s) => self.put_bytes(s),
            Value::List(l) => {
                self.begin_list();
                for item in l {
                    self.encode_value(item);
                }
                self.end();
            }
            Value::Dictionary(d) => {
                self.begin_dict();
                for (k, item) in d.iter() {
                    self.put_bytes(k);
                    self.encode_value(item);
                }
                self.end();
            }
        }
    }

    pub fn put_int(&mut self, i: i64) {
        self.buf.put_u8(b'i');
        self.buf.put_slice(i.to_string().as_bytes());
        self.buf.put_u8(b'e');
    }

    pub fn put_bytes(&mut self, b: &[u8]) {
        self.buf.put_slice(b.len().to_string().as_bytes());
        self.buf.put_u8(b':');
        self.buf.put_slice(b);
    }

    pub fn begin_list(&mut self) {
        self.buf.put_u8(b'l');
    }

    pub fn begin_dict(&mut self) {
        self.buf.put_u8(b'd');
    }

    pub fn end(&mut self) {
        self.buf.put_u8(b'e');
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Encoder::new()
    }
}

/// Encodes a value. Total: every [`Value`] has a bencode form.
pub fn encode_value(v: &Value) -> Vec<u8> {
    let mut enc = Encoder::new();
    enc.encode_value(v);
    enc.finish().into()
}
