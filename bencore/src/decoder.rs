use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::DecodeError;
use crate::parser::{self, Token};
use crate::stack::Stack;
use crate::value::Value;

/// Cursor over bencoded input. Yields tokens one at a time and assembles them into
/// a single top-level [`Value`] with [`Decoder::decode`].
pub struct Decoder<'a> {
    src: &'a [u8],
    pos: usize,
    max_depth: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(src: &'a [u8]) -> Decoder<'a> {
        Decoder {
            src,
            pos: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Decoder<'a> {
        self.max_depth = max_depth;
        self
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_finished(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Decodes exactly one entity and requires the input to end right after it.
    pub fn decode(mut self) -> Result<Value, DecodeError> {
        let mut stack = Stack::new(self.max_depth);

        let value = loop {
            if self.is_finished() {
                return Err(stack.unterminated(self.pos));
            }

            let pos = self.pos;
            let finished = match self.next_token()? {
                Token::Int(i) => stack.push_value(Value::Int(i), pos)?,
                Token::String(s) => stack.push_value(Value::String(s.into()), pos)?,
                Token::BeginList(p) => {
                    stack.push_list(p)?;
                    None
                }
                Token::BeginDict(p) => {
                    stack.push_dict(p)?;
                    None
                }
                Token::EndObject(p) => stack.pop_container(p)?,
            };

            if let Some(v) = finished {
                break v;
            }
        };

        if !self.is_finished() {
            return Err(DecodeError::TrailingData(self.pos));
        }

        Ok(value)
    }

    pub fn next_token(&mut self) -> Result<Token<'a>, DecodeError> {
        let (token, size) = self.peek_token()?;
        self.pos += size;
        Ok(token)
    }

    pub fn peek_token(&self) -> Result<(Token<'a>, usize), DecodeError> {
        match self.current_byte()? {
            b'i' => parser::parse_int(self.src, self.pos),
            b'0'..=b'9' => parser::parse_string(self.src, self.pos),
            b'l' => Ok((Token::BeginList(self.pos), 1)),
            b'd' => Ok((Token::BeginDict(self.pos), 1)),
            b'e' => Ok((Token::EndObject(self.pos), 1)),
            v => Err(DecodeError::UnknownEntity(self.pos, v as char)),
        }
    }

    fn current_byte(&self) -> Result<u8, DecodeError> {
        self.src
            .get(self.pos)
            .copied()
            .ok_or(DecodeError::UnexpectedEof(self.pos))
    }
}

#[cfg(test)]
mod test_decode {
    use super::*;
    use crate::value::Dictionary;

    fn decode(src: &[u8]) -> Result<Value, DecodeError> {
        Decoder::new(src).decode()
    }

    #[test]
    fn single_valid_int_token() {
        let input = b"i4e";
        let mut dec = Decoder::new(input);

        assert_eq!(dec.next_token().unwrap(), Token::Int(4));
        assert_eq!(dec.position(), 3)
    }

    #[test]
    fn multiple_valid_tokens() {
        let input = b"i42e4:testle";
        let mut dec = Decoder::new(input);

        assert_eq!(dec.next_token().unwrap(), Token::Int(42));
        assert_eq!(dec.next_token().unwrap(), Token::String(b"test"));
        assert_eq!(dec.next_token().unwrap(), Token::BeginList(10));
        assert_eq!(dec.next_token().unwrap(), Token::EndObject(11));
        assert!(dec.is_finished());
        assert_eq!(dec.next_token().unwrap_err(), DecodeError::UnexpectedEof(12));
    }

    #[test]
    fn valid_flat_list() {
        assert_eq!(
            decode(b"li42e4:teste").unwrap(),
            Value::List(vec![Value::Int(42), Value::from("test")])
        );
    }

    #[test]
    fn valid_flat_dict() {
        let expected: Dictionary = [("test", Value::Int(42))].into_iter().collect();
        assert_eq!(decode(b"d4:testi42ee").unwrap(), Value::Dictionary(expected));
    }

    #[test]
    fn dict_keeps_input_order() {
        let v = decode(b"d1:bi1e1:ai2ee").unwrap();
        let keys: Vec<&[u8]> = v.as_dict().unwrap().keys().collect();
        assert_eq!(keys, vec![&b"b"[..], &b"a"[..]]);
    }

    #[test]
    fn nested_containers() {
        let v = decode(b"d4:listl4:spamd0:lee5:emptydee").unwrap();
        let list = v.get(b"list").and_then(Value::as_list).unwrap();
        assert_eq!(list[0], "spam");
        assert_eq!(list[1].get(b""), Some(&Value::List(vec![])));
        assert_eq!(v.get(b"empty"), Some(&Value::Dictionary(Dictionary::new())));
    }

    #[test]
    fn error_unterminated_containers() {
        assert_eq!(
            decode(b"l3:foo3:bar").unwrap_err(),
            DecodeError::UnterminatedList(0)
        );
        assert_eq!(
            decode(b"d3:foo3:bar").unwrap_err(),
            DecodeError::UnterminatedDict(0)
        );
        assert_eq!(
            decode(b"ld3:fooe").unwrap_err(),
            DecodeError::OrphanedKey(7)
        );
        assert_eq!(decode(b"lld").unwrap_err(), DecodeError::UnterminatedDict(2));
    }

    #[test]
    fn error_dict_keys() {
        assert_eq!(
            decode(b"d3:foo3:bar3:foo3:bare").unwrap_err(),
            DecodeError::DuplicateKey(11)
        );
        assert_eq!(
            decode(b"di42e3:bare").unwrap_err(),
            DecodeError::NonStringKey(1)
        );
        assert_eq!(
            decode(b"dle3:bare").unwrap_err(),
            DecodeError::NonStringKey(1)
        );
    }

    #[test]
    fn error_unknown_entity() {
        assert_eq!(
            decode(b"a3:fooe").unwrap_err(),
            DecodeError::UnknownEntity(0, 'a')
        );
        assert_eq!(decode(b"e").unwrap_err(), DecodeError::UnknownEntity(0, 'e'));
        assert_eq!(
            decode(b"l-e").unwrap_err(),
            DecodeError::UnknownEntity(1, '-')
        );
    }

    #[test]
    fn error_trailing_data() {
        assert_eq!(
            decode(b"3:foo3:bar").unwrap_err(),
            DecodeError::TrailingData(5)
        );
        assert_eq!(decode(b"i42ee").unwrap_err(), DecodeError::TrailingData(4));
    }

    #[test]
    fn error_empty_input() {
        assert_eq!(decode(b"").unwrap_err(), DecodeError::UnexpectedEof(0));
    }

    #[test]
    fn depth_limit() {
        let deep = [b"l".repeat(10), b"e".repeat(10)].concat();
        assert!(Decoder::new(&deep).with_max_depth(10).decode().is_ok());
        assert_eq!(
            Decoder::new(&deep).with_max_depth(9).decode().unwrap_err(),
            DecodeError::NestingTooDeep(9)
        );
    }

    #[test]
    fn deep_input_does_not_recurse() {
        let deep = [b"l".repeat(100_000), b"e".repeat(100_000)].concat();
        let v = Decoder::new(&deep).with_max_depth(100_000).decode().unwrap();
        // flatten before drop, dropping a 100k-deep value recursively would
        // overflow the test thread's stack
        let mut cur = v;
        let mut depth = 0;
        while let Value::List(mut l) = cur {
            depth += 1;
            cur = match l.pop() {
                Some(inner) => inner,
                None => break,
            };
        }
        assert_eq!(depth, 100_000);
    }
}
