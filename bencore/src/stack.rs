use std::collections::HashSet;

use crate::error::DecodeError;
use crate::value::{ByteString, Dictionary, Value};

/// Open containers of the value being decoded, innermost last.
#[derive(Debug)]
pub struct Stack {
    stack: Vec<Container>,
    max_depth: usize,
}

impl Stack {
    pub fn new(max_depth: usize) -> Stack {
        Stack {
            stack: Vec::new(),
            max_depth,
        }
    }

    /// Adds a finished value to the innermost container.
    /// If stack is empty, returns the value back
    pub fn push_value(&mut self, v: Value, pos: usize) -> Result<Option<Value>, DecodeError> {
        match self.stack.last_mut() {
            Some(top) => {
                top.push_value(v, pos)?;
                Ok(None)
            }
            None => Ok(Some(v)),
        }
    }

    pub fn push_list(&mut self, pos: usize) -> Result<(), DecodeError> {
        self.push_container(Container::List(pos, Vec::new()))
    }

    pub fn push_dict(&mut self, pos: usize) -> Result<(), DecodeError> {
        self.push_container(Container::Dict(pos, DictBuilder::new()))
    }

    fn push_container(&mut self, c: Container) -> Result<(), DecodeError> {
        if self.stack.len() >= self.max_depth {
            return Err(DecodeError::NestingTooDeep(self.max_depth));
        }
        if let Some(Container::Dict(_, d)) = self.stack.last() {
            d.expect_value(c.pos())?;
        }
        self.stack.push(c);
        Ok(())
    }

    /// Closes the innermost container, which `e` at `pos` terminates, and hands it to
    /// its parent. Returns it when it was the outermost one.
    pub fn pop_container(&mut self, pos: usize) -> Result<Option<Value>, DecodeError> {
        match self.stack.pop() {
            Some(top) => self.push_value(top.finish(pos)?, pos),
            None => Err(DecodeError::UnknownEntity(pos, 'e')),
        }
    }

    /// The error to report when input ends while containers are still open.
    pub fn unterminated(&self, pos: usize) -> DecodeError {
        match self.stack.last() {
            Some(Container::List(open, _)) => DecodeError::UnterminatedList(*open),
            Some(Container::Dict(open, _)) => DecodeError::UnterminatedDict(*open),
            None => DecodeError::UnexpectedEof(pos),
        }
    }
}

#[derive(Debug)]
enum Container {
    List(usize, Vec<Value>),
    Dict(usize, DictBuilder),
}

impl Container {
    fn pos(&self) -> usize {
        match self {
            Self::List(pos, _) | Self::Dict(pos, _) => *pos,
        }
    }

    fn push_value(&mut self, v: Value, pos: usize) -> Result<(), DecodeError> {
        match self {
            Self::List(_, l) => {
                l.push(v);
                Ok(())
            }
            Self::Dict(_, d) => d.insert(v, pos),
        }
    }

    fn finish(self, pos: usize) -> Result<Value, DecodeError> {
        match self {
            Self::List(_, l) => Ok(l.into()),
            Self::Dict(_, d) => Ok(d.finish(pos)?.into()),
        }
    }
}

#[derive(Debug)]
struct DictBuilder {
    dict: Dictionary,
    seen: HashSet<ByteString>,
    pending_key: Option<ByteString>,
}

impl DictBuilder {
    fn new() -> DictBuilder {
        DictBuilder {
            dict: Dictionary::new(),
            seen: HashSet::new(),
            pending_key: None,
        }
    }

    /// A container may only open where a value is expected, never in key position.
    fn expect_value(&self, pos: usize) -> Result<(), DecodeError> {
        match self.pending_key {
            Some(_) => Ok(()),
            None => Err(DecodeError::NonStringKey(pos)),
        }
    }

    fn insert(&mut self, v: Value, pos: usize) -> Result<(), DecodeError> {
        match self.pending_key.take() {
            None => match v {
                Value::String(s) => {
                    if !self.seen.insert(s.clone()) {
                        return Err(DecodeError::DuplicateKey(pos));
                    }
                    self.pending_key = Some(s);
                    Ok(())
                }
                _ => Err(DecodeError::NonStringKey(pos)),
            },
            Some(k) => {
                self.dict.push_unchecked(k, v);
                Ok(())
            }
        }
    }

    fn finish(self, pos: usize) -> Result<Dictionary, DecodeError> {
        if self.pending_key.is_some() {
            return Err(DecodeError::OrphanedKey(pos));
        }
        Ok(self.dict)
    }
}
