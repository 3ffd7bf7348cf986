use strum_macros::{Display, EnumString};

/// Default bound on list/dictionary nesting accepted by the decoder.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// How decoded dictionaries are handed back to the caller.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Display, EnumString)]
pub enum Shape {
    /// Associative [`Dictionary`](crate::Dictionary) values.
    #[default]
    #[strum(serialize = "array")]
    Associative,
    /// Structurally-typed records. Not implemented: decoding with this shape fails.
    #[strum(serialize = "object")]
    Structural,
}

#[readonly::make]
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Config {
    pub shape: Shape,
    pub max_depth: usize,
}

impl Config {
    pub fn new() -> Config {
        Config {
            shape: Shape::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Config {
        self.shape = shape;
        self
    }

    /// Sets the nesting bound for decoding.
    ///
    /// Decoding itself never recurses, but [`Display`](std::fmt::Display),
    /// [`encode_value`](crate::encode_value) and dropping a [`Value`](crate::Value)
    /// all walk the value recursively. A bound in the hundreds of thousands accepts
    /// values that overflow the thread stack in those later steps.
    pub fn with_max_depth(mut self, max_depth: usize) -> Config {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

#[cfg(test)]
mod test_config {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn shape_names() {
        assert_eq!(Shape::from_str("array").unwrap(), Shape::Associative);
        assert_eq!(Shape::from_str("object").unwrap(), Shape::Structural);
        assert!(Shape::from_str("tuple").is_err());
        assert_eq!(Shape::Structural.to_string(), "object");
    }

    #[test]
    fn builder() {
        let cfg = Config::new().with_max_depth(8).with_shape(Shape::Structural);
        assert_eq!(cfg.max_depth, 8);
        assert_eq!(cfg.shape, Shape::Structural);
        assert_eq!(Config::default().max_depth, DEFAULT_MAX_DEPTH);
    }
}
