//! The two machine types sharing the production line.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A machine type, doubling as the line configuration that builds it.
///
/// As a line state `A` is encoded as 0 and `B` as 1, the value taken by the
/// binary line-state variables of the planning model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LineStateRepr", into = "u8")]
pub enum Product {
    A,
    B,
}

impl Product {
    pub const ALL: [Product; 2] = [Product::A, Product::B];

    /// Position in per-product arrays.
    pub fn index(self) -> usize {
        match self {
            Product::A => 0,
            Product::B => 1,
        }
    }

    /// Value of the binary line-state variable when the line builds this product.
    pub fn line_state(self) -> u8 {
        self.index() as u8
    }

    pub fn from_line_state(state: u8) -> Option<Product> {
        match state {
            0 => Some(Product::A),
            1 => Some(Product::B),
            _ => None,
        }
    }

    /// Lower-case tag used in variable and constraint names.
    pub fn tag(self) -> &'static str {
        match self {
            Product::A => "a",
            Product::B => "b",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Product::A => write!(f, "A"),
            Product::B => write!(f, "B"),
        }
    }
}

impl From<Product> for u8 {
    fn from(product: Product) -> u8 {
        product.line_state()
    }
}

/// Accepts `0`/`1` as well as `"A"`/`"B"` in configuration files.
#[derive(Deserialize)]
#[serde(untagged)]
enum LineStateRepr {
    State(u8),
    Name(String),
}

impl TryFrom<LineStateRepr> for Product {
    type Error = String;

    fn try_from(repr: LineStateRepr) -> Result<Self, Self::Error> {
        match repr {
            LineStateRepr::State(state) => Product::from_line_state(state)
                .ok_or_else(|| format!("line state must be 0 (A) or 1 (B), got {}", state)),
            LineStateRepr::Name(name) => match name.trim().to_ascii_uppercase().as_str() {
                "A" => Ok(Product::A),
                "B" => Ok(Product::B),
                _ => Err(format!("unknown product '{}', expected \"A\" or \"B\"", name)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_state_encoding() {
        assert_eq!(Product::A.line_state(), 0);
        assert_eq!(Product::B.line_state(), 1);
        assert_eq!(Product::from_line_state(1), Some(Product::B));
        assert_eq!(Product::from_line_state(2), None);
    }

    #[test]
    fn test_parse_from_names_and_states() {
        assert_eq!(
            Product::try_from(LineStateRepr::Name("b".into())),
            Ok(Product::B)
        );
        assert_eq!(Product::try_from(LineStateRepr::State(0)), Ok(Product::A));
        assert!(Product::try_from(LineStateRepr::State(3)).is_err());
        assert!(Product::try_from(LineStateRepr::Name("C".into())).is_err());
    }
}
