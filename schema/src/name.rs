use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier used for game data keys (species IDs, move IDs, ...).
///
/// An empty name is the "none" name and displays as `None`, which is also the
/// literal PBS files use to spell it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Literal used in data files for the none name.
    pub const NONE_LITERAL: &'static str = "None";

    pub fn new(value: impl Into<String>) -> Self {
        Name(value.into())
    }

    pub fn none() -> Self {
        Name(String::new())
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "{}", Self::NONE_LITERAL)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_none_name_displays_as_literal() {
        assert!(Name::none().is_none());
        assert_eq!(Name::none().to_string(), "None");
        assert_eq!(Name::from("PIKACHU").to_string(), "PIKACHU");
    }
}
