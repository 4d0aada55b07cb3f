use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static LOCALIZED_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^NSLOCTEXT\(\s*"((?:[^"\\]|\\.)*)"\s*,\s*"((?:[^"\\]|\\.)*)"\s*,\s*"((?:[^"\\]|\\.)*)"\s*\)$"#,
    )
    .expect("localized text pattern is valid")
});

static INVARIANT_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^INVTEXT\(\s*"((?:[^"\\]|\\.)*)"\s*\)$"#).expect("invariant text pattern is valid")
});

/// Display text that may carry a localization namespace and key.
///
/// `Localized` text remembers where it came from so it can be written back
/// in its short form; `Invariant` text is plain culture-invariant text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Text {
    #[default]
    Empty,
    Invariant(String),
    Localized {
        namespace: String,
        key: String,
        source: String,
    },
}

impl Text {
    pub fn none() -> Self {
        Text::Empty
    }

    pub fn invariant(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Text::Empty
        } else {
            Text::Invariant(value)
        }
    }

    pub fn localized(
        namespace: impl Into<String>,
        key: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Text::Localized {
            namespace: namespace.into(),
            key: key.into(),
            source: source.into(),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            Text::Localized { namespace, .. } => Some(namespace),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Text::Localized { key, .. } => Some(key),
            _ => None,
        }
    }

    /// The text as it should be shown, without localization metadata.
    pub fn source_string(&self) -> &str {
        match self {
            Text::Empty => "",
            Text::Invariant(value) => value,
            Text::Localized { source, .. } => source,
        }
    }

    pub fn is_empty_or_whitespace(&self) -> bool {
        self.source_string().trim().is_empty()
    }

    /// Parses either a localized-string literal (`NSLOCTEXT(...)` or
    /// `INVTEXT(...)`) or falls back to plain invariant text.
    pub fn from_localized_string(input: &str) -> Self {
        Self::parse_literal(input).unwrap_or_else(|| Text::invariant(input))
    }

    /// Parses a localized-string literal, returning `None` for plain text.
    pub fn parse_literal(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if let Some(captures) = LOCALIZED_LITERAL.captures(trimmed) {
            return Some(Text::localized(
                unescape(&captures[1]),
                unescape(&captures[2]),
                unescape(&captures[3]),
            ));
        }

        INVARIANT_LITERAL
            .captures(trimmed)
            .map(|captures| Text::invariant(unescape(&captures[1])))
    }

    /// Full representation that survives a round trip through
    /// [`Text::from_localized_string`].
    pub fn to_localized_string(&self) -> String {
        match self {
            Text::Empty => String::new(),
            Text::Invariant(value) if Self::parse_literal(value).is_some() => {
                format!("INVTEXT(\"{}\")", escape(value))
            }
            Text::Invariant(value) => value.clone(),
            Text::Localized {
                namespace,
                key,
                source,
            } => format!(
                "NSLOCTEXT(\"{}\", \"{}\", \"{}\")",
                escape(namespace),
                escape(key),
                escape(source)
            ),
        }
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source_string())
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text::invariant(value)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text::invariant(value)
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                result.push(next);
                continue;
            }
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_localized_literal_round_trip() {
        let text = Text::localized("PokemonItems", "POTION_Description", "Restores \"20\" HP.");
        let literal = text.to_localized_string();
        assert_eq!(
            literal,
            r#"NSLOCTEXT("PokemonItems", "POTION_Description", "Restores \"20\" HP.")"#
        );
        assert_eq!(Text::from_localized_string(&literal), text);
    }

    #[test]
    fn test_plain_text_is_invariant() {
        assert_eq!(Text::from_localized_string("Potion"), Text::invariant("Potion"));
        assert_eq!(Text::from_localized_string(""), Text::Empty);
    }

    #[test]
    fn test_invariant_text_that_looks_like_a_literal_is_wrapped() {
        let text = Text::invariant("INVTEXT(\"x\")");
        let literal = text.to_localized_string();
        assert_eq!(Text::from_localized_string(&literal), text);
    }
}
