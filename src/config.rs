use crate::errors::PbsResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How repeated `Key = value` lines of a `KeyRepeat` field are collected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyRepeatPolicy {
    /// Every occurrence adds an element
    #[default]
    KeepAll,
    /// The first occurrence only opens the collection and its value is
    /// dropped. Matches files produced for older tooling.
    DiscardFirst,
}

/// Settings shared by the section parser and the record writer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PbsSettings {
    /// First line of every written file
    pub header_comment: String,
    /// Line written before every section
    pub section_separator: String,
    pub key_repeat: KeyRepeatPolicy,
}

impl Default for PbsSettings {
    fn default() -> Self {
        PbsSettings {
            header_comment: "# See the documentation on the wiki to learn how to edit this file."
                .to_string(),
            section_separator: "#-------------------------------".to_string(),
            key_repeat: KeyRepeatPolicy::KeepAll,
        }
    }
}

impl PbsSettings {
    pub fn from_ron_str(content: &str) -> PbsResult<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Load settings from a RON file. Missing entries keep their defaults.
    pub fn load(path: &Path) -> PbsResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings = PbsSettings::from_ron_str("(key_repeat: DiscardFirst)").unwrap();
        assert_eq!(settings.key_repeat, KeyRepeatPolicy::DiscardFirst);
        assert_eq!(settings.header_comment, PbsSettings::default().header_comment);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        assert!(PbsSettings::from_ron_str("(key_repeat: Sometimes)").is_err());
    }
}
