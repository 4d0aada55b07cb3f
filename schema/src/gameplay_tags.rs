use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::{LazyLock, PoisonError, RwLock};
use thiserror::Error;

// Global tag registry - tags must be registered before they can be requested
static TAG_REGISTRY: LazyLock<RwLock<BTreeSet<String>>> =
    LazyLock::new(|| RwLock::new(BTreeSet::new()));

/// Errors raised when resolving gameplay tags
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The tag was requested with must-exist semantics but was never registered
    #[error("gameplay tag '{0}' is not registered")]
    NotRegistered(String),
    /// The tag name is empty or contains characters tags may not use
    #[error("'{0}' is not a valid gameplay tag name")]
    InvalidName(String),
}

/// Register a tag (and each of its parent tags) with the global registry
pub fn register_tag(name: &str) -> Result<GameplayTag, TagError> {
    validate_tag_name(name)?;
    let mut registry = TAG_REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    let mut prefix = String::with_capacity(name.len());
    for (i, segment) in name.split('.').enumerate() {
        if i > 0 {
            prefix.push('.');
        }
        prefix.push_str(segment);
        registry.insert(prefix.clone());
    }
    Ok(GameplayTag(name.to_string()))
}

pub fn is_tag_registered(name: &str) -> bool {
    TAG_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains(name)
}

/// Snapshot of every registered tag, sorted by name
pub fn registered_tags() -> Vec<GameplayTag> {
    TAG_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .map(|name| GameplayTag(name.clone()))
        .collect()
}

fn validate_tag_name(name: &str) -> Result<(), TagError> {
    let valid = !name.is_empty()
        && name.split('.').all(|segment| {
            !segment.is_empty()
                && !segment
                    .chars()
                    .any(|c| c.is_whitespace() || matches!(c, ',' | '"' | '\\' | '[' | ']' | '#'))
        });
    if valid {
        Ok(())
    } else {
        Err(TagError::InvalidName(name.to_string()))
    }
}

/// Hierarchical, dot-separated identifier such as `Data.Type.FIRE`.
///
/// The empty tag is the "none" tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameplayTag(String);

impl GameplayTag {
    pub fn empty() -> Self {
        GameplayTag(String::new())
    }

    /// Look up a tag that must already be registered
    pub fn request(name: &str) -> Result<Self, TagError> {
        if is_tag_registered(name) {
            Ok(GameplayTag(name.to_string()))
        } else {
            Err(TagError::NotRegistered(name.to_string()))
        }
    }

    /// Look up a tag, registering it first if needed
    pub fn get_or_create(name: &str) -> Result<Self, TagError> {
        register_tag(name)
    }

    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// True if this tag equals `other` or is one of its children
    pub fn matches_tag(&self, other: &GameplayTag) -> bool {
        if !self.is_valid() || !other.is_valid() {
            return false;
        }
        self.0 == other.0
            || (self.0.starts_with(&other.0) && self.0[other.0.len()..].starts_with('.'))
    }
}

impl fmt::Display for GameplayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "None")
        }
    }
}

/// Ordered set of gameplay tags. Insertion order is kept so data files are
/// written back in the order they were read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameplayTagContainer {
    tags: Vec<GameplayTag>,
}

impl GameplayTagContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag unless it is empty or already present
    pub fn add_tag(&mut self, tag: GameplayTag) {
        if tag.is_valid() && !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn has_tag(&self, tag: &GameplayTag) -> bool {
        self.tags.iter().any(|t| t.matches_tag(tag))
    }

    pub fn has_tag_exact(&self, tag: &GameplayTag) -> bool {
        self.tags.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameplayTag> {
        self.tags.iter()
    }
}

impl FromIterator<GameplayTag> for GameplayTagContainer {
    fn from_iter<I: IntoIterator<Item = GameplayTag>>(iter: I) -> Self {
        let mut container = GameplayTagContainer::new();
        for tag in iter {
            container.add_tag(tag);
        }
        container
    }
}

impl<'a> IntoIterator for &'a GameplayTagContainer {
    type Item = &'a GameplayTag;
    type IntoIter = std::slice::Iter<'a, GameplayTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}
