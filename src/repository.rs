use crate::errors::PbsResult;
use crate::metamodel::{PbsMetamodel, PbsRecord};
use crate::serializer;
use crate::value::PbsValue;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Ordered game data entries of one record type.
///
/// Entries are imported from and exported to PBS files through the active
/// serializer, and can be baked to a compact binary form.
#[derive(Debug, Clone, PartialEq)]
pub struct GameDataRepository<T> {
    entries: Vec<T>,
}

impl<T> Default for GameDataRepository<T> {
    fn default() -> Self {
        GameDataRepository {
            entries: Vec::new(),
        }
    }
}

impl<T: PbsRecord + Serialize + DeserializeOwned> GameDataRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<T>) -> Self {
        GameDataRepository { entries }
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find an entry by its identifier
    pub fn get(&self, id: &str) -> Option<&T> {
        let schema = PbsMetamodel::get_schema::<T>();
        let identifier = schema.identifier().ok()?;
        self.entries
            .iter()
            .find(|entry| identifier_text(&identifier.get(entry)) == Some(id))
    }

    /// Replace all entries with the contents of a PBS file
    pub fn import_pbs(&mut self, path: &Path) -> PbsResult<()> {
        let reader = BufReader::new(File::open(path)?);
        self.entries = serializer::deserialize(reader)?;
        info!(
            path = %path.display(),
            entries = self.entries.len(),
            "imported PBS file"
        );
        Ok(())
    }

    pub fn export_pbs(&self, path: &Path) -> PbsResult<()> {
        let writer = BufWriter::new(File::create(path)?);
        serializer::serialize(&self.entries, writer)?;
        info!(
            path = %path.display(),
            entries = self.entries.len(),
            "exported PBS file"
        );
        Ok(())
    }

    /// Bake the entries into postcard bytes
    pub fn to_bytes(&self) -> PbsResult<Vec<u8>> {
        Ok(postcard::to_allocvec(&self.entries)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> PbsResult<Self> {
        Ok(GameDataRepository {
            entries: postcard::from_bytes(bytes)?,
        })
    }
}

fn identifier_text(value: &PbsValue) -> Option<&str> {
    match value {
        PbsValue::Name(name) => Some(name.as_str()),
        PbsValue::String(text) => Some(text),
        PbsValue::Tag(tag) => Some(tag.name()),
        _ => None,
    }
}
