// In: src/lib.rs

//! Pokemon PBS Compiler
//!
//! Reads and writes PBS files, the sectioned `Key = value` text format used
//! for Pokemon game data tables. Record types declare an explicit schema;
//! the compiler and writer are driven entirely by it, so that
//! read, write, read gives back the same records.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod codec;
pub mod compiler;
pub mod config;
pub mod converters;
pub mod csv;
pub mod descriptors;
pub mod errors;
pub mod metamodel;
pub mod model;
pub mod repository;
pub mod sections;
pub mod serializer;
pub mod value;
pub mod writer;

#[cfg(test)]
mod tests;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `pokemon-pbs` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export the opaque value types records are built from.
pub use schema::{
    BattleUse, DamageCategory, FieldUse, GameplayTag, GameplayTagContainer, Name, TagError, Text,
};

// --- From this crate's modules (`src/`) ---

// Reading and writing whole files.
pub use compiler::{
    compile_pbs_entries, compile_pbs_entries_with, compile_pbs_file, compile_pbs_file_with,
};
pub use sections::{each_file_section, each_file_section_with, FileSections, PbsSectionData};
pub use writer::{write_pbs, write_pbs_with};

// Schema declaration and the traits that replace reflection.
pub use metamodel::{
    CompoundValues, ElementShape, Field, PbsCompound, PbsElement, PbsMetamodel, PbsNumber,
    PbsRecord, PbsScalar,
};
pub use descriptors::{
    CollectionKind, EnumMeta, FieldLookup, LocalizedTextNamespace, NumberKind, NumericBounds,
    PbsFieldDescriptor, PbsScalarDescriptor, PbsSchema, PbsSchemaBuilder, RepeatMode,
    ScalarBounds, ScalarKind,
};
pub use value::PbsValue;

// Cell level helpers.
pub use codec::{parse_bool, parse_number};
pub use converters::{ConverterHandle, PbsConverter};
pub use csv::{join_csv_line, split_csv_line};

// Settings, storage and the process-wide serializer.
pub use config::{KeyRepeatPolicy, PbsSettings};
pub use repository::GameDataRepository;

// Crate-specific error and result types.
pub use errors::{ParseError, PbsError, PbsResult, SchemaError, SerializerError, ValueError};
