// PBS Schema - Shared game data value types
// This crate contains the identifier, tag and text types that game data
// records are built from, plus the hard-coded enums those records reference.
// The compiler crate treats all of them as opaque values.

// Re-export the main types
pub use gameplay_tags::*;
pub use item_types::*;
pub use move_types::*;
pub use name::*;
pub use text::*;

pub mod gameplay_tags;
pub mod item_types;
pub mod move_types;
pub mod name;
pub mod text;
