// PBS record models.
// Each record declares its schema explicitly; field order here is the order
// keys are written back to disk.

pub mod items;
pub mod moves;
pub mod species;
pub mod types;

pub use items::ItemInfo;
pub use moves::MoveInfo;
pub use species::{BaseStats, EvYield, EvolutionConditionInfo, LevelUpMoveInfo, SpeciesInfo};
pub use types::TypeInfo;

use schema::{BattleUse, DamageCategory, FieldUse};

crate::impl_pbs_enum!(DamageCategory, FieldUse, BattleUse);
