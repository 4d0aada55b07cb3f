use crate::descriptors::PbsSchema;
use crate::metamodel::PbsRecord;
use crate::pbs_field;
use schema::{DamageCategory, GameplayTagContainer, Name, Text};
use serde::{Deserialize, Serialize};

/// One entry of `moves.txt`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveInfo {
    pub id: Name,
    pub row_index: i32,
    pub name: Text,
    pub move_type: Name,
    pub category: DamageCategory,
    pub power: i32,
    pub accuracy: i32,
    pub total_pp: i32,
    pub target: Name,
    pub priority: i8,
    pub function_code: String,
    pub flags: GameplayTagContainer,
    pub effect_chance: i32,
    pub description: Text,
}

impl Default for MoveInfo {
    fn default() -> Self {
        MoveInfo {
            id: Name::none(),
            row_index: 0,
            name: Text::invariant("Unnamed"),
            move_type: Name::none(),
            category: DamageCategory::Status,
            power: 0,
            accuracy: 100,
            total_pp: 5,
            target: Name::none(),
            priority: 0,
            function_code: "None".to_string(),
            flags: GameplayTagContainer::new(),
            effect_chance: 0,
            description: Text::invariant("???"),
        }
    }
}

impl PbsRecord for MoveInfo {
    fn schema() -> PbsSchema<Self> {
        PbsSchema::builder()
            .field(pbs_field!(value "ID" => id).identifier())
            .field(pbs_field!(value "RowIndex" => row_index).row_index())
            .field(pbs_field!(value "Name" => name).localized("PokemonMoves", "{0}_DisplayName"))
            .field(pbs_field!(value "Type" => move_type))
            .field(pbs_field!(value "Category" => category))
            .field(pbs_field!(value "Power" => power).range(Some(0), None))
            .field(pbs_field!(value "Accuracy" => accuracy).range(Some(0), Some(100)))
            .field(pbs_field!(value "TotalPP" => total_pp).range(Some(1), None))
            .field(pbs_field!(value "Target" => target))
            .field(pbs_field!(value "Priority" => priority).range::<i8>(Some(-6), Some(6)))
            .field(pbs_field!(value "FunctionCode" => function_code))
            .field(
                pbs_field!(tags "Flags" => flags)
                    .gameplay_tag("Data.Move")
                    .create_tags()
                    .tag_separator("_"),
            )
            .field(pbs_field!(value "EffectChance" => effect_chance).range(Some(0), Some(100)))
            .field(
                pbs_field!(value "Description" => description)
                    .localized("PokemonMoves", "{0}_Description"),
            )
            .build()
    }
}
