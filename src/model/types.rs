use crate::descriptors::PbsSchema;
use crate::metamodel::PbsRecord;
use crate::pbs_field;
use schema::{GameplayTag, GameplayTagContainer, Name, Text};
use serde::{Deserialize, Serialize};

pub const TYPE_TAG_NAMESPACE: &str = "Data.Type";

/// One entry of `types.txt`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub id: Name,
    pub row_index: i32,
    pub name: Text,
    pub icon_position: i32,
    pub is_special_type: bool,
    pub is_pseudo_type: bool,
    pub weaknesses: Vec<GameplayTag>,
    pub resistances: Vec<GameplayTag>,
    pub immunities: Vec<GameplayTag>,
    pub flags: GameplayTagContainer,
}

impl Default for TypeInfo {
    fn default() -> Self {
        TypeInfo {
            id: Name::none(),
            row_index: 0,
            name: Text::invariant("Unnamed"),
            icon_position: 0,
            is_special_type: false,
            is_pseudo_type: false,
            weaknesses: Vec::new(),
            resistances: Vec::new(),
            immunities: Vec::new(),
            flags: GameplayTagContainer::new(),
        }
    }
}

impl PbsRecord for TypeInfo {
    fn schema() -> PbsSchema<Self> {
        PbsSchema::builder()
            .field(pbs_field!(value "ID" => id).identifier())
            .field(pbs_field!(value "RowIndex" => row_index).row_index())
            .field(pbs_field!(value "Name" => name).localized("PokemonTypes", "{0}_DisplayName"))
            .field(pbs_field!(value "IconPosition" => icon_position).range(Some(0), None))
            .field(pbs_field!(value "IsSpecialType" => is_special_type))
            .field(pbs_field!(value "IsPseudoType" => is_pseudo_type))
            .field(
                pbs_field!(list "Weaknesses" => weaknesses)
                    .gameplay_tag(TYPE_TAG_NAMESPACE)
                    .create_tags(),
            )
            .field(
                pbs_field!(list "Resistances" => resistances)
                    .gameplay_tag(TYPE_TAG_NAMESPACE)
                    .create_tags(),
            )
            .field(
                pbs_field!(list "Immunities" => immunities)
                    .gameplay_tag(TYPE_TAG_NAMESPACE)
                    .create_tags(),
            )
            .field(
                pbs_field!(tags "Flags" => flags)
                    .gameplay_tag("Data.Type.Flag")
                    .create_tags()
                    .tag_separator("_"),
            )
            .build()
    }
}
