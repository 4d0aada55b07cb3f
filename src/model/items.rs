use crate::converters::{ConverterHandle, ItemPocketConverter};
use crate::descriptors::PbsSchema;
use crate::metamodel::PbsRecord;
use crate::pbs_field;
use schema::{BattleUse, FieldUse, GameplayTag, GameplayTagContainer, Name, Text};
use serde::{Deserialize, Serialize};

pub const BATTLE_USAGE_TAG_NAMESPACE: &str = "Data.Item.BattleUsage";

/// One entry of `items.txt`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub id: Name,
    pub row_index: i32,
    pub name: Text,
    pub name_plural: Text,
    pub portion_name: Text,
    pub portion_name_plural: Text,
    /// Unset means the game decides from the pocket
    pub show_quantity: Option<bool>,
    pub description: Text,
    pub pocket: GameplayTag,
    pub price: i32,
    /// Unset means half the price
    pub sell_price: Option<i32>,
    pub bp_price: i32,
    pub field_use: FieldUse,
    pub battle_use: BattleUse,
    pub battle_usage_categories: GameplayTagContainer,
    pub is_consumable: Option<bool>,
    pub move_id: Name,
    pub tags: GameplayTagContainer,
}

impl Default for ItemInfo {
    fn default() -> Self {
        ItemInfo {
            id: Name::none(),
            row_index: 0,
            name: Text::invariant("Unnamed"),
            name_plural: Text::invariant("Unnamed"),
            portion_name: Text::Empty,
            portion_name_plural: Text::Empty,
            show_quantity: None,
            description: Text::invariant("???"),
            pocket: GameplayTag::empty(),
            price: 0,
            sell_price: None,
            bp_price: 1,
            field_use: FieldUse::NoFieldUse,
            battle_use: BattleUse::NoBattleUse,
            battle_usage_categories: GameplayTagContainer::new(),
            is_consumable: None,
            move_id: Name::none(),
            tags: GameplayTagContainer::new(),
        }
    }
}

impl PbsRecord for ItemInfo {
    fn schema() -> PbsSchema<Self> {
        PbsSchema::builder()
            .field(pbs_field!(value "ID" => id).identifier())
            .field(pbs_field!(value "RowIndex" => row_index).row_index())
            .field(pbs_field!(value "Name" => name).localized("PokemonItems", "{0}_DisplayName"))
            .field(
                pbs_field!(value "NamePlural" => name_plural)
                    .localized("PokemonItems", "{0}_DisplayNamePlural"),
            )
            .field(
                pbs_field!(value "PortionName" => portion_name)
                    .localized("PokemonItems", "{0}_PortionDisplayName"),
            )
            .field(
                pbs_field!(value "PortionNamePlural" => portion_name_plural)
                    .localized("PokemonItems", "{0}_PortionDisplayNamePlural"),
            )
            .field(pbs_field!(value "ShowQuantity" => show_quantity))
            .field(
                pbs_field!(value "Description" => description)
                    .localized("PokemonItems", "{0}_Description"),
            )
            .field(
                pbs_field!(value "Pocket" => pocket)
                    .converter(ConverterHandle::new(ItemPocketConverter)),
            )
            .field(pbs_field!(value "Price" => price).range(Some(0), None))
            .field(pbs_field!(value "SellPrice" => sell_price).range(Some(0), None))
            .field(pbs_field!(value "BPPrice" => bp_price).range(Some(1), None))
            .field(pbs_field!(value "FieldUse" => field_use))
            .field(pbs_field!(value "BattleUse" => battle_use))
            .field(
                pbs_field!(tags "BattleUsageCategories" => battle_usage_categories)
                    .gameplay_tag(BATTLE_USAGE_TAG_NAMESPACE)
                    .create_tags(),
            )
            .field(pbs_field!(value "IsConsumable" => is_consumable).rename("Consumable"))
            .field(pbs_field!(value "Move" => move_id))
            .field(
                pbs_field!(tags "Tags" => tags)
                    .rename("Flags")
                    .gameplay_tag("Data.Item")
                    .create_tags()
                    .tag_separator("_"),
            )
            .build()
    }
}
