use super::PbsConverter;
use crate::descriptors::PbsScalarDescriptor;
use crate::errors::{PbsResult, ValueError};
use schema::GameplayTag;

pub const POCKET_TAG_NAMESPACE: &str = "Data.Item.Pocket";

// Bag pockets in the order the numeric `Pocket` values refer to them
const POCKETS: [&str; 8] = [
    "Items",
    "Medicine",
    "PokeBalls",
    "Machines",
    "Berries",
    "Mail",
    "BattleItems",
    "KeyItems",
];

/// Maps the 1-based pocket number of an item to a `Data.Item.Pocket.*` tag
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemPocketConverter;

impl ItemPocketConverter {
    pub fn pocket_tag(number: usize) -> PbsResult<GameplayTag> {
        let pocket = number
            .checked_sub(1)
            .and_then(|index| POCKETS.get(index))
            .ok_or_else(|| {
                ValueError::Converter(format!(
                    "Pocket {number} is out of range 1..={}",
                    POCKETS.len()
                ))
            })?;
        Ok(GameplayTag::get_or_create(&format!(
            "{POCKET_TAG_NAMESPACE}.{pocket}"
        ))?)
    }
}

impl PbsConverter for ItemPocketConverter {
    type Value = GameplayTag;

    fn read(
        &self,
        input: &str,
        _descriptor: &PbsScalarDescriptor,
        _section_name: Option<&str>,
    ) -> PbsResult<GameplayTag> {
        let number = input
            .trim()
            .parse::<usize>()
            .map_err(|_| ValueError::InvalidNumber(input.to_string()))?;
        Self::pocket_tag(number)
    }

    fn write(
        &self,
        value: &GameplayTag,
        _descriptor: &PbsScalarDescriptor,
        _section_name: Option<&str>,
    ) -> PbsResult<String> {
        value
            .name()
            .strip_prefix(POCKET_TAG_NAMESPACE)
            .and_then(|rest| rest.strip_prefix('.'))
            .and_then(|pocket| POCKETS.iter().position(|p| *p == pocket))
            .map(|index| (index + 1).to_string())
            .ok_or_else(|| {
                ValueError::Converter(format!("{value} is not a bag pocket tag")).into()
            })
    }
}
