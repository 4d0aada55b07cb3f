use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};

/// How an item can be used from the bag outside of battle.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum FieldUse {
    #[default]
    NoFieldUse,
    OnPokemon,
    Direct,
    TM,
    HM,
    TR,
}

/// How an item can be used from the bag during battle.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum BattleUse {
    #[default]
    NoBattleUse,
    OnPokemon,
    OnMove,
    OnBattler,
    OnFoe,
    Direct,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_item_uses_parse_case_insensitively() {
        assert_eq!(FieldUse::from_str("onpokemon"), Ok(FieldUse::OnPokemon));
        assert_eq!(BattleUse::from_str("ONFOE"), Ok(BattleUse::OnFoe));
        assert!(FieldUse::from_str("Sometimes").is_err());
    }
}
