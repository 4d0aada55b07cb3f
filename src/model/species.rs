use crate::converters::{ConverterHandle, EvolutionMethodConverter};
use crate::descriptors::{PbsScalarDescriptor, PbsSchema, ScalarKind};
use crate::errors::PbsResult;
use crate::metamodel::{shape_mismatch, CompoundValues, PbsCompound, PbsRecord, PbsScalar};
use crate::value::PbsValue;
use crate::{impl_pbs_compound, pbs_field};
use schema::{GameplayTagContainer, Name, Text};
use serde::{Deserialize, Serialize};

/// Effort values gained for defeating a species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvYield {
    pub stat: Name,
    pub amount: i32,
}

impl PbsCompound for EvYield {
    fn parameters() -> Vec<PbsScalarDescriptor> {
        vec![
            PbsScalarDescriptor::of::<Name>(),
            PbsScalarDescriptor::of::<i32>().range(Some(1), None),
        ]
    }

    fn construct(values: Vec<PbsValue>) -> PbsResult<Self> {
        let mut values = CompoundValues::new(values);
        Ok(EvYield {
            stat: values.take()?,
            amount: values.take()?,
        })
    }

    fn deconstruct(&self) -> Vec<PbsValue> {
        vec![self.stat.to_scalar_value(), self.amount.to_scalar_value()]
    }
}

/// A move learned on reaching a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpMoveInfo {
    pub level: i32,
    pub move_id: Name,
}

impl PbsCompound for LevelUpMoveInfo {
    fn parameters() -> Vec<PbsScalarDescriptor> {
        vec![
            PbsScalarDescriptor::of::<i32>().range(Some(0), None),
            PbsScalarDescriptor::of::<Name>(),
        ]
    }

    fn construct(values: Vec<PbsValue>) -> PbsResult<Self> {
        let mut values = CompoundValues::new(values);
        Ok(LevelUpMoveInfo {
            level: values.take()?,
            move_id: values.take()?,
        })
    }

    fn deconstruct(&self) -> Vec<PbsValue> {
        vec![self.level.to_scalar_value(), self.move_id.to_scalar_value()]
    }
}

/// Base stats, in the order `pokemon.txt` lists them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub special_attack: i32,
    pub special_defense: i32,
}

impl Default for BaseStats {
    fn default() -> Self {
        BaseStats {
            hp: 1,
            attack: 1,
            defense: 1,
            speed: 1,
            special_attack: 1,
            special_defense: 1,
        }
    }
}

impl PbsCompound for BaseStats {
    fn parameters() -> Vec<PbsScalarDescriptor> {
        (0..6)
            .map(|_| PbsScalarDescriptor::of::<i32>().range(Some(1), Some(255)))
            .collect()
    }

    fn construct(values: Vec<PbsValue>) -> PbsResult<Self> {
        let mut values = CompoundValues::new(values);
        Ok(BaseStats {
            hp: values.take()?,
            attack: values.take()?,
            defense: values.take()?,
            speed: values.take()?,
            special_attack: values.take()?,
            special_defense: values.take()?,
        })
    }

    fn deconstruct(&self) -> Vec<PbsValue> {
        [
            self.hp,
            self.attack,
            self.defense,
            self.speed,
            self.special_attack,
            self.special_defense,
        ]
        .iter()
        .map(PbsScalar::to_scalar_value)
        .collect()
    }
}

impl_pbs_compound!(EvYield, LevelUpMoveInfo, BaseStats);

/// One way a species evolves. Written as `SPECIES,Method[,parameter...]`
/// through [`EvolutionMethodConverter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionConditionInfo {
    pub species: Name,
    pub method: Name,
    pub parameters: Vec<String>,
}

impl PbsScalar for EvolutionConditionInfo {
    fn scalar_kind() -> ScalarKind {
        ScalarKind::Custom
    }

    fn converter() -> Option<ConverterHandle> {
        Some(ConverterHandle::new(EvolutionMethodConverter))
    }

    fn to_scalar_value(&self) -> PbsValue {
        let mut values = vec![
            PbsValue::Name(self.species.clone()),
            PbsValue::Name(self.method.clone()),
        ];
        values.extend(self.parameters.iter().cloned().map(PbsValue::String));
        PbsValue::Compound(values)
    }

    fn from_scalar_value(value: PbsValue) -> PbsResult<Self> {
        let values = match value {
            PbsValue::Compound(values) if values.len() >= 2 => values,
            other => return Err(shape_mismatch("an evolution condition", &other)),
        };
        let mut values = CompoundValues::new(values);
        Ok(EvolutionConditionInfo {
            species: values.take()?,
            method: values.take()?,
            parameters: values.rest()?,
        })
    }
}

/// One entry of `pokemon.txt`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesInfo {
    pub id: Name,
    pub row_index: i32,
    pub name: Text,
    pub form_name: Text,
    pub types: Vec<Name>,
    pub base_stats: BaseStats,
    pub gender_ratio: Name,
    pub growth_rate: Name,
    pub base_exp: i32,
    pub ev_yield: Vec<EvYield>,
    pub catch_rate: i32,
    pub base_happiness: i32,
    pub abilities: Vec<Name>,
    pub hidden_abilities: Vec<Name>,
    pub moves: Vec<LevelUpMoveInfo>,
    pub tutor_moves: Vec<Name>,
    pub egg_moves: Vec<Name>,
    pub egg_groups: Vec<Name>,
    pub hatch_steps: i32,
    pub incense: Name,
    pub offspring: Vec<Name>,
    pub evolutions: Vec<EvolutionConditionInfo>,
    pub height: f32,
    pub weight: f32,
    pub body_color: Name,
    pub body_shape: Name,
    pub habitat: Name,
    pub category: Text,
    pub pokedex: Text,
    pub wild_hold_item_common: Vec<Name>,
    pub wild_hold_item_uncommon: Vec<Name>,
    pub wild_hold_item_rare: Vec<Name>,
    pub generation: i32,
    pub tags: GameplayTagContainer,
}

impl Default for SpeciesInfo {
    fn default() -> Self {
        SpeciesInfo {
            id: Name::none(),
            row_index: 0,
            name: Text::invariant("Unnamed"),
            form_name: Text::Empty,
            types: vec![Name::new("NORMAL")],
            base_stats: BaseStats::default(),
            gender_ratio: Name::new("Female50Percent"),
            growth_rate: Name::new("Medium"),
            base_exp: 100,
            ev_yield: Vec::new(),
            catch_rate: 255,
            base_happiness: 70,
            abilities: Vec::new(),
            hidden_abilities: Vec::new(),
            moves: Vec::new(),
            tutor_moves: Vec::new(),
            egg_moves: Vec::new(),
            egg_groups: vec![Name::new("Undiscovered")],
            hatch_steps: 1,
            incense: Name::none(),
            offspring: Vec::new(),
            evolutions: Vec::new(),
            height: 0.1,
            weight: 0.1,
            body_color: Name::new("Red"),
            body_shape: Name::new("Head"),
            habitat: Name::none(),
            category: Text::invariant("???"),
            pokedex: Text::invariant("???"),
            wild_hold_item_common: Vec::new(),
            wild_hold_item_uncommon: Vec::new(),
            wild_hold_item_rare: Vec::new(),
            generation: 1,
            tags: GameplayTagContainer::new(),
        }
    }
}

impl PbsRecord for SpeciesInfo {
    fn schema() -> PbsSchema<Self> {
        PbsSchema::builder()
            .field(pbs_field!(value "ID" => id).identifier())
            .field(pbs_field!(value "RowIndex" => row_index).row_index())
            .field(
                pbs_field!(value "Name" => name).localized("PokemonSpecies", "{0}_DisplayName"),
            )
            .field(
                pbs_field!(value "FormName" => form_name)
                    .localized("PokemonSpecies", "{0}_FormName"),
            )
            .field(pbs_field!(list "Types" => types).min_length(1))
            .field(pbs_field!(value "BaseStats" => base_stats))
            .field(pbs_field!(value "GenderRatio" => gender_ratio))
            .field(pbs_field!(value "GrowthRate" => growth_rate))
            .field(pbs_field!(value "BaseExp" => base_exp))
            .field(pbs_field!(list "EVYield" => ev_yield).rename("EVs"))
            .field(pbs_field!(value "CatchRate" => catch_rate).range(Some(3), Some(255)))
            .field(pbs_field!(value "BaseHappiness" => base_happiness).range(Some(0), Some(255)))
            .field(pbs_field!(list "Abilities" => abilities).max_length(2))
            .field(pbs_field!(list "HiddenAbilities" => hidden_abilities))
            .field(pbs_field!(list "Moves" => moves))
            .field(pbs_field!(list "TutorMoves" => tutor_moves))
            .field(pbs_field!(list "EggMoves" => egg_moves))
            .field(pbs_field!(list "EggGroups" => egg_groups))
            .field(pbs_field!(value "HatchSteps" => hatch_steps))
            .field(pbs_field!(value "Incense" => incense))
            .field(pbs_field!(list "Offspring" => offspring))
            .field(
                pbs_field!(list "Evolutions" => evolutions)
                    .rename("Evolution")
                    .allow_multiple(),
            )
            .field(pbs_field!(value "Height" => height).range(Some(0.1f32), None))
            .field(pbs_field!(value "Weight" => weight).range(Some(0.1f32), None))
            .field(pbs_field!(value "BodyColor" => body_color).rename("Color"))
            .field(pbs_field!(value "BodyShape" => body_shape).rename("Shape"))
            .field(pbs_field!(value "Habitat" => habitat))
            .field(
                pbs_field!(value "Category" => category)
                    .localized("PokemonSpecies", "{0}_Category"),
            )
            .field(
                pbs_field!(value "Pokedex" => pokedex).localized("PokemonSpecies", "{0}_Pokedex"),
            )
            .field(pbs_field!(list "WildHoldItemCommon" => wild_hold_item_common))
            .field(pbs_field!(list "WildHoldItemUncommon" => wild_hold_item_uncommon))
            .field(pbs_field!(list "WildHoldItemRare" => wild_hold_item_rare))
            .field(pbs_field!(value "Generation" => generation).range(Some(1), None))
            .field(
                pbs_field!(tags "Tags" => tags)
                    .rename("Flags")
                    .gameplay_tag("Data.Species")
                    .create_tags()
                    .tag_separator("_"),
            )
            .build()
    }
}
