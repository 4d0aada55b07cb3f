use super::PbsConverter;
use crate::descriptors::PbsScalarDescriptor;
use crate::errors::{PbsResult, ValueError};
use crate::model::EvolutionConditionInfo;
use schema::Name;

/// Reads `SPECIES,Method[,parameter...]` into an [`EvolutionConditionInfo`].
///
/// Method parameters are kept as raw text; their meaning depends on the
/// evolution method and is resolved by game code.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvolutionMethodConverter;

impl PbsConverter for EvolutionMethodConverter {
    type Value = EvolutionConditionInfo;

    fn read(
        &self,
        input: &str,
        _descriptor: &PbsScalarDescriptor,
        _section_name: Option<&str>,
    ) -> PbsResult<EvolutionConditionInfo> {
        let mut data = input.split(',').map(str::trim);
        match (data.next(), data.next()) {
            (Some(species), Some(method)) if !species.is_empty() && !method.is_empty() => {
                Ok(EvolutionConditionInfo {
                    species: Name::new(species),
                    method: Name::new(method),
                    parameters: data.map(str::to_string).collect(),
                })
            }
            _ => Err(ValueError::Converter(format!(
                "Evolution '{input}' needs at least a species and a method"
            ))
            .into()),
        }
    }

    fn write(
        &self,
        value: &EvolutionConditionInfo,
        _descriptor: &PbsScalarDescriptor,
        _section_name: Option<&str>,
    ) -> PbsResult<String> {
        let mut cells = vec![value.species.as_str(), value.method.as_str()];
        cells.extend(value.parameters.iter().map(String::as_str));
        Ok(cells.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metamodel::PbsScalar;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reads_species_method_and_parameter() {
        let descriptor = EvolutionConditionInfo::descriptor();
        let info = EvolutionMethodConverter
            .read("IVYSAUR,Level,16", &descriptor, Some("BULBASAUR"))
            .unwrap();
        assert_eq!(info.species, Name::from("IVYSAUR"));
        assert_eq!(info.method, Name::from("Level"));
        assert_eq!(info.parameters, vec!["16".to_string()]);
        assert_eq!(
            EvolutionMethodConverter.write(&info, &descriptor, None).unwrap(),
            "IVYSAUR,Level,16"
        );
    }

    #[test]
    fn test_method_without_parameter() {
        let descriptor = EvolutionConditionInfo::descriptor();
        let info = EvolutionMethodConverter
            .read("ESPEON,HappinessDay", &descriptor, None)
            .unwrap();
        assert!(info.parameters.is_empty());
        assert_eq!(
            EvolutionMethodConverter.write(&info, &descriptor, None).unwrap(),
            "ESPEON,HappinessDay"
        );
    }

    #[test]
    fn test_missing_method_is_rejected() {
        let descriptor = EvolutionConditionInfo::descriptor();
        assert!(EvolutionMethodConverter.read("IVYSAUR", &descriptor, None).is_err());
    }
}
