#[cfg(test)]
mod tests {
    use crate::model::TypeInfo;
    use crate::tests::common::{tag, written, SEPARATOR};
    use crate::{compile_pbs_entries, compile_pbs_file, write_pbs};
    use pretty_assertions::assert_eq;
    use schema::{Name, Text};

    const TYPES: &str = "\
[NORMAL]
Name = Normal
Weaknesses = FIGHTING
Immunities = GHOST
#-------------------------------
[FIRE]
Name = Fire
IconPosition = 10
IsSpecialType = true
Weaknesses = WATER,GROUND,ROCK
Resistances = FIRE,GRASS,ICE,BUG,STEEL,FAIRY
";

    #[test]
    fn test_fire_type_writes_exact_text() {
        let fire = TypeInfo {
            id: Name::new("FIRE"),
            name: Text::localized("PokemonTypes", "FIRE_DisplayName", "Fire"),
            is_special_type: true,
            weaknesses: vec![tag("Data.Type.WATER"), tag("Data.Type.GROUND")],
            ..TypeInfo::default()
        };

        let mut output = Vec::new();
        write_pbs(&[fire], &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "# See the documentation on the wiki to learn how to edit this file.\n\
             #-------------------------------\n\
             [FIRE]\n\
             Name = Fire\n\
             IsSpecialType = true\n\
             Weaknesses = WATER,GROUND\n"
        );
    }

    #[test]
    fn test_types_file_compiles() {
        let types = compile_pbs_file::<TypeInfo>(TYPES.as_bytes()).unwrap();
        let fire = &types["FIRE"];

        assert_eq!(fire.id, Name::new("FIRE"));
        assert_eq!(fire.row_index, 1);
        assert_eq!(
            fire.name,
            Text::localized("PokemonTypes", "FIRE_DisplayName", "Fire")
        );
        assert_eq!(fire.icon_position, 10);
        assert!(fire.is_special_type);
        assert!(!fire.is_pseudo_type);
        assert_eq!(fire.weaknesses.len(), 3);
        assert_eq!(fire.weaknesses[2], tag("Data.Type.ROCK"));
        assert_eq!(fire.resistances.len(), 6);

        let normal = &types["NORMAL"];
        assert_eq!(normal.row_index, 0);
        assert_eq!(normal.immunities, vec![tag("Data.Type.GHOST")]);
    }

    #[test]
    fn test_types_file_round_trips() {
        let types = compile_pbs_entries::<TypeInfo>(TYPES.as_bytes()).unwrap();
        let mut output = Vec::new();
        write_pbs(&types, &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            written(&format!("{SEPARATOR}{TYPES}"))
        );
    }

    #[test]
    fn test_id_key_is_ignored_in_favour_of_section_name() {
        let input = "[DRAGON]\nID = DARK\nName = Dragon\n";
        let types = compile_pbs_entries::<TypeInfo>(input.as_bytes()).unwrap();
        assert_eq!(types[0].id, Name::new("DRAGON"));
    }

    #[test]
    fn test_type_flags_use_separator() {
        let input = "[QMARKS]\nIsPseudoType = yes\nFlags = Hidden_Type,NoStab\n";
        let types = compile_pbs_entries::<TypeInfo>(input.as_bytes()).unwrap();
        let flags = &types[0].flags;
        assert!(types[0].is_pseudo_type);
        assert!(flags.has_tag_exact(&tag("Data.Type.Flag.Hidden.Type")));
        assert!(flags.has_tag_exact(&tag("Data.Type.Flag.NoStab")));

        let mut output = Vec::new();
        write_pbs(&types, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.ends_with("IsPseudoType = true\nFlags = Hidden_Type,NoStab\n"));
    }

    #[test]
    fn test_blank_tag_list_reads_empty() {
        let input = "[EMPTY]\nFlags = \n";
        let types = compile_pbs_entries::<TypeInfo>(input.as_bytes()).unwrap();
        assert!(types[0].flags.is_empty());
    }
}
