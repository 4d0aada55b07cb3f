#[cfg(test)]
mod tests {
    use crate::model::{ItemInfo, SpeciesInfo, TypeInfo};
    use crate::tests::common::{written, TestRecord, SEPARATOR};
    use crate::{compile_pbs_entries, write_pbs, write_pbs_with, PbsRecord, PbsSettings};
    use pretty_assertions::assert_eq;
    use schema::{Name, Text};

    fn write_text<R: PbsRecord>(records: &[R]) -> String {
        let mut output = Vec::new();
        write_pbs(records, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_default_record_writes_only_its_header() {
        let record = TestRecord {
            id: Name::new("EMPTY"),
            ..TestRecord::default()
        };
        assert_eq!(write_text(&[record]), written(&format!("{SEPARATOR}[EMPTY]\n")));
    }

    #[test]
    fn test_non_empty_default_collections_are_written() {
        let species = SpeciesInfo {
            id: Name::new("MISSINGNO"),
            ..SpeciesInfo::default()
        };
        assert_eq!(
            write_text(&[species]),
            written(&format!(
                "{SEPARATOR}[MISSINGNO]\nTypes = NORMAL\nEggGroups = Undiscovered\n"
            ))
        );
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let input = "[PLAIN]\n";
        let types = compile_pbs_entries::<TypeInfo>(input.as_bytes()).unwrap();
        assert_eq!(
            types,
            vec![TypeInfo {
                id: Name::new("PLAIN"),
                ..TypeInfo::default()
            }]
        );

        let items = compile_pbs_entries::<ItemInfo>(input.as_bytes()).unwrap();
        assert_eq!(items[0].bp_price, 1);
        assert_eq!(items[0].sell_price, None);
        assert_eq!(items[0].description, Text::invariant("???"));
    }

    #[test]
    fn test_value_equal_to_default_is_not_written() {
        let input = "[NORMAL]\nName = Unnamed\nIconPosition = 0\nIsSpecialType = false\n";
        let types = compile_pbs_entries::<TypeInfo>(input.as_bytes()).unwrap();

        // The localized name read from the file differs from the invariant default.
        assert_eq!(
            write_text(&types),
            written(&format!("{SEPARATOR}[NORMAL]\nName = Unnamed\n"))
        );
    }

    #[test]
    fn test_custom_header_and_separator() {
        let settings = PbsSettings {
            header_comment: "# Types".to_string(),
            section_separator: "#====".to_string(),
            ..PbsSettings::default()
        };
        let record = TypeInfo {
            id: Name::new("FIRE"),
            ..TypeInfo::default()
        };

        let mut output = Vec::new();
        write_pbs_with(&[record], &mut output, &settings).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "# Types\n#====\n[FIRE]\n");
    }

    #[test]
    fn test_empty_record_list_writes_header_only() {
        assert_eq!(write_text::<TypeInfo>(&[]), written(""));
    }
}
