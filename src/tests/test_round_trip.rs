#[cfg(test)]
mod tests {
    use crate::tests::common::{tag, written, TestPair, TestRecord, SEPARATOR};
    use crate::{compile_pbs_entries, compile_pbs_file, write_pbs};
    use pretty_assertions::assert_eq;
    use schema::{DamageCategory, GameplayTagContainer, Name, Text};

    fn sample_records() -> Vec<TestRecord> {
        let mut flags = GameplayTagContainer::new();
        flags.add_tag(tag("Test.Flag.Hidden.Power"));

        vec![
            TestRecord {
                id: Name::new("ALPHA"),
                index: 0,
                flag: true,
                small: -3,
                count: 500,
                ratio: 0.25,
                label: "Hello, world".to_string(),
                target: Name::none(),
                title: Text::localized("TestRecords", "ALPHA_Title", "Alpha title"),
                category: DamageCategory::Special,
                element: tag("Test.Element.Fire"),
                optional: Some(0),
                pairs: vec![TestPair {
                    name: Name::none(),
                    amount: Some(5),
                }],
                notes: vec!["first, with comma".to_string(), "second".to_string()],
                flags,
            },
            TestRecord {
                id: Name::new("BETA"),
                index: 1,
                target: Name::new("Stage"),
                pairs: vec![
                    TestPair {
                        name: Name::new("A"),
                        amount: Some(1),
                    },
                    TestPair {
                        name: Name::new("B, C"),
                        amount: None,
                    },
                ],
                ..TestRecord::default()
            },
        ]
    }

    fn expected_text() -> String {
        written(&format!(
            "{SEPARATOR}[ALPHA]
Flag = true
Small = -3
Count = 500
Ratio = 0.25
Label = Hello, world
Title = Alpha title
Category = Special
Element = Fire
Optional = 0
Pairs = None,5
Note = first, with comma
Note = second
Flags = Hidden_Power
{SEPARATOR}[BETA]
Target = Stage
Pairs = A,1,\"B, C\",
"
        ))
    }

    #[test]
    fn test_write_produces_expected_text() {
        let mut output = Vec::new();
        write_pbs(&sample_records(), &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), expected_text());
    }

    #[test]
    fn test_compile_reads_back_written_records() {
        let records = compile_pbs_entries::<TestRecord>(expected_text().as_bytes()).unwrap();
        assert_eq!(records, sample_records());
    }

    #[test]
    fn test_read_write_read_is_stable() {
        let first = compile_pbs_entries::<TestRecord>(expected_text().as_bytes()).unwrap();

        let mut output = Vec::new();
        write_pbs(&first, &mut output).unwrap();
        let second = compile_pbs_entries::<TestRecord>(output.as_slice()).unwrap();

        assert_eq!(first, second);
        assert_eq!(String::from_utf8(output).unwrap(), expected_text());
    }

    #[test]
    fn test_compile_file_keys_records_by_section() {
        let records = compile_pbs_file::<TestRecord>(expected_text().as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records["ALPHA"].count, 500);
        assert_eq!(records["BETA"].index, 1);
        assert_eq!(records["BETA"].pairs[1].name, Name::new("B, C"));
    }

    #[test]
    fn test_localized_literals_survive_round_trip() {
        let record = TestRecord {
            id: Name::new("GAMMA"),
            title: Text::localized("Elsewhere", "SomeKey", "Borrowed"),
            ..TestRecord::default()
        };

        let mut output = Vec::new();
        write_pbs(std::slice::from_ref(&record), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Title = NSLOCTEXT(\"Elsewhere\", \"SomeKey\", \"Borrowed\")"));

        let records = compile_pbs_entries::<TestRecord>(text.as_bytes()).unwrap();
        assert_eq!(records, vec![record]);
    }
}
