#[cfg(test)]
mod tests {
    use crate::model::{ItemInfo, SpeciesInfo, TypeInfo};
    use crate::tests::common::TestRecord;
    use crate::{
        impl_pbs_compound, pbs_field, CollectionKind, FieldLookup, PbsCompound, PbsError,
        PbsMetamodel, PbsRecord, PbsResult, PbsScalarDescriptor, PbsSchema, PbsValue, RepeatMode,
        ScalarKind, SchemaError,
    };
    use pretty_assertions::assert_eq;
    use schema::Name;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct ClashingKeys {
        id: Name,
        first: i32,
        second: i32,
    }

    impl PbsRecord for ClashingKeys {
        fn schema() -> PbsSchema<Self> {
            PbsSchema::builder()
                .field(pbs_field!(value "ID" => id).identifier())
                .field(pbs_field!(value "Value" => first))
                .field(pbs_field!(value "Other" => second).rename("Value"))
                .build()
        }
    }

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Nothing;

    impl PbsCompound for Nothing {
        fn parameters() -> Vec<PbsScalarDescriptor> {
            Vec::new()
        }

        fn construct(_values: Vec<PbsValue>) -> PbsResult<Self> {
            Ok(Nothing)
        }

        fn deconstruct(&self) -> Vec<PbsValue> {
            Vec::new()
        }
    }

    impl_pbs_compound!(Nothing);

    #[derive(Debug, Clone, PartialEq, Default)]
    struct HollowRecord {
        id: Name,
        nothing: Nothing,
    }

    impl PbsRecord for HollowRecord {
        fn schema() -> PbsSchema<Self> {
            PbsSchema::builder()
                .field(pbs_field!(value "ID" => id).identifier())
                .field(pbs_field!(value "Nothing" => nothing))
                .build()
        }
    }

    #[test]
    fn test_schema_is_built_once_per_type() {
        let first = PbsMetamodel::get_schema::<TypeInfo>();
        let second = PbsMetamodel::get_schema::<TypeInfo>();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let schema = PbsMetamodel::get_schema::<TypeInfo>();
        let keys = schema.fields().map(|f| f.key_name()).collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![
                "ID",
                "RowIndex",
                "Name",
                "IconPosition",
                "IsSpecialType",
                "IsPseudoType",
                "Weaknesses",
                "Resistances",
                "Immunities",
                "Flags",
            ]
        );
        assert_eq!(schema.identifier().unwrap().key_name(), "ID");
    }

    #[test]
    fn test_renamed_fields_are_found_by_file_key() {
        let schema = PbsMetamodel::get_schema::<SpeciesInfo>();
        assert!(schema.field("EVs").is_some());
        assert!(schema.field("EVYield").is_none());
        assert!(schema.field("Color").is_some());
        assert_eq!(schema.repeat_mode("Evolution"), Some(RepeatMode::KeyRepeat));
        assert_eq!(schema.repeat_mode("Types"), Some(RepeatMode::CsvRepeat));
        assert_eq!(schema.repeat_mode("BaseStats"), Some(RepeatMode::None));
        assert_eq!(schema.repeat_mode("Unknown"), None);
    }

    #[test]
    fn test_field_shapes() {
        let species = PbsMetamodel::get_schema::<SpeciesInfo>();

        let base_stats = species.field("BaseStats").unwrap();
        assert!(base_stats.is_compound());
        assert!(!base_stats.is_scalar());
        assert_eq!(base_stats.elements().len(), 6);

        let evolution = species.field("Evolution").unwrap();
        assert!(evolution.is_scalar());
        assert_eq!(evolution.elements()[0].kind, ScalarKind::Custom);
        assert!(evolution.elements()[0].converter.is_some());

        let flags = species.field("Flags").unwrap();
        assert_eq!(flags.collection(), Some(CollectionKind::Tags));
        let descriptor = &flags.elements()[0];
        assert_eq!(descriptor.gameplay_tag_namespace.as_deref(), Some("Data.Species"));
        assert_eq!(descriptor.gameplay_tag_separator.as_deref(), Some("_"));
        assert!(descriptor.create_new_gameplay_tag);

        let abilities = species.field("Abilities").unwrap();
        assert_eq!(abilities.max_len(), 2);
        assert_eq!(species.field("Types").unwrap().min_len(), 1);

        let items = PbsMetamodel::get_schema::<ItemInfo>();
        let pocket = items.field("Pocket").unwrap();
        assert!(pocket.elements()[0].converter.is_some());
        assert!(items.field("SellPrice").unwrap().elements()[0].is_optional);
    }

    #[test]
    fn test_localized_key_format() {
        let schema = PbsMetamodel::get_schema::<TestRecord>();
        let title = &schema.field("Title").unwrap().elements()[0];
        let localized = title.localized_text_namespace.as_ref().unwrap();
        assert_eq!(localized.namespace, "TestRecords");
        assert_eq!(localized.key_for("ALPHA"), "ALPHA_Title");
    }

    #[test]
    fn test_get_and_set_through_descriptor() {
        let schema = PbsMetamodel::get_schema::<TestRecord>();
        let count = schema.field("Count").unwrap();

        let mut record = TestRecord::default();
        count.set(&mut record, PbsValue::UInt(42)).unwrap();
        assert_eq!(record.count, 42);
        assert_eq!(count.get(&record), PbsValue::UInt(42));

        assert!(count.set(&mut record, PbsValue::UInt(70_000)).is_err());
        assert!(count
            .set(&mut record, PbsValue::String("many".to_string()))
            .is_err());
    }

    #[test]
    fn test_duplicate_keys_fail_validation() {
        let schema = ClashingKeys::schema();
        let err = schema.validate().unwrap_err();
        assert!(matches!(
            err,
            PbsError::Schema(SchemaError::DuplicateKey { ref key, .. }) if key == "Value"
        ));
    }

    #[test]
    fn test_empty_compound_fails_validation() {
        let err = HollowRecord::schema().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Compound type Nothing has no constructor parameters"
        );
        assert!(matches!(
            err,
            PbsError::Schema(SchemaError::EmptyCompound(ref key)) if key == "Nothing"
        ));
    }
}
