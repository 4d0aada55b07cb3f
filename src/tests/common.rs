use crate::descriptors::{PbsScalarDescriptor, PbsSchema};
use crate::errors::PbsResult;
use crate::metamodel::{CompoundValues, PbsCompound, PbsRecord, PbsScalar};
use crate::value::PbsValue;
use crate::{impl_pbs_compound, pbs_field};
use schema::{DamageCategory, GameplayTag, GameplayTagContainer, Name, Text};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The serializer is process-wide; tests touching it take this lock.
static SERIALIZER_LOCK: Mutex<()> = Mutex::new(());

pub fn serializer_guard() -> MutexGuard<'static, ()> {
    SERIALIZER_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

pub const HEADER: &str = "# See the documentation on the wiki to learn how to edit this file.\n";
pub const SEPARATOR: &str = "#-------------------------------\n";

/// A name with an optional amount, used to exercise compound cells
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TestPair {
    pub name: Name,
    pub amount: Option<i32>,
}

impl PbsCompound for TestPair {
    fn parameters() -> Vec<PbsScalarDescriptor> {
        vec![
            PbsScalarDescriptor::of::<Name>(),
            PbsScalarDescriptor::of::<Option<i32>>().range(Some(0), Some(99)),
        ]
    }

    fn construct(values: Vec<PbsValue>) -> PbsResult<Self> {
        let mut values = CompoundValues::new(values);
        Ok(TestPair {
            name: values.take()?,
            amount: values.take()?,
        })
    }

    fn deconstruct(&self) -> Vec<PbsValue> {
        vec![self.name.to_scalar_value(), self.amount.to_scalar_value()]
    }
}

impl_pbs_compound!(TestPair);

/// Record with one field of every supported kind
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TestRecord {
    pub id: Name,
    pub index: u32,
    pub flag: bool,
    pub small: i8,
    pub count: u16,
    pub ratio: f64,
    pub label: String,
    pub target: Name,
    pub title: Text,
    pub category: DamageCategory,
    pub element: GameplayTag,
    pub optional: Option<i32>,
    pub pairs: Vec<TestPair>,
    pub notes: Vec<String>,
    pub flags: GameplayTagContainer,
}

impl PbsRecord for TestRecord {
    fn schema() -> PbsSchema<Self> {
        PbsSchema::builder()
            .field(pbs_field!(value "ID" => id).identifier())
            .field(pbs_field!(value "Index" => index).row_index())
            .field(pbs_field!(value "Flag" => flag))
            .field(pbs_field!(value "Small" => small).range::<i8>(Some(-10), Some(10)))
            .field(pbs_field!(value "Count" => count))
            .field(pbs_field!(value "Ratio" => ratio))
            .field(pbs_field!(value "Label" => label))
            .field(pbs_field!(value "Target" => target))
            .field(pbs_field!(value "Title" => title).localized("TestRecords", "{0}_Title"))
            .field(pbs_field!(value "Category" => category))
            .field(
                pbs_field!(value "Element" => element)
                    .gameplay_tag("Test.Element")
                    .create_tags(),
            )
            .field(pbs_field!(value "Optional" => optional))
            .field(pbs_field!(list "Pairs" => pairs).max_length(3))
            .field(pbs_field!(list "Notes" => notes).rename("Note").allow_multiple())
            .field(
                pbs_field!(tags "Flags" => flags)
                    .gameplay_tag("Test.Flag")
                    .create_tags()
                    .tag_separator("_"),
            )
            .build()
    }
}

/// Record whose schema forgot its identifier
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoIdentifierRecord {
    pub value: i32,
}

impl PbsRecord for NoIdentifierRecord {
    fn schema() -> PbsSchema<Self> {
        PbsSchema::builder()
            .field(pbs_field!(value "Value" => value))
            .build()
    }
}

pub fn tag(name: &str) -> GameplayTag {
    GameplayTag::get_or_create(name).expect("test tag names are valid")
}

/// Prefix text with the header every written file starts with
pub fn written(sections: &str) -> String {
    format!("{HEADER}{sections}")
}
