use crate::codec::{collect_elements, read_element, read_record};
use crate::config::{KeyRepeatPolicy, PbsSettings};
use crate::descriptors::{FieldLookup, PbsFieldDescriptor, PbsSchema, RepeatMode};
use crate::errors::{PbsError, PbsResult, ValueError};
use crate::metamodel::{PbsMetamodel, PbsRecord};
use crate::sections::{each_file_section_with, PbsSectionData};
use crate::value::PbsValue;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use tracing::debug;

/// Compile every section of a file into records keyed by section name
pub fn compile_pbs_file<R: PbsRecord>(reader: impl BufRead) -> PbsResult<HashMap<String, R>> {
    compile_pbs_file_with(reader, &PbsSettings::default())
}

pub fn compile_pbs_file_with<R: PbsRecord>(
    reader: impl BufRead,
    settings: &PbsSettings,
) -> PbsResult<HashMap<String, R>> {
    let mut records = HashMap::new();
    compile_sections::<R>(reader, settings.key_repeat, |name, record| {
        match records.entry(name) {
            Entry::Occupied(entry) => Err(PbsError::DuplicateSection(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(record);
                Ok(())
            }
        }
    })?;
    Ok(records)
}

/// Compile every section of a file into records, in file order
pub fn compile_pbs_entries<R: PbsRecord>(reader: impl BufRead) -> PbsResult<Vec<R>> {
    compile_pbs_entries_with(reader, &PbsSettings::default())
}

pub fn compile_pbs_entries_with<R: PbsRecord>(
    reader: impl BufRead,
    settings: &PbsSettings,
) -> PbsResult<Vec<R>> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();
    compile_sections::<R>(reader, settings.key_repeat, |name, record| {
        if !seen.insert(name.clone()) {
            return Err(PbsError::DuplicateSection(name));
        }
        records.push(record);
        Ok(())
    })?;
    Ok(records)
}

fn compile_sections<R: PbsRecord>(
    reader: impl BufRead,
    key_repeat: KeyRepeatPolicy,
    mut accept: impl FnMut(String, R) -> PbsResult<()>,
) -> PbsResult<()> {
    let schema = PbsMetamodel::get_schema::<R>();
    schema.validate()?;

    let lookup: &dyn FieldLookup = schema.as_ref();
    for section in each_file_section_with(reader, Some(lookup), key_repeat) {
        let section = section?;
        let record = compile_section(&schema, &section)?;
        debug!(
            section = %section.name,
            index = section.index,
            keys = section.contents.len(),
            "compiled PBS section"
        );
        accept(section.name, record)?;
    }
    Ok(())
}

/// Build one record from a parsed section
pub fn compile_section<R: PbsRecord>(
    schema: &PbsSchema<R>,
    section: &PbsSectionData,
) -> PbsResult<R> {
    let mut record = R::default();
    let section_name = Some(section.name.as_str());

    for field in schema.fields() {
        let value = if field.is_identifier() {
            read_record(&section.name, field, section_name)
        } else if field.is_row_index() {
            Ok(PbsValue::UInt(section.index as u64))
        } else if let Some(values) = section.contents.get(field.key_name()) {
            read_field(values, field, section_name)
        } else {
            continue;
        };

        value
            .and_then(|value| field.set(&mut record, value))
            .map_err(|err| err.in_field(&section.name, field.key_name()))?;
    }
    Ok(record)
}

fn read_field<R: 'static>(
    values: &[String],
    field: &PbsFieldDescriptor<R>,
    section_name: Option<&str>,
) -> PbsResult<PbsValue> {
    let value = if field.repeat() == RepeatMode::KeyRepeat {
        let elements = values
            .iter()
            .map(|value| read_element(value, field, section_name))
            .collect::<PbsResult<Vec<_>>>()?;
        collect_elements(field, elements)
    } else {
        let last = values.last().map(String::as_str).unwrap_or_default();
        read_record(last, field, section_name)?
    };
    check_length(&value, field)?;
    Ok(value)
}

fn check_length<R: 'static>(value: &PbsValue, field: &PbsFieldDescriptor<R>) -> PbsResult<()> {
    let found = match value {
        PbsValue::List(items) => items.len(),
        PbsValue::Tags(tags) => tags.len(),
        _ => return Ok(()),
    };
    if found < field.min_len() || found > field.max_len() {
        return Err(ValueError::LengthOutOfRange {
            min: field.min_len(),
            max: field.max_len(),
            found,
        }
        .into());
    }
    Ok(())
}
