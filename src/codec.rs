//! Coercion between PBS text and [`PbsValue`]s.
//!
//! `read_*` functions decode cells using the schema's descriptors, `write_*`
//! functions are their inverse. Both take the enclosing section name so
//! localized text keys can be derived from it.

use crate::csv::{join_csv_line, split_csv_line};
use crate::descriptors::{
    CollectionKind, NumberKind, NumericBounds, PbsFieldDescriptor, PbsScalarDescriptor,
    RepeatMode, ScalarKind,
};
use crate::errors::{PbsResult, ValueError};
use crate::metamodel::PbsNumber;
use crate::value::PbsValue;
use schema::{GameplayTag, Name, Text};
use std::cmp::Ordering;

const TRUE_LITERALS: [&str; 4] = ["1", "TRUE", "YES", "Y"];
const FALSE_LITERALS: [&str; 4] = ["0", "FALSE", "NO", "N"];

/// Parse a boolean literal, ignoring case
pub fn parse_bool(input: &str) -> PbsResult<bool> {
    let trimmed = input.trim();
    if TRUE_LITERALS.iter().any(|l| l.eq_ignore_ascii_case(trimmed)) {
        Ok(true)
    } else if FALSE_LITERALS.iter().any(|l| l.eq_ignore_ascii_case(trimmed)) {
        Ok(false)
    } else {
        Err(ValueError::InvalidBool(input.to_string()).into())
    }
}

/// Parse a number and check it against inclusive bounds
pub fn parse_number<T: PbsNumber>(input: &str, bounds: &NumericBounds<T>) -> PbsResult<T> {
    let trimmed = input.trim();
    let value: T = trimmed
        .parse()
        .map_err(|_| ValueError::InvalidNumber(input.to_string()))?;

    // NaN compares as unordered and must fail any bound.
    if let Some(min) = bounds.min {
        if !matches!(
            value.partial_cmp(&min),
            Some(Ordering::Greater | Ordering::Equal)
        ) {
            return Err(ValueError::BelowMinimum {
                input: trimmed.to_string(),
                min: min.to_string(),
            }
            .into());
        }
    }
    if let Some(max) = bounds.max {
        if !matches!(value.partial_cmp(&max), Some(Ordering::Less | Ordering::Equal)) {
            return Err(ValueError::AboveMaximum {
                input: trimmed.to_string(),
                max: max.to_string(),
            }
            .into());
        }
    }
    Ok(value)
}

fn is_none_literal(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(Name::NONE_LITERAL)
}

/// Full tag name for a cell: separators become `.` and the namespace is prepended
pub fn gameplay_tag_name(input: &str, descriptor: &PbsScalarDescriptor) -> String {
    let Some(namespace) = &descriptor.gameplay_tag_namespace else {
        return input.to_string();
    };
    let leaf = match &descriptor.gameplay_tag_separator {
        Some(separator) if !separator.is_empty() => input.replace(separator.as_str(), "."),
        _ => input.to_string(),
    };
    format!("{namespace}.{leaf}")
}

/// Inverse of [`gameplay_tag_name`]
fn strip_gameplay_tag_name(name: &str, descriptor: &PbsScalarDescriptor) -> String {
    let Some(namespace) = &descriptor.gameplay_tag_namespace else {
        return name.to_string();
    };
    let leaf = name
        .strip_prefix(namespace.as_str())
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(name);
    match &descriptor.gameplay_tag_separator {
        Some(separator) if !separator.is_empty() => leaf.replace('.', separator),
        _ => leaf.to_string(),
    }
}

/// Decode a field's stored value.
///
/// `CsvRepeat` fields become a collection of every element on the line.
/// Everything else decodes to a single element.
pub fn read_record<R: 'static>(
    input: &str,
    field: &PbsFieldDescriptor<R>,
    section_name: Option<&str>,
) -> PbsResult<PbsValue> {
    if field.repeat() != RepeatMode::CsvRepeat {
        return read_element(input, field, section_name);
    }

    let cells = split_csv_line(input);
    let arity = field.elements().len().max(1);
    let elements = cells
        .chunks(arity)
        .map(|cycle| read_cycle(cycle, field, section_name))
        .collect::<PbsResult<Vec<_>>>()?;
    Ok(collect_elements(field, elements))
}

/// Decode one element of a field (one line of a `KeyRepeat` field)
pub fn read_element<R: 'static>(
    input: &str,
    field: &PbsFieldDescriptor<R>,
    section_name: Option<&str>,
) -> PbsResult<PbsValue> {
    if field.is_scalar() {
        let value = read_scalar(input, &field.elements()[0], section_name)?;
        return Ok(if field.is_compound() {
            PbsValue::Compound(vec![value])
        } else {
            value
        });
    }
    read_cycle(&split_csv_line(input), field, section_name)
}

/// Wrap decoded elements in the field's collection shape
pub fn collect_elements<R: 'static>(
    field: &PbsFieldDescriptor<R>,
    elements: Vec<PbsValue>,
) -> PbsValue {
    match field.collection() {
        Some(CollectionKind::Tags) => PbsValue::Tags(
            elements
                .into_iter()
                .filter_map(|value| match value {
                    PbsValue::Tag(tag) => Some(tag),
                    _ => None,
                })
                .collect(),
        ),
        _ => PbsValue::List(elements),
    }
}

fn read_cycle<R: 'static>(
    cells: &[String],
    field: &PbsFieldDescriptor<R>,
    section_name: Option<&str>,
) -> PbsResult<PbsValue> {
    let mut values = field
        .elements()
        .iter()
        .enumerate()
        .map(|(position, descriptor)| {
            let cell = cells.get(position).map(String::as_str).unwrap_or("");
            read_cell(cell, descriptor, position, section_name)
        })
        .collect::<PbsResult<Vec<_>>>()?;

    if field.is_compound() {
        Ok(PbsValue::Compound(values))
    } else {
        Ok(values.pop().unwrap_or(PbsValue::None))
    }
}

fn read_cell(
    cell: &str,
    descriptor: &PbsScalarDescriptor,
    position: usize,
    section_name: Option<&str>,
) -> PbsResult<PbsValue> {
    if cell.trim().is_empty() && descriptor.converter.is_none() {
        return if descriptor.is_optional {
            Ok(PbsValue::None)
        } else {
            Err(ValueError::MissingValue {
                type_name: descriptor.type_name,
                position,
            }
            .into())
        };
    }
    read_scalar(cell, descriptor, section_name)
}

/// Decode one cell according to its descriptor
pub fn read_scalar(
    input: &str,
    descriptor: &PbsScalarDescriptor,
    section_name: Option<&str>,
) -> PbsResult<PbsValue> {
    if let Some(converter) = &descriptor.converter {
        return converter.read(input, descriptor, section_name);
    }
    if descriptor.is_optional && input.trim().is_empty() {
        return Ok(PbsValue::None);
    }

    match descriptor.kind {
        ScalarKind::Bool => parse_bool(input).map(PbsValue::Bool),
        ScalarKind::String => Ok(PbsValue::String(input.to_string())),
        ScalarKind::Name if is_none_literal(input) => Ok(PbsValue::Name(Name::none())),
        ScalarKind::Name => Ok(PbsValue::Name(Name::new(gameplay_tag_name(input, descriptor)))),
        ScalarKind::Text => Ok(PbsValue::Text(read_text(input, descriptor, section_name))),
        ScalarKind::Tag if input.trim().is_empty() || is_none_literal(input) => {
            Ok(PbsValue::Tag(GameplayTag::empty()))
        }
        ScalarKind::Tag => {
            let name = gameplay_tag_name(input, descriptor);
            let tag = if descriptor.create_new_gameplay_tag {
                GameplayTag::get_or_create(&name)?
            } else {
                GameplayTag::request(&name)?
            };
            Ok(PbsValue::Tag(tag))
        }
        ScalarKind::Enum(meta) => meta
            .members
            .iter()
            .find(|member| member.eq_ignore_ascii_case(input.trim()))
            .map(|member| PbsValue::Enum(*member))
            .ok_or_else(|| {
                ValueError::UnknownEnumMember {
                    input: input.to_string(),
                    type_name: meta.type_name,
                }
                .into()
            }),
        ScalarKind::Number(kind) => read_number(input, kind, descriptor),
        ScalarKind::Custom => Err(ValueError::UnsupportedScalar(descriptor.type_name).into()),
    }
}

fn read_text(input: &str, descriptor: &PbsScalarDescriptor, section_name: Option<&str>) -> Text {
    if let Some(text) = Text::parse_literal(input) {
        return text;
    }
    match (&descriptor.localized_text_namespace, section_name) {
        (Some(localized), Some(section)) => {
            Text::localized(&localized.namespace, localized.key_for(section), input)
        }
        _ => Text::invariant(input),
    }
}

fn read_number(
    input: &str,
    kind: NumberKind,
    descriptor: &PbsScalarDescriptor,
) -> PbsResult<PbsValue> {
    fn bounded<T: PbsNumber>(input: &str, descriptor: &PbsScalarDescriptor) -> PbsResult<PbsValue> {
        let bounds = descriptor
            .numeric_bounds
            .as_ref()
            .and_then(T::bounds_of)
            .unwrap_or_default();
        parse_number::<T>(input, &bounds).map(|value| value.to_scalar_value())
    }

    match kind {
        NumberKind::I8 => bounded::<i8>(input, descriptor),
        NumberKind::I16 => bounded::<i16>(input, descriptor),
        NumberKind::I32 => bounded::<i32>(input, descriptor),
        NumberKind::I64 => bounded::<i64>(input, descriptor),
        NumberKind::U8 => bounded::<u8>(input, descriptor),
        NumberKind::U16 => bounded::<u16>(input, descriptor),
        NumberKind::U32 => bounded::<u32>(input, descriptor),
        NumberKind::U64 => bounded::<u64>(input, descriptor),
        NumberKind::F32 => bounded::<f32>(input, descriptor),
        NumberKind::F64 => bounded::<f64>(input, descriptor),
    }
}

/// Encode a field's value as one line. For `KeyRepeat` fields use
/// [`write_element`] on each element instead.
pub fn write_record<R: 'static>(
    value: &PbsValue,
    field: &PbsFieldDescriptor<R>,
    section_name: Option<&str>,
) -> PbsResult<String> {
    match value {
        PbsValue::List(items) => {
            let mut cells = Vec::new();
            for item in items {
                cells.extend(element_cells(item, field, section_name)?);
            }
            Ok(join_csv_line(&cells))
        }
        PbsValue::Tags(tags) => {
            let descriptor = &field.elements()[0];
            let cells = tags
                .iter()
                .map(|tag| write_scalar(&PbsValue::Tag(tag.clone()), descriptor, section_name))
                .collect::<PbsResult<Vec<_>>>()?;
            Ok(join_csv_line(&cells))
        }
        other => write_element(other, field, section_name),
    }
}

/// Encode one element of a field
pub fn write_element<R: 'static>(
    value: &PbsValue,
    field: &PbsFieldDescriptor<R>,
    section_name: Option<&str>,
) -> PbsResult<String> {
    if field.is_scalar() {
        let scalar = match value {
            PbsValue::Compound(values) if values.len() == 1 => &values[0],
            other => other,
        };
        return write_scalar(scalar, &field.elements()[0], section_name);
    }
    Ok(join_csv_line(&element_cells(value, field, section_name)?))
}

fn element_cells<R: 'static>(
    value: &PbsValue,
    field: &PbsFieldDescriptor<R>,
    section_name: Option<&str>,
) -> PbsResult<Vec<String>> {
    match value {
        PbsValue::Compound(values) => field
            .elements()
            .iter()
            .zip(values)
            .map(|(descriptor, value)| match value {
                PbsValue::None if descriptor.is_optional => Ok(String::new()),
                value => write_scalar(value, descriptor, section_name),
            })
            .collect(),
        scalar => Ok(vec![write_scalar(scalar, &field.elements()[0], section_name)?]),
    }
}

/// Encode one cell according to its descriptor
pub fn write_scalar(
    value: &PbsValue,
    descriptor: &PbsScalarDescriptor,
    section_name: Option<&str>,
) -> PbsResult<String> {
    if let Some(converter) = &descriptor.converter {
        return converter.write(value, descriptor, section_name);
    }

    match value {
        PbsValue::None if descriptor.is_optional => Ok(String::new()),
        PbsValue::None => Err(ValueError::NullValue(descriptor.type_name).into()),
        PbsValue::Bool(value) => Ok(value.to_string()),
        PbsValue::Int(value) => Ok(value.to_string()),
        PbsValue::UInt(value) => Ok(value.to_string()),
        PbsValue::Float(value) => match descriptor.kind {
            ScalarKind::Number(NumberKind::F32) => Ok((*value as f32).to_string()),
            _ => Ok(value.to_string()),
        },
        PbsValue::String(value) => Ok(value.clone()),
        PbsValue::Name(name) if name.is_none() => Ok(Name::NONE_LITERAL.to_string()),
        PbsValue::Name(name) => Ok(strip_gameplay_tag_name(name.as_str(), descriptor)),
        PbsValue::Tag(tag) if !tag.is_valid() => Ok(Name::NONE_LITERAL.to_string()),
        PbsValue::Tag(tag) => Ok(strip_gameplay_tag_name(tag.name(), descriptor)),
        PbsValue::Text(text) => Ok(write_text(text, descriptor, section_name)),
        PbsValue::Enum(member) => Ok(member.to_string()),
        other @ (PbsValue::List(_) | PbsValue::Compound(_) | PbsValue::Tags(_)) => {
            Err(ValueError::ShapeMismatch {
                expected: "a scalar",
                found: other.kind_name(),
            }
            .into())
        }
    }
}

fn write_text(text: &Text, descriptor: &PbsScalarDescriptor, section_name: Option<&str>) -> String {
    if let (Some(localized), Some(section)) = (&descriptor.localized_text_namespace, section_name) {
        let expected_key = localized.key_for(section);
        if text.namespace() == Some(localized.namespace.as_str())
            || text.key() == Some(expected_key.as_str())
        {
            return text.source_string().to_string();
        }
    }
    text.to_localized_string()
}
