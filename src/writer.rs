use crate::codec::{write_element, write_record};
use crate::config::PbsSettings;
use crate::descriptors::RepeatMode;
use crate::errors::PbsResult;
use crate::metamodel::{PbsMetamodel, PbsRecord};
use crate::value::PbsValue;
use std::io::Write;
use tracing::debug;

/// Write records as a PBS file, in the order given
pub fn write_pbs<R: PbsRecord>(records: &[R], writer: impl Write) -> PbsResult<()> {
    write_pbs_with(records, writer, &PbsSettings::default())
}

pub fn write_pbs_with<R: PbsRecord>(
    records: &[R],
    mut writer: impl Write,
    settings: &PbsSettings,
) -> PbsResult<()> {
    let schema = PbsMetamodel::get_schema::<R>();
    schema.validate()?;
    let identifier = schema.identifier()?;
    let defaults = R::default();

    writeln!(writer, "{}", settings.header_comment)?;
    for record in records {
        let section = write_record(&identifier.get(record), identifier, None)
            .map_err(|err| err.in_field("", identifier.key_name()))?;
        writeln!(writer, "{}", settings.section_separator)?;
        writeln!(writer, "[{section}]")?;

        for field in schema
            .fields()
            .filter(|field| !field.is_identifier() && !field.is_row_index())
        {
            let value = field.get(record);
            if !should_write(&value, &field.get(&defaults)) {
                continue;
            }

            let lines = if field.repeat() == RepeatMode::KeyRepeat {
                repeated_elements(value)
                    .iter()
                    .map(|element| write_element(element, field, Some(&section)))
                    .collect::<PbsResult<Vec<_>>>()
            } else {
                write_record(&value, field, Some(&section)).map(|line| vec![line])
            }
            .map_err(|err| err.in_field(&section, field.key_name()))?;

            for line in lines {
                writeln!(writer, "{} = {}", field.key_name(), line)?;
            }
        }
        debug!(section = %section, "wrote PBS section");
    }
    writer.flush()?;
    Ok(())
}

/// Absent values and empty collections are never written. Other values are
/// written when they differ from the default record's.
fn should_write(value: &PbsValue, default: &PbsValue) -> bool {
    match value {
        PbsValue::None => false,
        PbsValue::Tags(tags) => !tags.is_empty(),
        PbsValue::List(items) => !items.is_empty(),
        other => other != default,
    }
}

fn repeated_elements(value: PbsValue) -> Vec<PbsValue> {
    match value {
        PbsValue::List(items) => items,
        PbsValue::Tags(tags) => tags.iter().cloned().map(PbsValue::Tag).collect(),
        other => vec![other],
    }
}
