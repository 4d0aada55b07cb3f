use crate::config::KeyRepeatPolicy;
use crate::descriptors::{FieldLookup, RepeatMode};
use crate::errors::{PbsError, PbsResult, ParseError};
use regex::Regex;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::{self, BufRead, Lines};
use std::sync::LazyLock;

static SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[\s*(.*)\s*\]\s*$").expect("section header pattern is valid")
});

static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\w+)\s*=\s*(.*)$").expect("key value pattern is valid")
});

/// The raw contents of one `[Section]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PbsSectionData {
    /// Header text between the brackets
    pub name: String,
    /// Position of the section in its file, starting at 0
    pub index: usize,
    /// Values by key, in the order their lines appeared
    pub contents: HashMap<String, Vec<String>>,
}

impl PbsSectionData {
    fn new(name: &str, index: usize) -> Self {
        PbsSectionData {
            name: name.to_string(),
            index,
            contents: HashMap::new(),
        }
    }
}

/// Lazily yields the sections of a PBS file.
///
/// A section is complete when the next header is found or the input ends.
/// The first error ends iteration.
pub struct FileSections<'a, R> {
    lines: Lines<R>,
    schema: Option<&'a dyn FieldLookup>,
    key_repeat: KeyRepeatPolicy,
    line_number: usize,
    current: Option<PbsSectionData>,
    next_index: usize,
    finished: bool,
}

/// Split a file into sections. `schema` tells the parser which keys may repeat.
pub fn each_file_section<'a, R: BufRead>(
    reader: R,
    schema: Option<&'a dyn FieldLookup>,
) -> FileSections<'a, R> {
    each_file_section_with(reader, schema, KeyRepeatPolicy::default())
}

pub fn each_file_section_with<'a, R: BufRead>(
    reader: R,
    schema: Option<&'a dyn FieldLookup>,
    key_repeat: KeyRepeatPolicy,
) -> FileSections<'a, R> {
    FileSections {
        lines: reader.lines(),
        schema,
        key_repeat,
        line_number: 0,
        current: None,
        next_index: 0,
        finished: false,
    }
}

impl<R: BufRead> FileSections<'_, R> {
    fn fail(&mut self, error: PbsError) -> Option<PbsResult<PbsSectionData>> {
        self.finished = true;
        Some(Err(error))
    }
}

impl<R: BufRead> Iterator for FileSections<'_, R> {
    type Item = PbsResult<PbsSectionData>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            self.line_number += 1;
            let raw = match self.lines.next() {
                Some(Ok(raw)) => raw,
                Some(Err(err)) if err.kind() == io::ErrorKind::InvalidData => {
                    let line = self.line_number;
                    return self.fail(ParseError::Encoding { line }.into());
                }
                Some(Err(err)) => return self.fail(err.into()),
                None => {
                    self.finished = true;
                    return self.current.take().map(Ok);
                }
            };

            let raw = raw.trim_start_matches('\u{feff}');
            let content = raw.split('#').next().unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }

            if let Some(captures) = SECTION_HEADER.captures(content) {
                let section = PbsSectionData::new(captures[1].trim(), self.next_index);
                self.next_index += 1;
                if let Some(completed) = self.current.replace(section) {
                    return Some(Ok(completed));
                }
                continue;
            }

            let line = self.line_number;
            let Some(section) = self.current.as_mut() else {
                let text = raw.to_string();
                return self.fail(ParseError::MissingSection { line, text }.into());
            };
            let Some(captures) = KEY_VALUE.captures(content) else {
                let text = raw.to_string();
                return self.fail(ParseError::BadLineSyntax { line, text }.into());
            };

            let key = captures[1].to_string();
            let value = captures[2].trim_end().to_string();
            let repeats = self
                .schema
                .and_then(|schema| schema.repeat_mode(&key))
                == Some(RepeatMode::KeyRepeat);

            match (repeats, self.key_repeat, section.contents.entry(key)) {
                (true, _, Entry::Occupied(mut values)) => values.get_mut().push(value),
                (true, KeyRepeatPolicy::KeepAll, Entry::Vacant(values)) => {
                    values.insert(vec![value]);
                }
                (true, KeyRepeatPolicy::DiscardFirst, Entry::Vacant(values)) => {
                    values.insert(Vec::new());
                }
                (false, _, Entry::Occupied(mut values)) => *values.get_mut() = vec![value],
                (false, _, Entry::Vacant(values)) => {
                    values.insert(vec![value]);
                }
            }
        }
    }
}
