use schema::TagError;
use thiserror::Error;

/// Main error type for compiling and writing PBS data
#[derive(Debug, Error)]
pub enum PbsError {
    /// The file structure could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A value could not be coerced to or from its text form
    #[error(transparent)]
    Value(#[from] ValueError),
    /// A record type's schema does not fit the operation
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// The active serializer registry rejected the request
    #[error(transparent)]
    Serializer(#[from] SerializerError),
    /// The same section name appears twice in one file
    #[error("Duplicate section {0} in file")]
    DuplicateSection(String),
    /// An error attributed to one field of one section
    #[error("Section [{section}], key {key}: {source}")]
    Field {
        section: String,
        key: String,
        #[source]
        source: Box<PbsError>,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings file: {0}")]
    Settings(#[from] ron::error::SpannedError),
    #[error("Invalid baked game data: {0}")]
    Baked(#[from] postcard::Error),
}

/// Errors related to the line structure of a file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A non-empty line appeared before the first section header
    #[error(
        "Unexpected line {line} in file: {text}\nExpected a section at the beginning of the file.\nThis error may also occur if the file was not saved in UTF-8."
    )]
    MissingSection { line: usize, text: String },
    /// A line inside a section is neither a header nor `Key = value`
    #[error(
        "Unexpected line {line} in file: {text}\nBad line syntax (expected syntax like XXX=YYY).\nThis error may also occur if the file was not saved in UTF-8."
    )]
    BadLineSyntax { line: usize, text: String },
    /// The line could not be decoded
    #[error("Line {line} could not be read as UTF-8 text. Make sure the file was saved in UTF-8.")]
    Encoding { line: usize },
}

/// Errors related to coercing a single value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("Failed to parse boolean {0}")]
    InvalidBool(String),
    #[error("Failed to parse number {0}")]
    InvalidNumber(String),
    #[error("Number {input} is below minimum {min}")]
    BelowMinimum { input: String, min: String },
    #[error("Number {input} is above maximum {max}")]
    AboveMaximum { input: String, max: String },
    #[error("{input} is not a member of {type_name}")]
    UnknownEnumMember {
        input: String,
        type_name: &'static str,
    },
    #[error(transparent)]
    Tag(#[from] TagError),
    #[error("Unsupported scalar type {0}")]
    UnsupportedScalar(&'static str),
    #[error("Expected a value for {type_name} at position {position}")]
    MissingValue {
        type_name: &'static str,
        position: usize,
    },
    #[error("Cannot write a missing value for {0}")]
    NullValue(&'static str),
    #[error("Expected between {min} and {max} values, found {found}")]
    LengthOutOfRange { min: usize, max: usize, found: usize },
    #[error("Expected {expected} but found {found}")]
    ShapeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("{0}")]
    Converter(String),
}

/// Errors that indicate a record type and its schema do not match.
/// These are programming errors, not data errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Schema for {0} has no identifier field")]
    MissingIdentifier(&'static str),
    #[error("Schema for {0} has more than one identifier field")]
    DuplicateIdentifier(&'static str),
    #[error("Schema for {record} declares key {key} twice")]
    DuplicateKey { record: &'static str, key: String },
    #[error("Compound type {0} has no constructor parameters")]
    EmptyCompound(String),
}

/// Errors related to the active serializer registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializerError {
    #[error("The PBS serializer has not been initialized")]
    NotInitialized,
    #[error("No PBS serializer is registered for {0}")]
    NotRegistered(&'static str),
}

/// Type alias for Results using PbsError
pub type PbsResult<T> = Result<T, PbsError>;

impl PbsError {
    /// Attach section and key context to an error
    pub fn in_field(self, section: &str, key: &str) -> Self {
        PbsError::Field {
            section: section.to_string(),
            key: key.to_string(),
            source: Box::new(self),
        }
    }
}

impl From<TagError> for PbsError {
    fn from(err: TagError) -> Self {
        PbsError::Value(ValueError::Tag(err))
    }
}
