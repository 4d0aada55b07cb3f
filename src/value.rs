use schema::{GameplayTag, GameplayTagContainer, Name, Text};

/// Dynamically typed value exchanged between record fields, the codec and
/// converters.
///
/// Record accessors turn typed fields into `PbsValue`s for writing and back
/// again after reading, so the compiler and writer never need to know the
/// concrete record type.
#[derive(Debug, Clone, PartialEq)]
pub enum PbsValue {
    /// A blank optional cell or an unset optional field
    None,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Name(Name),
    Text(Text),
    Tag(GameplayTag),
    /// Canonical member name of an enum
    Enum(&'static str),
    /// Elements of a list field
    List(Vec<PbsValue>),
    /// Constructor-ordered parameters of a compound value
    Compound(Vec<PbsValue>),
    Tags(GameplayTagContainer),
}

impl PbsValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            PbsValue::None => "nothing",
            PbsValue::Bool(_) => "a boolean",
            PbsValue::Int(_) => "a signed number",
            PbsValue::UInt(_) => "an unsigned number",
            PbsValue::Float(_) => "a floating point number",
            PbsValue::String(_) => "a string",
            PbsValue::Name(_) => "a name",
            PbsValue::Text(_) => "a text",
            PbsValue::Tag(_) => "a gameplay tag",
            PbsValue::Enum(_) => "an enum member",
            PbsValue::List(_) => "a list",
            PbsValue::Compound(_) => "a compound value",
            PbsValue::Tags(_) => "a tag container",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, PbsValue::None)
    }
}
