use crate::converters::ConverterHandle;
use crate::errors::{PbsResult, SchemaError, ValueError};
use crate::metamodel::{ElementShape, PbsElement, PbsNumber};
use crate::value::PbsValue;
use schema::GameplayTagContainer;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// How repeated data for one field is laid out in a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepeatMode {
    /// A single value
    #[default]
    None,
    /// The key appears on several lines, each line adds one element
    KeyRepeat,
    /// One line's CSV cells are grouped into elements
    CsvRepeat,
}

/// Inclusive numeric bounds. A missing side is unconstrained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> NumericBounds<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        NumericBounds { min, max }
    }

    pub fn unbounded() -> Self {
        NumericBounds {
            min: None,
            max: None,
        }
    }
}

impl<T> Default for NumericBounds<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

/// Numeric bounds for whichever numeric type a scalar has
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarBounds {
    I8(NumericBounds<i8>),
    I16(NumericBounds<i16>),
    I32(NumericBounds<i32>),
    I64(NumericBounds<i64>),
    U8(NumericBounds<u8>),
    U16(NumericBounds<u16>),
    U32(NumericBounds<u32>),
    U64(NumericBounds<u64>),
    F32(NumericBounds<f32>),
    F64(NumericBounds<f64>),
}

/// Name and members of an enum scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumMeta {
    pub type_name: &'static str,
    pub members: &'static [&'static str],
}

/// What kind of value a single CSV cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Number(NumberKind),
    String,
    Name,
    Text,
    Tag,
    Enum(EnumMeta),
    /// Only readable through a converter
    Custom,
}

/// Namespace and key template for localized text fields. `{0}` in the key
/// format is replaced by the section name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedTextNamespace {
    pub namespace: String,
    pub key_format: String,
}

impl LocalizedTextNamespace {
    pub fn new(namespace: impl Into<String>, key_format: impl Into<String>) -> Self {
        LocalizedTextNamespace {
            namespace: namespace.into(),
            key_format: key_format.into(),
        }
    }

    pub fn key_for(&self, section_name: &str) -> String {
        self.key_format.replace("{0}", section_name)
    }
}

/// Coercion rules for one CSV cell
#[derive(Debug, Clone)]
pub struct PbsScalarDescriptor {
    pub kind: ScalarKind,
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub is_optional: bool,
    pub gameplay_tag_namespace: Option<String>,
    pub create_new_gameplay_tag: bool,
    pub gameplay_tag_separator: Option<String>,
    pub numeric_bounds: Option<ScalarBounds>,
    pub localized_text_namespace: Option<LocalizedTextNamespace>,
    pub converter: Option<ConverterHandle>,
}

impl PbsScalarDescriptor {
    pub fn new(kind: ScalarKind, type_id: TypeId, type_name: &'static str) -> Self {
        PbsScalarDescriptor {
            kind,
            type_id,
            type_name,
            is_optional: false,
            gameplay_tag_namespace: None,
            create_new_gameplay_tag: false,
            gameplay_tag_separator: None,
            numeric_bounds: None,
            localized_text_namespace: None,
            converter: None,
        }
    }

    /// Descriptor for a scalar element type, including its type-level converter
    pub fn of<T: PbsElement>() -> Self {
        match T::shape() {
            ElementShape::Scalar(descriptor) => descriptor,
            ElementShape::Compound(_) => PbsScalarDescriptor::new(
                ScalarKind::Custom,
                TypeId::of::<T>(),
                std::any::type_name::<T>(),
            ),
        }
    }

    /// A blank cell is allowed and reads as absence
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// Inclusive bounds. Ignored unless `N` is this scalar's numeric type.
    pub fn range<N: PbsNumber>(mut self, min: Option<N>, max: Option<N>) -> Self {
        if self.kind == ScalarKind::Number(N::KIND) {
            self.numeric_bounds = Some(N::erase_bounds(NumericBounds::new(min, max)));
        } else {
            warn!(
                scalar = self.type_name,
                bounds = std::any::type_name::<N>(),
                "ignoring numeric range that does not match the scalar type"
            );
        }
        self
    }

    pub fn gameplay_tag(mut self, namespace: impl Into<String>) -> Self {
        self.gameplay_tag_namespace = Some(namespace.into());
        self
    }

    pub fn tag_separator(mut self, separator: impl Into<String>) -> Self {
        self.gameplay_tag_separator = Some(separator.into());
        self
    }

    pub fn create_tags(mut self) -> Self {
        self.create_new_gameplay_tag = true;
        self
    }

    pub fn localized(mut self, namespace: impl Into<String>, key_format: impl Into<String>) -> Self {
        self.localized_text_namespace = Some(LocalizedTextNamespace::new(namespace, key_format));
        self
    }

    /// Attach a converter if it targets this scalar's type
    pub fn converter(mut self, converter: ConverterHandle) -> Self {
        if converter.target_type() == self.type_id {
            self.converter = Some(converter);
        } else {
            warn!(
                scalar = self.type_name,
                converter = converter.target_name(),
                "ignoring converter for a different type"
            );
        }
        self
    }
}

/// Collection shape of a field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    List,
    Tags,
}

type FieldGetter<R> = Box<dyn Fn(&R) -> PbsValue + Send + Sync>;
type FieldSetter<R> = Box<dyn Fn(&mut R, PbsValue) -> PbsResult<()> + Send + Sync>;

/// One logical field of a record type.
///
/// Built with [`PbsFieldDescriptor::value`], [`PbsFieldDescriptor::list`] or
/// [`PbsFieldDescriptor::tags`] and refined with the annotation methods.
/// Scalar annotations only apply when the field's element is a scalar;
/// compound elements carry their own parameter annotations.
pub struct PbsFieldDescriptor<R> {
    key_name: String,
    elements: Vec<PbsScalarDescriptor>,
    element_is_scalar: bool,
    is_identifier: bool,
    is_row_index: bool,
    repeat: RepeatMode,
    min_length: usize,
    max_length: usize,
    collection: Option<CollectionKind>,
    getter: FieldGetter<R>,
    setter: FieldSetter<R>,
}

impl<R: 'static> PbsFieldDescriptor<R> {
    /// A single value: a scalar, or a compound written as one CSV line
    pub fn value<F, G, M>(name: &str, get: G, get_mut: M) -> Self
    where
        F: PbsElement,
        G: Fn(&R) -> &F + Send + Sync + 'static,
        M: Fn(&mut R) -> &mut F + Send + Sync + 'static,
    {
        Self::new(
            name,
            F::shape(),
            None,
            Box::new(move |record| get(record).to_value()),
            Box::new(move |record, value| {
                *get_mut(record) = F::from_value(value)?;
                Ok(())
            }),
        )
    }

    /// A list of scalars or compounds, read from one CSV line by default
    pub fn list<E, G, M>(name: &str, get: G, get_mut: M) -> Self
    where
        E: PbsElement,
        G: Fn(&R) -> &Vec<E> + Send + Sync + 'static,
        M: Fn(&mut R) -> &mut Vec<E> + Send + Sync + 'static,
    {
        Self::new(
            name,
            E::shape(),
            Some(CollectionKind::List),
            Box::new(move |record| PbsValue::List(get(record).iter().map(E::to_value).collect())),
            Box::new(move |record, value| {
                *get_mut(record) = match value {
                    PbsValue::List(items) => items
                        .into_iter()
                        .map(E::from_value)
                        .collect::<PbsResult<Vec<_>>>()?,
                    other => {
                        return Err(ValueError::ShapeMismatch {
                            expected: "a list",
                            found: other.kind_name(),
                        }
                        .into())
                    }
                };
                Ok(())
            }),
        )
    }

    /// A gameplay tag container, read from one CSV line by default
    pub fn tags<G, M>(name: &str, get: G, get_mut: M) -> Self
    where
        G: Fn(&R) -> &GameplayTagContainer + Send + Sync + 'static,
        M: Fn(&mut R) -> &mut GameplayTagContainer + Send + Sync + 'static,
    {
        Self::new(
            name,
            schema::GameplayTag::shape(),
            Some(CollectionKind::Tags),
            Box::new(move |record| PbsValue::Tags(get(record).clone())),
            Box::new(move |record, value| {
                *get_mut(record) = match value {
                    PbsValue::Tags(tags) => tags,
                    other => {
                        return Err(ValueError::ShapeMismatch {
                            expected: "a tag container",
                            found: other.kind_name(),
                        }
                        .into())
                    }
                };
                Ok(())
            }),
        )
    }

    fn new(
        name: &str,
        shape: ElementShape,
        collection: Option<CollectionKind>,
        getter: FieldGetter<R>,
        setter: FieldSetter<R>,
    ) -> Self {
        let (elements, element_is_scalar) = match shape {
            ElementShape::Scalar(descriptor) => (vec![descriptor], true),
            ElementShape::Compound(parameters) => (parameters, false),
        };
        PbsFieldDescriptor {
            key_name: name.to_string(),
            elements,
            element_is_scalar,
            is_identifier: false,
            is_row_index: false,
            repeat: if collection.is_some() {
                RepeatMode::CsvRepeat
            } else {
                RepeatMode::None
            },
            min_length: 0,
            max_length: usize::MAX,
            collection,
            getter,
            setter,
        }
    }

    pub fn rename(mut self, key_name: &str) -> Self {
        self.key_name = key_name.to_string();
        self
    }

    /// This field is populated from the section name
    pub fn identifier(mut self) -> Self {
        self.is_identifier = true;
        self
    }

    /// This field is populated from the section's position in the file
    pub fn row_index(mut self) -> Self {
        self.is_row_index = true;
        self
    }

    /// The key may appear on several lines, each adding one element
    pub fn allow_multiple(mut self) -> Self {
        self.repeat = RepeatMode::KeyRepeat;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = min;
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = max;
        self
    }

    pub fn range<N: PbsNumber>(self, min: Option<N>, max: Option<N>) -> Self {
        self.map_scalar(|descriptor| descriptor.range(min, max))
    }

    pub fn gameplay_tag(self, namespace: &str) -> Self {
        self.map_scalar(|descriptor| descriptor.gameplay_tag(namespace))
    }

    pub fn tag_separator(self, separator: &str) -> Self {
        self.map_scalar(|descriptor| descriptor.tag_separator(separator))
    }

    pub fn create_tags(self) -> Self {
        self.map_scalar(PbsScalarDescriptor::create_tags)
    }

    pub fn localized(self, namespace: &str, key_format: &str) -> Self {
        self.map_scalar(|descriptor| descriptor.localized(namespace, key_format))
    }

    /// Field-level converter. Marks the field as a scalar even if its type
    /// would otherwise be a compound; takes priority over type-level converters.
    pub fn converter(mut self, converter: ConverterHandle) -> Self {
        if !self.element_is_scalar {
            let first = self.elements.first().map(|e| e.type_name).unwrap_or("compound");
            self.elements = vec![PbsScalarDescriptor::new(
                ScalarKind::Custom,
                converter.target_type(),
                first,
            )];
            self.element_is_scalar = true;
        }
        if let Some(descriptor) = self.elements.first_mut() {
            descriptor.converter = None;
            *descriptor = descriptor.clone().converter(converter);
        }
        self
    }

    fn map_scalar(
        mut self,
        annotate: impl FnOnce(PbsScalarDescriptor) -> PbsScalarDescriptor,
    ) -> Self {
        if self.element_is_scalar {
            if let Some(descriptor) = self.elements.pop() {
                self.elements.push(annotate(descriptor));
            }
        } else {
            warn!(
                key = %self.key_name,
                "ignoring scalar annotation on a compound field"
            );
        }
        self
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub fn elements(&self) -> &[PbsScalarDescriptor] {
        &self.elements
    }

    pub fn is_identifier(&self) -> bool {
        self.is_identifier
    }

    pub fn is_row_index(&self) -> bool {
        self.is_row_index
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn min_len(&self) -> usize {
        self.min_length
    }

    pub fn max_len(&self) -> usize {
        self.max_length
    }

    pub fn collection(&self) -> Option<CollectionKind> {
        self.collection
    }

    /// A single cell that is coerced as a whole, never split as CSV
    pub fn is_scalar(&self) -> bool {
        self.elements.len() == 1 && self.repeat != RepeatMode::CsvRepeat
    }

    /// Elements are compound values built from the descriptors in order
    pub fn is_compound(&self) -> bool {
        !self.element_is_scalar
    }

    pub fn get(&self, record: &R) -> PbsValue {
        (self.getter)(record)
    }

    pub fn set(&self, record: &mut R, value: PbsValue) -> PbsResult<()> {
        (self.setter)(record, value)
    }
}

impl<R> fmt::Debug for PbsFieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PbsFieldDescriptor")
            .field("key_name", &self.key_name)
            .field("elements", &self.elements)
            .field("is_identifier", &self.is_identifier)
            .field("is_row_index", &self.is_row_index)
            .field("repeat", &self.repeat)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("collection", &self.collection)
            .finish()
    }
}

/// Answers the one question the section parser needs from a schema
pub trait FieldLookup {
    fn repeat_mode(&self, key: &str) -> Option<RepeatMode>;
}

/// Field descriptors of one record type, in declaration order
pub struct PbsSchema<R> {
    fields: Vec<PbsFieldDescriptor<R>>,
    by_key: HashMap<String, usize>,
}

impl<R: 'static> PbsSchema<R> {
    pub fn builder() -> PbsSchemaBuilder<R> {
        PbsSchemaBuilder { fields: Vec::new() }
    }

    pub fn fields(&self) -> impl Iterator<Item = &PbsFieldDescriptor<R>> {
        self.fields.iter()
    }

    pub fn field(&self, key: &str) -> Option<&PbsFieldDescriptor<R>> {
        self.by_key.get(key).map(|&index| &self.fields[index])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The field populated from section names
    pub fn identifier(&self) -> PbsResult<&PbsFieldDescriptor<R>> {
        let mut identifiers = self.fields.iter().filter(|f| f.is_identifier);
        let first = identifiers
            .next()
            .ok_or(SchemaError::MissingIdentifier(std::any::type_name::<R>()))?;
        if identifiers.next().is_some() {
            return Err(SchemaError::DuplicateIdentifier(std::any::type_name::<R>()).into());
        }
        Ok(first)
    }

    /// Check the shape contract that compiling and writing rely on
    pub fn validate(&self) -> PbsResult<()> {
        self.identifier()?;
        if self.by_key.len() != self.fields.len() {
            let mut seen = HashMap::new();
            for field in &self.fields {
                if seen.insert(field.key_name.as_str(), ()).is_some() {
                    return Err(SchemaError::DuplicateKey {
                        record: std::any::type_name::<R>(),
                        key: field.key_name.clone(),
                    }
                    .into());
                }
            }
        }
        if let Some(field) = self.fields.iter().find(|f| f.elements.is_empty()) {
            return Err(SchemaError::EmptyCompound(field.key_name.clone()).into());
        }
        Ok(())
    }
}

impl<R: 'static> FieldLookup for PbsSchema<R> {
    fn repeat_mode(&self, key: &str) -> Option<RepeatMode> {
        self.field(key).map(PbsFieldDescriptor::repeat)
    }
}

impl<R> fmt::Debug for PbsSchema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.fields.iter()).finish()
    }
}

pub struct PbsSchemaBuilder<R> {
    fields: Vec<PbsFieldDescriptor<R>>,
}

impl<R: 'static> PbsSchemaBuilder<R> {
    pub fn field(mut self, field: PbsFieldDescriptor<R>) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> PbsSchema<R> {
        let mut by_key = HashMap::new();
        for (index, field) in self.fields.iter().enumerate() {
            by_key.entry(field.key_name.clone()).or_insert(index);
        }
        PbsSchema {
            fields: self.fields,
            by_key,
        }
    }
}
