use crate::converters::ConverterHandle;
use crate::descriptors::{
    NumberKind, NumericBounds, PbsFieldDescriptor, PbsScalarDescriptor, PbsSchema, ScalarBounds,
    ScalarKind,
};
use crate::errors::{PbsError, PbsResult, ValueError};
use crate::value::PbsValue;
use schema::{GameplayTag, Name, Text};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use tracing::debug;

/// Shorthand used by record schemas: `Field::value("Name", ..)`
pub type Field<R> = PbsFieldDescriptor<R>;

/// A game data record that can be compiled from and written to PBS text
pub trait PbsRecord: Default + 'static {
    /// Declare the record's fields in file order
    fn schema() -> PbsSchema<Self>;
}

/// A type that fits in one CSV cell
pub trait PbsScalar: Sized + 'static {
    fn scalar_kind() -> ScalarKind;

    /// Type-level converter used when the field does not supply its own
    fn converter() -> Option<ConverterHandle> {
        None
    }

    fn to_scalar_value(&self) -> PbsValue;

    fn from_scalar_value(value: PbsValue) -> PbsResult<Self>;

    fn descriptor() -> PbsScalarDescriptor {
        let descriptor = PbsScalarDescriptor::new(
            Self::scalar_kind(),
            TypeId::of::<Self>(),
            short_type_name::<Self>(),
        );
        match Self::converter() {
            Some(converter) => descriptor.converter(converter),
            None => descriptor,
        }
    }
}

/// A value built from a fixed, ordered list of cells
pub trait PbsCompound: Sized + 'static {
    /// One descriptor per constructor parameter, in cell order
    fn parameters() -> Vec<PbsScalarDescriptor>;

    fn construct(values: Vec<PbsValue>) -> PbsResult<Self>;

    fn deconstruct(&self) -> Vec<PbsValue>;
}

/// How a field element is laid out in cells
#[derive(Debug, Clone)]
pub enum ElementShape {
    Scalar(PbsScalarDescriptor),
    Compound(Vec<PbsScalarDescriptor>),
}

/// Anything a field (or a collection field's element) can hold.
///
/// Every [`PbsScalar`] is an element. Compound types opt in with
/// [`impl_pbs_compound!`](crate::impl_pbs_compound).
pub trait PbsElement: Sized + 'static {
    fn shape() -> ElementShape;

    fn to_value(&self) -> PbsValue;

    fn from_value(value: PbsValue) -> PbsResult<Self>;
}

impl<T: PbsScalar> PbsElement for T {
    fn shape() -> ElementShape {
        ElementShape::Scalar(T::descriptor())
    }

    fn to_value(&self) -> PbsValue {
        self.to_scalar_value()
    }

    fn from_value(value: PbsValue) -> PbsResult<Self> {
        T::from_scalar_value(value)
    }
}

/// Numeric scalar types that can carry bounds
pub trait PbsNumber: PbsScalar + FromStr + PartialOrd + Copy + fmt::Display {
    const KIND: NumberKind;

    fn erase_bounds(bounds: NumericBounds<Self>) -> ScalarBounds;

    fn bounds_of(bounds: &ScalarBounds) -> Option<NumericBounds<Self>>;
}

pub(crate) fn shape_mismatch(expected: &'static str, found: &PbsValue) -> PbsError {
    ValueError::ShapeMismatch {
        expected,
        found: found.kind_name(),
    }
    .into()
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    match full.find('<') {
        Some(_) => full,
        None => full.rsplit("::").next().unwrap_or(full),
    }
}

macro_rules! impl_pbs_integer {
    ($($ty:ty => $kind:ident as $wide:ident),* $(,)?) => {$(
        impl PbsScalar for $ty {
            fn scalar_kind() -> ScalarKind {
                ScalarKind::Number(NumberKind::$kind)
            }

            fn to_scalar_value(&self) -> PbsValue {
                PbsValue::$wide((*self).into())
            }

            fn from_scalar_value(value: PbsValue) -> PbsResult<Self> {
                let converted = match &value {
                    PbsValue::Int(v) => <$ty>::try_from(*v).ok(),
                    PbsValue::UInt(v) => <$ty>::try_from(*v).ok(),
                    other => return Err(shape_mismatch("an integer", other)),
                };
                converted.ok_or_else(|| {
                    let text = match value {
                        PbsValue::Int(v) => v.to_string(),
                        PbsValue::UInt(v) => v.to_string(),
                        _ => String::new(),
                    };
                    ValueError::InvalidNumber(text).into()
                })
            }
        }

        impl PbsNumber for $ty {
            const KIND: NumberKind = NumberKind::$kind;

            fn erase_bounds(bounds: NumericBounds<Self>) -> ScalarBounds {
                ScalarBounds::$kind(bounds)
            }

            fn bounds_of(bounds: &ScalarBounds) -> Option<NumericBounds<Self>> {
                match bounds {
                    ScalarBounds::$kind(bounds) => Some(*bounds),
                    _ => None,
                }
            }
        }
    )*};
}

impl_pbs_integer!(
    i8 => I8 as Int,
    i16 => I16 as Int,
    i32 => I32 as Int,
    i64 => I64 as Int,
    u8 => U8 as UInt,
    u16 => U16 as UInt,
    u32 => U32 as UInt,
    u64 => U64 as UInt,
);

macro_rules! impl_pbs_float {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl PbsScalar for $ty {
            fn scalar_kind() -> ScalarKind {
                ScalarKind::Number(NumberKind::$kind)
            }

            fn to_scalar_value(&self) -> PbsValue {
                PbsValue::Float((*self).into())
            }

            fn from_scalar_value(value: PbsValue) -> PbsResult<Self> {
                match value {
                    PbsValue::Float(v) => Ok(v as $ty),
                    PbsValue::Int(v) => Ok(v as $ty),
                    PbsValue::UInt(v) => Ok(v as $ty),
                    other => Err(shape_mismatch("a number", &other)),
                }
            }
        }

        impl PbsNumber for $ty {
            const KIND: NumberKind = NumberKind::$kind;

            fn erase_bounds(bounds: NumericBounds<Self>) -> ScalarBounds {
                ScalarBounds::$kind(bounds)
            }

            fn bounds_of(bounds: &ScalarBounds) -> Option<NumericBounds<Self>> {
                match bounds {
                    ScalarBounds::$kind(bounds) => Some(*bounds),
                    _ => None,
                }
            }
        }
    )*};
}

impl_pbs_float!(f32 => F32, f64 => F64);

impl PbsScalar for bool {
    fn scalar_kind() -> ScalarKind {
        ScalarKind::Bool
    }

    fn to_scalar_value(&self) -> PbsValue {
        PbsValue::Bool(*self)
    }

    fn from_scalar_value(value: PbsValue) -> PbsResult<Self> {
        match value {
            PbsValue::Bool(v) => Ok(v),
            other => Err(shape_mismatch("a boolean", &other)),
        }
    }
}

impl PbsScalar for String {
    fn scalar_kind() -> ScalarKind {
        ScalarKind::String
    }

    fn to_scalar_value(&self) -> PbsValue {
        PbsValue::String(self.clone())
    }

    fn from_scalar_value(value: PbsValue) -> PbsResult<Self> {
        match value {
            PbsValue::String(v) => Ok(v),
            other => Err(shape_mismatch("a string", &other)),
        }
    }
}

impl PbsScalar for Name {
    fn scalar_kind() -> ScalarKind {
        ScalarKind::Name
    }

    fn to_scalar_value(&self) -> PbsValue {
        PbsValue::Name(self.clone())
    }

    fn from_scalar_value(value: PbsValue) -> PbsResult<Self> {
        match value {
            PbsValue::Name(v) => Ok(v),
            PbsValue::String(v) => Ok(Name::new(v)),
            other => Err(shape_mismatch("a name", &other)),
        }
    }
}

impl PbsScalar for Text {
    fn scalar_kind() -> ScalarKind {
        ScalarKind::Text
    }

    fn to_scalar_value(&self) -> PbsValue {
        PbsValue::Text(self.clone())
    }

    fn from_scalar_value(value: PbsValue) -> PbsResult<Self> {
        match value {
            PbsValue::Text(v) => Ok(v),
            other => Err(shape_mismatch("a text", &other)),
        }
    }
}

impl PbsScalar for GameplayTag {
    fn scalar_kind() -> ScalarKind {
        ScalarKind::Tag
    }

    fn to_scalar_value(&self) -> PbsValue {
        PbsValue::Tag(self.clone())
    }

    fn from_scalar_value(value: PbsValue) -> PbsResult<Self> {
        match value {
            PbsValue::Tag(v) => Ok(v),
            other => Err(shape_mismatch("a gameplay tag", &other)),
        }
    }
}

/// An optional scalar reads a blank cell as `None`
impl<T: PbsScalar> PbsScalar for Option<T> {
    fn scalar_kind() -> ScalarKind {
        T::scalar_kind()
    }

    fn converter() -> Option<ConverterHandle> {
        T::converter()
    }

    fn to_scalar_value(&self) -> PbsValue {
        match self {
            Some(value) => value.to_scalar_value(),
            None => PbsValue::None,
        }
    }

    fn from_scalar_value(value: PbsValue) -> PbsResult<Self> {
        match value {
            PbsValue::None => Ok(None),
            other => T::from_scalar_value(other).map(Some),
        }
    }

    fn descriptor() -> PbsScalarDescriptor {
        T::descriptor().optional()
    }
}

/// Implements [`PbsScalar`] for enums deriving strum's `EnumString`,
/// `IntoStaticStr` and `VariantNames`.
#[macro_export]
macro_rules! impl_pbs_enum {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::PbsScalar for $ty {
            fn scalar_kind() -> $crate::ScalarKind {
                $crate::ScalarKind::Enum($crate::EnumMeta {
                    type_name: stringify!($ty),
                    members: <$ty as ::strum::VariantNames>::VARIANTS,
                })
            }

            fn to_scalar_value(&self) -> $crate::PbsValue {
                $crate::PbsValue::Enum(<&'static str>::from(self))
            }

            fn from_scalar_value(value: $crate::PbsValue) -> $crate::PbsResult<Self> {
                match value {
                    $crate::PbsValue::Enum(member) => {
                        <$ty as ::std::str::FromStr>::from_str(member).map_err(|_| {
                            $crate::ValueError::UnknownEnumMember {
                                input: member.to_string(),
                                type_name: stringify!($ty),
                            }
                            .into()
                        })
                    }
                    other => Err($crate::ValueError::ShapeMismatch {
                        expected: "an enum member",
                        found: other.kind_name(),
                    }
                    .into()),
                }
            }
        }
    )*};
}

/// Implements [`PbsElement`] for types implementing [`PbsCompound`]
#[macro_export]
macro_rules! impl_pbs_compound {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::PbsElement for $ty {
            fn shape() -> $crate::ElementShape {
                $crate::ElementShape::Compound(<$ty as $crate::PbsCompound>::parameters())
            }

            fn to_value(&self) -> $crate::PbsValue {
                $crate::PbsValue::Compound(<$ty as $crate::PbsCompound>::deconstruct(self))
            }

            fn from_value(value: $crate::PbsValue) -> $crate::PbsResult<Self> {
                match value {
                    $crate::PbsValue::Compound(values) => {
                        <$ty as $crate::PbsCompound>::construct(values)
                    }
                    other => Err($crate::ValueError::ShapeMismatch {
                        expected: "a compound value",
                        found: other.kind_name(),
                    }
                    .into()),
                }
            }
        }
    )*};
}

/// Declares a field bound to a struct member inside `PbsRecord::schema`:
/// `pbs_field!(value "Name" => name)`, `pbs_field!(list "Types" => types)`
/// or `pbs_field!(tags "Flags" => flags)`.
#[macro_export]
macro_rules! pbs_field {
    ($kind:ident $key:literal => $member:ident) => {
        $crate::Field::<Self>::$kind(
            $key,
            |record: &Self| &record.$member,
            |record: &mut Self| &mut record.$member,
        )
    };
}

/// Hands out a compound's decoded parameters in constructor order
pub struct CompoundValues {
    values: std::vec::IntoIter<PbsValue>,
}

impl CompoundValues {
    pub fn new(values: Vec<PbsValue>) -> Self {
        CompoundValues {
            values: values.into_iter(),
        }
    }

    pub fn take<T: PbsElement>(&mut self) -> PbsResult<T> {
        T::from_value(self.values.next().unwrap_or(PbsValue::None))
    }

    /// Every parameter not taken yet
    pub fn rest<T: PbsElement>(self) -> PbsResult<Vec<T>> {
        self.values.map(T::from_value).collect()
    }
}

// Schemas are built once per record type and shared
static SCHEMAS: LazyLock<RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

pub struct PbsMetamodel;

impl PbsMetamodel {
    /// The memoized schema for `R`
    pub fn get_schema<R: PbsRecord>() -> Arc<PbsSchema<R>> {
        let key = TypeId::of::<R>();
        if let Some(schema) = Self::cached::<R>(key) {
            return schema;
        }

        let built = Arc::new(R::schema());
        debug!(
            record = std::any::type_name::<R>(),
            fields = built.len(),
            "built PBS schema"
        );
        let mut schemas = SCHEMAS.write().unwrap_or_else(PoisonError::into_inner);
        let entry = schemas
            .entry(key)
            .or_insert_with(|| built.clone() as Arc<dyn Any + Send + Sync>)
            .clone();
        entry.downcast::<PbsSchema<R>>().unwrap_or(built)
    }

    fn cached<R: PbsRecord>(key: TypeId) -> Option<Arc<PbsSchema<R>>> {
        let schemas = SCHEMAS.read().unwrap_or_else(PoisonError::into_inner);
        schemas
            .get(&key)
            .cloned()
            .and_then(|schema| schema.downcast::<PbsSchema<R>>().ok())
    }
}
