// Custom scalar converters.
// A converter takes over reading and writing one CSV cell for a specific
// type. Type-level converters come from `PbsScalar::converter`; field-level
// converters are attached with `Field::converter` and win over them.

pub mod evolution;
pub mod item_pocket;

pub use evolution::EvolutionMethodConverter;
pub use item_pocket::ItemPocketConverter;

use crate::descriptors::PbsScalarDescriptor;
use crate::errors::PbsResult;
use crate::metamodel::PbsElement;
use crate::value::PbsValue;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Reads and writes values of one type from and to a single cell
pub trait PbsConverter: Send + Sync + 'static {
    type Value: PbsElement;

    fn read(
        &self,
        input: &str,
        descriptor: &PbsScalarDescriptor,
        section_name: Option<&str>,
    ) -> PbsResult<Self::Value>;

    fn write(
        &self,
        value: &Self::Value,
        descriptor: &PbsScalarDescriptor,
        section_name: Option<&str>,
    ) -> PbsResult<String>;
}

trait ErasedConverter: Send + Sync {
    fn target_type(&self) -> TypeId;

    fn target_name(&self) -> &'static str;

    fn read(
        &self,
        input: &str,
        descriptor: &PbsScalarDescriptor,
        section_name: Option<&str>,
    ) -> PbsResult<PbsValue>;

    fn write(
        &self,
        value: &PbsValue,
        descriptor: &PbsScalarDescriptor,
        section_name: Option<&str>,
    ) -> PbsResult<String>;
}

impl<C: PbsConverter> ErasedConverter for C {
    fn target_type(&self) -> TypeId {
        TypeId::of::<C::Value>()
    }

    fn target_name(&self) -> &'static str {
        std::any::type_name::<C::Value>()
    }

    fn read(
        &self,
        input: &str,
        descriptor: &PbsScalarDescriptor,
        section_name: Option<&str>,
    ) -> PbsResult<PbsValue> {
        PbsConverter::read(self, input, descriptor, section_name).map(|value| value.to_value())
    }

    fn write(
        &self,
        value: &PbsValue,
        descriptor: &PbsScalarDescriptor,
        section_name: Option<&str>,
    ) -> PbsResult<String> {
        let typed = C::Value::from_value(value.clone())?;
        PbsConverter::write(self, &typed, descriptor, section_name)
    }
}

/// Shared, type-erased converter stored on scalar descriptors
#[derive(Clone)]
pub struct ConverterHandle(Arc<dyn ErasedConverter>);

impl ConverterHandle {
    pub fn new<C: PbsConverter>(converter: C) -> Self {
        ConverterHandle(Arc::new(converter))
    }

    /// The type this converter produces and consumes
    pub fn target_type(&self) -> TypeId {
        self.0.target_type()
    }

    pub fn target_name(&self) -> &'static str {
        self.0.target_name()
    }

    pub fn read(
        &self,
        input: &str,
        descriptor: &PbsScalarDescriptor,
        section_name: Option<&str>,
    ) -> PbsResult<PbsValue> {
        self.0.read(input, descriptor, section_name)
    }

    pub fn write(
        &self,
        value: &PbsValue,
        descriptor: &PbsScalarDescriptor,
        section_name: Option<&str>,
    ) -> PbsResult<String> {
        self.0.write(value, descriptor, section_name)
    }
}

impl fmt::Debug for ConverterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConverterHandle({})", self.target_name())
    }
}
