//! Process-wide PBS serializer.
//!
//! Maps record types to the data file they live in. Must be initialized
//! before use and can be shut down and re-initialized with new settings.

use crate::compiler::compile_pbs_entries_with;
use crate::config::PbsSettings;
use crate::errors::{PbsResult, SerializerError};
use crate::metamodel::PbsRecord;
use crate::model::{ItemInfo, MoveInfo, SpeciesInfo, TypeInfo};
use crate::writer::write_pbs_with;
use std::any::TypeId;
use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::sync::{LazyLock, PoisonError, RwLock};
use tracing::info;

static ACTIVE_SERIALIZER: LazyLock<RwLock<Option<PbsSerializer>>> =
    LazyLock::new(|| RwLock::new(None));

/// A record type known to the serializer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub type_name: &'static str,
    pub file_name: &'static str,
}

#[derive(Debug)]
struct PbsSerializer {
    settings: PbsSettings,
    registrations: HashMap<TypeId, Registration>,
}

impl PbsSerializer {
    fn new(settings: PbsSettings) -> Self {
        let mut serializer = PbsSerializer {
            settings,
            registrations: HashMap::new(),
        };
        serializer.register::<TypeInfo>("types.txt");
        serializer.register::<MoveInfo>("moves.txt");
        serializer.register::<ItemInfo>("items.txt");
        serializer.register::<SpeciesInfo>("pokemon.txt");
        serializer
    }

    fn register<R: PbsRecord>(&mut self, file_name: &'static str) {
        self.registrations.insert(
            TypeId::of::<R>(),
            Registration {
                type_name: std::any::type_name::<R>(),
                file_name,
            },
        );
    }

    fn registration<R: PbsRecord>(&self) -> PbsResult<Registration> {
        self.registrations
            .get(&TypeId::of::<R>())
            .copied()
            .ok_or_else(|| SerializerError::NotRegistered(std::any::type_name::<R>()).into())
    }
}

/// Start the serializer with the built-in record types registered.
/// Replaces any serializer that is already running.
pub fn initialize(settings: PbsSettings) {
    let serializer = PbsSerializer::new(settings);
    let count = serializer.registrations.len();
    *ACTIVE_SERIALIZER
        .write()
        .unwrap_or_else(PoisonError::into_inner) = Some(serializer);
    info!(record_types = count, "PBS serializer initialized");
}

pub fn shutdown() {
    let previous = ACTIVE_SERIALIZER
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    if previous.is_some() {
        info!("PBS serializer shut down");
    }
}

pub fn is_initialized() -> bool {
    ACTIVE_SERIALIZER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

fn with_serializer<T>(f: impl FnOnce(&mut PbsSerializer) -> PbsResult<T>) -> PbsResult<T> {
    let mut active = ACTIVE_SERIALIZER
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let serializer = active.as_mut().ok_or(SerializerError::NotInitialized)?;
    f(serializer)
}

/// Register an additional record type
pub fn register<R: PbsRecord>(file_name: &'static str) -> PbsResult<()> {
    with_serializer(|serializer| {
        serializer.register::<R>(file_name);
        Ok(())
    })
}

pub fn has_serializer_for<R: PbsRecord>() -> bool {
    with_serializer(|serializer| serializer.registration::<R>()).is_ok()
}

/// The data file a record type is stored in
pub fn registration_for<R: PbsRecord>() -> PbsResult<Registration> {
    with_serializer(|serializer| serializer.registration::<R>())
}

fn settings_for<R: PbsRecord>() -> PbsResult<PbsSettings> {
    with_serializer(|serializer| {
        serializer.registration::<R>()?;
        Ok(serializer.settings.clone())
    })
}

pub fn serialize<R: PbsRecord>(records: &[R], writer: impl Write) -> PbsResult<()> {
    let settings = settings_for::<R>()?;
    write_pbs_with(records, writer, &settings)
}

pub fn deserialize<R: PbsRecord>(reader: impl BufRead) -> PbsResult<Vec<R>> {
    let settings = settings_for::<R>()?;
    compile_pbs_entries_with(reader, &settings)
}
