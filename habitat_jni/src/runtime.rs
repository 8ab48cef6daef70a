//! The seam between the registrar and whatever hosts it. For a real JVM
//! this is `jni::JNIEnv` (see `exports`); tests plug in a double.

use crate::descriptor::BindingTable;
use crate::version::{InterfaceVersion, LOAD_FAILED};
use jni::sys::jint;
use std::fmt::Display;
use strum::IntoStaticStr;
use thiserror::Error;

/// The operations the registrar needs from a managed runtime, once an
/// environment has been acquired.
pub trait ManagedRuntime {
    /// Handle to a resolved class. Only held for the duration of a load.
    type Class;

    /// What a native method entry point looks like to this runtime.
    type Entry: Copy;

    /// Runtime-specific failure, reported through [`LoadError`].
    type Error: Display;

    /// Resolve a class by fully-qualified internal name (`a/b/C`).
    fn find_class(&mut self, name: &str) -> Result<Self::Class, Self::Error>;

    /// Bind every method in `table` on `class`. The runtime decides
    /// whether the descriptors match what the class declares.
    fn register_natives(
        &mut self,
        class: &Self::Class,
        table: &BindingTable<Self::Entry>,
    ) -> Result<(), Self::Error>;
}

/// Which load step failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum LoadStage {
    /// `GetEnv`
    Environment,
    /// `FindClass`
    ClassLookup,
    /// `RegisterNatives`
    Registration,
}

/// Fatal load failure. Every variant is reported to the host the same way,
/// as [`LOAD_FAILED`]; the variants exist so the cause can be logged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// No environment at the required interface version.
    #[error("no JNI {required} environment: {reason}")]
    Environment {
        /// Version that was asked for.
        required: InterfaceVersion,
        /// What the runtime said.
        reason: String,
    },

    /// The target class is absent or not visible to this class loader.
    #[error("class {class} not found: {reason}")]
    ClassNotFound {
        /// Class that was looked up.
        class: String,
        /// What the runtime said.
        reason: String,
    },

    /// The runtime refused the bindings, or the table could not be built.
    #[error("could not register natives on {class}: {reason}")]
    Registration {
        /// Class the natives were meant for.
        class: String,
        /// What went wrong.
        reason: String,
    },
}

impl LoadError {
    /// Status code to return from `JNI_OnLoad`.
    pub fn status(&self) -> jint {
        LOAD_FAILED
    }

    /// The step that failed.
    pub fn stage(&self) -> LoadStage {
        match self {
            LoadError::Environment { .. } => LoadStage::Environment,
            LoadError::ClassNotFound { .. } => LoadStage::ClassLookup,
            LoadError::Registration { .. } => LoadStage::Registration,
        }
    }
}
