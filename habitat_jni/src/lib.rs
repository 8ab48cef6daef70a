#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]

//! Native half of the habitat example. When the JVM loads this library
//! (`System.loadLibrary("habitat_jni")`), `JNI_OnLoad` binds
//! `com.facebook.example.habitat.Ice#getName()` to a Rust function that
//! returns `"ice"`.
//!
//! The registration logic is written against the [`ManagedRuntime`] trait
//! rather than directly against `jni::JNIEnv`, so that it can be exercised
//! without a running JVM. The only JVM-specific code lives in `exports`.

pub mod config;
pub mod descriptor;
mod exports;
pub mod ice;
pub mod registrar;
pub mod runtime;
pub mod signature;
pub mod version;

pub use config::BridgeConfig;
pub use descriptor::{BindingError, BindingTable, BridgedMethod};
pub use exports::{acquire_env, JNI_OnLoad};
pub use ice::{get_name_entry, ice_name, native_get_name, ICE_NAME};
pub use registrar::{load, register_bridge};
pub use runtime::{LoadError, LoadStage, ManagedRuntime};
pub use signature::{JavaType, MethodSignature, ReturnType, SignatureError};
pub use version::{InterfaceVersion, LOAD_FAILED};
