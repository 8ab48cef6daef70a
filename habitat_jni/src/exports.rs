//! The symbol the JVM looks up when this library is loaded, and the
//! `ManagedRuntime` implementation backed by a real `JNIEnv`.

use crate::config::BridgeConfig;
use crate::descriptor::BindingTable;
use crate::ice::get_name_entry;
use crate::registrar::load;
use crate::runtime::{LoadError, ManagedRuntime};
use crate::version::InterfaceVersion;
use jni::objects::JClass;
use jni::sys::{self, jint};
use jni::{JNIEnv, NativeMethod};
use std::ffi::c_void;
use tracing::error;

impl<'local> ManagedRuntime for JNIEnv<'local> {
    type Class = JClass<'local>;
    type Entry = *mut c_void;
    type Error = jni::errors::Error;

    fn find_class(&mut self, name: &str) -> Result<JClass<'local>, Self::Error> {
        JNIEnv::find_class(self, name)
    }

    fn register_natives(
        &mut self,
        class: &JClass<'local>,
        table: &BindingTable<*mut c_void>,
    ) -> Result<(), Self::Error> {
        let methods: Vec<NativeMethod> = table
            .iter()
            .map(|m| NativeMethod {
                name: m.name.into(),
                sig: m.signature.into(),
                fn_ptr: m.entry,
            })
            .collect();
        self.register_native_methods(class, &methods)
    }
}

/// Ask the VM for the calling thread's environment at `version`.
///
/// # Safety
///
/// `vm` must be null or point at a live `JavaVM` whose invoke interface
/// is valid, as it is for the pointer passed to `JNI_OnLoad`.
pub unsafe fn acquire_env<'local>(
    vm: *mut sys::JavaVM,
    version: InterfaceVersion,
) -> Result<JNIEnv<'local>, LoadError> {
    let failed = |reason: String| LoadError::Environment {
        required: version,
        reason,
    };
    if vm.is_null() || (*vm).is_null() {
        return Err(failed("null JavaVM".to_string()));
    }
    let Some(get_env) = (**vm).GetEnv else {
        return Err(failed("invoke interface has no GetEnv".to_string()));
    };
    let mut env: *mut c_void = std::ptr::null_mut();
    let rc = get_env(vm, &mut env, version.code());
    if rc != sys::JNI_OK {
        return Err(failed(format!("GetEnv returned {rc}")));
    }
    JNIEnv::from_raw(env.cast()).map_err(|e| failed(e.to_string()))
}

/// Called by the JVM once, when `System.loadLibrary` attaches this
/// library. Binds `Ice.getName()` and reports the JNI version this library
/// needs, or `JNI_ERR` if any step fails.
///
/// # Safety
///
/// Only the JVM should call this, with its own `JavaVM` pointer.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "system" fn JNI_OnLoad(vm: *mut sys::JavaVM, _reserved: *mut c_void) -> jint {
    let config = BridgeConfig::default();
    let mut env = match acquire_env(vm, config.interface_version) {
        Ok(env) => env,
        Err(e) => {
            error!(stage = "environment", "native library load failed: {e}");
            return e.status();
        }
    };
    load(&mut env, &config, get_name_entry())
}
