//! The bridged implementation of `Ice.getName()`.

use jni::objects::JClass;
use jni::sys::jstring;
use jni::JNIEnv;
use std::ffi::c_void;

/// The value `Ice.getName()` returns.
pub const ICE_NAME: &str = "ice";

/// Pure half of the native method; identical on every call and thread.
pub fn ice_name() -> &'static str {
    ICE_NAME
}

/// JNI entry point registered for `getName()Ljava/lang/String;`.
///
/// The only way this can fail is the JVM being unable to allocate the
/// string, in which case `OutOfMemoryError` is already pending and null is
/// returned to let it propagate.
pub extern "system" fn native_get_name(mut env: JNIEnv, _class: JClass) -> jstring {
    match env.new_string(ice_name()) {
        Ok(name) => name.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// [`native_get_name`] as the untyped pointer `RegisterNatives` stores.
pub fn get_name_entry() -> *mut c_void {
    native_get_name as *mut c_void
}
