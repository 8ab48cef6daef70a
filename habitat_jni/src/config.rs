//! Load-time settings. There is nothing to read at runtime: the managed
//! class and the method it declares are fixed when the Java side is
//! compiled, so these are constants gathered into a [`BridgeConfig`].

use crate::version::InterfaceVersion;

/// Fully-qualified (internal form) name of the managed class.
pub const ICE_CLASS: &str = "com/facebook/example/habitat/Ice";

/// Name of the `native` method declared on [`ICE_CLASS`].
pub const GET_NAME: &str = "getName";

/// Descriptor of `String getName()`.
pub const GET_NAME_SIGNATURE: &str = "()Ljava/lang/String;";

/// The JNI version requested from `GetEnv` and reported back on success.
pub const REQUIRED_VERSION: InterfaceVersion = InterfaceVersion::V1_6;

/// Which class/method the registrar binds, and against which interface version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Class to resolve, in JNI internal form (`a/b/C`).
    pub class_name: &'static str,
    /// Method to bind on that class.
    pub method_name: &'static str,
    /// Descriptor the method is declared with.
    pub method_signature: &'static str,
    /// Version requested from the runtime and returned on success.
    pub interface_version: InterfaceVersion,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            class_name: ICE_CLASS,
            method_name: GET_NAME,
            method_signature: GET_NAME_SIGNATURE,
            interface_version: REQUIRED_VERSION,
        }
    }
}
