//! JNI interface version codes, as exchanged with the host in `GetEnv`
//! and in the return value of `JNI_OnLoad`.

use jni::sys::jint;
use strum::{Display, FromRepr};

/// Status handed back to the host when loading fails (`JNI_ERR`).
pub const LOAD_FAILED: jint = -1;

/// The interface versions a JVM may report or be asked for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, FromRepr, Display)]
#[repr(i32)]
pub enum InterfaceVersion {
    /// JNI 1.1
    #[strum(to_string = "1.1")]
    V1_1 = 0x0001_0001,
    /// JNI 1.2
    #[strum(to_string = "1.2")]
    V1_2 = 0x0001_0002,
    /// JNI 1.4
    #[strum(to_string = "1.4")]
    V1_4 = 0x0001_0004,
    /// JNI 1.6, the version this library is built against.
    #[strum(to_string = "1.6")]
    V1_6 = 0x0001_0006,
    /// JNI 1.8
    #[strum(to_string = "1.8")]
    V1_8 = 0x0001_0008,
}

impl InterfaceVersion {
    /// The raw code, suitable for `GetEnv` or as a `JNI_OnLoad` result.
    pub fn code(self) -> jint {
        self as jint
    }

    /// Map a raw code back to a known version. Unknown codes
    /// (including `JNI_ERR`) give `None`.
    pub fn from_code(code: jint) -> Option<Self> {
        Self::from_repr(code)
    }
}
