//! Load-time registration: resolve the target class, describe the bridged
//! method, and hand the binding to the runtime. Nothing here retries or
//! cleans up; any failure aborts the load.

use crate::config::BridgeConfig;
use crate::descriptor::{BindingTable, BridgedMethod};
use crate::runtime::{LoadError, ManagedRuntime};
use jni::sys::jint;
use tracing::{debug, error};

/// Bind `entry` as the implementation of the configured method.
///
/// The class is resolved before any binding is built, so a missing class
/// never reaches the runtime's registration call.
pub fn register_bridge<R: ManagedRuntime>(
    runtime: &mut R,
    config: &BridgeConfig,
    entry: R::Entry,
) -> Result<(), LoadError> {
    let class = runtime
        .find_class(config.class_name)
        .map_err(|e| LoadError::ClassNotFound {
            class: config.class_name.to_string(),
            reason: e.to_string(),
        })?;

    let table = BindingTable::from_methods([BridgedMethod::new(
        config.method_name,
        config.method_signature,
        entry,
    )])
    .map_err(|e| LoadError::Registration {
        class: config.class_name.to_string(),
        reason: e.to_string(),
    })?;

    runtime
        .register_natives(&class, &table)
        .map_err(|e| LoadError::Registration {
            class: config.class_name.to_string(),
            reason: e.to_string(),
        })?;

    debug!(
        class = config.class_name,
        method = config.method_name,
        signature = config.method_signature,
        "registered native method"
    );
    Ok(())
}

/// Run [`register_bridge`] and turn the outcome into the status code the
/// host expects: the interface version on success, `JNI_ERR` otherwise.
pub fn load<R: ManagedRuntime>(runtime: &mut R, config: &BridgeConfig, entry: R::Entry) -> jint {
    match register_bridge(runtime, config, entry) {
        Ok(()) => config.interface_version.code(),
        Err(e) => {
            let stage: &'static str = e.stage().into();
            error!(stage, "native library load failed: {e}");
            e.status()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::{InterfaceVersion, LOAD_FAILED};

    /// Records what the registrar asked for; refuses everything when `refuse` is set.
    #[derive(Default)]
    struct Recorder {
        refuse: bool,
        looked_up: Vec<String>,
        registered: Vec<(&'static str, &'static str, u32)>,
    }

    impl ManagedRuntime for Recorder {
        type Class = String;
        type Entry = u32;
        type Error = &'static str;

        fn find_class(&mut self, name: &str) -> Result<String, &'static str> {
            self.looked_up.push(name.to_string());
            if self.refuse {
                Err("refused")
            } else {
                Ok(name.to_string())
            }
        }

        fn register_natives(
            &mut self,
            _class: &String,
            table: &BindingTable<u32>,
        ) -> Result<(), &'static str> {
            self.registered
                .extend(table.iter().map(|m| (m.name, m.signature, m.entry)));
            Ok(())
        }
    }

    #[test]
    fn registers_configured_method() {
        let mut runtime = Recorder::default();
        let status = load(&mut runtime, &BridgeConfig::default(), 7);
        assert_eq!(status, InterfaceVersion::V1_6.code());
        assert_eq!(runtime.looked_up, ["com/facebook/example/habitat/Ice"]);
        assert_eq!(runtime.registered, [("getName", "()Ljava/lang/String;", 7)]);
    }

    #[test]
    fn class_failure_skips_registration() {
        let mut runtime = Recorder {
            refuse: true,
            ..Recorder::default()
        };
        let err = register_bridge(&mut runtime, &BridgeConfig::default(), 7)
            .expect_err("class lookup refused");
        assert_eq!(
            err,
            LoadError::ClassNotFound {
                class: "com/facebook/example/habitat/Ice".into(),
                reason: "refused".into()
            }
        );
        assert!(runtime.registered.is_empty());
    }

    #[test]
    fn malformed_descriptor_fails_before_runtime_sees_it() {
        let mut runtime = Recorder::default();
        let config = BridgeConfig {
            method_signature: "()String",
            ..BridgeConfig::default()
        };
        assert_eq!(load(&mut runtime, &config, 7), LOAD_FAILED);
        assert!(runtime.registered.is_empty());
    }
}
