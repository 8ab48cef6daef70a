//! An in-process stand-in for the JVM: a class path of declared native
//! methods and the table of bindings the runtime keeps after
//! `RegisterNatives`.

use habitat_jni::{BindingTable, ManagedRuntime};
use std::collections::HashMap;

/// Entry type of the fake runtime: a plain Rust function.
pub type FakeEntry = fn() -> String;

pub struct FakeClass {
    pub name: String,
}

#[derive(Default)]
pub struct FakeRuntime {
    /// class name -> declared native (name, descriptor) pairs
    classes: HashMap<String, Vec<(String, String)>>,
    bound: HashMap<(String, String, String), FakeEntry>,
    pub lookups: Vec<String>,
    pub registration_attempts: usize,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a class on the class path with the given native declarations.
    pub fn declare(mut self, class: &str, natives: &[(&str, &str)]) -> Self {
        self.classes.insert(
            class.to_string(),
            natives
                .iter()
                .map(|(n, s)| (n.to_string(), s.to_string()))
                .collect(),
        );
        self
    }

    /// Call a bound native, like the JVM would when managed code invokes it.
    pub fn invoke(&self, class: &str, name: &str, signature: &str) -> Option<String> {
        self.bound
            .get(&(class.to_string(), name.to_string(), signature.to_string()))
            .map(|entry| entry())
    }

    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }
}

impl ManagedRuntime for FakeRuntime {
    type Class = FakeClass;
    type Entry = FakeEntry;
    type Error = String;

    fn find_class(&mut self, name: &str) -> Result<FakeClass, String> {
        self.lookups.push(name.to_string());
        if self.classes.contains_key(name) {
            Ok(FakeClass {
                name: name.to_string(),
            })
        } else {
            Err(format!("java.lang.NoClassDefFoundError: {name}"))
        }
    }

    fn register_natives(
        &mut self,
        class: &FakeClass,
        table: &BindingTable<FakeEntry>,
    ) -> Result<(), String> {
        self.registration_attempts += 1;
        let declared = &self.classes[&class.name];
        // All or nothing, as RegisterNatives does.
        for method in table.iter() {
            let found = declared
                .iter()
                .any(|(n, s)| n == method.name && s == method.signature);
            if !found {
                return Err(format!(
                    "java.lang.NoSuchMethodError: {}.{}{}",
                    class.name, method.name, method.signature
                ));
            }
        }
        for method in table.iter() {
            self.bound.insert(
                (
                    class.name.clone(),
                    method.name.to_string(),
                    method.signature.to_string(),
                ),
                method.entry,
            );
        }
        Ok(())
    }
}

/// The pure implementation, wrapped as a fake-runtime entry.
pub fn ice_entry() -> String {
    habitat_jni::ice_name().to_string()
}
