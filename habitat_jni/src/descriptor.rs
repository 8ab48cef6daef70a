//! The binding table handed to the runtime: an explicit mapping from
//! (method name, descriptor) to the native entry point. It is built inside
//! load-time initialization and dropped once registration returns; the
//! runtime keeps its own copy of the binding afterwards.

use crate::signature::{MethodSignature, SignatureError};
use thiserror::Error;

/// One native method to bind: name, descriptor and the entry point.
///
/// `E` is whatever the runtime calls through. For the JVM that is the
/// `*mut c_void` stored in a `JNINativeMethod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgedMethod<E> {
    /// Method name as declared on the managed class.
    pub name: &'static str,
    /// Descriptor, used by the runtime to pick between overloads.
    pub signature: &'static str,
    /// Native implementation.
    pub entry: E,
}

impl<E> BridgedMethod<E> {
    /// Describe a method binding.
    pub const fn new(name: &'static str, signature: &'static str, entry: E) -> Self {
        Self {
            name,
            signature,
            entry,
        }
    }

    /// The (name, descriptor) pair the runtime resolves the method by.
    pub fn key(&self) -> (&'static str, &'static str) {
        (self.name, self.signature)
    }
}

/// Reasons a method cannot be added to a [`BindingTable`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindingError {
    /// The descriptor is not valid JVM descriptor syntax.
    #[error("cannot bind {name}: {source}")]
    Signature {
        /// Method being bound.
        name: &'static str,
        /// Parse failure.
        #[source]
        source: SignatureError,
    },

    /// The same (name, descriptor) pair was bound twice.
    #[error("{name}{signature} is already bound")]
    Duplicate {
        /// Method name.
        name: &'static str,
        /// Method descriptor.
        signature: &'static str,
    },
}

/// Ordered, duplicate-free set of [`BridgedMethod`]s. Every descriptor in
/// the table has been parsed successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingTable<E> {
    methods: Vec<BridgedMethod<E>>,
}

impl<E> Default for BindingTable<E> {
    fn default() -> Self {
        Self {
            methods: Vec::new(),
        }
    }
}

impl<E> BindingTable<E> {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, checking its descriptor and uniqueness.
    pub fn bind(&mut self, method: BridgedMethod<E>) -> Result<(), BindingError> {
        MethodSignature::parse(method.signature).map_err(|source| BindingError::Signature {
            name: method.name,
            source,
        })?;
        if self.get(method.name, method.signature).is_some() {
            return Err(BindingError::Duplicate {
                name: method.name,
                signature: method.signature,
            });
        }
        self.methods.push(method);
        Ok(())
    }

    /// Build a table from a list of bindings, stopping at the first bad one.
    pub fn from_methods(
        methods: impl IntoIterator<Item = BridgedMethod<E>>,
    ) -> Result<Self, BindingError> {
        let mut table = Self::new();
        for method in methods {
            table.bind(method)?;
        }
        Ok(table)
    }

    /// Look up a binding by name and descriptor.
    pub fn get(&self, name: &str, signature: &str) -> Option<&BridgedMethod<E>> {
        self.methods
            .iter()
            .find(|m| m.key() == (name, signature))
    }

    /// Bindings in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &BridgedMethod<E>> {
        self.methods.iter()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// True if nothing has been bound.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
