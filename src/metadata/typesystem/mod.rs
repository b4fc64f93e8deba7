//! Runtime type model backing field resolution.
//!
//! This module defines the type descriptors the resolver and accessor operate
//! against: [`RuntimeType`] (name, flavor, superclass, implemented interfaces,
//! declared fields), the [`RuntimeTypeRef`] weak-reference wrapper used for all
//! cross-type links, and the [`TypeFlavor`] classification.
//!
//! Types are created through [`TypeBuilder`] and owned by a [`TypeRegistry`];
//! once registered they are read-only and outlive any lookup operation
//! performed against them. The only mutable state anywhere in the model is the
//! per-field accessibility flag, owned by
//! [`FieldDescriptor`](crate::metadata::field::FieldDescriptor).
//!
//! # Reference Structure
//!
//! The registry holds the strong references; `base` and `interfaces` links are
//! weak ([`RuntimeTypeRef`]) so that arbitrary hierarchy shapes cannot leak
//! through reference cycles.

use std::{
    fmt,
    sync::{Arc, OnceLock, Weak},
};

use crate::metadata::{field::FieldRc, token::Token};

mod builder;
mod hierarchy;
mod registry;

pub use builder::TypeBuilder;
pub use hierarchy::{all_interfaces, superclass_chain, SuperclassChain};
pub use registry::TypeRegistry;

/// A reference counted `RuntimeType`
pub type RuntimeTypeRc = Arc<RuntimeType>;
/// A vector that holds the fields a type declares
pub type FieldList = Arc<boxcar::Vec<FieldRc>>;
/// A vector that holds `RuntimeTypeRef` instances (weak references)
pub type RuntimeTypeRefList = Arc<boxcar::Vec<RuntimeTypeRef>>;

/// Classification of a runtime type.
///
/// Primitive flavors double as the declared type of primitive-valued fields;
/// `Class` and `Interface` participate in the inheritance hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFlavor {
    /// Boolean primitive
    Boolean,
    /// Unicode character primitive
    Char,
    /// 32-bit signed integer primitive
    I4,
    /// 64-bit signed integer primitive
    I8,
    /// 32-bit floating point primitive
    R4,
    /// 64-bit floating point primitive
    R8,
    /// Immutable string reference type
    String,
    /// Class type participating in single inheritance
    Class,
    /// Interface type; declares only public static final fields
    Interface,
}

impl TypeFlavor {
    /// Check if this is a primitive type
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            TypeFlavor::Boolean
                | TypeFlavor::Char
                | TypeFlavor::I4
                | TypeFlavor::I8
                | TypeFlavor::R4
                | TypeFlavor::R8
        )
    }

    /// Check if this is a reference type (can hold null)
    #[must_use]
    pub fn is_reference_type(&self) -> bool {
        matches!(
            self,
            TypeFlavor::String | TypeFlavor::Class | TypeFlavor::Interface
        )
    }
}

impl fmt::Display for TypeFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeFlavor::Boolean => "Boolean",
            TypeFlavor::Char => "Char",
            TypeFlavor::I4 => "I4",
            TypeFlavor::I8 => "I8",
            TypeFlavor::R4 => "R4",
            TypeFlavor::R8 => "R8",
            TypeFlavor::String => "String",
            TypeFlavor::Class => "Class",
            TypeFlavor::Interface => "Interface",
        };
        write!(f, "{name}")
    }
}

/// A smart reference to a `RuntimeType` that automatically handles weak references
/// to prevent circular reference memory leaks while providing a clean API
#[derive(Clone, Debug)]
pub struct RuntimeTypeRef {
    weak_ref: Weak<RuntimeType>,
}

impl RuntimeTypeRef {
    /// Create a new `RuntimeTypeRef` from a strong reference
    pub fn new(strong_ref: &RuntimeTypeRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the type, returning None if the type has been dropped
    #[must_use]
    pub fn upgrade(&self) -> Option<RuntimeTypeRc> {
        self.weak_ref.upgrade()
    }

    /// Get a strong reference to the type, panicking if the type has been dropped
    /// Use this when you're certain the registry owning the type still exists
    ///
    /// # Panics
    /// Panics if the type has been dropped and the weak reference cannot be upgraded.
    #[must_use]
    pub fn expect(&self, msg: &str) -> RuntimeTypeRc {
        self.weak_ref.upgrade().expect(msg)
    }

    /// Check if the referenced type is still alive
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }

    /// Get the token of the referenced type (if still alive)
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.upgrade().map(|t| t.token)
    }

    /// Get the name of the referenced type (if still alive)
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.upgrade().map(|t| t.name.clone())
    }
}

impl From<RuntimeTypeRc> for RuntimeTypeRef {
    fn from(strong_ref: RuntimeTypeRc) -> Self {
        Self::new(&strong_ref)
    }
}

/// A runtime type descriptor.
///
/// Exposes exactly what field resolution needs: the fields declared directly
/// on the type, the direct superclass (possibly none) and the directly
/// implemented interfaces. Instances are created by [`TypeBuilder`], owned by
/// a [`TypeRegistry`] and immutable after registration.
pub struct RuntimeType {
    /// Token
    pub token: Token,
    /// The `TypeFlavor`
    pub flavor: TypeFlavor,
    /// Namespace (can be empty, e.g. for primitives)
    pub namespace: String,
    /// Type name
    pub name: String,
    /// This types base aka 'extends' (always absent for interfaces and primitives)
    base: OnceLock<RuntimeTypeRef>,
    /// All interfaces this type directly implements
    pub interfaces: RuntimeTypeRefList,
    /// All fields this type declares directly
    pub fields: FieldList,
}

impl RuntimeType {
    /// Create a new instance of a `RuntimeType`
    pub(crate) fn new(
        token: Token,
        flavor: TypeFlavor,
        namespace: String,
        name: String,
        interfaces: RuntimeTypeRefList,
        fields: FieldList,
    ) -> Self {
        RuntimeType {
            token,
            flavor,
            namespace,
            name,
            base: OnceLock::new(),
            interfaces,
            fields,
        }
    }

    /// Returns the direct superclass of this type, or `None` for hierarchy
    /// roots, interfaces and primitives
    #[must_use]
    pub fn base(&self) -> Option<RuntimeTypeRc> {
        if let Some(base) = self.base.get() {
            base.upgrade()
        } else {
            None
        }
    }

    /// Set the base type; fails if a base has already been assigned
    pub(crate) fn set_base(&self, base: RuntimeTypeRef) -> crate::Result<()> {
        self.base
            .set(base)
            .map_err(|_| crate::Error::TypeError(format!("Base of {} already set", self.name)))
    }

    /// Returns the full name (Namespace.Name) of the type
    #[must_use]
    pub fn fullname(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Check if this type is an interface
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.flavor == TypeFlavor::Interface
    }

    /// Returns the field declared exactly on this type with the given name,
    /// ignoring superclasses and interfaces
    #[must_use]
    pub fn declared_field(&self, name: &str) -> Option<FieldRc> {
        self.fields
            .iter()
            .map(|(_, field)| field)
            .find(|field| field.name == name)
            .cloned()
    }
}

impl fmt::Debug for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeType")
            .field("token", &self.token)
            .field("flavor", &self.flavor)
            .field("fullname", &self.fullname())
            .field("fields", &self.fields.count())
            .finish()
    }
}
