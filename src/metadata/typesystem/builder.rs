//! Builder for runtime type descriptors.
//!
//! This module provides the [`TypeBuilder`] struct, which offers a fluent API for
//! constructing classes and interfaces with a base type, implemented interfaces and
//! declared fields, and registering them in a [`TypeRegistry`]. It is the only way
//! hosts create types; the resolver and accessor never construct descriptors.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use fieldscope::metadata::field::FieldModifiers;
//! use fieldscope::metadata::typesystem::{TypeBuilder, TypeFlavor, TypeRegistry};
//!
//! let registry = Arc::new(TypeRegistry::new());
//! let i4 = registry.primitive(TypeFlavor::I4)?;
//!
//! let account = TypeBuilder::new(registry.clone())
//!     .namespace("Bank")
//!     .name("Account")
//!     .class()
//!     .field("balance", &i4, FieldModifiers::PRIVATE)
//!     .build()?;
//!
//! assert_eq!(account.fields.count(), 1);
//! # Ok::<(), fieldscope::Error>(())
//! ```

use std::sync::Arc;

use crate::{
    metadata::{
        field::{FieldDescriptor, FieldModifiers},
        typesystem::{RuntimeType, RuntimeTypeRc, RuntimeTypeRef, TypeFlavor, TypeRegistry},
    },
    Error::TypeError,
    Result,
};

/// Pending field declaration collected before `build`
struct FieldSpec {
    name: String,
    field_type: RuntimeTypeRc,
    flags: FieldModifiers,
}

/// Provides a fluent API for building runtime types
pub struct TypeBuilder {
    /// Type registry for storing the types
    registry: Arc<TypeRegistry>,
    /// Namespace of the type being built
    namespace: String,
    /// Name of the type being built
    name: Option<String>,
    /// Flavor of the type being built (class or interface)
    flavor: Option<TypeFlavor>,
    /// Base type, for classes
    base: Option<RuntimeTypeRc>,
    /// Directly implemented interfaces
    interfaces: Vec<RuntimeTypeRc>,
    /// Declared fields
    fields: Vec<FieldSpec>,
}

impl TypeBuilder {
    /// Create a new builder with the given registry
    ///
    /// ## Arguments
    /// * 'registry' - The type registry the built type is registered into
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        TypeBuilder {
            registry,
            namespace: String::new(),
            name: None,
            flavor: None,
            base: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Set the namespace of the type
    #[must_use]
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    /// Set the name of the type
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Build a class type
    #[must_use]
    pub fn class(mut self) -> Self {
        self.flavor = Some(TypeFlavor::Class);
        self
    }

    /// Build an interface type
    #[must_use]
    pub fn interface(mut self) -> Self {
        self.flavor = Some(TypeFlavor::Interface);
        self
    }

    /// Set the base type the class extends
    #[must_use]
    pub fn extends(mut self, base: &RuntimeTypeRc) -> Self {
        self.base = Some(base.clone());
        self
    }

    /// Add a directly implemented interface (for interfaces: a super-interface)
    #[must_use]
    pub fn implements(mut self, interface: &RuntimeTypeRc) -> Self {
        self.interfaces.push(interface.clone());
        self
    }

    /// Declare a field on the type
    ///
    /// ## Arguments
    /// * 'name' - The field name
    /// * 'field_type' - The declared type of the field's values
    /// * 'flags' - Modifier flags; fields without an access modifier default
    ///   to private, interface fields are normalized to public static final
    #[must_use]
    pub fn field(mut self, name: &str, field_type: &RuntimeTypeRc, flags: FieldModifiers) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            field_type: field_type.clone(),
            flags,
        });
        self
    }

    /// Construct the type and register it
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeError`] for incomplete or inconsistent
    /// declarations (missing name or kind, non-interface in `implements`,
    /// interface with a base class, duplicate field names), and
    /// [`crate::Error::TypeInsert`] if the registry already holds a type with
    /// the same full name.
    pub fn build(self) -> Result<RuntimeTypeRc> {
        let Some(name) = self.name else {
            return Err(TypeError("Type name not specified".to_string()));
        };
        let Some(flavor) = self.flavor else {
            return Err(TypeError(format!("Kind of {name} not specified")));
        };

        if flavor == TypeFlavor::Interface && self.base.is_some() {
            return Err(TypeError(format!(
                "Interface {name} cannot extend a class; use implements for super-interfaces"
            )));
        }

        if let Some(base) = &self.base {
            if base.flavor != TypeFlavor::Class {
                return Err(TypeError(format!(
                    "Base of {} must be a class, found {}",
                    name, base.flavor
                )));
            }
        }

        for interface in &self.interfaces {
            if !interface.is_interface() {
                return Err(TypeError(format!(
                    "{} implements non-interface {}",
                    name,
                    interface.fullname()
                )));
            }
        }

        for (index, spec) in self.fields.iter().enumerate() {
            if spec.name.trim().is_empty() {
                return Err(TypeError(format!("Field on {name} has blank name")));
            }
            if self.fields[..index].iter().any(|f| f.name == spec.name) {
                return Err(TypeError(format!(
                    "Field {} declared twice on {}",
                    spec.name, name
                )));
            }
        }

        let interfaces = Arc::new(boxcar::Vec::new());
        for interface in &self.interfaces {
            interfaces.push(RuntimeTypeRef::new(interface));
        }

        let type_rc = Arc::new(RuntimeType::new(
            self.registry.next_type_token(),
            flavor,
            self.namespace,
            name,
            interfaces,
            Arc::new(boxcar::Vec::new()),
        ));

        if let Some(base) = &self.base {
            type_rc.set_base(RuntimeTypeRef::new(base))?;
        }

        for spec in self.fields {
            let flags = normalize_flags(spec.flags, flavor);
            let descriptor = FieldDescriptor::new(
                self.registry.next_field_token(),
                spec.name,
                &type_rc,
                &spec.field_type,
                flags,
            );
            type_rc.fields.push(Arc::new(descriptor));
        }

        self.registry.insert(&type_rc)?;
        Ok(type_rc)
    }
}

/// Apply declaration defaults: missing access modifier means private, and
/// interface fields are always public static final.
fn normalize_flags(flags: FieldModifiers, flavor: TypeFlavor) -> FieldModifiers {
    const ACCESS_MASK: FieldModifiers = FieldModifiers::PRIVATE
        .union(FieldModifiers::FAMILY)
        .union(FieldModifiers::ASSEMBLY)
        .union(FieldModifiers::PUBLIC);

    if flavor == TypeFlavor::Interface {
        let mut normalized = flags.difference(ACCESS_MASK);
        normalized.insert(FieldModifiers::PUBLIC | FieldModifiers::STATIC | FieldModifiers::INIT_ONLY);
        return normalized;
    }

    if flags.intersection(ACCESS_MASK).is_empty() {
        return flags | FieldModifiers::PRIVATE;
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Arc<TypeRegistry> {
        Arc::new(TypeRegistry::new())
    }

    #[test]
    fn test_build_requires_name_and_kind() {
        assert!(TypeBuilder::new(registry()).class().build().is_err());
        assert!(TypeBuilder::new(registry()).name("NoKind").build().is_err());
    }

    #[test]
    fn test_build_class_with_fields() {
        let registry = registry();
        let i4 = registry.primitive(TypeFlavor::I4).unwrap();

        let account = TypeBuilder::new(registry.clone())
            .namespace("Bank")
            .name("Account")
            .class()
            .field("balance", &i4, FieldModifiers::PRIVATE)
            .field("limit", &i4, FieldModifiers::PUBLIC)
            .build()
            .unwrap();

        assert_eq!(account.fields.count(), 2);
        let balance = account.declared_field("balance").unwrap();
        assert!(!balance.flags.is_public());
        assert_eq!(balance.declaring().token, account.token);
        assert_eq!(balance.field_type().flavor, TypeFlavor::I4);
    }

    #[test]
    fn test_interface_fields_are_normalized() {
        let registry = registry();
        let i4 = registry.primitive(TypeFlavor::I4).unwrap();

        let constants = TypeBuilder::new(registry.clone())
            .namespace("Demo")
            .name("IConstants")
            .interface()
            .field("LIMIT", &i4, FieldModifiers::PRIVATE)
            .build()
            .unwrap();

        let limit = constants.declared_field("LIMIT").unwrap();
        assert!(limit.flags.is_public());
        assert!(limit.flags.is_static());
        assert!(limit.flags.is_final());
        assert!(!limit.flags.contains(FieldModifiers::PRIVATE));
    }

    #[test]
    fn test_missing_access_modifier_defaults_to_private() {
        let registry = registry();
        let i4 = registry.primitive(TypeFlavor::I4).unwrap();

        let holder = TypeBuilder::new(registry.clone())
            .namespace("Demo")
            .name("Holder")
            .class()
            .field("plain", &i4, FieldModifiers::empty())
            .build()
            .unwrap();

        let plain = holder.declared_field("plain").unwrap();
        assert!(plain.flags.contains(FieldModifiers::PRIVATE));
        assert!(!plain.flags.is_public());
    }

    #[test]
    fn test_duplicate_field_names_rejected() {
        let registry = registry();
        let i4 = registry.primitive(TypeFlavor::I4).unwrap();

        let result = TypeBuilder::new(registry.clone())
            .namespace("Demo")
            .name("Holder")
            .class()
            .field("x", &i4, FieldModifiers::PUBLIC)
            .field("x", &i4, FieldModifiers::PRIVATE)
            .build();

        assert!(matches!(result, Err(TypeError(_))));
    }

    #[test]
    fn test_implements_rejects_classes() {
        let registry = registry();
        let base = TypeBuilder::new(registry.clone())
            .namespace("Demo")
            .name("Base")
            .class()
            .build()
            .unwrap();

        let result = TypeBuilder::new(registry.clone())
            .namespace("Demo")
            .name("Broken")
            .class()
            .implements(&base)
            .build();

        assert!(matches!(result, Err(TypeError(_))));
    }

    #[test]
    fn test_interface_cannot_extend() {
        let registry = registry();
        let base = TypeBuilder::new(registry.clone())
            .namespace("Demo")
            .name("Base")
            .class()
            .build()
            .unwrap();

        let result = TypeBuilder::new(registry.clone())
            .namespace("Demo")
            .name("IBroken")
            .interface()
            .extends(&base)
            .build();

        assert!(matches!(result, Err(TypeError(_))));
    }

    #[test]
    fn test_duplicate_fullname_rejected() {
        let registry = registry();
        TypeBuilder::new(registry.clone())
            .namespace("Demo")
            .name("Widget")
            .class()
            .build()
            .unwrap();

        let result = TypeBuilder::new(registry.clone())
            .namespace("Demo")
            .name("Widget")
            .class()
            .build();

        assert!(matches!(result, Err(crate::Error::TypeInsert(_))));
    }
}
