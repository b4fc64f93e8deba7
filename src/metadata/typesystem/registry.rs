//! Central type registry for the runtime type model.
//!
//! The [`TypeRegistry`] owns every [`RuntimeType`] in the process and is the
//! single allocator of type and field tokens. It is the "host runtime type
//! system" that descriptors belong to: lookups borrow from it, and descriptors
//! stay valid for as long as the registry lives.
//!
//! # Registry Architecture
//!
//! - **Token-based lookup**: primary index using metadata tokens (`SkipMap`)
//! - **Name-based lookup**: secondary fullname index (`DashMap`)
//! - **Atomic token allocation**: type and field counters, no locking
//!
//! Seeded with the primitive types (`System.Boolean` through `System.String`)
//! on construction; user types are registered through
//! [`TypeBuilder`](crate::metadata::typesystem::TypeBuilder).
//!
//! # Thread Safety
//!
//! All operations are lock-free or use concurrent containers; the registry can
//! be shared across threads behind an `Arc` without external synchronization.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use fieldscope::metadata::typesystem::{TypeBuilder, TypeFlavor, TypeRegistry};
//!
//! let registry = Arc::new(TypeRegistry::new());
//!
//! let widget = TypeBuilder::new(registry.clone())
//!     .namespace("Demo")
//!     .name("Widget")
//!     .class()
//!     .build()?;
//!
//! assert!(registry.get(&widget.token).is_some());
//! assert!(registry.get_by_fullname("Demo.Widget").is_some());
//! assert!(registry.get_by_fullname("System.Int32").is_some());
//! # Ok::<(), fieldscope::Error>(())
//! ```

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;

use crate::{
    metadata::{
        token::{Token, TABLE_FIELD, TABLE_TYPE},
        typesystem::{RuntimeType, RuntimeTypeRc, TypeFlavor},
    },
    Result,
};

/// First row index handed out to user types; rows below are reserved for the
/// seeded primitives.
const FIRST_USER_TYPE_ROW: u32 = 0x100;

/// The primitive flavors seeded into every registry, with their well-known names.
const PRIMITIVES: &[(TypeFlavor, &str)] = &[
    (TypeFlavor::Boolean, "Boolean"),
    (TypeFlavor::Char, "Char"),
    (TypeFlavor::I4, "Int32"),
    (TypeFlavor::I8, "Int64"),
    (TypeFlavor::R4, "Float32"),
    (TypeFlavor::R8, "Float64"),
    (TypeFlavor::String, "String"),
];

/// Central registry owning all runtime types.
///
/// - Lock-free primary storage using `SkipMap`
/// - Concurrent fullname index using `DashMap`
/// - Atomic token generation for types and fields
pub struct TypeRegistry {
    /// Primary storage, ordered by token
    types: SkipMap<Token, RuntimeTypeRc>,
    /// Fullname (Namespace.Name) index
    types_by_fullname: DashMap<String, Token>,
    /// Next row index for the type table
    next_type_row: AtomicU32,
    /// Next row index for the field table
    next_field_row: AtomicU32,
}

impl TypeRegistry {
    /// Create a new registry, seeded with the primitive types
    #[must_use]
    pub fn new() -> Self {
        let registry = TypeRegistry {
            types: SkipMap::new(),
            types_by_fullname: DashMap::new(),
            // Start after reserved primitives
            next_type_row: AtomicU32::new(FIRST_USER_TYPE_ROW),
            next_field_row: AtomicU32::new(1),
        };

        registry.initialize_primitives();
        registry
    }

    /// Initialize primitive types in the registry
    fn initialize_primitives(&self) {
        for (row, (flavor, name)) in PRIMITIVES.iter().enumerate() {
            let row = u32::try_from(row).unwrap_or(0) + 1;
            let token = Token::new((u32::from(TABLE_TYPE) << 24) | row);

            let new_type = Arc::new(RuntimeType::new(
                token,
                *flavor,
                "System".to_string(),
                (*name).to_string(),
                Arc::new(boxcar::Vec::new()),
                Arc::new(boxcar::Vec::new()),
            ));

            self.register_type_internal(&new_type);
        }
    }

    /// Get the next available type token and increment the counter
    pub(crate) fn next_type_token(&self) -> Token {
        let row = self.next_type_row.fetch_add(1, Ordering::Relaxed);
        debug_assert!(row <= 0x00FF_FFFF, "Type token row space exhausted");
        Token::new((u32::from(TABLE_TYPE) << 24) | (row & 0x00FF_FFFF))
    }

    /// Get the next available field token and increment the counter
    pub(crate) fn next_field_token(&self) -> Token {
        let row = self.next_field_row.fetch_add(1, Ordering::Relaxed);
        debug_assert!(row <= 0x00FF_FFFF, "Field token row space exhausted");
        Token::new((u32::from(TABLE_FIELD) << 24) | (row & 0x00FF_FFFF))
    }

    /// Register a new type in all the lookup tables
    fn register_type_internal(&self, type_rc: &RuntimeTypeRc) {
        self.types.insert(type_rc.token, type_rc.clone());
        self.types_by_fullname
            .insert(type_rc.fullname(), type_rc.token);
    }

    /// Register a new type, failing on token or fullname collisions
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeInsert`] if a type with the same token or
    /// full name is already registered.
    pub fn insert(&self, type_rc: &RuntimeTypeRc) -> Result<()> {
        if self.types.contains_key(&type_rc.token)
            || self.types_by_fullname.contains_key(&type_rc.fullname())
        {
            return Err(crate::Error::TypeInsert(type_rc.token));
        }

        self.register_type_internal(type_rc);
        Ok(())
    }

    /// Look up a type by token
    #[must_use]
    pub fn get(&self, token: &Token) -> Option<RuntimeTypeRc> {
        self.types.get(token).map(|entry| entry.value().clone())
    }

    /// Look up a type by its full name (Namespace.Name)
    #[must_use]
    pub fn get_by_fullname(&self, fullname: &str) -> Option<RuntimeTypeRc> {
        let token = *self.types_by_fullname.get(fullname)?;
        self.get(&token)
    }

    /// Look up the seeded primitive type for a flavor
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeError`] for non-primitive flavors.
    pub fn primitive(&self, flavor: TypeFlavor) -> Result<RuntimeTypeRc> {
        let name = PRIMITIVES
            .iter()
            .find(|(f, _)| *f == flavor)
            .map(|(_, name)| *name)
            .ok_or_else(|| crate::Error::TypeError(format!("{flavor} is not a primitive")))?;

        self.get_by_fullname(&format!("System.{name}"))
            .ok_or_else(|| crate::Error::TypeError(format!("Primitive {name} not seeded")))
    }

    /// Number of registered types, including the seeded primitives
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check whether the registry holds no types (never true after seeding)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_seeds_primitives() {
        let registry = TypeRegistry::new();

        assert_eq!(registry.len(), PRIMITIVES.len());
        for (flavor, name) in PRIMITIVES {
            let ty = registry.primitive(*flavor).unwrap();
            assert_eq!(ty.name, *name);
            assert_eq!(ty.namespace, "System");
            assert_eq!(ty.flavor, *flavor);
        }
    }

    #[test]
    fn test_primitive_rejects_non_primitive_flavor() {
        let registry = TypeRegistry::new();
        assert!(registry.primitive(TypeFlavor::Class).is_err());
        assert!(registry.primitive(TypeFlavor::Interface).is_err());
    }

    #[test]
    fn test_token_allocation_is_distinct() {
        let registry = TypeRegistry::new();

        let t1 = registry.next_type_token();
        let t2 = registry.next_type_token();
        assert_ne!(t1, t2);
        assert!(t1.is_type());
        assert!(t2.is_type());

        let f1 = registry.next_field_token();
        let f2 = registry.next_field_token();
        assert_ne!(f1, f2);
        assert!(f1.is_field());
        assert!(f2.is_field());
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let registry = TypeRegistry::new();

        let token = registry.next_type_token();
        let ty = Arc::new(RuntimeType::new(
            token,
            TypeFlavor::Class,
            "Demo".to_string(),
            "Widget".to_string(),
            Arc::new(boxcar::Vec::new()),
            Arc::new(boxcar::Vec::new()),
        ));

        registry.insert(&ty).unwrap();
        assert!(matches!(
            registry.insert(&ty),
            Err(crate::Error::TypeInsert(_))
        ));
    }

    #[test]
    fn test_lookup_by_token_and_fullname() {
        let registry = TypeRegistry::new();

        let token = registry.next_type_token();
        let ty = Arc::new(RuntimeType::new(
            token,
            TypeFlavor::Class,
            "Demo".to_string(),
            "Widget".to_string(),
            Arc::new(boxcar::Vec::new()),
            Arc::new(boxcar::Vec::new()),
        ));
        registry.insert(&ty).unwrap();

        assert_eq!(registry.get(&token).unwrap().name, "Widget");
        assert_eq!(
            registry.get_by_fullname("Demo.Widget").unwrap().token,
            token
        );
        assert!(registry.get_by_fullname("Demo.Missing").is_none());
    }
}
