//! Field descriptors and the accessibility policy.
//!
//! A [`FieldDescriptor`] is the handle identifying one declared storage slot on
//! a [`RuntimeType`](crate::metadata::typesystem::RuntimeType). Its identity is
//! the pair (declaring type, name), encoded in the field token; two descriptors
//! declared by different types are always distinct even when same-named.
//!
//! The descriptor also owns the accessibility policy of spec'd reflective
//! access: [`FieldDescriptor::is_accessible`] decides whether direct access is
//! currently permitted, and [`FieldDescriptor::force_accessible`] is the single
//! path by which a non-public field becomes readable and writable. The flag is
//! atomic and monotonic (closed to open, never back), so concurrent force-opens
//! from different threads are a benign race and need no external locking.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    RwLock,
};

use bitflags::bitflags;

use crate::{
    metadata::{
        token::Token,
        typesystem::{RuntimeTypeRc, RuntimeTypeRef},
    },
    runtime::value::Value,
};

/// A reference counted `FieldDescriptor`
pub type FieldRc = std::sync::Arc<FieldDescriptor>;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Field modifier flags
    pub struct FieldModifiers: u32 {
        /// Accessible only by the declaring type
        const PRIVATE = 0x0001;
        /// Accessible by the declaring type and its subclasses
        const FAMILY = 0x0002;
        /// Accessible by any type in the same assembly
        const ASSEMBLY = 0x0004;
        /// Accessible by any type that can see the declaring type
        const PUBLIC = 0x0008;
        /// Field belongs to the type rather than to instances
        const STATIC = 0x0010;
        /// Field can only be initialized, not written after initialization
        const INIT_ONLY = 0x0020;
    }
}

impl FieldModifiers {
    /// Check if these modifiers mark a publicly visible field
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.contains(FieldModifiers::PUBLIC)
    }

    /// Check if these modifiers mark a static field
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.contains(FieldModifiers::STATIC)
    }

    /// Check if these modifiers mark a final field
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.contains(FieldModifiers::INIT_ONLY)
    }
}

/// A field declared by exactly one `RuntimeType`.
///
/// Descriptors are created during type construction, owned by the declaring
/// type and immutable after registration, with one exception: the
/// accessibility flag, which transitions monotonically from closed to open
/// through [`force_accessible`](FieldDescriptor::force_accessible).
///
/// Static fields carry their value slot directly on the descriptor, since
/// there is exactly one storage location per static field in the process.
pub struct FieldDescriptor {
    /// Token
    pub token: Token,
    /// Field name
    pub name: String,
    /// The type this field is declared on
    declaring: RuntimeTypeRef,
    /// The declared type of the field's values
    field_type: RuntimeTypeRef,
    /// Modifier flags
    pub flags: FieldModifiers,
    /// Accessibility override flag; closed at creation, opened by `force_accessible`
    accessible: AtomicBool,
    /// Value slot for static fields (flags.STATIC)
    static_value: Option<RwLock<Value>>,
}

impl FieldDescriptor {
    /// Create a new descriptor. Static fields get their value slot initialized
    /// to the default of the declared flavor.
    pub(crate) fn new(
        token: Token,
        name: String,
        declaring: &RuntimeTypeRc,
        field_type: &RuntimeTypeRc,
        flags: FieldModifiers,
    ) -> Self {
        let static_value = if flags.is_static() {
            Some(RwLock::new(Value::default_of(field_type.flavor)))
        } else {
            None
        };

        FieldDescriptor {
            token,
            name,
            declaring: RuntimeTypeRef::new(declaring),
            field_type: RuntimeTypeRef::new(field_type),
            flags,
            accessible: AtomicBool::new(false),
            static_value,
        }
    }

    /// Returns the type this field is declared on
    ///
    /// # Panics
    /// Panics if the registry owning the declaring type has been dropped.
    #[must_use]
    pub fn declaring(&self) -> RuntimeTypeRc {
        self.declaring.expect("Declaring type has been dropped")
    }

    /// Returns the declared type of the field's values
    ///
    /// # Panics
    /// Panics if the registry owning the field type has been dropped.
    #[must_use]
    pub fn field_type(&self) -> RuntimeTypeRc {
        self.field_type.expect("Field type has been dropped")
    }

    /// Check if direct access is currently permitted without override.
    ///
    /// True for publicly visible fields, and for non-public fields whose
    /// accessibility has been forced open.
    #[must_use]
    pub fn is_accessible(&self) -> bool {
        self.flags.is_public() || self.accessible.load(Ordering::Acquire)
    }

    /// Force the accessibility flag open, bypassing visibility restrictions.
    ///
    /// Idempotent; the flag never transitions back to closed. This is the only
    /// path by which non-public fields become readable and writable.
    pub fn force_accessible(&self) {
        self.accessible.store(true, Ordering::Release);
    }

    /// Whether the accessibility override has been forced open, independent
    /// of the field's declared visibility. Final instance fields unlock for
    /// writing only through this state.
    pub(crate) fn override_active(&self) -> bool {
        self.accessible.load(Ordering::Acquire)
    }

    /// Read the static value slot. Returns `None` for instance fields.
    pub(crate) fn static_value(&self) -> Option<Value> {
        self.static_value
            .as_ref()
            .map(|slot| read_lock!(slot).clone())
    }

    /// Replace the static value slot contents. No-op for instance fields.
    pub(crate) fn set_static_value(&self, value: Value) {
        if let Some(slot) = self.static_value.as_ref() {
            *write_lock!(slot) = value;
        }
    }
}

impl std::fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("token", &self.token)
            .field("name", &self.name)
            .field("flags", &self.flags)
            .field("accessible", &self.accessible.load(Ordering::Relaxed))
            .finish()
    }
}
