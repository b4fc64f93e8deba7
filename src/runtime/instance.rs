//! Heap instances targeted by instance-scoped field access.

use std::{fmt, sync::Arc};

use dashmap::DashMap;

use crate::{
    metadata::{
        field::FieldRc,
        token::Token,
        typesystem::{RuntimeTypeRc, TypeFlavor},
    },
    runtime::value::Value,
    Result,
};

/// A reference counted `Instance`
pub type InstanceRc = Arc<Instance>;

/// A runtime object: the target of instance field reads and writes.
///
/// Holds a strong reference to its runtime type and concurrent per-field
/// storage keyed by field token. A field that was never written reads as the
/// default of its declared flavor, so freshly allocated instances behave like
/// zero-initialized objects.
pub struct Instance {
    /// The runtime type of this object
    runtime_type: RuntimeTypeRc,
    /// Field storage, keyed by field token
    fields: DashMap<Token, Value>,
}

impl Instance {
    /// Allocate a new instance of `runtime_type`.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeError`] for interfaces and primitives,
    /// which cannot be instantiated.
    pub fn new(runtime_type: &RuntimeTypeRc) -> Result<InstanceRc> {
        if runtime_type.flavor != TypeFlavor::Class {
            return Err(crate::Error::TypeError(format!(
                "Cannot instantiate {} {}",
                runtime_type.flavor,
                runtime_type.fullname()
            )));
        }

        Ok(Arc::new(Instance {
            runtime_type: runtime_type.clone(),
            fields: DashMap::new(),
        }))
    }

    /// The runtime type of this instance
    #[must_use]
    pub fn runtime_type(&self) -> &RuntimeTypeRc {
        &self.runtime_type
    }

    /// Read the stored value of `field`, falling back to the declared
    /// flavor's default when the slot was never written
    pub(crate) fn get_field_value(&self, field: &FieldRc) -> Value {
        self.fields
            .get(&field.token)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| Value::default_of(field.field_type().flavor))
    }

    /// Store `value` in the slot of `field`
    pub(crate) fn set_field_value(&self, field: &FieldRc, value: Value) {
        self.fields.insert(field.token, value);
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type", &self.runtime_type.fullname())
            .field("fields", &self.fields.len())
            .finish()
    }
}
