//! Runtime value representation for field storage.

use std::fmt;

use crate::{
    metadata::typesystem::{all_interfaces, superclass_chain, RuntimeTypeRc, TypeFlavor},
    runtime::instance::InstanceRc,
};

/// A value held by a field or written to one.
///
/// Covers the primitive flavors, strings and object references of the runtime
/// type model. `Null` is the empty reference; it is assignable to every
/// reference-typed field and never to a primitive one.
#[derive(Clone, Debug)]
pub enum Value {
    /// The empty reference
    Null,
    /// Boolean value
    Bool(bool),
    /// Unicode character
    Char(char),
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// 32-bit floating point
    F32(f32),
    /// 64-bit floating point
    F64(f64),
    /// Immutable string
    Str(String),
    /// Reference to a heap instance
    Object(InstanceRc),
}

impl Value {
    /// The type flavor of this value, or `None` for `Null`
    #[must_use]
    pub fn flavor(&self) -> Option<TypeFlavor> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(TypeFlavor::Boolean),
            Value::Char(_) => Some(TypeFlavor::Char),
            Value::I32(_) => Some(TypeFlavor::I4),
            Value::I64(_) => Some(TypeFlavor::I8),
            Value::F32(_) => Some(TypeFlavor::R4),
            Value::F64(_) => Some(TypeFlavor::R8),
            Value::Str(_) => Some(TypeFlavor::String),
            Value::Object(_) => Some(TypeFlavor::Class),
        }
    }

    /// The default value a freshly declared field of `flavor` reads as
    #[must_use]
    pub fn default_of(flavor: TypeFlavor) -> Value {
        match flavor {
            TypeFlavor::Boolean => Value::Bool(false),
            TypeFlavor::Char => Value::Char('\0'),
            TypeFlavor::I4 => Value::I32(0),
            TypeFlavor::I8 => Value::I64(0),
            TypeFlavor::R4 => Value::F32(0.0),
            TypeFlavor::R8 => Value::F64(0.0),
            TypeFlavor::String | TypeFlavor::Class | TypeFlavor::Interface => Value::Null,
        }
    }

    /// Check whether this value can be stored in a field declared as `declared`.
    ///
    /// Primitives and strings require an exact flavor match. `Null` is
    /// assignable to any reference type. An object reference is assignable to
    /// a class or interface if its runtime type is that type, a subclass of
    /// it, or implements it.
    #[must_use]
    pub fn is_assignable_to(&self, declared: &RuntimeTypeRc) -> bool {
        match declared.flavor {
            TypeFlavor::String => matches!(self, Value::Str(_) | Value::Null),
            TypeFlavor::Class | TypeFlavor::Interface => match self {
                Value::Null => true,
                Value::Object(instance) => {
                    let runtime_type = instance.runtime_type();
                    superclass_chain(runtime_type).any(|t| t.token == declared.token)
                        || all_interfaces(runtime_type)
                            .iter()
                            .any(|i| i.token == declared.token)
                }
                _ => false,
            },
            primitive => self.flavor() == Some(primitive),
        }
    }

    /// Human readable description of the value's type, for diagnostics
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Object(instance) => instance.runtime_type().fullname(),
            other => other
                .flavor()
                .map(|flavor| flavor.to_string())
                .unwrap_or_default(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "'{v}'"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "\"{v}\""),
            Value::Object(instance) => write!(f, "{}@{}", instance.runtime_type().fullname(), instance.runtime_type().token),
        }
    }
}
