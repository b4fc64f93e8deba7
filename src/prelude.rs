//! # fieldscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! and functions, allowing for convenient glob imports.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use fieldscope::prelude::*;
//!
//! let registry = Arc::new(TypeRegistry::new());
//! let i4 = registry.primitive(TypeFlavor::I4)?;
//!
//! let holder = TypeBuilder::new(registry.clone())
//!     .namespace("Demo")
//!     .name("Holder")
//!     .class()
//!     .field("count", &i4, FieldModifiers::PUBLIC)
//!     .build()?;
//!
//! let instance = Instance::new(&holder)?;
//! write_field_by_name(&instance, "count", Value::I32(7), false)?;
//! assert!(matches!(read_field_by_name(&instance, "count", false)?, Value::I32(7)));
//! # Ok::<(), fieldscope::Error>(())
//! ```

pub use crate::{
    metadata::{
        field::{FieldDescriptor, FieldModifiers, FieldRc},
        token::Token,
        typesystem::{
            all_interfaces, superclass_chain, RuntimeType, RuntimeTypeRc, RuntimeTypeRef,
            SuperclassChain, TypeBuilder, TypeFlavor, TypeRegistry,
        },
    },
    reflect::{
        find_declared_field, find_field, read_declared_field_by_name, read_field,
        read_field_by_name, write_declared_field_by_name, write_field, write_field_by_name,
    },
    runtime::{
        instance::{Instance, InstanceRc},
        value::Value,
    },
    Error, Result,
};
