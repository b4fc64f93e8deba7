//! Runtime values and heap instances.
//!
//! This module provides the object side of the runtime type model:
//! [`Value`](crate::runtime::value::Value) covers everything a field can hold,
//! and [`Instance`](crate::runtime::instance::Instance) is the opaque target of
//! instance-scoped read/write operations. Static fields have no instance; their
//! storage lives on the field descriptor itself.

pub mod instance;
pub mod value;
