//! Runtime type metadata: tokens, type descriptors and field descriptors.
//!
//! Everything in this module is owned by a
//! [`TypeRegistry`](crate::metadata::typesystem::TypeRegistry) and read-only
//! after registration, apart from the per-field accessibility flag described
//! in [`field`].

pub mod field;
pub mod token;
pub mod typesystem;
