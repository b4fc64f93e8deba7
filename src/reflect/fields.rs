//! Convenience operations combining resolution and access.
//!
//! These are the entry points for callers that only have an instance and a
//! field name: each operation resolves the name against the instance's runtime
//! type (hierarchy-aware or declaring-type-only) and immediately performs the
//! read or write. A name that exists but was withheld for visibility surfaces
//! as [`crate::Error::AccessDenied`]; a name that is truly absent surfaces as
//! [`crate::Error::FieldNotFound`]. When resolution already forced the
//! descriptor open, the access step does not force it again.
//!
//! The ability is provided to break the scoping restrictions coded by the
//! host. This can allow fields to be changed that shouldn't be. This facility
//! should be used with care.

use crate::{
    metadata::typesystem::{superclass_chain, RuntimeTypeRc},
    reflect::{
        accessor::{read_field, write_field},
        resolver::{find_declared_field, find_field},
    },
    runtime::{instance::InstanceRc, value::Value},
    Result,
};

/// Read the named field of `target`, considering superclasses and interfaces.
///
/// # Errors
/// [`crate::Error::InvalidArgument`] for a blank name,
/// [`crate::Error::FieldNotFound`] if the name does not exist anywhere in the
/// hierarchy, [`crate::Error::AccessDenied`] if it exists but stayed closed
/// without `force_access`, [`crate::Error::AmbiguousMember`] from resolution.
pub fn read_field_by_name(target: &InstanceRc, name: &str, force_access: bool) -> Result<Value> {
    let runtime_type = target.runtime_type();
    match find_field(runtime_type, name, force_access)? {
        // already forced access above, don't repeat it here
        Some(field) => read_field(&field, Some(target), false),
        None => Err(hierarchy_miss(runtime_type, name)),
    }
}

/// Read the named field of `target`, considering only its runtime type.
///
/// # Errors
/// As [`read_field_by_name`], without the interface/ambiguity cases.
pub fn read_declared_field_by_name(
    target: &InstanceRc,
    name: &str,
    force_access: bool,
) -> Result<Value> {
    let runtime_type = target.runtime_type();
    match find_declared_field(runtime_type, name, force_access)? {
        Some(field) => read_field(&field, Some(target), false),
        None => Err(declared_miss(runtime_type, name)),
    }
}

/// Write the named field of `target`, considering superclasses and interfaces.
///
/// # Errors
/// As [`read_field_by_name`], plus [`crate::Error::TypeMismatch`] and
/// [`crate::Error::ImmutableField`] from the write path.
pub fn write_field_by_name(
    target: &InstanceRc,
    name: &str,
    value: Value,
    force_access: bool,
) -> Result<()> {
    let runtime_type = target.runtime_type();
    match find_field(runtime_type, name, force_access)? {
        // already forced access above, don't repeat it here
        Some(field) => write_field(&field, Some(target), value, false),
        None => Err(hierarchy_miss(runtime_type, name)),
    }
}

/// Write the named field of `target`, considering only its runtime type.
///
/// # Errors
/// As [`write_field_by_name`], without the interface/ambiguity cases.
pub fn write_declared_field_by_name(
    target: &InstanceRc,
    name: &str,
    value: Value,
    force_access: bool,
) -> Result<()> {
    let runtime_type = target.runtime_type();
    match find_declared_field(runtime_type, name, force_access)? {
        Some(field) => write_field(&field, Some(target), value, false),
        None => Err(declared_miss(runtime_type, name)),
    }
}

/// Classify an empty hierarchy lookup: a declaration that was passed over for
/// visibility reads as denied access, anything else as not found.
fn hierarchy_miss(runtime_type: &RuntimeTypeRc, name: &str) -> crate::Error {
    let withheld = superclass_chain(runtime_type).any(|level| level.declared_field(name).is_some());
    miss(runtime_type, name, withheld)
}

/// Classify an empty declaring-type-only lookup.
fn declared_miss(runtime_type: &RuntimeTypeRc, name: &str) -> crate::Error {
    miss(runtime_type, name, runtime_type.declared_field(name).is_some())
}

fn miss(runtime_type: &RuntimeTypeRc, name: &str, withheld: bool) -> crate::Error {
    if withheld {
        crate::Error::AccessDenied {
            field: name.to_string(),
        }
    } else {
        crate::Error::FieldNotFound {
            field: name.to_string(),
            type_name: runtime_type.fullname(),
        }
    }
}
