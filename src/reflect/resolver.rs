//! Field resolution across inheritance hierarchies.
//!
//! Two lookup algorithms turn a (type, name) pair into a field descriptor:
//!
//! - [`find_field`] walks the superclass chain most-derived first and falls
//!   back to the full transitive interface set,
//! - [`find_declared_field`] considers only fields declared directly on the
//!   queried type.
//!
//! Resolution never fabricates descriptors: every returned handle is declared
//! by some type in the walked hierarchy or interface set of the queried type.

use crate::{
    metadata::{
        field::FieldRc,
        typesystem::{all_interfaces, superclass_chain, RuntimeTypeRc},
    },
    Result,
};

/// Locate a field by name, considering superclasses and interfaces.
///
/// The superclass chain is walked most-derived first. A publicly visible
/// declaration wins immediately; a non-public one wins only with
/// `force_access` (and is opened before being returned), otherwise the walk
/// continues upward since a more visible field further up the chain may still
/// match. If the chain produces nothing, the full transitive interface set is
/// searched for a public declaration.
///
/// The interface scan is exhaustive rather than short-circuited: interface
/// fields cannot shadow each other the way class fields can, so a second
/// declaration of the name on an unrelated interface makes the hierarchy
/// position undecidable.
///
/// # Errors
/// [`crate::Error::InvalidArgument`] if the name is blank,
/// [`crate::Error::AmbiguousMember`] if the name matches on two or more
/// unrelated implemented interfaces.
pub fn find_field(ty: &RuntimeTypeRc, name: &str, force_access: bool) -> Result<Option<FieldRc>> {
    if name.trim().is_empty() {
        return Err(invalid_argument!("The field name must not be blank/empty"));
    }

    // check up the superclass hierarchy
    for level in superclass_chain(ty) {
        if let Some(field) = level.declared_field(name) {
            if !field.flags.is_public() {
                if force_access {
                    field.force_accessible();
                } else {
                    continue;
                }
            }
            return Ok(Some(field));
        }
    }

    // check the public interface case. This must be searched exhaustively,
    // in case the same name is declared on two or more unrelated interfaces.
    // The transitive set is deduplicated, so a declaration reachable through
    // several paths (diamond) still counts once.
    let mut matched: Option<FieldRc> = None;
    for interface in all_interfaces(ty) {
        let Some(field) = interface.declared_field(name) else {
            continue;
        };
        if !field.flags.is_public() {
            continue;
        }

        if matched.is_some() {
            return Err(crate::Error::AmbiguousMember {
                field: name.to_string(),
                relative_to: ty.fullname(),
            });
        }
        matched = Some(field);
    }

    Ok(matched)
}

/// Locate a field by name, considering only the given type.
///
/// No hierarchy walk, no interfaces. A field that exists but is not
/// accessible resolves to `None` when `force_access` is false; with
/// `force_access` it is opened and returned. Unlike [`find_field`] this
/// lookup is silent on visibility, since there is only ever one candidate.
///
/// # Errors
/// [`crate::Error::InvalidArgument`] if the name is blank.
pub fn find_declared_field(
    ty: &RuntimeTypeRc,
    name: &str,
    force_access: bool,
) -> Result<Option<FieldRc>> {
    if name.trim().is_empty() {
        return Err(invalid_argument!("The field name must not be blank/empty"));
    }

    let Some(field) = ty.declared_field(name) else {
        return Ok(None);
    };

    if !field.is_accessible() {
        if force_access {
            field.force_accessible();
        } else {
            return Ok(None);
        }
    }

    Ok(Some(field))
}
