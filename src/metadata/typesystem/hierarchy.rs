//! Hierarchy enumeration for runtime types.
//!
//! Two walks back field resolution: [`superclass_chain`] enumerates a type and
//! its bases most-derived first, and [`all_interfaces`] computes the full
//! transitive interface set of a type. Both are read-only, reentrant-safe and
//! never allocate registry state; they are the narrow collaborator contract
//! the resolver builds on.

use std::collections::HashSet;

use crate::metadata::{
    token::Token,
    typesystem::{RuntimeTypeRc, RuntimeTypeRef},
};

/// Iterator over a type's superclass chain, starting at the type itself.
///
/// Ends when a type without a base is reached, or when a base reference can
/// no longer be upgraded because its registry was dropped.
pub struct SuperclassChain {
    current: Option<RuntimeTypeRc>,
}

impl Iterator for SuperclassChain {
    type Item = RuntimeTypeRc;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        self.current = current.base();
        Some(current)
    }
}

/// Enumerate `ty` and each of its superclasses, most-derived first.
pub fn superclass_chain(ty: &RuntimeTypeRc) -> SuperclassChain {
    SuperclassChain {
        current: Some(ty.clone()),
    }
}

/// Compute the full transitive set of interfaces implemented by `ty`.
///
/// Covers the direct interfaces of every type in the superclass chain and,
/// recursively, their super-interfaces. The result is deduplicated by token
/// and preserves discovery order. Starting from an interface yields its
/// super-interface closure.
#[must_use]
pub fn all_interfaces(ty: &RuntimeTypeRc) -> Vec<RuntimeTypeRc> {
    let mut seen: HashSet<Token> = HashSet::new();
    let mut found = Vec::new();

    for cls in superclass_chain(ty) {
        for (_, interface_ref) in cls.interfaces.iter() {
            collect_interface(interface_ref, &mut seen, &mut found);
        }
    }

    found
}

/// Push one interface and its super-interfaces, skipping already-seen tokens.
fn collect_interface(
    interface_ref: &RuntimeTypeRef,
    seen: &mut HashSet<Token>,
    found: &mut Vec<RuntimeTypeRc>,
) {
    let Some(interface) = interface_ref.upgrade() else {
        return;
    };

    if !seen.insert(interface.token) {
        return;
    }

    found.push(interface.clone());
    for (_, super_ref) in interface.interfaces.iter() {
        collect_interface(super_ref, seen, found);
    }
}
