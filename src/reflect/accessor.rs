//! Read and write operations against resolved field descriptors.
//!
//! The accessor applies the accessibility-override policy and routes storage:
//! static fields live in the slot on their descriptor, instance fields in the
//! target instance. All failure modes are typed; see
//! [`crate::Error`] for the taxonomy.

use crate::{
    metadata::{field::FieldRc, typesystem::superclass_chain},
    runtime::{instance::InstanceRc, value::Value},
    Result,
};

/// Read the current value of `field`.
///
/// With `force_access`, a descriptor that is not currently accessible is
/// forced open first. Static fields ignore `target` and read the static
/// slot; instance fields require a target whose runtime type declares or
/// inherits the field.
///
/// # Errors
/// [`crate::Error::AccessDenied`] if the descriptor remains inaccessible,
/// [`crate::Error::InvalidArgument`] if `target` is absent for an instance
/// field or its type is unrelated to the declaring type.
pub fn read_field(field: &FieldRc, target: Option<&InstanceRc>, force_access: bool) -> Result<Value> {
    if force_access && !field.is_accessible() {
        field.force_accessible();
    }
    if !field.is_accessible() {
        return Err(crate::Error::AccessDenied {
            field: field.name.clone(),
        });
    }

    if field.flags.is_static() {
        return Ok(field
            .static_value()
            .unwrap_or_else(|| Value::default_of(field.field_type().flavor)));
    }

    let instance = require_target(field, target)?;
    Ok(instance.get_field_value(field))
}

/// Write `value` into `field`.
///
/// Accessibility handling matches [`read_field`]. The value's runtime type
/// must be assignable to the field's declared type. Final fields reject
/// mutation unless they are instance fields whose accessibility override is
/// active (either forced open earlier or forced by this call); final static
/// fields never unlock.
///
/// # Errors
/// [`crate::Error::AccessDenied`], [`crate::Error::InvalidArgument`] as for
/// [`read_field`]; [`crate::Error::TypeMismatch`] if `value` is not
/// assignable; [`crate::Error::ImmutableField`] on final-field mutation.
pub fn write_field(
    field: &FieldRc,
    target: Option<&InstanceRc>,
    value: Value,
    force_access: bool,
) -> Result<()> {
    if force_access && !field.is_accessible() {
        field.force_accessible();
    }
    if !field.is_accessible() {
        return Err(crate::Error::AccessDenied {
            field: field.name.clone(),
        });
    }

    if field.flags.is_final() {
        let unlocked = !field.flags.is_static() && (force_access || field.override_active());
        if !unlocked {
            return Err(crate::Error::ImmutableField {
                field: field.name.clone(),
            });
        }
    }

    let declared = field.field_type();
    if !value.is_assignable_to(&declared) {
        return Err(crate::Error::TypeMismatch {
            expected: declared.fullname(),
            found: value.type_name(),
        });
    }

    if field.flags.is_static() {
        field.set_static_value(value);
        return Ok(());
    }

    let instance = require_target(field, target)?;
    instance.set_field_value(field, value);
    Ok(())
}

/// Validate the target of an instance-scoped access: present, and of a type
/// that declares or inherits the field.
fn require_target<'a>(field: &FieldRc, target: Option<&'a InstanceRc>) -> Result<&'a InstanceRc> {
    let Some(instance) = target else {
        return Err(invalid_argument!(
            "target object must not be absent for instance field {}",
            field.name
        ));
    };

    let declaring = field.declaring();
    if !superclass_chain(instance.runtime_type()).any(|t| t.token == declaring.token) {
        return Err(invalid_argument!(
            "target of type {} does not declare or inherit field {}.{}",
            instance.runtime_type().fullname(),
            declaring.fullname(),
            field.name
        ));
    }

    Ok(instance)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        metadata::{
            field::FieldModifiers,
            typesystem::{TypeBuilder, TypeFlavor, TypeRegistry, RuntimeTypeRc},
        },
        runtime::instance::Instance,
    };

    fn registry() -> Arc<TypeRegistry> {
        Arc::new(TypeRegistry::new())
    }

    fn holder_with(
        registry: &Arc<TypeRegistry>,
        name: &str,
        flags: FieldModifiers,
    ) -> RuntimeTypeRc {
        let i4 = registry.primitive(TypeFlavor::I4).unwrap();
        TypeBuilder::new(registry.clone())
            .namespace("Demo")
            .name("Holder")
            .class()
            .field(name, &i4, flags)
            .build()
            .unwrap()
    }

    #[test]
    fn test_read_write_public_instance_field() {
        let registry = registry();
        let holder = holder_with(&registry, "count", FieldModifiers::PUBLIC);
        let field = holder.declared_field("count").unwrap();
        let instance = Instance::new(&holder).unwrap();

        assert!(matches!(
            read_field(&field, Some(&instance), false).unwrap(),
            Value::I32(0)
        ));
        write_field(&field, Some(&instance), Value::I32(41), false).unwrap();
        assert!(matches!(
            read_field(&field, Some(&instance), false).unwrap(),
            Value::I32(41)
        ));
    }

    #[test]
    fn test_private_field_denied_without_force() {
        let registry = registry();
        let holder = holder_with(&registry, "secret", FieldModifiers::PRIVATE);
        let field = holder.declared_field("secret").unwrap();
        let instance = Instance::new(&holder).unwrap();

        assert!(matches!(
            read_field(&field, Some(&instance), false),
            Err(crate::Error::AccessDenied { .. })
        ));
        assert!(matches!(
            write_field(&field, Some(&instance), Value::I32(1), false),
            Err(crate::Error::AccessDenied { .. })
        ));

        // forcing opens the descriptor; subsequent non-forced access succeeds
        assert!(matches!(
            read_field(&field, Some(&instance), true).unwrap(),
            Value::I32(0)
        ));
        assert!(matches!(
            read_field(&field, Some(&instance), false).unwrap(),
            Value::I32(0)
        ));
    }

    #[test]
    fn test_static_field_ignores_target() {
        let registry = registry();
        let holder = holder_with(
            &registry,
            "counter",
            FieldModifiers::PUBLIC | FieldModifiers::STATIC,
        );
        let field = holder.declared_field("counter").unwrap();
        let instance = Instance::new(&holder).unwrap();

        write_field(&field, None, Value::I32(9), false).unwrap();
        assert!(matches!(read_field(&field, None, false).unwrap(), Value::I32(9)));
        // the static slot shines through regardless of the target
        assert!(matches!(
            read_field(&field, Some(&instance), false).unwrap(),
            Value::I32(9)
        ));
    }

    #[test]
    fn test_instance_field_requires_target() {
        let registry = registry();
        let holder = holder_with(&registry, "count", FieldModifiers::PUBLIC);
        let field = holder.declared_field("count").unwrap();

        assert!(matches!(
            read_field(&field, None, false),
            Err(crate::Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            write_field(&field, None, Value::I32(1), false),
            Err(crate::Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_unrelated_target_is_rejected() {
        let registry = registry();
        let holder = holder_with(&registry, "count", FieldModifiers::PUBLIC);
        let field = holder.declared_field("count").unwrap();

        let other = TypeBuilder::new(registry.clone())
            .namespace("Demo")
            .name("Other")
            .class()
            .build()
            .unwrap();
        let stranger = Instance::new(&other).unwrap();

        assert!(matches!(
            read_field(&field, Some(&stranger), false),
            Err(crate::Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_subclass_target_is_accepted() {
        let registry = registry();
        let i4 = registry.primitive(TypeFlavor::I4).unwrap();
        let base = TypeBuilder::new(registry.clone())
            .namespace("Demo")
            .name("Base")
            .class()
            .field("x", &i4, FieldModifiers::PUBLIC)
            .build()
            .unwrap();
        let derived = TypeBuilder::new(registry.clone())
            .namespace("Demo")
            .name("Derived")
            .class()
            .extends(&base)
            .build()
            .unwrap();

        let field = base.declared_field("x").unwrap();
        let instance = Instance::new(&derived).unwrap();

        write_field(&field, Some(&instance), Value::I32(5), false).unwrap();
        assert!(matches!(
            read_field(&field, Some(&instance), false).unwrap(),
            Value::I32(5)
        ));
    }

    #[test]
    fn test_type_mismatch_is_rejected() {
        let registry = registry();
        let holder = holder_with(&registry, "count", FieldModifiers::PUBLIC);
        let field = holder.declared_field("count").unwrap();
        let instance = Instance::new(&holder).unwrap();

        assert!(matches!(
            write_field(&field, Some(&instance), Value::Str("no".to_string()), false),
            Err(crate::Error::TypeMismatch { .. })
        ));
        assert!(matches!(
            write_field(&field, Some(&instance), Value::Null, false),
            Err(crate::Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_final_instance_field_unlocks_with_force() {
        let registry = registry();
        let holder = holder_with(
            &registry,
            "id",
            FieldModifiers::PUBLIC | FieldModifiers::INIT_ONLY,
        );
        let field = holder.declared_field("id").unwrap();
        let instance = Instance::new(&holder).unwrap();

        assert!(matches!(
            write_field(&field, Some(&instance), Value::I32(1), false),
            Err(crate::Error::ImmutableField { .. })
        ));
        write_field(&field, Some(&instance), Value::I32(1), true).unwrap();
        assert!(matches!(
            read_field(&field, Some(&instance), false).unwrap(),
            Value::I32(1)
        ));
    }

    #[test]
    fn test_final_static_field_never_unlocks() {
        let registry = registry();
        let holder = holder_with(
            &registry,
            "LIMIT",
            FieldModifiers::PUBLIC | FieldModifiers::STATIC | FieldModifiers::INIT_ONLY,
        );
        let field = holder.declared_field("LIMIT").unwrap();

        assert!(matches!(
            write_field(&field, None, Value::I32(10), false),
            Err(crate::Error::ImmutableField { .. })
        ));
        assert!(matches!(
            write_field(&field, None, Value::I32(10), true),
            Err(crate::Error::ImmutableField { .. })
        ));
        // reads still work
        assert!(matches!(read_field(&field, None, false).unwrap(), Value::I32(0)));
    }
}
