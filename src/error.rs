use thiserror::Error;

use crate::metadata::token::Token;

macro_rules! invalid_argument {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidArgument {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidArgument {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all failure modes of field resolution, accessibility handling and
/// read/write operations, as well as the type-registry operations that back them. Each
/// variant provides specific context about the failure mode to enable appropriate error
/// handling.
///
/// # Error Categories
///
/// ## Caller Bugs
/// - [`Error::InvalidArgument`] - Blank or absent input; never recovered
///
/// ## Resolution Errors
/// - [`Error::FieldNotFound`] - Name does not resolve under the requested search mode
/// - [`Error::AmbiguousMember`] - Name resolves to two or more unrelated interface fields
///
/// ## Access Errors
/// - [`Error::AccessDenied`] - Field inaccessible and no override requested
/// - [`Error::TypeMismatch`] - Value not assignable to the field's declared type
/// - [`Error::ImmutableField`] - Attempted mutation of a final field
///
/// ## Type System Errors
/// - [`Error::TypeInsert`] - Failed to register a new type in the registry
/// - [`Error::TypeNotFound`] - Requested type not found in the registry
/// - [`Error::TypeError`] - General type system operation error
///
/// All errors are deterministic given the same inputs: retrying without changing
/// inputs or state never helps.
///
/// # Examples
///
/// ```rust,no_run
/// use fieldscope::{Error, prelude::*};
/// # fn example(derived: RuntimeTypeRc) {
/// match find_field(&derived, "balance", false) {
///     Ok(Some(field)) => println!("resolved {}", field.name),
///     Ok(None) => println!("no such field"),
///     Err(Error::AmbiguousMember { field, relative_to }) => {
///         eprintln!("field {} is ambiguous relative to {}", field, relative_to);
///     }
///     Err(e) => eprintln!("resolution failed: {}", e),
/// }
/// # }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// An argument violated a precondition of the operation.
    ///
    /// Raised for blank field names and for an absent target instance on an
    /// instance-scoped operation. This is always a caller bug; the error
    /// includes the source location where the validation failed.
    ///
    /// # Fields
    ///
    /// * `message` - Description of the violated precondition
    /// * `file` - Source file where the validation failed
    /// * `line` - Source line where the validation failed
    #[error("Invalid argument - {file}:{line}: {message}")]
    InvalidArgument {
        /// The message to be printed for the invalid argument
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The named field could not be located under the requested search mode.
    ///
    /// Returned by the facade operations when resolution comes back empty,
    /// either for the hierarchy search or the declaring-type-only search.
    #[error("Cannot locate field {field} on {type_name}")]
    FieldNotFound {
        /// Name of the field that failed to resolve
        field: String,
        /// Full name of the type the search started from
        type_name: String,
    },

    /// The field name matched on two or more unrelated implemented interfaces.
    ///
    /// The hierarchy position is undecidable: the superclass chain produced no
    /// match and the transitive interface set contains two or more distinct
    /// declarations of the same name.
    #[error("Reference to field {field} is ambiguous relative to {relative_to}; a matching field exists on two or more implemented interfaces")]
    AmbiguousMember {
        /// Name of the ambiguous field
        field: String,
        /// Full name of the type the search started from
        relative_to: String,
    },

    /// The field is not accessible and no override was requested.
    ///
    /// Non-public fields stay closed unless `force_access` opened them
    /// through the accessibility policy.
    #[error("Field {field} is not accessible")]
    AccessDenied {
        /// Name of the inaccessible field
        field: String,
    },

    /// The value's runtime type is not assignable to the field's declared type.
    #[error("Value of type {found} is not assignable to field of type {expected}")]
    TypeMismatch {
        /// Full name of the field's declared type
        expected: String,
        /// Flavor name of the rejected value
        found: String,
    },

    /// Attempted mutation of a final field.
    ///
    /// Final instance fields unlock when their accessibility has been forced
    /// open; final static fields never do.
    #[error("Field {field} is final and cannot be written")]
    ImmutableField {
        /// Name of the final field
        field: String,
    },

    /// Failed to insert a new type into the `TypeRegistry`.
    ///
    /// The associated [`Token`] identifies which type caused the failure,
    /// typically a duplicate registration.
    #[error("Failed to insert new type into TypeRegistry - {0}")]
    TypeInsert(Token),

    /// Failed to find a type in the `TypeRegistry`.
    ///
    /// The associated [`Token`] identifies which type was not found.
    #[error("Failed to find type in TypeRegistry - {0}")]
    TypeNotFound(Token),

    /// General error during type system usage.
    ///
    /// Covers type construction and registration operations that can fail,
    /// such as declaring a base type twice or building an incomplete type.
    #[error("{0}")]
    TypeError(String),
}
