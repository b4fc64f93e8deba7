// Copyright 2026 The fieldscope authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # fieldscope
//!
//! A hierarchy-aware reflective field access library for in-process runtime
//! type models. Given a runtime type descriptor and a field name, `fieldscope`
//! locates the field across the type's inheritance hierarchy and implemented
//! interfaces, optionally overrides normal accessibility restrictions, and
//! performs type-safe read/write operations on instances.
//!
//! ## Features
//!
//! - **Hierarchy-aware resolution** - Superclass chains searched most-derived
//!   first, interface fallback with ambiguity detection
//! - **Accessibility override** - Explicit, idempotent force-access bypassing
//!   visibility restrictions, monotonic per descriptor
//! - **Type-safe access** - Assignability checking on writes, final-field
//!   protection, static and instance storage routing
//! - **Thread safe** - Lock-free registries and atomic accessibility state;
//!   every operation is synchronous and reentrant
//!
//! ## Quick Start
//!
//! Add `fieldscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! fieldscope = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust
//! use std::sync::Arc;
//! use fieldscope::prelude::*;
//!
//! // Describe the hierarchy once, at host setup time
//! let registry = Arc::new(TypeRegistry::new());
//! let i4 = registry.primitive(TypeFlavor::I4)?;
//!
//! let base = TypeBuilder::new(registry.clone())
//!     .namespace("Bank")
//!     .name("Account")
//!     .class()
//!     .field("balance", &i4, FieldModifiers::PRIVATE)
//!     .build()?;
//! let derived = TypeBuilder::new(registry.clone())
//!     .namespace("Bank")
//!     .name("SavingsAccount")
//!     .class()
//!     .extends(&base)
//!     .build()?;
//!
//! // Reflective access against an instance
//! let account = Instance::new(&derived)?;
//! assert!(read_field_by_name(&account, "balance", false).is_err());
//! write_field_by_name(&account, "balance", Value::I32(250), true)?;
//! assert!(matches!(read_field_by_name(&account, "balance", true)?, Value::I32(250)));
//! # Ok::<(), fieldscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `fieldscope` is organized into three layers:
//!
//! - [`metadata`] - The runtime type model: tokens, the type registry and
//!   builder, type descriptors with superclass/interface links, and field
//!   descriptors carrying modifier flags and the accessibility policy
//! - [`runtime`] - Values and heap instances targeted by field access
//! - [`reflect`] - The resolution and access core: hierarchy lookup,
//!   declaring-type-only lookup, descriptor-level read/write, and the
//!   by-name convenience operations
//!
//! ## Scope Breaking
//!
//! Every operation takes a `force_access` flag that breaks the visibility
//! restrictions declared by the host. This can allow fields to be changed
//! that shouldn't be; the facility should be used with care. Forcing is the
//! only path by which non-public fields become accessible, and the override
//! is permanent for the descriptor's lifetime.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result) with typed failures:
//!
//! ```rust
//! use fieldscope::Error;
//!
//! # fn handle(result: fieldscope::Result<fieldscope::prelude::Value>) {
//! match result {
//!     Ok(value) => println!("read {}", value),
//!     Err(Error::FieldNotFound { field, type_name }) => {
//!         eprintln!("no field {} on {}", field, type_name);
//!     }
//!     Err(Error::AccessDenied { field }) => eprintln!("{} is not accessible", field),
//!     Err(e) => eprintln!("access failed: {}", e),
//! }
//! # }
//! ```
//!
//! Failures are deterministic: retrying an operation without changing inputs
//! or state never helps.
#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and functions.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use fieldscope::prelude::*;
///
/// let registry = Arc::new(TypeRegistry::new());
/// assert!(registry.get_by_fullname("System.Int32").is_some());
/// ```
pub mod prelude;

/// Runtime type metadata: tokens, the type system and field descriptors.
///
/// # Key Types
///
/// - [`metadata::typesystem::TypeRegistry`] - Owns all runtime types
/// - [`metadata::typesystem::TypeBuilder`] - Fluent type construction
/// - [`metadata::typesystem::RuntimeType`] - Type descriptor with hierarchy links
/// - [`metadata::field::FieldDescriptor`] - Field handle with accessibility policy
/// - [`metadata::token::Token`] - Identity of types and fields
pub mod metadata;

/// The field resolution and access core.
///
/// # Key Functions
///
/// - [`reflect::find_field`] - Hierarchy-aware lookup
/// - [`reflect::find_declared_field`] - Declaring-type-only lookup
/// - [`reflect::read_field`] / [`reflect::write_field`] - Access by descriptor
/// - [`reflect::read_field_by_name`] and friends - Access by instance and name
pub mod reflect;

/// Runtime values and heap instances.
///
/// # Key Types
///
/// - [`runtime::value::Value`] - Everything a field can hold
/// - [`runtime::instance::Instance`] - Target of instance-scoped access
pub mod runtime;

/// `fieldscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is
/// always [`Error`]. This is used consistently throughout the crate for all
/// fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `fieldscope` Error type
///
/// The main error type for all operations in this crate. See the
/// [taxonomy](Error) for resolution, accessibility and type-system failure
/// modes.
pub use error::Error;
