//! Reflective field access: resolution, accessibility override, read/write.
//!
//! This is the core of the crate. [`resolver`] turns a (type, name) pair into
//! a field descriptor, [`accessor`] performs reads and writes against a
//! resolved descriptor, and [`fields`] combines both for callers that only
//! have an instance and a name.
//!
//! # Search Modes
//!
//! - **Hierarchy lookup** ([`find_field`]): superclasses most-derived first,
//!   then the full transitive interface set with ambiguity detection.
//! - **Declaring-type-only lookup** ([`find_declared_field`]): exactly the
//!   queried type, silent on visibility mismatches.
//!
//! # Force Access
//!
//! Every operation takes a `force_access` flag. When set, non-public fields
//! encountered by the search are forced open through the descriptor's
//! accessibility policy and participate in resolution; without it they are
//! passed over (hierarchy lookup) or withheld (declaring-type-only lookup).

pub mod accessor;
pub mod fields;
pub mod resolver;

pub use accessor::{read_field, write_field};
pub use fields::{
    read_declared_field_by_name, read_field_by_name, write_declared_field_by_name,
    write_field_by_name,
};
pub use resolver::{find_declared_field, find_field};
