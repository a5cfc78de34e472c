//! Safety boundary between variable-length application data and two sinks:
//! a parameterized query executor and a filesystem writer.
//!
//! - [`binder`] turns a runtime-sized list into an `IN (?, ...)` clause plus an
//!   ordered parameter array, and merges it with fixed parameters by position.
//! - [`guard`] proves a caller-supplied file name stays inside a trusted base
//!   directory before anything is written.
//!
//! Both are stateless and safe to call from any number of threads.

pub mod binder;
pub mod cli;
pub mod db;
pub mod guard;

pub use binder::{
    assemble, assemble_checked, build_clause, to_parameters, BindError, BindValue, BoundParameters,
    Clause, MembershipClause, PlaceholderStyle, QueryAssembly,
};
pub use guard::{authorize, ensure_no_parent_segments, BaseDirectory, GuardError, StoredFile};
