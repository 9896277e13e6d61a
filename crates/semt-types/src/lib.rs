//! Core type representations for the lambda-calculus semantic type system.
//!
//! This crate provides the pure data side of the engine:
//! - `ty` - the four type families: atomic categories, list types,
//!   complex (function) types, and type variables
//! - `env` - type environments binding variables to their current meaning
//! - `hygiene` - consistent renaming for reused sub-derivations
//! - `error` - the shared error taxonomy
//!
//! # Design Principles
//!
//! - **No silent failures**: registry/environment misuse is a typed error;
//!   only unification and subtype *outcomes* are plain booleans
//! - **Meaning lives in the environment**: a variable stores an id and a
//!   display name, never its own resolution
//! - **Explicit context**: every operation that reads a variable's meaning
//!   takes the environment as an argument; there is no global state
//!
//! # Example
//!
//! ```rust
//! use semt_types::{AtomicCategory, Type, TypeEnvironment, TypeVariable};
//!
//! // Build <e,t>, the determiner type.
//! let e = Type::atomic(AtomicCategory::new("e"));
//! let t = Type::atomic(AtomicCategory::new("t"));
//! let det = Type::complex(e.clone(), t);
//! assert_eq!(det.to_string(), "<e,t>");
//!
//! // Bind a variable to e and resolve it.
//! let var = TypeVariable::new(0, "F");
//! let mut env = TypeEnvironment::new();
//! env.bind_category(var.clone(), AtomicCategory::new("e"));
//! assert_eq!(env.resolve(&var), Ok(e));
//! ```

pub mod env;
pub mod error;
pub mod hygiene;
pub mod ty;

// Re-export main types
pub use env::{Binding, TypeEnvironment};
pub use error::{TypeError, TypeResult};
pub use hygiene::{duplicate_type, RenameTable, VariableSource};
pub use ty::{AtomicCategory, ComplexType, ListType, Type, TypeVariable, VarId};
