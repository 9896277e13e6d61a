//! Registry and decision procedures for the lambda-calculus semantic
//! type system.
//!
//! This crate provides the stateful side of the engine:
//! - `hierarchy` - the category tree with its cached transitive closure
//! - `registry` - interning, variable-id pooling, and session reset
//! - `unify` - the subtype relation, unification, and the applicability
//!   check used by an external evaluator
//!
//! # Design Principles
//!
//! - **Explicit environments**: unification and subtype checks take the
//!   binding context as an argument; nothing reads ambient global state,
//!   so independent derivations each carry their own environment
//! - **Deterministic reclamation**: variable ids return to the pool only
//!   through `release_variable`, never through drop timing
//! - **Failure is a value**: `is_subtype`, `unify`, and `is_reducible`
//!   answer with `bool`; errors are reserved for registry misuse
//!
//! # Example
//!
//! ```rust
//! use semt_registry::TypeRegistry;
//! use semt_types::{Type, TypeEnvironment};
//!
//! let mut reg = TypeRegistry::new();
//! let e = Type::atomic(reg.intern_atomic("e"));
//! let t = Type::atomic(reg.intern_atomic("t"));
//! let det = reg.make_complex(e.clone(), t);
//!
//! // A fresh variable unifies under `e`, then DET applies to it.
//! let mut env = TypeEnvironment::new();
//! let var = reg.allocate_variable(None).expect("fresh variable");
//! assert!(reg.unify(&e, &Type::var(var.clone()), &mut env));
//! assert!(reg.is_reducible(&det, &Type::var(var), &mut env));
//! ```

pub mod hierarchy;
pub mod registry;
pub mod unify;

// Re-export main types
pub use hierarchy::CategoryHierarchy;
pub use registry::{TypeRegistry, DEFAULT_VARIABLE_CEILING};
