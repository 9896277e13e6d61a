//! Error taxonomy for the semantic type system.
//!
//! Failed unification and failed subtype checks are *values* (`false`),
//! not errors; callers use them to try alternative derivations. The
//! variants here cover misuse of the registry and environment, which is
//! not recovered from.

use crate::ty::VarId;
use thiserror::Error;

/// Errors raised by the registry, hierarchy, and environment operations.
#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
pub enum TypeError {
    /// Hierarchy setup called with a non-atomic argument.
    #[error("subtype registration requires atomic categories, got {found}")]
    NonAtomicSubtype {
        /// Rendering of the offending type expression
        found: String,
    },

    /// A category was given a second, distinct parent.
    ///
    /// The hierarchy is a tree; the incremental closure maintenance is
    /// only correct under that constraint, so a second parent is rejected
    /// instead of silently producing an inconsistent closure.
    #[error("category {child} already has parent {existing}, cannot attach under {requested}")]
    ConflictingParent {
        child: String,
        existing: String,
        requested: String,
    },

    /// An edge that would make a category its own ancestor.
    #[error("registering {child} under {parent} would create a cycle")]
    CyclicHierarchy { parent: String, child: String },

    /// The variable-id counter would pass its configured ceiling.
    #[error("type variable pool exhausted: ceiling is {ceiling}")]
    CapacityExceeded { ceiling: VarId },

    /// Two environments being merged bind the same variable id(s).
    ///
    /// Merge is only valid across independently-allocated variable
    /// spaces, e.g. two sibling sub-derivations.
    #[error("environments collide on variable id(s) {ids:?}")]
    MergeCollision { ids: Vec<VarId> },

    /// A variable was resolved against an environment that does not bind it.
    #[error("unbound type variable {var}")]
    UnboundVariable { var: String },
}

/// Result type for registry and environment operations.
pub type TypeResult<T> = Result<T, TypeError>;
