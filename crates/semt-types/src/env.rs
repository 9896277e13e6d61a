//! Type environments: binding contexts for type variables.
//!
//! A `TypeEnvironment` maps type variables to their currently-known
//! meaning: an atomic category, or another variable (an alias). A
//! variable's meaning is *only* ever stored here, never on the variable
//! itself, so equality and subtype checks on variables are always made
//! against an explicitly supplied environment.
//!
//! Environments from independently-allocated variable spaces (two sibling
//! sub-derivations) can be merged; environments sharing variables with a
//! type expression are duplicated together through one `RenameTable`.

use crate::error::{TypeError, TypeResult};
use crate::hygiene::{RenameTable, VariableSource};
use crate::ty::{AtomicCategory, Type, TypeVariable, VarId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

/// The currently-known meaning of a type variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Bound to an atomic category.
    Category(AtomicCategory),
    /// Aliased to another variable.
    Variable(TypeVariable),
}

impl Binding {
    /// View this binding as a type expression.
    #[must_use]
    pub fn to_type(&self) -> Type {
        match self {
            Binding::Category(c) => Type::Atomic(c.clone()),
            Binding::Variable(v) => Type::Var(v.clone()),
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Category(c) => write!(f, "{c}"),
            Binding::Variable(v) => write!(f, "{v}"),
        }
    }
}

/// A binding context mapping type variables to their current meaning.
///
/// Keys are compared by variable id; the display name plays no role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeEnvironment {
    bindings: FxHashMap<TypeVariable, Binding>,
}

impl TypeEnvironment {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bound variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if no variable is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Check if the environment binds the given variable.
    #[must_use]
    pub fn contains(&self, var: &TypeVariable) -> bool {
        self.bindings.contains_key(var)
    }

    /// Bind a variable to an atomic category, replacing any prior binding.
    pub fn bind_category(&mut self, var: TypeVariable, category: AtomicCategory) {
        self.bindings.insert(var, Binding::Category(category));
    }

    /// Alias a variable to another variable, replacing any prior binding.
    ///
    /// A self-alias is dropped; it carries no information and would make
    /// resolution cyclic.
    pub fn bind_variable(&mut self, var: TypeVariable, target: TypeVariable) {
        if var == target {
            return;
        }
        self.bindings.insert(var, Binding::Variable(target));
    }

    /// Look up the direct binding of a variable, without following aliases.
    #[must_use]
    pub fn lookup(&self, var: &TypeVariable) -> Option<&Binding> {
        self.bindings.get(var)
    }

    /// Resolve a variable to its current meaning, following alias chains.
    ///
    /// A chain ending at an atomic category resolves to that category; a
    /// chain ending at an unbound variable resolves to that terminal
    /// variable. Resolving a variable the environment does not bind at
    /// all is an error.
    ///
    /// # Errors
    ///
    /// `TypeError::UnboundVariable` if `var` has no entry.
    pub fn resolve(&self, var: &TypeVariable) -> TypeResult<Type> {
        let mut current = match self.bindings.get(var) {
            Some(binding) => binding,
            None => {
                return Err(TypeError::UnboundVariable {
                    var: var.to_string(),
                })
            }
        };

        let mut seen: FxHashSet<VarId> = FxHashSet::default();
        seen.insert(var.id());

        loop {
            match current {
                Binding::Category(c) => return Ok(Type::Atomic(c.clone())),
                Binding::Variable(v) => {
                    if !seen.insert(v.id()) {
                        // Alias cycle; treat the variable as the meaning.
                        return Ok(Type::Var(v.clone()));
                    }
                    match self.bindings.get(v) {
                        Some(next) => current = next,
                        None => return Ok(Type::Var(v.clone())),
                    }
                }
            }
        }
    }

    /// Iterate over the bindings in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&TypeVariable, &Binding)> {
        self.bindings.iter()
    }

    /// Duplicate this environment, renaming every key variable.
    ///
    /// Renaming follows the shared rule in `RenameTable`: a key already in
    /// the table maps to its recorded fresh variable, otherwise a fresh
    /// variable with the same display name is allocated and recorded.
    /// Callers duplicating a type expression and its co-occurring
    /// environment MUST pass the same table to both calls, so a variable
    /// shared between the two is renamed identically in both outputs.
    ///
    /// # Errors
    ///
    /// Propagates allocation failure from the variable source.
    pub fn duplicate(
        &self,
        source: &mut impl VariableSource,
        table: &mut RenameTable,
    ) -> TypeResult<TypeEnvironment> {
        let mut fresh = TypeEnvironment::new();
        for (var, binding) in &self.bindings {
            let renamed = table.fresh_for(var, source)?;
            fresh.bindings.insert(renamed, binding.clone());
        }
        Ok(fresh)
    }

    /// Merge two environments into their union.
    ///
    /// Valid only across independently-allocated variable spaces: if any
    /// variable id is bound in both environments the merge fails, even
    /// when the two bindings agree.
    ///
    /// # Errors
    ///
    /// `TypeError::MergeCollision` listing the overlapping ids.
    pub fn merge(&self, other: &TypeEnvironment) -> TypeResult<TypeEnvironment> {
        let mut collisions: Vec<VarId> = self
            .bindings
            .keys()
            .filter(|var| other.bindings.contains_key(*var))
            .map(TypeVariable::id)
            .collect();

        if !collisions.is_empty() {
            collisions.sort_unstable();
            return Err(TypeError::MergeCollision { ids: collisions });
        }

        let mut merged = self.clone();
        for (var, binding) in &other.bindings {
            merged.bindings.insert(var.clone(), binding.clone());
        }
        Ok(merged)
    }
}

impl fmt::Display for TypeEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut entries: Vec<_> = self.bindings.iter().collect();
        entries.sort_by_key(|(var, _)| var.id());
        for (i, (var, binding)) in entries.into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{var} := {binding}")?;
        }
        write!(f, "}}")
    }
}
