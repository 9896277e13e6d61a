//! The type registry: the long-lived store behind a parsing session.
//!
//! The registry owns:
//! - interning caches for atomic categories and list types (one instance
//!   per name for the registry's lifetime)
//! - the variable-id pool: a recyclable free list plus a monotonic
//!   counter bounded by a configured ceiling
//! - the category hierarchy with its transitive-closure cache
//!
//! Variable-id reclamation is explicit: `release_variable` consumes the
//! handle and returns its id to the free pool for a later allocation.
//! The registry is synchronous and single-threaded; callers sharing one
//! across tasks must wrap it in an exclusive lock.

use crate::hierarchy::CategoryHierarchy;
use rustc_hash::FxHashMap;
use semt_types::{
    duplicate_type, AtomicCategory, ListType, RenameTable, Type, TypeEnvironment, TypeError,
    TypeResult, TypeVariable, VarId, VariableSource,
};
use smol_str::SmolStr;

/// Default ceiling for the variable-id counter.
pub const DEFAULT_VARIABLE_CEILING: VarId = 1 << 20;

/// The process-wide manager for a type-checking session.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    /// Interned atomic categories, one per name.
    atoms: FxHashMap<SmolStr, AtomicCategory>,
    /// Interned list types, one per element name.
    lists: FxHashMap<SmolStr, ListType>,
    /// Ids returned by released variables, reused before the counter.
    free_ids: Vec<VarId>,
    /// Next id the monotonic counter would hand out.
    next_id: VarId,
    /// Ceiling the counter must not pass.
    ceiling: VarId,
    /// The category tree and its closure cache.
    hierarchy: CategoryHierarchy,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a registry with the default variable ceiling.
    #[must_use]
    pub fn new() -> Self {
        Self::with_variable_ceiling(DEFAULT_VARIABLE_CEILING)
    }

    /// Create a registry with an explicit variable ceiling.
    #[must_use]
    pub fn with_variable_ceiling(ceiling: VarId) -> Self {
        Self {
            atoms: FxHashMap::default(),
            lists: FxHashMap::default(),
            free_ids: Vec::new(),
            next_id: 0,
            ceiling,
            hierarchy: CategoryHierarchy::new(),
        }
    }

    // ========================================================================
    // Interning
    // ========================================================================

    /// The atomic category with the given name, interned.
    pub fn intern_atomic(&mut self, name: &str) -> AtomicCategory {
        if let Some(category) = self.atoms.get(name) {
            return category.clone();
        }
        let category = AtomicCategory::new(name);
        self.atoms.insert(SmolStr::new(name), category.clone());
        category
    }

    /// The list type over the named element category, interned.
    pub fn intern_list(&mut self, name: &str) -> ListType {
        if let Some(list) = self.lists.get(name) {
            return list.clone();
        }
        let list = ListType::new(self.intern_atomic(name));
        self.lists.insert(SmolStr::new(name), list.clone());
        list
    }

    /// A complex (function) type. Plain constructor, never cached.
    #[must_use]
    pub fn make_complex(&self, from: Type, to: Type) -> Type {
        Type::complex(from, to)
    }

    // ========================================================================
    // Variable allocation
    // ========================================================================

    /// Allocate a type variable, reusing a pooled id when one is free.
    ///
    /// When `name` is `None` a display name is synthesized from the id.
    ///
    /// # Errors
    ///
    /// `TypeError::CapacityExceeded` if the pool is empty and the counter
    /// would pass the configured ceiling.
    pub fn allocate_variable(&mut self, name: Option<&str>) -> TypeResult<TypeVariable> {
        let id = match self.free_ids.pop() {
            Some(id) => id,
            None => {
                if self.next_id >= self.ceiling {
                    return Err(TypeError::CapacityExceeded {
                        ceiling: self.ceiling,
                    });
                }
                let id = self.next_id;
                self.next_id += 1;
                id
            }
        };
        let name = match name {
            Some(name) => SmolStr::new(name),
            None => SmolStr::new(format!("_t{id}")),
        };
        Ok(TypeVariable::new(id, name))
    }

    /// Return a variable's id to the free pool.
    ///
    /// Consumes the handle; releasing is the caller's assertion that no
    /// other reference to the variable is still live. Ids the registry
    /// never handed out, and ids already pooled, are ignored.
    pub fn release_variable(&mut self, var: TypeVariable) {
        let id = var.id();
        if id >= self.next_id || self.free_ids.contains(&id) {
            return;
        }
        self.free_ids.push(id);
    }

    /// Number of ids currently waiting in the free pool.
    #[must_use]
    pub fn pooled_ids(&self) -> usize {
        self.free_ids.len()
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Register `child` as a direct subtype of `parent`.
    ///
    /// # Errors
    ///
    /// - `TypeError::NonAtomicSubtype` unless both arguments are atomic
    /// - the hierarchy's tree-constraint errors (second parent, cycle)
    pub fn register_subtype(&mut self, parent: &Type, child: &Type) -> TypeResult<()> {
        let (parent, child) = match (parent, child) {
            (Type::Atomic(p), Type::Atomic(c)) => (p, c),
            (Type::Atomic(_), other) | (other, _) => {
                return Err(TypeError::NonAtomicSubtype {
                    found: other.to_string(),
                })
            }
        };
        self.hierarchy.insert_edge(parent, child)
    }

    /// The root of the category hierarchy, memoized between insertions.
    pub fn root_category(&mut self) -> Option<AtomicCategory> {
        self.hierarchy.root()
    }

    /// Read access to the hierarchy.
    #[must_use]
    pub fn hierarchy(&self) -> &CategoryHierarchy {
        &self.hierarchy
    }

    // ========================================================================
    // Duplication
    // ========================================================================

    /// Duplicate a type expression, renaming its variables through `table`.
    ///
    /// # Errors
    ///
    /// `TypeError::CapacityExceeded` if a fresh variable cannot be
    /// allocated.
    pub fn duplicate_type(&mut self, ty: &Type, table: &mut RenameTable) -> TypeResult<Type> {
        duplicate_type(ty, self, table)
    }

    /// Duplicate an environment under the same renaming rule.
    ///
    /// Pass the same `table` used for the co-occurring type expression so
    /// shared variables rename identically in both outputs.
    ///
    /// # Errors
    ///
    /// `TypeError::CapacityExceeded` if a fresh variable cannot be
    /// allocated.
    pub fn duplicate_environment(
        &mut self,
        env: &TypeEnvironment,
        table: &mut RenameTable,
    ) -> TypeResult<TypeEnvironment> {
        env.duplicate(self, table)
    }

    // ========================================================================
    // Session boundary
    // ========================================================================

    /// Drop all registry state: caches, id pool, counter, and hierarchy.
    ///
    /// The configured ceiling is kept.
    pub fn reset(&mut self) {
        self.atoms.clear();
        self.lists.clear();
        self.free_ids.clear();
        self.next_id = 0;
        self.hierarchy.clear();
    }
}

impl VariableSource for TypeRegistry {
    fn fresh_variable(&mut self, name: &str) -> TypeResult<TypeVariable> {
        self.allocate_variable(Some(name))
    }
}
