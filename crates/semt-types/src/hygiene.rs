//! Hygienic duplication of type expressions and environments.
//!
//! When a sub-derivation (a type expression plus its environment) is
//! reused in more than one place, its variables must be renamed to fresh
//! ones so the copies cannot alias each other through the environment.
//! The renaming is *consistent*: within one `RenameTable`, every
//! occurrence of a source variable maps to the same fresh variable, across
//! both the type expression and the environment.

use crate::error::TypeResult;
use crate::ty::{Type, TypeVariable, VarId};
use rustc_hash::FxHashMap;

/// A source of freshly-allocated type variables.
///
/// The registry is the canonical implementation; it draws ids from its
/// recyclable pool. The trait keeps duplication independent of the
/// registry's other state.
pub trait VariableSource {
    /// Allocate a fresh variable carrying the given display name.
    ///
    /// # Errors
    ///
    /// Implementations fail when their id space is exhausted.
    fn fresh_variable(&mut self, name: &str) -> TypeResult<TypeVariable>;
}

/// Records the fresh variable chosen for each source variable in one
/// renaming scope.
///
/// One table per scope: a fresh table gives a fresh renaming; a shared
/// table keeps renaming consistent across several duplication calls.
#[derive(Debug, Clone, Default)]
pub struct RenameTable {
    map: FxHashMap<VarId, TypeVariable>,
}

impl RenameTable {
    /// Create an empty renaming scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of source variables renamed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if no variable has been renamed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Look up the fresh variable already chosen for `var`, if any.
    #[must_use]
    pub fn get(&self, var: &TypeVariable) -> Option<&TypeVariable> {
        self.map.get(&var.id())
    }

    /// The fresh variable for `var`, allocating and recording one with the
    /// same display name on first sight.
    ///
    /// # Errors
    ///
    /// Propagates allocation failure from the source.
    pub fn fresh_for(
        &mut self,
        var: &TypeVariable,
        source: &mut impl VariableSource,
    ) -> TypeResult<TypeVariable> {
        if let Some(renamed) = self.map.get(&var.id()) {
            return Ok(renamed.clone());
        }
        let renamed = source.fresh_variable(var.name())?;
        self.map.insert(var.id(), renamed.clone());
        Ok(renamed)
    }
}

/// Duplicate a type expression under a renaming scope.
///
/// Atomic and list nodes are shared: they carry no per-occurrence
/// identity. Complex nodes are always rebuilt, recursing into argument
/// and result. Variables are renamed through the table, so repeated
/// occurrences of one source variable inside the call map to one fresh
/// variable and internal aliasing is preserved.
///
/// # Errors
///
/// Propagates allocation failure from the variable source.
pub fn duplicate_type(
    ty: &Type,
    source: &mut impl VariableSource,
    table: &mut RenameTable,
) -> TypeResult<Type> {
    match ty {
        Type::Atomic(_) | Type::List(_) => Ok(ty.clone()),
        Type::Complex(c) => {
            let argument = duplicate_type(c.argument(), source, table)?;
            let result = duplicate_type(c.result(), source, table)?;
            Ok(Type::complex(argument, result))
        }
        Type::Var(v) => table.fresh_for(v, source).map(Type::Var),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::TypeError;
    use crate::ty::AtomicCategory;

    /// Allocates sequential ids; stands in for the registry in tests.
    pub(crate) struct CountingSource {
        next: VarId,
    }

    impl CountingSource {
        pub(crate) fn starting_at(next: VarId) -> Self {
            Self { next }
        }
    }

    impl VariableSource for CountingSource {
        fn fresh_variable(&mut self, name: &str) -> TypeResult<TypeVariable> {
            let id = self.next;
            self.next = self
                .next
                .checked_add(1)
                .ok_or(TypeError::CapacityExceeded { ceiling: VarId::MAX })?;
            Ok(TypeVariable::new(id, name))
        }
    }

    fn atom(name: &str) -> Type {
        Type::atomic(AtomicCategory::new(name))
    }

    #[test]
    fn test_atomic_and_list_nodes_shared() {
        let mut source = CountingSource::starting_at(0);
        let mut table = RenameTable::new();

        let e = atom("e");
        assert_eq!(duplicate_type(&e, &mut source, &mut table), Ok(e));

        let es = Type::list(crate::ty::ListType::new(AtomicCategory::new("e")));
        assert_eq!(duplicate_type(&es, &mut source, &mut table), Ok(es));
        assert!(table.is_empty());
    }

    #[test]
    fn test_complex_rebuilt_with_fresh_variables() {
        let mut source = CountingSource::starting_at(100);
        let mut table = RenameTable::new();

        let v = TypeVariable::new(0, "F");
        let ty = Type::complex(Type::var(v.clone()), atom("t"));
        let copy = duplicate_type(&ty, &mut source, &mut table).expect("duplicate");

        let (arg, res) = copy.get_arrow().expect("complex");
        assert_eq!(res, &atom("t"));
        let renamed = arg.get_var().expect("variable argument");
        assert_eq!(renamed.id(), 100);
        assert_eq!(renamed.name(), "F");
    }

    #[test]
    fn test_repeated_variable_keeps_internal_aliasing() {
        let mut source = CountingSource::starting_at(50);
        let mut table = RenameTable::new();

        // <F,F> must duplicate to <F',F'> with a single fresh F'.
        let v = Type::var(TypeVariable::new(3, "F"));
        let ty = Type::complex(v.clone(), v);
        let copy = duplicate_type(&ty, &mut source, &mut table).expect("duplicate");

        let (arg, res) = copy.get_arrow().expect("complex");
        assert_eq!(arg, res);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_fresh_table_gives_fresh_renaming() {
        let mut source = CountingSource::starting_at(0);
        let v = Type::var(TypeVariable::new(9, "F"));

        let mut first_scope = RenameTable::new();
        let first = duplicate_type(&v, &mut source, &mut first_scope).expect("duplicate");
        let mut second_scope = RenameTable::new();
        let second = duplicate_type(&v, &mut source, &mut second_scope).expect("duplicate");

        // Distinct scopes must not share fresh variables.
        assert_ne!(first, second);
    }

    #[test]
    fn test_shared_table_renames_consistently() {
        let mut source = CountingSource::starting_at(0);
        let mut table = RenameTable::new();

        let shared = TypeVariable::new(4, "F");
        let ty = Type::complex(Type::var(shared.clone()), atom("t"));

        let mut env = crate::env::TypeEnvironment::new();
        env.bind_category(shared, AtomicCategory::new("e"));

        let ty_copy = duplicate_type(&ty, &mut source, &mut table).expect("duplicate type");
        let env_copy = env.duplicate(&mut source, &mut table).expect("duplicate env");

        let renamed = ty_copy
            .get_arrow()
            .and_then(|(arg, _)| arg.get_var())
            .expect("renamed variable")
            .clone();
        // The same fresh variable appears in both outputs.
        assert!(env_copy.contains(&renamed));
        assert_eq!(
            env_copy.resolve(&renamed),
            Ok(atom("e"))
        );
    }
}
