//! Subtype and unification decision procedures.
//!
//! `is_subtype` is a pure query; `unify` additionally records, in the
//! supplied environment, the bindings that make the child a subtype of
//! the parent. Failure is a `false` outcome, not an error: callers use it
//! to try alternative derivations.
//!
//! Two behaviors of the original engine are preserved deliberately:
//! - a variable parent never unifies against an atomic child, even when
//!   the variable's current binding would already satisfy it
//! - a failing complex/complex unification keeps whatever bindings its
//!   succeeding sub-unification made; callers needing a clean environment
//!   on failure must snapshot and restore it themselves (environments are
//!   `Clone` for exactly that)

use crate::registry::TypeRegistry;
use semt_types::{Type, TypeEnvironment};

impl TypeRegistry {
    /// The `<=` relation: can `child` stand in wherever `parent` is
    /// expected, under the bindings currently in `env`?
    #[must_use]
    pub fn is_subtype(&self, child: &Type, parent: &Type, env: &TypeEnvironment) -> bool {
        match (child, parent) {
            // The same variable is reflexively related even when unbound.
            (Type::Var(c), Type::Var(p)) if c == p => true,

            // Variables resolve through the environment first; a variable
            // with no current meaning relates only to itself.
            (Type::Var(v), _) => match env.resolve(v) {
                Ok(Type::Var(ref terminal)) if terminal == v => false,
                Ok(resolved) => self.is_subtype(&resolved, parent, env),
                Err(_) => false,
            },
            (_, Type::Var(v)) => match env.resolve(v) {
                Ok(Type::Var(ref terminal)) if terminal == v => false,
                Ok(resolved) => self.is_subtype(child, &resolved, env),
                Err(_) => false,
            },

            // Equal by name, or child is in parent's descendant set.
            (Type::Atomic(c), Type::Atomic(p)) => {
                c == p || self.hierarchy().is_descendant(c, p)
            }

            // Lists delegate to their elements.
            (Type::List(c), Type::List(p)) => {
                c.element() == p.element()
                    || self.hierarchy().is_descendant(c.element(), p.element())
            }

            // Contravariant in the argument, covariant in the result.
            (Type::Complex(c), Type::Complex(p)) => {
                self.is_subtype(p.argument(), c.argument(), env)
                    && self.is_subtype(c.result(), p.result(), env)
            }

            _ => false,
        }
    }

    /// Unify `child` against `parent`, binding variables in `env` so that
    /// `child <= parent` holds afterwards. Returns whether it succeeded.
    ///
    /// Bindings made by a succeeding sub-unification are NOT rolled back
    /// when the overall unification fails.
    pub fn unify(&self, parent: &Type, child: &Type, env: &mut TypeEnvironment) -> bool {
        // Already related: succeed without touching the environment.
        if self.is_subtype(child, parent, env) {
            return true;
        }

        match (parent, child) {
            // Unrelated atomics cannot be made related.
            (Type::Atomic(_), Type::Atomic(_)) => false,

            // An atomic parent binds a variable child, replacing any
            // binding the subtype check just rejected.
            (Type::Atomic(a), Type::Var(v)) => {
                env.bind_category(v.clone(), a.clone());
                true
            }

            // A variable parent never binds against an atomic child.
            (Type::Var(_), Type::Atomic(_)) => false,

            // The child becomes an alias of the parent's current meaning;
            // an unbound parent is aliased directly.
            (Type::Var(p), Type::Var(c)) => {
                match env.resolve(p) {
                    Ok(Type::Atomic(a)) => env.bind_category(c.clone(), a),
                    Ok(Type::Var(terminal)) => env.bind_variable(c.clone(), terminal),
                    Ok(_) => return false,
                    Err(_) => env.bind_variable(c.clone(), p.clone()),
                }
                true
            }

            // Contravariant argument unification, then result unification.
            (Type::Complex(p), Type::Complex(c)) => {
                self.unify(c.argument(), p.argument(), env)
                    && self.unify(p.result(), c.result(), env)
            }

            _ => false,
        }
    }

    /// Can a function of type `func` be applied to an argument of type
    /// `arg`? True iff `func` is complex and its argument type unifies
    /// against `arg`. Successful checks may bind variables in `env`.
    pub fn is_reducible(&self, func: &Type, arg: &Type, env: &mut TypeEnvironment) -> bool {
        match func {
            Type::Complex(c) => self.unify(c.argument(), arg, env),
            _ => false,
        }
    }
}
