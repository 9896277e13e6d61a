//! Type representations for the semantic type system.
//!
//! This module provides the four type families used by the lambda-calculus
//! meaning representation:
//! - `AtomicCategory` - an indivisible named type (e.g. `e`, `t`)
//! - `ListType` - a homogeneous sequence over one atomic category
//! - `ComplexType` - a curried function type, argument -> result
//! - `TypeVariable` - a placeholder resolved through a `TypeEnvironment`
//!
//! `Type` is the enum tying the families together. Atomic and list types
//! are interned by the registry and safe to share; complex types are built
//! fresh per use; a variable's meaning is never stored on the variable
//! itself.

use crate::env::TypeEnvironment;
use smol_str::SmolStr;
use std::fmt;

// ============================================================================
// Variable identifiers
// ============================================================================

/// Numeric identity of a type variable.
///
/// Ids are handed out by the registry from a recyclable pool; a released
/// id may later be reused by a freshly allocated variable.
pub type VarId = u32;

// ============================================================================
// AtomicCategory
// ============================================================================

/// An indivisible named type such as `e` (entity) or `t` (truth value).
///
/// Atomic categories are interned by the registry: one instance per name
/// for the registry's lifetime. Equality is by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomicCategory {
    name: SmolStr,
}

impl AtomicCategory {
    /// Create an atomic category with the given name.
    ///
    /// Interning is the registry's job; constructing a category directly
    /// is fine for values that are compared by name only.
    #[must_use]
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self { name: name.into() }
    }

    /// The category's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for AtomicCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ============================================================================
// ListType
// ============================================================================

/// A homogeneous sequence type over exactly one atomic category.
///
/// Equality and subtyping delegate to the wrapped element; list types are
/// interned by element name alongside the atomic cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListType {
    element: AtomicCategory,
}

impl ListType {
    /// Create a list type over the given element category.
    #[must_use]
    pub fn new(element: AtomicCategory) -> Self {
        Self { element }
    }

    /// The wrapped element category.
    #[must_use]
    pub fn element(&self) -> &AtomicCategory {
        &self.element
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*", self.element)
    }
}

// ============================================================================
// ComplexType
// ============================================================================

/// A curried function type: an ordered (argument, result) pair.
///
/// Complex types are never interned; each use site builds its own node.
/// Subtyping is contravariant in the argument and covariant in the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComplexType {
    argument: Type,
    result: Type,
}

impl ComplexType {
    /// Create a complex type from argument and result.
    #[must_use]
    pub fn new(argument: Type, result: Type) -> Self {
        Self { argument, result }
    }

    /// The argument type.
    #[must_use]
    pub fn argument(&self) -> &Type {
        &self.argument
    }

    /// The result type.
    #[must_use]
    pub fn result(&self) -> &Type {
        &self.result
    }
}

impl fmt::Display for ComplexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{}>", self.argument, self.result)
    }
}

// ============================================================================
// TypeVariable
// ============================================================================

/// A placeholder type with a numeric identity and a display name.
///
/// Identity is the id alone: two variables with the same id are the same
/// variable regardless of display name. The variable's *meaning* is never
/// stored here; it is resolved through the active `TypeEnvironment`.
#[derive(Debug, Clone)]
pub struct TypeVariable {
    id: VarId,
    name: SmolStr,
}

impl TypeVariable {
    /// Create a variable with an explicit id and display name.
    ///
    /// Allocation normally goes through the registry, which draws ids
    /// from the recyclable pool.
    #[must_use]
    pub fn new(id: VarId, name: impl Into<SmolStr>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The numeric identity.
    #[must_use]
    pub fn id(&self) -> VarId {
        self.id
    }

    /// The display name (presentation only, not part of identity).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

// Identity is the id; the display name is ignored.
impl PartialEq for TypeVariable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeVariable {}

impl std::hash::Hash for TypeVariable {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeVariable {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeVariable {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for TypeVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.id)
    }
}

// ============================================================================
// Type
// ============================================================================

/// A type expression: one of the four families.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// An interned atomic category.
    Atomic(AtomicCategory),
    /// An interned list type.
    List(ListType),
    /// A curried function type, built fresh per use.
    Complex(Box<ComplexType>),
    /// A type variable, resolved through the environment.
    Var(TypeVariable),
}

impl Type {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an atomic type.
    #[must_use]
    pub fn atomic(category: AtomicCategory) -> Self {
        Type::Atomic(category)
    }

    /// Create a list type.
    #[must_use]
    pub fn list(list: ListType) -> Self {
        Type::List(list)
    }

    /// Create a complex (function) type from argument and result.
    #[must_use]
    pub fn complex(argument: Type, result: Type) -> Self {
        Type::Complex(Box::new(ComplexType::new(argument, result)))
    }

    /// Create a variable type.
    #[must_use]
    pub fn var(variable: TypeVariable) -> Self {
        Type::Var(variable)
    }

    // ========================================================================
    // Family predicates
    // ========================================================================

    /// Check if this is an atomic category.
    #[must_use]
    pub fn is_atomic(&self) -> bool {
        matches!(self, Type::Atomic(_))
    }

    /// Check if this is a list type.
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Type::List(_))
    }

    /// Check if this is a complex type.
    #[must_use]
    pub fn is_complex(&self) -> bool {
        matches!(self, Type::Complex(_))
    }

    /// Check if this is a type variable.
    #[must_use]
    pub fn is_var(&self) -> bool {
        matches!(self, Type::Var(_))
    }

    // ========================================================================
    // Value extraction
    // ========================================================================

    /// Get the atomic category if this is an atomic type.
    #[must_use]
    pub fn get_atomic(&self) -> Option<&AtomicCategory> {
        match self {
            Type::Atomic(c) => Some(c),
            _ => None,
        }
    }

    /// Get the list type if this is one.
    #[must_use]
    pub fn get_list(&self) -> Option<&ListType> {
        match self {
            Type::List(l) => Some(l),
            _ => None,
        }
    }

    /// Get the complex type if this is one.
    #[must_use]
    pub fn get_complex(&self) -> Option<&ComplexType> {
        match self {
            Type::Complex(c) => Some(c),
            _ => None,
        }
    }

    /// Get the variable if this is a variable type.
    #[must_use]
    pub fn get_var(&self) -> Option<&TypeVariable> {
        match self {
            Type::Var(v) => Some(v),
            _ => None,
        }
    }

    /// Get the argument and result if this is a complex type.
    #[must_use]
    pub fn get_arrow(&self) -> Option<(&Type, &Type)> {
        self.get_complex().map(|c| (c.argument(), c.result()))
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render this type, showing each variable's current binding.
    ///
    /// A bound variable renders as `name[binding]` instead of `name[id]`;
    /// unbound variables and the other families render as in `Display`.
    #[must_use]
    pub fn display_resolved(&self, env: &TypeEnvironment) -> String {
        match self {
            Type::Atomic(c) => c.to_string(),
            Type::List(l) => l.to_string(),
            Type::Complex(c) => format!(
                "<{},{}>",
                c.argument().display_resolved(env),
                c.result().display_resolved(env)
            ),
            Type::Var(v) => match env.resolve(v) {
                Ok(bound) => format!("{}[{}]", v.name(), bound.display_resolved(env)),
                Err(_) => v.to_string(),
            },
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Atomic(c) => write!(f, "{c}"),
            Type::List(l) => write!(f, "{l}"),
            Type::Complex(c) => write!(f, "{c}"),
            Type::Var(v) => write!(f, "{v}"),
        }
    }
}

impl From<AtomicCategory> for Type {
    fn from(category: AtomicCategory) -> Self {
        Type::Atomic(category)
    }
}

impl From<ListType> for Type {
    fn from(list: ListType) -> Self {
        Type::List(list)
    }
}

impl From<TypeVariable> for Type {
    fn from(variable: TypeVariable) -> Self {
        Type::Var(variable)
    }
}
