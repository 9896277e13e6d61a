//! The category hierarchy: a tree of "is-a" edges over atomic categories,
//! with an incrementally-maintained transitive closure.
//!
//! The closure cache maps every category to its full descendant set and
//! is updated on each edge insertion, never recomputed from scratch. The
//! incremental update walks the parent chain upward, which is only
//! correct when each category has at most one parent; a second parent is
//! therefore rejected instead of silently corrupting the closure.

use rustc_hash::{FxHashMap, FxHashSet};
use semt_types::{AtomicCategory, TypeError, TypeResult};

/// A tree of atomic categories with a cached transitive closure.
#[derive(Debug, Clone, Default)]
pub struct CategoryHierarchy {
    /// Direct parent of each category (at most one).
    parents: FxHashMap<AtomicCategory, AtomicCategory>,
    /// Direct children of each category.
    children: FxHashMap<AtomicCategory, Vec<AtomicCategory>>,
    /// Full descendant set of each category (the transitive closure).
    descendants: FxHashMap<AtomicCategory, FxHashSet<AtomicCategory>>,
    /// Memoized root; invalidated by every insertion.
    root: Option<AtomicCategory>,
}

impl CategoryHierarchy {
    /// Create an empty hierarchy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no edge has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Check if the category appears in any registered edge.
    #[must_use]
    pub fn is_known(&self, category: &AtomicCategory) -> bool {
        self.parents.contains_key(category) || self.children.contains_key(category)
    }

    /// Register `child` as a direct subtype of `parent`.
    ///
    /// Idempotent on an already-registered edge. On a new edge, the
    /// child's descendant set (plus the child itself) is unioned into the
    /// parent's cached set, and the union is propagated upward along the
    /// parent chain to the root.
    ///
    /// # Errors
    ///
    /// - `TypeError::ConflictingParent` if `child` already has a
    ///   different parent (the hierarchy is a tree)
    /// - `TypeError::CyclicHierarchy` if `parent` is `child` or one of
    ///   its descendants
    pub fn insert_edge(
        &mut self,
        parent: &AtomicCategory,
        child: &AtomicCategory,
    ) -> TypeResult<()> {
        if let Some(existing) = self.parents.get(child) {
            if existing == parent {
                return Ok(());
            }
            return Err(TypeError::ConflictingParent {
                child: child.to_string(),
                existing: existing.to_string(),
                requested: parent.to_string(),
            });
        }

        if parent == child || self.is_descendant(parent, child) {
            return Err(TypeError::CyclicHierarchy {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }

        self.parents.insert(child.clone(), parent.clone());
        self.children
            .entry(parent.clone())
            .or_default()
            .push(child.clone());

        // The new descendants every ancestor of `parent` gains.
        let mut delta: FxHashSet<AtomicCategory> = self
            .descendants
            .get(child)
            .cloned()
            .unwrap_or_default();
        delta.insert(child.clone());

        let mut current = parent.clone();
        loop {
            self.descendants
                .entry(current.clone())
                .or_default()
                .extend(delta.iter().cloned());
            match self.parents.get(&current) {
                Some(up) => current = up.clone(),
                None => break,
            }
        }

        self.root = None;
        Ok(())
    }

    /// Check if `child` is a registered (transitive) descendant of
    /// `ancestor`. A category is not its own descendant.
    #[must_use]
    pub fn is_descendant(&self, child: &AtomicCategory, ancestor: &AtomicCategory) -> bool {
        self.descendants
            .get(ancestor)
            .is_some_and(|set| set.contains(child))
    }

    /// The full descendant set of a category, if it has any.
    #[must_use]
    pub fn descendants_of(&self, category: &AtomicCategory) -> Option<&FxHashSet<AtomicCategory>> {
        self.descendants.get(category)
    }

    /// The direct parent of a category, if registered.
    #[must_use]
    pub fn parent_of(&self, category: &AtomicCategory) -> Option<&AtomicCategory> {
        self.parents.get(category)
    }

    /// The unique category with no ancestors, found by walking any known
    /// category upward and memoized until the next insertion.
    ///
    /// Returns `None` for an empty hierarchy. If edges form more than one
    /// disjoint tree, which of the roots is returned is unspecified.
    pub fn root(&mut self) -> Option<AtomicCategory> {
        if let Some(root) = &self.root {
            return Some(root.clone());
        }

        let mut current = self
            .parents
            .keys()
            .chain(self.children.keys())
            .next()?
            .clone();
        while let Some(up) = self.parents.get(&current) {
            current = up.clone();
        }

        self.root = Some(current.clone());
        Some(current)
    }

    /// Drop every edge and the closure cache.
    pub fn clear(&mut self) {
        self.parents.clear();
        self.children.clear();
        self.descendants.clear();
        self.root = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(name: &str) -> AtomicCategory {
        AtomicCategory::new(name)
    }

    #[test]
    fn test_direct_edge() {
        let mut h = CategoryHierarchy::new();
        h.insert_edge(&atom("animal"), &atom("dog")).expect("edge");

        assert!(h.is_descendant(&atom("dog"), &atom("animal")));
        assert!(!h.is_descendant(&atom("animal"), &atom("dog")));
        assert!(!h.is_descendant(&atom("animal"), &atom("animal")));
    }

    #[test]
    fn test_closure_transitivity_top_down() {
        let mut h = CategoryHierarchy::new();
        h.insert_edge(&atom("a"), &atom("b")).expect("edge");
        h.insert_edge(&atom("b"), &atom("c")).expect("edge");

        assert!(h.is_descendant(&atom("c"), &atom("a")));
    }

    #[test]
    fn test_closure_transitivity_bottom_up() {
        // Inserting the deeper edge first must propagate on the later
        // insertion via the child's existing descendant set.
        let mut h = CategoryHierarchy::new();
        h.insert_edge(&atom("b"), &atom("c")).expect("edge");
        h.insert_edge(&atom("a"), &atom("b")).expect("edge");

        assert!(h.is_descendant(&atom("c"), &atom("a")));
        assert!(h.is_descendant(&atom("b"), &atom("a")));
    }

    #[test]
    fn test_insertion_into_middle_of_chain() {
        let mut h = CategoryHierarchy::new();
        h.insert_edge(&atom("a"), &atom("b")).expect("edge");
        h.insert_edge(&atom("b"), &atom("d")).expect("edge");
        h.insert_edge(&atom("b"), &atom("c")).expect("edge");

        for descendant in ["b", "c", "d"] {
            assert!(h.is_descendant(&atom(descendant), &atom("a")), "{descendant}");
        }
        assert!(h.is_descendant(&atom("c"), &atom("b")));
        assert!(!h.is_descendant(&atom("c"), &atom("d")));
    }

    #[test]
    fn test_idempotent_reinsertion() {
        let mut h = CategoryHierarchy::new();
        h.insert_edge(&atom("a"), &atom("b")).expect("edge");
        h.insert_edge(&atom("a"), &atom("b")).expect("same edge again");

        assert_eq!(h.descendants_of(&atom("a")).map(FxHashSet::len), Some(1));
    }

    #[test]
    fn test_second_parent_rejected() {
        let mut h = CategoryHierarchy::new();
        h.insert_edge(&atom("a"), &atom("c")).expect("edge");

        assert!(matches!(
            h.insert_edge(&atom("b"), &atom("c")),
            Err(TypeError::ConflictingParent { .. })
        ));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut h = CategoryHierarchy::new();
        h.insert_edge(&atom("a"), &atom("b")).expect("edge");
        h.insert_edge(&atom("b"), &atom("c")).expect("edge");

        assert!(matches!(
            h.insert_edge(&atom("c"), &atom("a")),
            Err(TypeError::CyclicHierarchy { .. })
        ));
        assert!(matches!(
            h.insert_edge(&atom("a"), &atom("a")),
            Err(TypeError::CyclicHierarchy { .. })
        ));
    }

    #[test]
    fn test_root_walks_upward() {
        let mut h = CategoryHierarchy::new();
        h.insert_edge(&atom("b"), &atom("c")).expect("edge");
        h.insert_edge(&atom("a"), &atom("b")).expect("edge");

        assert_eq!(h.root(), Some(atom("a")));

        // A new edge above the old root invalidates the memo.
        h.insert_edge(&atom("top"), &atom("a")).expect("edge");
        assert_eq!(h.root(), Some(atom("top")));
    }

    #[test]
    fn test_empty_hierarchy_has_no_root() {
        let mut h = CategoryHierarchy::new();
        assert_eq!(h.root(), None);
    }

    #[test]
    fn test_clear() {
        let mut h = CategoryHierarchy::new();
        h.insert_edge(&atom("a"), &atom("b")).expect("edge");
        h.clear();

        assert!(h.is_empty());
        assert!(!h.is_descendant(&atom("b"), &atom("a")));
        assert_eq!(h.root(), None);
    }
}
