//! In-memory store of category records with materialized-path
//! maintenance.
//!
//! The [`CategoryTree`] knows nothing about persistence. It owns the
//! category records, assigns their ids, and keeps every record's
//! [`MaterializedPath`] consistent with the parent references: paths are
//! recomputed on insert and on re-parent, cascading over the affected
//! subtree. Ancestry queries then never walk the parent chain; they are
//! a single prefix comparison against the stored path.
//!
//! Re-parenting is therefore O(subtree size) while `is_descendant_of`
//! is O(1); the structure suits trees that are queried often and
//! restructured rarely.

use std::collections::BTreeMap;

use non_empty_string::NonEmptyString;
use petgraph::{
    algo::{is_cyclic_directed, tarjan_scc},
    graphmap::DiGraphMap,
};
use tracing::instrument;

use crate::{
    domain::{Category, CategoryId},
    store::MaterializedPath,
};

/// Errors that can occur when inserting or re-parenting categories.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HierarchyError {
    /// The category being modified could not be found.
    #[error("category {0} not found")]
    NotFound(CategoryId),

    /// The requested parent category could not be found.
    #[error("parent category {0} not found")]
    ParentNotFound(CategoryId),

    /// The requested parent is the category itself or one of its
    /// descendants; the assignment would close an ancestry loop.
    #[error("setting parent {parent} on category {category} would create a cycle")]
    Cycle {
        /// The category being re-parented.
        category: CategoryId,
        /// The rejected parent.
        parent: CategoryId,
    },
}

/// Errors that can occur when deleting a category.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeleteError {
    /// The category could not be found.
    #[error("category {0} not found")]
    NotFound(CategoryId),

    /// Other categories still reference this one as their parent.
    /// There is no cascading delete: re-parent or delete the children
    /// first.
    #[error("category {category} is still referenced by {children} child categor(ies)")]
    ReferencedByChildren {
        /// The category whose deletion was refused.
        category: CategoryId,
        /// How many children reference it.
        children: usize,
    },
}

/// An in-memory store of category records.
///
/// Ids are assigned sequentially starting at 1. Child collections are
/// not stored; they are derived by reverse lookup over the parent
/// references.
#[derive(Debug, Default)]
pub struct CategoryTree {
    /// Category records keyed by id.
    categories: BTreeMap<CategoryId, Category>,

    /// Highest id handed out so far.
    next_id: u32,
}

impl CategoryTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            categories: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Number of categories in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the tree holds no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Creates a category and returns its id.
    ///
    /// The materialized path is computed immediately: a root category's
    /// path is its own id, a child's path extends the parent's.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::ParentNotFound`] when the requested
    /// parent does not exist.
    pub fn insert(
        &mut self,
        name: NonEmptyString,
        parent: Option<CategoryId>,
    ) -> Result<CategoryId, HierarchyError> {
        let base = match parent {
            Some(p) => Some(
                self.categories
                    .get(&p)
                    .ok_or(HierarchyError::ParentNotFound(p))?
                    .path()
                    .clone(),
            ),
            None => None,
        };

        let id = self.allocate_id();
        let path = base.map_or_else(|| MaterializedPath::root(id), |b| b.child(id));
        tracing::debug!(%id, %path, "created category");
        self.categories
            .insert(id, Category::new(id, name, parent, path));
        Ok(id)
    }

    /// Inserts a pre-built category record, e.g. one loaded from an
    /// external snapshot.
    ///
    /// No consistency checks are performed on the parent reference or
    /// the path; run [`Self::cycles`] and [`Self::stale_paths`] after a
    /// bulk import.
    ///
    /// # Panics
    ///
    /// Panics if a category with the same id already exists.
    pub fn insert_record(&mut self, category: Category) {
        let id = category.id();
        assert!(
            !self.categories.contains_key(&id),
            "Duplicate category id: {id}"
        );
        self.next_id = self.next_id.max(id.get());
        self.categories.insert(id, category);
    }

    /// Retrieves a category by id.
    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    /// Returns an iterator over all categories, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    /// Finds the first category with the given display name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.values().find(|c| c.name() == name)
    }

    /// The direct children of a category, derived by reverse lookup.
    pub fn children(&self, id: CategoryId) -> impl Iterator<Item = CategoryId> + '_ {
        self.categories
            .values()
            .filter(move |c| c.parent() == Some(id))
            .map(Category::id)
    }

    /// All categories strictly below the given one, in id order.
    ///
    /// Answered from the materialized paths, without walking parent
    /// chains.
    #[must_use]
    pub fn descendants(&self, id: CategoryId) -> Vec<CategoryId> {
        let Some(root) = self.categories.get(&id) else {
            return Vec::new();
        };
        self.categories
            .values()
            .filter(|c| c.id() != id && c.path().starts_with(root.path()))
            .map(Category::id)
            .collect()
    }

    /// Whether `ancestor` lies on the root-to-`candidate` chain.
    ///
    /// A single prefix check against the materialized paths, without
    /// parent traversal. Reflexive: a category is a descendant of
    /// itself.
    /// Returns `false` when either id is unknown.
    #[must_use]
    pub fn is_descendant_of(&self, candidate: CategoryId, ancestor: CategoryId) -> bool {
        let (Some(candidate), Some(ancestor)) = (
            self.categories.get(&candidate),
            self.categories.get(&ancestor),
        ) else {
            return false;
        };
        candidate.path().starts_with(ancestor.path())
    }

    /// Moves a category under a new parent (or to the root with `None`)
    /// and rewrites the materialized path of the category and of every
    /// descendant.
    ///
    /// Validation happens before any field is written: on error the
    /// tree is untouched. Returns the number of paths actually
    /// rewritten; re-asserting the current parent rewrites nothing.
    ///
    /// The cascade iterates with an explicit stack, so arbitrarily deep
    /// subtrees do not recurse.
    ///
    /// # Panics
    ///
    /// Never panics; every id dereferenced during the cascade has been
    /// validated first.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::NotFound`] or
    /// [`HierarchyError::ParentNotFound`] when either id is unknown, and
    /// [`HierarchyError::Cycle`] when the new parent is the category
    /// itself or one of its descendants.
    #[instrument(skip(self))]
    pub fn set_parent(
        &mut self,
        category: CategoryId,
        new_parent: Option<CategoryId>,
    ) -> Result<usize, HierarchyError> {
        if !self.categories.contains_key(&category) {
            return Err(HierarchyError::NotFound(category));
        }
        if let Some(parent) = new_parent {
            if !self.categories.contains_key(&parent) {
                return Err(HierarchyError::ParentNotFound(parent));
            }
            // Reflexive check: covers parent == category as well as any
            // proper descendant.
            if self.is_descendant_of(parent, category) {
                return Err(HierarchyError::Cycle { category, parent });
            }
        }

        let base = new_parent.map(|p| self.categories[&p].path().clone());
        let new_path = base.map_or_else(|| MaterializedPath::root(category), |b| b.child(category));

        let record = self
            .categories
            .get_mut(&category)
            .expect("existence checked above");
        record.parent = new_parent;
        if *record.path() == new_path {
            // Same position in the tree: the descendants' paths embed
            // the same chain, nothing to rewrite.
            return Ok(0);
        }
        record.path = new_path;
        let mut rewritten = 1;

        // Every descendant path embeds this category's chain, so the
        // whole subtree is rewritten, breadth via an explicit stack.
        let mut stack = vec![category];
        while let Some(current) = stack.pop() {
            let current_path = self.categories[&current].path().clone();
            let kids: Vec<CategoryId> = self.children(current).collect();
            for kid in kids {
                let path = current_path.child(kid);
                let entry = self
                    .categories
                    .get_mut(&kid)
                    .expect("child ids come from the map");
                if *entry.path() != path {
                    entry.path = path;
                    rewritten += 1;
                }
                stack.push(kid);
            }
        }

        tracing::debug!(%category, rewritten, "re-parented category");
        Ok(rewritten)
    }

    /// Deletes a category.
    ///
    /// # Panics
    ///
    /// Never panics; the category's existence is checked up front.
    ///
    /// # Errors
    ///
    /// Returns [`DeleteError::NotFound`] when the id is unknown, and
    /// [`DeleteError::ReferencedByChildren`] while other categories
    /// still reference this one as their parent.
    pub fn delete(&mut self, category: CategoryId) -> Result<Category, DeleteError> {
        if !self.categories.contains_key(&category) {
            return Err(DeleteError::NotFound(category));
        }
        let children = self.children(category).count();
        if children > 0 {
            return Err(DeleteError::ReferencedByChildren { category, children });
        }
        tracing::debug!(%category, "deleted category");
        Ok(self
            .categories
            .remove(&category)
            .expect("existence checked above"))
    }

    /// Determine whether the raw parent references contain any cycle.
    ///
    /// Categories built through [`Self::insert`] and
    /// [`Self::set_parent`] can never cycle; this is a diagnostic for
    /// records imported with [`Self::insert_record`].
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.parent_graph())
    }

    /// Return all cycles in the parent references as sorted id groups.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<CategoryId>> {
        let graph = self.parent_graph();
        let mut cycles = Vec::new();

        for component in tarjan_scc(&graph) {
            if component.len() > 1 {
                let mut ids = component;
                ids.sort_unstable();
                cycles.push(ids);
                continue;
            }

            let Some(&node) = component.first() else {
                continue;
            };

            if graph.contains_edge(node, node) {
                cycles.push(vec![node]);
            }
        }

        cycles.sort();
        cycles
    }

    /// Returns the ids whose stored path disagrees with one recomputed
    /// from the parent chain (or whose chain is broken or cyclic).
    ///
    /// Empty for any tree built through the public mutation API.
    #[must_use]
    pub fn stale_paths(&self) -> Vec<CategoryId> {
        let mut stale = Vec::new();
        for (&id, record) in &self.categories {
            match self.walk_path(id) {
                Some(expected) if expected == *record.path() => {}
                _ => stale.push(id),
            }
        }
        stale
    }

    /// Recomputes a path the slow way: by walking the parent chain.
    ///
    /// Returns `None` for broken or cyclic chains. Used only for
    /// verification; live queries go through the materialized paths.
    fn walk_path(&self, id: CategoryId) -> Option<MaterializedPath> {
        let mut chain = vec![id];
        let mut current = self.categories.get(&id)?;

        while let Some(parent) = current.parent() {
            // A chain longer than the whole store must be cyclic.
            if chain.len() > self.categories.len() {
                return None;
            }
            chain.push(parent);
            current = self.categories.get(&parent)?;
        }

        chain.reverse();
        let mut segments = chain.into_iter();
        let mut path = MaterializedPath::root(segments.next()?);
        for segment in segments {
            path = path.child(segment);
        }
        Some(path)
    }

    fn parent_graph(&self) -> DiGraphMap<CategoryId, ()> {
        let mut graph = DiGraphMap::new();
        for record in self.categories.values() {
            graph.add_node(record.id());
            if let Some(parent) = record.parent() {
                graph.add_edge(record.id(), parent, ());
            }
        }
        graph
    }

    fn allocate_id(&mut self) -> CategoryId {
        self.next_id += 1;
        CategoryId::from_u32(self.next_id).expect("sequence starts at 1")
    }
}
