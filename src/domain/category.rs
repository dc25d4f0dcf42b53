//! Category records forming a self-referential hierarchy.

use chrono::{DateTime, Utc};
use non_empty_string::NonEmptyString;

use crate::{domain::CategoryId, store::MaterializedPath};

/// A node in the category hierarchy.
///
/// Each category may reference another category as its parent; the
/// resulting tree is encoded redundantly on every record as a
/// [`MaterializedPath`]. The parent reference and the path are
/// maintained together by [`crate::store::CategoryTree`]; a detached
/// `Category` value is just a snapshot of those fields.
///
/// Children are not stored: they are derived by reverse lookup over the
/// parent references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Identifier of this category.
    pub(crate) id: CategoryId,

    /// Display name.
    pub(crate) name: NonEmptyString,

    /// Reference to the parent category, if any. Non-owning: deleting
    /// the parent is refused while this reference exists.
    pub(crate) parent: Option<CategoryId>,

    /// Materialized root-to-self ancestry chain. Recomputed on creation
    /// and whenever the parent reference of this category or of any
    /// ancestor changes.
    pub(crate) path: MaterializedPath,

    /// When the record was created.
    pub(crate) created: DateTime<Utc>,
}

impl Category {
    /// Constructs a category snapshot.
    ///
    /// The path must already be consistent with the parent reference;
    /// the store's insert/re-parent operations uphold this, and its
    /// verification pass detects records imported with stale paths.
    #[must_use]
    pub fn new(
        id: CategoryId,
        name: NonEmptyString,
        parent: Option<CategoryId>,
        path: MaterializedPath,
    ) -> Self {
        Self {
            id,
            name,
            parent,
            path,
            created: Utc::now(),
        }
    }

    /// Identifier of this category.
    #[must_use]
    pub const fn id(&self) -> CategoryId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Renames the category. Names do not participate in the hierarchy,
    /// so no recomputation follows.
    pub fn set_name(&mut self, name: NonEmptyString) {
        self.name = name;
    }

    /// The parent category reference, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<CategoryId> {
        self.parent
    }

    /// The materialized ancestry path.
    #[must_use]
    pub const fn path(&self) -> &MaterializedPath {
        &self.path
    }

    /// When the record was created.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }
}
