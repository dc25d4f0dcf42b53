//! Materialized ancestry paths for category records.
//!
//! A path is the ordered sequence of category ids from the root of a
//! subtree down to (and including) the category itself, encoded as a
//! single slash-terminated string such as `"1/2/3/5/"`. Storing the full
//! chain on every record makes "is X under subtree Y" a prefix check
//! instead of a parent-chain walk; the cost is that re-parenting a
//! category must rewrite the path of its whole subtree.

use std::{fmt, str::FromStr};

use crate::domain::CategoryId;

/// The materialized root-to-self ancestry chain of a category.
///
/// Always contains at least one segment: the owning category's own id is
/// the final segment, so a root category's path is just `"<id>/"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MaterializedPath(Vec<CategoryId>);

impl MaterializedPath {
    /// Creates the path of a root category (no ancestors).
    #[must_use]
    pub fn root(id: CategoryId) -> Self {
        Self(vec![id])
    }

    /// Creates the path of a category sitting directly under the owner
    /// of `self`.
    #[must_use]
    pub fn child(&self, id: CategoryId) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(id);
        Self(segments)
    }

    /// The full root-to-self segment sequence.
    #[must_use]
    pub fn segments(&self) -> &[CategoryId] {
        &self.0
    }

    /// The ancestor segments, root-first, excluding the category itself.
    #[must_use]
    pub fn ancestors(&self) -> &[CategoryId] {
        &self.0[..self.0.len() - 1]
    }

    /// The final segment: the id of the category that owns this path.
    ///
    /// # Panics
    ///
    /// Never panics; the segment list is non-empty by construction.
    #[must_use]
    pub fn leaf(&self) -> CategoryId {
        *self.0.last().expect("path always has at least one segment")
    }

    /// Number of segments, i.e. the category's depth plus one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Whether this path belongs to a root category.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Whether `prefix` is a segment-wise prefix of this path.
    ///
    /// This is the descendant test: `a` lies on the root-to-`b` chain iff
    /// `a`'s path is a prefix of `b`'s. The check is reflexive, matching
    /// the `child_of` semantics of the surrounding platform.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl fmt::Display for MaterializedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "{segment}/")?;
        }
        Ok(())
    }
}

/// Errors that can occur when parsing a materialized path string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathParseError {
    /// The string contained no segments at all.
    #[error("empty materialized path")]
    Empty,

    /// A segment was not a valid category id.
    #[error("invalid path segment '{0}': expected a positive integer")]
    Segment(String),
}

impl FromStr for MaterializedPath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = s
            .split_terminator('/')
            .map(|segment| {
                segment
                    .parse::<CategoryId>()
                    .map_err(|_| PathParseError::Segment(segment.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if segments.is_empty() {
            return Err(PathParseError::Empty);
        }

        Ok(Self(segments))
    }
}
