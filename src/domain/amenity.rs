//! Amenity records describing room equipment.

use chrono::{DateTime, Utc};
use non_empty_string::NonEmptyString;

use crate::domain::AmenityId;

/// A hostel amenity (wifi, laundry, ...) that rooms can offer.
///
/// Amenities carry an active flag rather than being deleted when they
/// are withdrawn; only active amenities may be attached to a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amenity {
    /// Identifier of this amenity.
    pub(crate) id: AmenityId,

    /// Display name.
    pub(crate) name: NonEmptyString,

    /// Whether the amenity is currently offered.
    pub(crate) active: bool,

    /// When the record was created.
    pub(crate) created: DateTime<Utc>,
}

impl Amenity {
    /// Constructs an active amenity.
    #[must_use]
    pub fn new(id: AmenityId, name: NonEmptyString) -> Self {
        Self {
            id,
            name,
            active: true,
            created: Utc::now(),
        }
    }

    /// Identifier of this amenity.
    #[must_use]
    pub const fn id(&self) -> AmenityId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Whether the amenity is currently offered.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Activates or deactivates the amenity.
    ///
    /// Deactivation does not detach the amenity from rooms that already
    /// offer it; it only blocks new attachments.
    pub const fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// When the record was created.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }
}
