//! Room records: numbering, rent, capacity, and derived availability.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{AmenityId, HostelId, RoomId};

/// Errors raised by rent validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RentError {
    /// The rent amount must be zero or positive.
    #[error("rent amount must not be negative, got {0}")]
    Negative(Decimal),
}

/// A room within a hostel.
///
/// `availability` is a derived field: capacity minus the number of
/// students currently assigned to the room. It is recomputed by the
/// store whenever the capacity or the occupant list changes, and it may
/// go negative: over-booking is not rejected here, the value simply
/// reports the deficit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Identifier of this room.
    pub(crate) id: RoomId,

    /// Optional display name.
    pub(crate) name: Option<String>,

    /// Room number, unique across the store.
    pub(crate) number: u32,

    /// Floor number.
    pub(crate) floor: Option<i32>,

    /// The hostel this room belongs to, if any.
    pub(crate) hostel: Option<HostelId>,

    /// Monthly rent. Validated non-negative on write.
    pub(crate) rent_amount: Decimal,

    /// ISO currency code for the rent amount.
    pub(crate) currency: Option<String>,

    /// How many students the room is meant to hold.
    pub(crate) capacity: u32,

    /// Derived: capacity minus current occupant count. Signed, so an
    /// over-booked room reports a negative value.
    pub(crate) availability: i64,

    /// Amenities offered by this room.
    pub(crate) amenities: BTreeSet<AmenityId>,

    /// When the record was created.
    pub(crate) created: DateTime<Utc>,
}

impl Room {
    /// Constructs an empty room with the given number and capacity.
    #[must_use]
    pub fn new(id: RoomId, number: u32, capacity: u32) -> Self {
        Self {
            id,
            name: None,
            number,
            floor: None,
            hostel: None,
            rent_amount: Decimal::ZERO,
            currency: None,
            capacity,
            availability: i64::from(capacity),
            amenities: BTreeSet::new(),
            created: Utc::now(),
        }
    }

    /// Identifier of this room.
    #[must_use]
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// Optional display name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets the display name.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Room number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Floor number, if set.
    #[must_use]
    pub const fn floor(&self) -> Option<i32> {
        self.floor
    }

    /// Sets the floor number.
    pub const fn set_floor(&mut self, floor: Option<i32>) {
        self.floor = floor;
    }

    /// The hostel this room belongs to, if any.
    #[must_use]
    pub const fn hostel(&self) -> Option<HostelId> {
        self.hostel
    }

    /// Monthly rent.
    #[must_use]
    pub const fn rent_amount(&self) -> Decimal {
        self.rent_amount
    }

    /// Sets the monthly rent, validating before any write.
    ///
    /// Zero is accepted (a free room is legal); negative amounts are
    /// rejected and leave the record untouched. Returns whether the
    /// stored value changed.
    ///
    /// # Errors
    ///
    /// Returns [`RentError::Negative`] for amounts below zero.
    pub fn set_rent_amount(&mut self, amount: Decimal) -> Result<bool, RentError> {
        if amount < Decimal::ZERO {
            return Err(RentError::Negative(amount));
        }
        if self.rent_amount == amount {
            return Ok(false);
        }
        self.rent_amount = amount;
        Ok(true)
    }

    /// ISO currency code for the rent amount.
    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Sets the rent currency code.
    pub fn set_currency(&mut self, currency: Option<String>) {
        self.currency = currency;
    }

    /// How many students the room is meant to hold.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Derived availability: capacity minus occupant count, as last
    /// recomputed by the store.
    #[must_use]
    pub const fn availability(&self) -> i64 {
        self.availability
    }

    /// Recomputes the derived availability from the given occupant
    /// count. Writes only when the value actually differs; returns
    /// whether it changed. Safe to invoke redundantly.
    pub fn recompute_availability(&mut self, occupant_count: usize) -> bool {
        let availability =
            i64::from(self.capacity) - i64::try_from(occupant_count).unwrap_or(i64::MAX);
        if self.availability == availability {
            return false;
        }
        self.availability = availability;
        true
    }

    /// The amenities offered by this room.
    #[must_use]
    pub const fn amenities(&self) -> &BTreeSet<AmenityId> {
        &self.amenities
    }

    /// When the record was created.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }
}
