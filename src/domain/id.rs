//! Validated numeric record identifiers.
//!
//! Every record held by the store is keyed by a small positive integer,
//! assigned sequentially at creation time. Identifiers are newtypes over
//! [`NonZeroU32`] so that zero (the conventional "no record" sentinel of
//! the surrounding platform) is unrepresentable, and so that ids of
//! different record types cannot be confused for one another.

use std::{fmt, num::NonZeroU32, str::FromStr};

/// Errors that can occur when parsing a record identifier from a string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseIdError {
    /// The string was not a base-10 integer.
    #[error("invalid record id '{0}': expected a positive integer")]
    NotANumber(String),

    /// Record identifiers start at 1.
    #[error("invalid record id: cannot be zero")]
    Zero,
}

macro_rules! record_id {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Creates an identifier from a pre-validated non-zero integer.
            #[must_use]
            pub const fn new(id: NonZeroU32) -> Self {
                Self(id)
            }

            /// Creates an identifier from a raw integer, rejecting zero.
            #[must_use]
            pub const fn from_u32(id: u32) -> Option<Self> {
                match NonZeroU32::new(id) {
                    Some(id) => Some(Self(id)),
                    None => None,
                }
            }

            /// Returns the raw integer value.
            #[must_use]
            pub const fn get(self) -> u32 {
                self.0.get()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw: u32 = s
                    .parse()
                    .map_err(|_| ParseIdError::NotANumber(s.to_string()))?;
                NonZeroU32::new(raw).map(Self).ok_or(ParseIdError::Zero)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.get()
            }
        }
    };
}

record_id!(
    /// Identifier of a hostel record.
    HostelId
);
record_id!(
    /// Identifier of a room record.
    RoomId
);
record_id!(
    /// Identifier of a student record.
    StudentId
);
record_id!(
    /// Identifier of an amenity record.
    AmenityId
);
record_id!(
    /// Identifier of a category record.
    ///
    /// Category ids are the segments of the materialized ancestry path,
    /// so they additionally round-trip through the `"1/2/5/"` encoding.
    CategoryId
);
