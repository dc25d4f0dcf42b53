//! Domain models for hostel management.
//!
//! This module contains the record types held by the store: hostels,
//! rooms, students, amenities, and categories, along with the validated
//! identifiers and the configuration.

pub mod amenity;
pub use amenity::Amenity;

pub mod category;
pub use category::Category;

mod config;
pub use config::Config;

pub mod hostel;
pub use hostel::Hostel;

pub mod id;
pub use id::{AmenityId, CategoryId, HostelId, ParseIdError, RoomId, StudentId};

pub mod room;
pub use room::{RentError, Room};

pub mod student;
pub use student::{Gender, Student};
