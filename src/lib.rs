//! Hostel facility and occupancy management.
//!
//! Record types for hostels, rooms, amenities, students, and a
//! self-referential category hierarchy, together with the in-memory
//! stores that keep their derived fields consistent: the materialized
//! ancestry path of every category, the stay-duration/date pair of
//! every student, and the availability of every room.

pub mod domain;
pub use domain::{Amenity, Category, Config, Gender, Hostel, Room, Student};

pub mod store;
pub use store::{CategoryTree, MaterializedPath, Registry};
