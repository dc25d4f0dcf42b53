//! The record registry: hostels, rooms, students, and amenities.
//!
//! The [`Registry`] plays the role of the surrounding platform's record
//! store for the non-hierarchical record types. It owns the records,
//! assigns their ids, answers reverse lookups (occupants-of, rooms-of),
//! and fires the derived-field recomputations at the right points:
//! `duration`/`discharge_date` reconciliation when stay fields change,
//! and room availability when capacity or the occupant list changes.
//!
//! All validation happens before any field is written; a returned error
//! means the registry is exactly as it was.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use non_empty_string::NonEmptyString;
use rust_decimal::Decimal;
use tracing::instrument;

use crate::domain::{
    Amenity, AmenityId, Config, Gender, Hostel, HostelId, RentError, Room, RoomId, Student,
    StudentId,
};

/// Errors raised by registry operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The referenced hostel does not exist.
    #[error("hostel {0} not found")]
    HostelNotFound(HostelId),

    /// The referenced room does not exist.
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    /// The referenced student does not exist.
    #[error("student {0} not found")]
    StudentNotFound(StudentId),

    /// The referenced amenity does not exist.
    #[error("amenity {0} not found")]
    AmenityNotFound(AmenityId),

    /// Another room already carries this room number.
    #[error("room number {number} is already used by room {existing}")]
    DuplicateRoomNumber {
        /// The rejected number.
        number: u32,
        /// The room that already holds it.
        existing: RoomId,
    },

    /// Only active amenities may be attached to a room.
    #[error("amenity {0} is inactive and cannot be attached")]
    InactiveAmenity(AmenityId),

    /// A field-level constraint was violated.
    #[error(transparent)]
    Rent(#[from] RentError),
}

/// An in-memory store of hostel, room, student, and amenity records.
#[derive(Debug, Default)]
pub struct Registry {
    config: Config,
    hostels: BTreeMap<HostelId, Hostel>,
    rooms: BTreeMap<RoomId, Room>,
    students: BTreeMap<StudentId, Student>,
    amenities: BTreeMap<AmenityId, Amenity>,
    next_hostel: u32,
    next_room: u32,
    next_student: u32,
    next_amenity: u32,
}

impl Registry {
    /// Creates an empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    // ----- hostels -----------------------------------------------------

    /// Creates a hostel record. The builder closure receives the newly
    /// allocated id and returns the record, typically via
    /// [`Hostel::new`] and its `with_*` methods.
    ///
    /// # Panics
    ///
    /// Panics if the built record carries a different id than the one
    /// handed to the closure.
    pub fn add_hostel(&mut self, build: impl FnOnce(HostelId) -> Hostel) -> HostelId {
        self.next_hostel += 1;
        let id = HostelId::from_u32(self.next_hostel).expect("sequence starts at 1");
        let hostel = build(id);
        assert!(
            hostel.id() == id,
            "built hostel must keep the allocated id"
        );
        tracing::info!("Added hostel: {}", hostel.display_name());
        self.hostels.insert(id, hostel);
        id
    }

    /// Retrieves a hostel by id.
    #[must_use]
    pub fn hostel(&self, id: HostelId) -> Option<&Hostel> {
        self.hostels.get(&id)
    }

    /// Returns an iterator over all hostels, ordered by id.
    pub fn hostels(&self) -> impl Iterator<Item = &Hostel> {
        self.hostels.values()
    }

    /// The rooms belonging to a hostel, derived by reverse lookup.
    pub fn rooms_of(&self, hostel: HostelId) -> impl Iterator<Item = &Room> {
        self.rooms
            .values()
            .filter(move |room| room.hostel() == Some(hostel))
    }

    /// Deletes a hostel. Rooms that referenced it keep existing with
    /// their hostel reference cleared.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::HostelNotFound`] when the id is unknown.
    #[instrument(skip(self))]
    pub fn delete_hostel(&mut self, id: HostelId) -> Result<Hostel, RegistryError> {
        let hostel = self
            .hostels
            .remove(&id)
            .ok_or(RegistryError::HostelNotFound(id))?;
        for room in self.rooms.values_mut() {
            if room.hostel == Some(id) {
                room.hostel = None;
            }
        }
        Ok(hostel)
    }

    // ----- rooms -------------------------------------------------------

    /// Creates a room record with the given number and capacity.
    ///
    /// Room numbers are unique across the whole registry, not per
    /// hostel.
    ///
    /// # Panics
    ///
    /// Never panics; ids are allocated sequentially from 1.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRoomNumber`] when another room
    /// already carries the number.
    pub fn add_room(&mut self, number: u32, capacity: u32) -> Result<RoomId, RegistryError> {
        if let Some(existing) = self.rooms.values().find(|room| room.number() == number) {
            return Err(RegistryError::DuplicateRoomNumber {
                number,
                existing: existing.id(),
            });
        }

        self.next_room += 1;
        let id = RoomId::from_u32(self.next_room).expect("sequence starts at 1");
        tracing::info!(room = %id, number, "Added room");
        self.rooms.insert(id, Room::new(id, number, capacity));
        Ok(id)
    }

    /// Retrieves a room by id.
    #[must_use]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    /// Returns an iterator over all rooms, ordered by id.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Attaches a room to a hostel (or detaches it with `None`).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RoomNotFound`] or
    /// [`RegistryError::HostelNotFound`] when either id is unknown.
    pub fn assign_hostel(
        &mut self,
        room: RoomId,
        hostel: Option<HostelId>,
    ) -> Result<(), RegistryError> {
        if let Some(hostel) = hostel {
            if !self.hostels.contains_key(&hostel) {
                return Err(RegistryError::HostelNotFound(hostel));
            }
        }
        let record = self
            .rooms
            .get_mut(&room)
            .ok_or(RegistryError::RoomNotFound(room))?;
        record.hostel = hostel;
        Ok(())
    }

    /// Sets a room's display name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RoomNotFound`] when the id is unknown.
    pub fn set_room_name(
        &mut self,
        room: RoomId,
        name: Option<String>,
    ) -> Result<(), RegistryError> {
        self.rooms
            .get_mut(&room)
            .ok_or(RegistryError::RoomNotFound(room))?
            .set_name(name);
        Ok(())
    }

    /// Sets a room's floor number.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RoomNotFound`] when the id is unknown.
    pub fn set_floor(&mut self, room: RoomId, floor: Option<i32>) -> Result<(), RegistryError> {
        self.rooms
            .get_mut(&room)
            .ok_or(RegistryError::RoomNotFound(room))?
            .set_floor(floor);
        Ok(())
    }

    /// Sets a room's monthly rent, validating before any write.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RoomNotFound`] when the id is unknown
    /// and [`RegistryError::Rent`] for a negative amount.
    pub fn set_rent(&mut self, room: RoomId, amount: Decimal) -> Result<bool, RegistryError> {
        let record = self
            .rooms
            .get_mut(&room)
            .ok_or(RegistryError::RoomNotFound(room))?;
        Ok(record.set_rent_amount(amount)?)
    }

    /// Sets a room's rent currency code.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RoomNotFound`] when the id is unknown.
    pub fn set_currency(
        &mut self,
        room: RoomId,
        currency: Option<String>,
    ) -> Result<(), RegistryError> {
        self.rooms
            .get_mut(&room)
            .ok_or(RegistryError::RoomNotFound(room))?
            .set_currency(currency);
        Ok(())
    }

    /// Changes a room's capacity and recomputes its availability.
    ///
    /// # Panics
    ///
    /// Never panics; the room's existence is checked up front.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RoomNotFound`] when the id is unknown.
    pub fn set_capacity(&mut self, room: RoomId, capacity: u32) -> Result<(), RegistryError> {
        if !self.rooms.contains_key(&room) {
            return Err(RegistryError::RoomNotFound(room));
        }
        let occupants = self.occupant_count(room);
        let record = self.rooms.get_mut(&room).expect("existence checked above");
        record.capacity = capacity;
        record.recompute_availability(occupants);
        Ok(())
    }

    /// The display name of a room: its explicit name when one is set,
    /// otherwise the room number padded to the configured digit count
    /// (room 7 renders as `"007"` under the default configuration).
    #[must_use]
    pub fn room_display_name(&self, room: RoomId) -> Option<String> {
        let record = self.rooms.get(&room)?;
        Some(record.name().map_or_else(
            || self.config.format_room_number(record.number()),
            str::to_string,
        ))
    }

    /// The derived availability of a room: capacity minus occupant
    /// count. Negative when over-booked.
    #[must_use]
    pub fn availability(&self, room: RoomId) -> Option<i64> {
        self.rooms.get(&room).map(Room::availability)
    }

    /// The students currently assigned to a room, derived by reverse
    /// lookup.
    pub fn occupants(&self, room: RoomId) -> impl Iterator<Item = &Student> {
        self.students
            .values()
            .filter(move |student| student.room() == Some(room))
    }

    /// Deletes a room. Students that occupied it keep existing with
    /// their room reference cleared.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RoomNotFound`] when the id is unknown.
    #[instrument(skip(self))]
    pub fn delete_room(&mut self, id: RoomId) -> Result<Room, RegistryError> {
        let room = self
            .rooms
            .remove(&id)
            .ok_or(RegistryError::RoomNotFound(id))?;
        for student in self.students.values_mut() {
            if student.room == Some(id) {
                student.room = None;
            }
        }
        Ok(room)
    }

    // ----- amenities ---------------------------------------------------

    /// Creates an active amenity record.
    ///
    /// # Panics
    ///
    /// Never panics; ids are allocated sequentially from 1.
    pub fn add_amenity(&mut self, name: NonEmptyString) -> AmenityId {
        self.next_amenity += 1;
        let id = AmenityId::from_u32(self.next_amenity).expect("sequence starts at 1");
        tracing::info!(amenity = %id, "Added amenity: {name}");
        self.amenities.insert(id, Amenity::new(id, name));
        id
    }

    /// Retrieves an amenity by id.
    #[must_use]
    pub fn amenity(&self, id: AmenityId) -> Option<&Amenity> {
        self.amenities.get(&id)
    }

    /// Returns an iterator over all amenities, ordered by id.
    pub fn amenities(&self) -> impl Iterator<Item = &Amenity> {
        self.amenities.values()
    }

    /// Activates or deactivates an amenity. Deactivation blocks new
    /// attachments but leaves existing ones in place.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AmenityNotFound`] when the id is
    /// unknown.
    pub fn set_amenity_active(
        &mut self,
        amenity: AmenityId,
        active: bool,
    ) -> Result<(), RegistryError> {
        self.amenities
            .get_mut(&amenity)
            .ok_or(RegistryError::AmenityNotFound(amenity))?
            .set_active(active);
        Ok(())
    }

    /// Attaches an amenity to a room. Returns whether it was newly
    /// attached (`false` when already present).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RoomNotFound`] or
    /// [`RegistryError::AmenityNotFound`] when either id is unknown, and
    /// [`RegistryError::InactiveAmenity`] when the amenity is not
    /// active.
    pub fn attach_amenity(
        &mut self,
        room: RoomId,
        amenity: AmenityId,
    ) -> Result<bool, RegistryError> {
        let record = self
            .amenities
            .get(&amenity)
            .ok_or(RegistryError::AmenityNotFound(amenity))?;
        if !record.is_active() {
            return Err(RegistryError::InactiveAmenity(amenity));
        }
        let room = self
            .rooms
            .get_mut(&room)
            .ok_or(RegistryError::RoomNotFound(room))?;
        Ok(room.amenities.insert(amenity))
    }

    /// Detaches an amenity from a room. Returns whether it was present.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RoomNotFound`] when the room id is
    /// unknown.
    pub fn detach_amenity(
        &mut self,
        room: RoomId,
        amenity: AmenityId,
    ) -> Result<bool, RegistryError> {
        let room = self
            .rooms
            .get_mut(&room)
            .ok_or(RegistryError::RoomNotFound(room))?;
        Ok(room.amenities.remove(&amenity))
    }

    /// Deletes an amenity, detaching it from every room.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AmenityNotFound`] when the id is
    /// unknown.
    pub fn delete_amenity(&mut self, id: AmenityId) -> Result<Amenity, RegistryError> {
        let amenity = self
            .amenities
            .remove(&id)
            .ok_or(RegistryError::AmenityNotFound(id))?;
        for room in self.rooms.values_mut() {
            room.amenities.remove(&id);
        }
        Ok(amenity)
    }

    // ----- students ----------------------------------------------------

    /// Creates a student record.
    ///
    /// When the configuration asks for it (the default), the admission
    /// date is initialised to the current day.
    ///
    /// # Panics
    ///
    /// Panics if the built record carries a different id than the one
    /// handed to the closure.
    pub fn add_student(&mut self, build: impl FnOnce(StudentId) -> Student) -> StudentId {
        self.next_student += 1;
        let id = StudentId::from_u32(self.next_student).expect("sequence starts at 1");
        let mut student = build(id);
        assert!(
            student.id() == id,
            "built student must keep the allocated id"
        );
        if self.config.default_admission_to_today && student.admission_date().is_none() {
            student.admission_date = Some(Utc::now().date_naive());
        }
        tracing::info!(student = %id, "Added student");
        self.students.insert(id, student);
        id
    }

    /// Retrieves a student by id.
    #[must_use]
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.get(&id)
    }

    /// Returns an iterator over all students, ordered by id.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    /// Sets a student's gender.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StudentNotFound`] when the id is
    /// unknown.
    pub fn set_gender(
        &mut self,
        student: StudentId,
        gender: Option<Gender>,
    ) -> Result<(), RegistryError> {
        self.students
            .get_mut(&student)
            .ok_or(RegistryError::StudentNotFound(student))?
            .gender = gender;
        Ok(())
    }

    /// Assigns a student to a room (or unassigns with `None`) and
    /// recomputes the availability of both the vacated and the newly
    /// occupied room.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StudentNotFound`] or
    /// [`RegistryError::RoomNotFound`] when either id is unknown.
    #[instrument(skip(self))]
    pub fn assign_room(
        &mut self,
        student: StudentId,
        room: Option<RoomId>,
    ) -> Result<(), RegistryError> {
        if let Some(room) = room {
            if !self.rooms.contains_key(&room) {
                return Err(RegistryError::RoomNotFound(room));
            }
        }
        let record = self
            .students
            .get_mut(&student)
            .ok_or(RegistryError::StudentNotFound(student))?;
        let previous = record.room;
        if previous == room {
            return Ok(());
        }
        record.room = room;

        if let Some(vacated) = previous {
            self.refresh_availability(vacated);
        }
        if let Some(occupied) = room {
            self.refresh_availability(occupied);
        }
        Ok(())
    }

    /// The hostel a student lives in, resolved through the room
    /// reference (a related field: `student -> room -> hostel`).
    #[must_use]
    pub fn hostel_of(&self, student: StudentId) -> Option<&Hostel> {
        let room = self.students.get(&student)?.room()?;
        let hostel = self.rooms.get(&room)?.hostel()?;
        self.hostels.get(&hostel)
    }

    /// Sets a student's admission date and re-derives `duration`.
    ///
    /// The backward reconciliation runs only when the forward pass
    /// actually moved `duration`: entering a lone admission date must
    /// not conjure a discharge date out of the stale duration value.
    /// Returns whether any field changed.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StudentNotFound`] when the id is
    /// unknown.
    pub fn set_admission_date(
        &mut self,
        student: StudentId,
        date: Option<NaiveDate>,
    ) -> Result<bool, RegistryError> {
        let record = self
            .students
            .get_mut(&student)
            .ok_or(RegistryError::StudentNotFound(student))?;
        let mut changed = record.admission_date() != date;
        record.set_admission_date(date);
        if record.recompute_duration() {
            changed = true;
            record.reconcile_dates();
        }
        Ok(changed)
    }

    /// Sets a student's discharge date and re-derives `duration`. See
    /// [`Self::set_admission_date`] for the trigger rules. Returns
    /// whether any field changed.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StudentNotFound`] when the id is
    /// unknown.
    pub fn set_discharge_date(
        &mut self,
        student: StudentId,
        date: Option<NaiveDate>,
    ) -> Result<bool, RegistryError> {
        let record = self
            .students
            .get_mut(&student)
            .ok_or(RegistryError::StudentNotFound(student))?;
        let mut changed = record.discharge_date() != date;
        record.set_discharge_date(date);
        if record.recompute_duration() {
            changed = true;
            record.reconcile_dates();
        }
        Ok(changed)
    }

    /// Sets a student's stay duration directly, then back-propagates to
    /// the discharge date. Returns whether any field changed.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StudentNotFound`] when the id is
    /// unknown.
    pub fn set_duration(&mut self, student: StudentId, days: i64) -> Result<bool, RegistryError> {
        let record = self
            .students
            .get_mut(&student)
            .ok_or(RegistryError::StudentNotFound(student))?;
        let mut changed = record.duration() != days;
        record.set_duration(days);
        changed |= record.reconcile_dates();
        Ok(changed)
    }

    /// Deletes a student and recomputes the availability of the room
    /// they occupied, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StudentNotFound`] when the id is
    /// unknown.
    pub fn delete_student(&mut self, id: StudentId) -> Result<Student, RegistryError> {
        let student = self
            .students
            .remove(&id)
            .ok_or(RegistryError::StudentNotFound(id))?;
        if let Some(room) = student.room() {
            self.refresh_availability(room);
        }
        Ok(student)
    }

    // ----- internals ---------------------------------------------------

    fn occupant_count(&self, room: RoomId) -> usize {
        self.students
            .values()
            .filter(|student| student.room() == Some(room))
            .count()
    }

    fn refresh_availability(&mut self, room: RoomId) {
        let occupants = self.occupant_count(room);
        if let Some(record) = self.rooms.get_mut(&room) {
            record.recompute_availability(occupants);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn name(s: &str) -> NonEmptyString {
        NonEmptyString::new(s.to_string()).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn blank_registry() -> Registry {
        // Admission defaulting off so date tests start from a clean
        // record.
        let mut config = Config::default();
        config.default_admission_to_today = false;
        Registry::with_config(config)
    }

    fn add_hostel(registry: &mut Registry) -> HostelId {
        registry.add_hostel(|id| {
            Hostel::new(
                id,
                name("Sunrise Hostel"),
                name("SUN"),
                name("01 23 45 67 89"),
                name("06 12 34 56 78"),
            )
        })
    }

    #[test]
    fn availability_tracks_occupancy() {
        let mut registry = blank_registry();
        let room = registry.add_room(101, 4).unwrap();

        let students: Vec<_> = (0..3)
            .map(|_| registry.add_student(Student::new))
            .collect();
        for &student in &students {
            registry.assign_room(student, Some(room)).unwrap();
        }
        assert_eq!(registry.availability(room), Some(1));

        let fourth = registry.add_student(Student::new);
        registry.assign_room(fourth, Some(room)).unwrap();
        assert_eq!(registry.availability(room), Some(0));

        // Over-booking is not rejected; availability goes negative.
        let fifth = registry.add_student(Student::new);
        registry.assign_room(fifth, Some(room)).unwrap();
        assert_eq!(registry.availability(room), Some(-1));

        assert_eq!(registry.occupants(room).count(), 5);
    }

    #[test]
    fn unassigning_frees_a_bed() {
        let mut registry = blank_registry();
        let room = registry.add_room(101, 2).unwrap();
        let student = registry.add_student(Student::new);

        registry.assign_room(student, Some(room)).unwrap();
        assert_eq!(registry.availability(room), Some(1));

        registry.assign_room(student, None).unwrap();
        assert_eq!(registry.availability(room), Some(2));
    }

    #[test]
    fn moving_rooms_updates_both_availabilities() {
        let mut registry = blank_registry();
        let old = registry.add_room(101, 1).unwrap();
        let new = registry.add_room(102, 1).unwrap();
        let student = registry.add_student(Student::new);

        registry.assign_room(student, Some(old)).unwrap();
        registry.assign_room(student, Some(new)).unwrap();

        assert_eq!(registry.availability(old), Some(1));
        assert_eq!(registry.availability(new), Some(0));
    }

    #[test]
    fn capacity_change_recomputes_availability() {
        let mut registry = blank_registry();
        let room = registry.add_room(101, 4).unwrap();
        let student = registry.add_student(Student::new);
        registry.assign_room(student, Some(room)).unwrap();

        registry.set_capacity(room, 1).unwrap();
        assert_eq!(registry.availability(room), Some(0));

        registry.set_capacity(room, 0).unwrap();
        assert_eq!(registry.availability(room), Some(-1));
    }

    #[test]
    fn room_display_name_pads_the_number() {
        let mut registry = blank_registry();
        let room = registry.add_room(7, 2).unwrap();
        assert_eq!(registry.room_display_name(room).as_deref(), Some("007"));

        // An explicit name takes precedence over the padded number.
        registry
            .set_room_name(room, Some("Blue Dorm".to_string()))
            .unwrap();
        assert_eq!(
            registry.room_display_name(room).as_deref(),
            Some("Blue Dorm")
        );

        let ghost = RoomId::from_u32(99).unwrap();
        assert_eq!(registry.room_display_name(ghost), None);
    }

    #[test]
    fn duplicate_room_number_rejected() {
        let mut registry = blank_registry();
        let first = registry.add_room(101, 4).unwrap();

        let err = registry.add_room(101, 2).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateRoomNumber {
                number: 101,
                existing: first
            }
        );
        assert_eq!(registry.rooms().count(), 1);
    }

    #[test]
    fn rent_validation_goes_through_the_registry() {
        let mut registry = blank_registry();
        let room = registry.add_room(101, 4).unwrap();

        assert!(registry.set_rent(room, Decimal::from(450)).unwrap());
        let err = registry.set_rent(room, Decimal::from(-1)).unwrap_err();
        assert_eq!(err, RegistryError::Rent(RentError::Negative(Decimal::from(-1))));
        assert_eq!(registry.room(room).unwrap().rent_amount(), Decimal::from(450));
    }

    #[test]
    fn inactive_amenity_cannot_be_attached() {
        let mut registry = blank_registry();
        let room = registry.add_room(101, 4).unwrap();
        let wifi = registry.add_amenity(name("Wifi"));
        let sauna = registry.add_amenity(name("Sauna"));
        registry.set_amenity_active(sauna, false).unwrap();

        assert!(registry.attach_amenity(room, wifi).unwrap());
        assert!(!registry.attach_amenity(room, wifi).unwrap());

        let err = registry.attach_amenity(room, sauna).unwrap_err();
        assert_eq!(err, RegistryError::InactiveAmenity(sauna));
        assert_eq!(registry.room(room).unwrap().amenities().len(), 1);
    }

    #[test]
    fn deactivation_keeps_existing_attachments() {
        let mut registry = blank_registry();
        let room = registry.add_room(101, 4).unwrap();
        let wifi = registry.add_amenity(name("Wifi"));
        registry.attach_amenity(room, wifi).unwrap();

        registry.set_amenity_active(wifi, false).unwrap();
        assert!(registry.room(room).unwrap().amenities().contains(&wifi));

        registry.delete_amenity(wifi).unwrap();
        assert!(registry.room(room).unwrap().amenities().is_empty());
    }

    #[test]
    fn hostel_of_resolves_through_the_room() {
        let mut registry = blank_registry();
        let hostel = add_hostel(&mut registry);
        let room = registry.add_room(101, 4).unwrap();
        registry.assign_hostel(room, Some(hostel)).unwrap();
        let student = registry.add_student(Student::new);

        assert!(registry.hostel_of(student).is_none());

        registry.assign_room(student, Some(room)).unwrap();
        assert_eq!(registry.hostel_of(student).map(Hostel::id), Some(hostel));
    }

    #[test]
    fn date_edits_drive_duration() {
        let mut registry = blank_registry();
        let student = registry.add_student(Student::new);

        registry
            .set_admission_date(student, Some(date(2024, 1, 1)))
            .unwrap();
        registry
            .set_discharge_date(student, Some(date(2024, 1, 11)))
            .unwrap();

        assert_eq!(registry.student(student).unwrap().duration(), 10);
    }

    #[test]
    fn duration_edit_drives_discharge_date() {
        let mut registry = blank_registry();
        let student = registry.add_student(Student::new);
        registry
            .set_admission_date(student, Some(date(2024, 1, 1)))
            .unwrap();

        assert!(registry.set_duration(student, 5).unwrap());
        assert_eq!(
            registry.student(student).unwrap().discharge_date(),
            Some(date(2024, 1, 6))
        );
    }

    #[test]
    fn settled_stay_reports_no_change() {
        let mut registry = blank_registry();
        let student = registry.add_student(Student::new);
        registry
            .set_admission_date(student, Some(date(2024, 1, 1)))
            .unwrap();
        registry
            .set_discharge_date(student, Some(date(2024, 1, 11)))
            .unwrap();

        // Redundant notifications with the same values are no-ops.
        assert!(!registry
            .set_admission_date(student, Some(date(2024, 1, 1)))
            .unwrap());
        assert!(!registry
            .set_discharge_date(student, Some(date(2024, 1, 11)))
            .unwrap());
        assert!(!registry.set_duration(student, 10).unwrap());
    }

    #[test]
    fn admission_defaults_to_today_when_configured() {
        let mut registry = Registry::new();
        let student = registry.add_student(Student::new);
        assert_eq!(
            registry.student(student).unwrap().admission_date(),
            Some(Utc::now().date_naive())
        );

        let mut registry = blank_registry();
        let student = registry.add_student(Student::new);
        assert_eq!(registry.student(student).unwrap().admission_date(), None);
    }

    #[test]
    fn deleting_a_room_clears_occupants() {
        let mut registry = blank_registry();
        let room = registry.add_room(101, 4).unwrap();
        let student = registry.add_student(Student::new);
        registry.assign_room(student, Some(room)).unwrap();

        registry.delete_room(room).unwrap();
        assert_eq!(registry.student(student).unwrap().room(), None);
        assert_eq!(registry.availability(room), None);
    }

    #[test]
    fn deleting_a_student_frees_the_bed() {
        let mut registry = blank_registry();
        let room = registry.add_room(101, 4).unwrap();
        let student = registry.add_student(Student::new);
        registry.assign_room(student, Some(room)).unwrap();
        assert_eq!(registry.availability(room), Some(3));

        registry.delete_student(student).unwrap();
        assert_eq!(registry.availability(room), Some(4));
    }

    #[test]
    fn deleting_a_hostel_detaches_its_rooms() {
        let mut registry = blank_registry();
        let hostel = add_hostel(&mut registry);
        let room = registry.add_room(101, 4).unwrap();
        registry.assign_hostel(room, Some(hostel)).unwrap();

        registry.delete_hostel(hostel).unwrap();
        assert_eq!(registry.room(room).unwrap().hostel(), None);
        assert_eq!(registry.rooms().count(), 1);
    }

    #[test]
    fn missing_records_are_reported() {
        let mut registry = blank_registry();
        let ghost_room = RoomId::from_u32(9).unwrap();
        let ghost_student = StudentId::from_u32(9).unwrap();

        assert_eq!(
            registry.set_rent(ghost_room, Decimal::ZERO).unwrap_err(),
            RegistryError::RoomNotFound(ghost_room)
        );
        assert_eq!(
            registry.set_duration(ghost_student, 1).unwrap_err(),
            RegistryError::StudentNotFound(ghost_student)
        );
    }
}
