//! Student records and the stay-duration reconciler.
//!
//! A stay is represented twice on the record: as the
//! `admission_date`/`discharge_date` pair and as the `duration` day
//! count. Either representation can be edited independently, so the two
//! are kept consistent by a pair of computations:
//!
//! - [`Student::recompute_duration`] derives `duration` from the dates
//!   (forward direction, triggered when either date changes);
//! - [`Student::reconcile_dates`] derives `discharge_date` from
//!   `admission_date` and `duration` (backward direction, triggered when
//!   `duration` changes).
//!
//! The surrounding platform delivers change notifications redundantly,
//! sometimes against transient unsaved copies of a record, so both
//! functions are pure over the record value, write a field only when the
//! new value actually differs, and report whether anything changed. A
//! forward pass followed by a backward pass always reaches a fixed
//! point; re-invoking either afterwards is a no-op.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::domain::{RoomId, StudentId};

/// Student gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Other or undisclosed.
    Other,
}

/// A student occupying (or registered to occupy) a hostel room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Identifier of this student.
    pub(crate) id: StudentId,

    /// First name.
    pub(crate) first_name: Option<String>,

    /// Last name.
    pub(crate) last_name: Option<String>,

    /// Gender.
    pub(crate) gender: Option<Gender>,

    /// The room the student occupies, if assigned.
    pub(crate) room: Option<RoomId>,

    /// Date the student moved in.
    pub(crate) admission_date: Option<NaiveDate>,

    /// Date the student moved (or is due to move) out.
    pub(crate) discharge_date: Option<NaiveDate>,

    /// Length of the stay in whole days. Derived from the dates when
    /// both are present, but also directly editable, in which case the
    /// discharge date is re-derived from it.
    pub(crate) duration: i64,

    /// When the record was created.
    pub(crate) created: DateTime<Utc>,
}

impl Student {
    /// Constructs a student record with no dates and zero duration.
    #[must_use]
    pub fn new(id: StudentId) -> Self {
        Self {
            id,
            first_name: None,
            last_name: None,
            gender: None,
            room: None,
            admission_date: None,
            discharge_date: None,
            duration: 0,
            created: Utc::now(),
        }
    }

    /// Sets the first and last name.
    #[must_use]
    pub fn with_name(mut self, first: String, last: String) -> Self {
        self.first_name = Some(first);
        self.last_name = Some(last);
        self
    }

    /// Sets the gender.
    #[must_use]
    pub const fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Identifier of this student.
    #[must_use]
    pub const fn id(&self) -> StudentId {
        self.id
    }

    /// First name, if recorded.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Last name, if recorded.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Gender, if recorded.
    #[must_use]
    pub const fn gender(&self) -> Option<Gender> {
        self.gender
    }

    /// The room the student occupies, if assigned.
    #[must_use]
    pub const fn room(&self) -> Option<RoomId> {
        self.room
    }

    /// Date the student moved in.
    #[must_use]
    pub const fn admission_date(&self) -> Option<NaiveDate> {
        self.admission_date
    }

    /// Sets the admission date.
    ///
    /// This only writes the field. Trigger [`Self::recompute_duration`]
    /// (and then [`Self::reconcile_dates`]) afterwards, as the store's
    /// setters do.
    pub const fn set_admission_date(&mut self, date: Option<NaiveDate>) {
        self.admission_date = date;
    }

    /// Date the student moved (or is due to move) out.
    #[must_use]
    pub const fn discharge_date(&self) -> Option<NaiveDate> {
        self.discharge_date
    }

    /// Sets the discharge date. See [`Self::set_admission_date`].
    pub const fn set_discharge_date(&mut self, date: Option<NaiveDate>) {
        self.discharge_date = date;
    }

    /// Length of the stay in whole days.
    #[must_use]
    pub const fn duration(&self) -> i64 {
        self.duration
    }

    /// Sets the duration directly. See [`Self::set_admission_date`];
    /// the matching trigger here is [`Self::reconcile_dates`].
    pub const fn set_duration(&mut self, days: i64) {
        self.duration = days;
    }

    /// Forward computation: derives `duration` from the date pair.
    ///
    /// When both dates are present, `duration` becomes the signed number
    /// of whole days between them. When either date is absent, the field
    /// keeps its last explicitly-set value: resetting it here would
    /// destroy a user-entered duration before [`Self::reconcile_dates`]
    /// can anchor it to a newly entered admission date.
    ///
    /// Returns whether the field changed. Idempotent.
    pub fn recompute_duration(&mut self) -> bool {
        let (Some(admission), Some(discharge)) = (self.admission_date, self.discharge_date) else {
            return false;
        };

        let duration = discharge.signed_duration_since(admission).num_days();
        if self.duration == duration {
            return false;
        }
        self.duration = duration;
        true
    }

    /// Backward computation: derives `discharge_date` from
    /// `admission_date` and `duration`.
    ///
    /// - Both dates present and disagreeing with `duration`: the
    ///   discharge date moves to `admission_date + duration` days.
    /// - Admission date present, discharge absent: the discharge date is
    ///   anchored at `admission_date + duration` days.
    /// - Admission date absent: no action; a bare duration cannot anchor
    ///   a date.
    ///
    /// Returns whether the field changed. Idempotent, and convergent
    /// with [`Self::recompute_duration`]: once the dates agree with the
    /// duration, further invocations of either computation in any order
    /// change nothing.
    pub fn reconcile_dates(&mut self) -> bool {
        let Some(admission) = self.admission_date else {
            return false;
        };

        if let Some(discharge) = self.discharge_date {
            let derived = discharge.signed_duration_since(admission).num_days();
            if derived == self.duration {
                return false;
            }
        }

        let Some(target) = TimeDelta::try_days(self.duration)
            .and_then(|delta| admission.checked_add_signed(delta))
        else {
            // Out-of-range arithmetic: leave the record untouched
            // rather than writing a clamped date.
            tracing::debug!(
                student = %self.id,
                duration = self.duration,
                "discharge date out of range, skipping reconciliation"
            );
            return false;
        };

        if self.discharge_date == Some(target) {
            return false;
        }
        self.discharge_date = Some(target);
        true
    }

    /// When the record was created.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn student() -> Student {
        Student::new(StudentId::from_u32(1).unwrap())
    }

    #[test]
    fn duration_derived_from_both_dates() {
        let mut s = student();
        s.set_admission_date(Some(date(2024, 1, 1)));
        s.set_discharge_date(Some(date(2024, 1, 11)));

        assert!(s.recompute_duration());
        assert_eq!(s.duration(), 10);
    }

    #[test]
    fn lone_admission_date_leaves_duration_alone() {
        let mut s = student();
        s.set_duration(7);
        s.set_admission_date(Some(date(2024, 1, 1)));

        assert!(!s.recompute_duration());
        assert_eq!(s.duration(), 7);
    }

    #[test]
    fn lone_discharge_date_leaves_duration_alone() {
        let mut s = student();
        s.set_duration(7);
        s.set_discharge_date(Some(date(2024, 3, 1)));

        assert!(!s.recompute_duration());
        assert_eq!(s.duration(), 7);
    }

    #[test]
    fn duration_anchors_missing_discharge_date() {
        let mut s = student();
        s.set_admission_date(Some(date(2024, 1, 1)));
        s.set_duration(5);

        assert!(s.reconcile_dates());
        assert_eq!(s.discharge_date(), Some(date(2024, 1, 6)));
    }

    #[test]
    fn duration_edit_moves_discharge_date() {
        let mut s = student();
        s.set_admission_date(Some(date(2024, 1, 1)));
        s.set_discharge_date(Some(date(2024, 1, 11)));
        s.recompute_duration();

        s.set_duration(20);
        assert!(s.reconcile_dates());
        assert_eq!(s.discharge_date(), Some(date(2024, 1, 21)));
        // The forward pass now agrees with the new dates.
        assert!(!s.recompute_duration());
    }

    #[test]
    fn bare_duration_cannot_anchor_a_date() {
        let mut s = student();
        s.set_duration(5);

        assert!(!s.reconcile_dates());
        assert_eq!(s.discharge_date(), None);
        assert_eq!(s.admission_date(), None);
    }

    #[test]
    fn settled_record_is_a_fixed_point() {
        let mut s = student();
        s.set_admission_date(Some(date(2024, 1, 1)));
        s.set_discharge_date(Some(date(2024, 1, 11)));
        s.recompute_duration();
        s.reconcile_dates();

        let settled = s.clone();
        for _ in 0..5 {
            assert!(!s.recompute_duration());
            assert!(!s.reconcile_dates());
        }
        assert_eq!(s, settled);
    }

    #[test_case(0; "same day discharge")]
    #[test_case(1; "overnight")]
    #[test_case(365; "one year")]
    #[test_case(-3; "discharge before admission")]
    fn forward_then_backward_converges(duration: i64) {
        let mut s = student();
        s.set_admission_date(Some(date(2024, 6, 15)));
        s.set_duration(duration);

        // Backward anchors the discharge date, forward re-derives the
        // same duration: two invocations reach the fixed point.
        assert!(s.reconcile_dates());
        assert!(!s.recompute_duration());

        let settled = s.clone();
        assert!(!s.reconcile_dates());
        assert!(!s.recompute_duration());
        assert_eq!(s, settled);
        assert_eq!(s.duration(), duration);
    }

    #[test]
    fn negative_duration_round_trips() {
        let mut s = student();
        s.set_admission_date(Some(date(2024, 1, 10)));
        s.set_discharge_date(Some(date(2024, 1, 7)));

        assert!(s.recompute_duration());
        assert_eq!(s.duration(), -3);
        assert!(!s.reconcile_dates());
    }

    #[test]
    fn out_of_range_duration_is_ignored() {
        let mut s = student();
        s.set_admission_date(Some(date(2024, 1, 1)));
        s.set_duration(i64::MAX);

        assert!(!s.reconcile_dates());
        assert_eq!(s.discharge_date(), None);
    }

    #[test]
    fn computations_work_on_detached_copies() {
        // A transient unsaved copy behaves exactly like the original.
        let mut s = student();
        s.set_admission_date(Some(date(2024, 2, 1)));
        s.set_discharge_date(Some(date(2024, 2, 15)));

        let mut shadow = s.clone();
        assert!(s.recompute_duration());
        assert!(shadow.recompute_duration());
        assert_eq!(s, shadow);
    }
}
