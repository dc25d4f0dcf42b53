//! Hostel facility records.

use chrono::{DateTime, Utc};
use non_empty_string::NonEmptyString;

use crate::domain::HostelId;

/// A hostel facility: the building that rooms belong to.
///
/// Name, code, and the two phone numbers are required fields; the
/// address block is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hostel {
    /// Identifier of this hostel.
    pub(crate) id: HostelId,

    /// Facility name.
    pub(crate) name: NonEmptyString,

    /// Short facility code, shown alongside the name.
    pub(crate) code: NonEmptyString,

    /// Landline phone number.
    pub(crate) phone: NonEmptyString,

    /// Mobile phone number.
    pub(crate) mobile: NonEmptyString,

    /// Street address line.
    pub(crate) street: Option<String>,

    /// Second street address line.
    pub(crate) street2: Option<String>,

    /// Postal code.
    pub(crate) zip: Option<String>,

    /// City.
    pub(crate) city: Option<String>,

    /// Contact email.
    pub(crate) email: Option<String>,

    /// State or region name.
    pub(crate) state: Option<String>,

    /// Country name.
    pub(crate) country: Option<String>,

    /// When the record was created.
    pub(crate) created: DateTime<Utc>,
}

impl Hostel {
    /// Constructs a hostel from its required fields.
    #[must_use]
    pub fn new(
        id: HostelId,
        name: NonEmptyString,
        code: NonEmptyString,
        phone: NonEmptyString,
        mobile: NonEmptyString,
    ) -> Self {
        Self {
            id,
            name,
            code,
            phone,
            mobile,
            street: None,
            street2: None,
            zip: None,
            city: None,
            email: None,
            state: None,
            country: None,
            created: Utc::now(),
        }
    }

    /// Sets the street address lines.
    #[must_use]
    pub fn with_street(mut self, street: String, street2: Option<String>) -> Self {
        self.street = Some(street);
        self.street2 = street2;
        self
    }

    /// Sets the postal code and city.
    #[must_use]
    pub fn with_city(mut self, zip: String, city: String) -> Self {
        self.zip = Some(zip);
        self.city = Some(city);
        self
    }

    /// Sets the contact email.
    #[must_use]
    pub fn with_email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    /// Sets the state/region and country.
    #[must_use]
    pub fn with_region(mut self, state: Option<String>, country: Option<String>) -> Self {
        self.state = state;
        self.country = country;
        self
    }

    /// Identifier of this hostel.
    #[must_use]
    pub const fn id(&self) -> HostelId {
        self.id
    }

    /// Facility name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Short facility code.
    #[must_use]
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Landline phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Mobile phone number.
    #[must_use]
    pub fn mobile(&self) -> &str {
        self.mobile.as_str()
    }

    /// Contact email, if set.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// City, if set.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// The derived display name: the facility name followed by the code
    /// in parentheses, e.g. `"Sunrise Hostel (SUN)"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }

    /// When the record was created.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> NonEmptyString {
        NonEmptyString::new(s.to_string()).unwrap()
    }

    fn hostel() -> Hostel {
        Hostel::new(
            HostelId::from_u32(1).unwrap(),
            name("Sunrise Hostel"),
            name("SUN"),
            name("01 23 45 67 89"),
            name("06 12 34 56 78"),
        )
    }

    #[test]
    fn display_name_includes_code() {
        assert_eq!(hostel().display_name(), "Sunrise Hostel (SUN)");
    }

    #[test]
    fn builder_fills_optional_fields() {
        let hostel = hostel()
            .with_street("1 rue de la Paix".to_string(), None)
            .with_city("75002".to_string(), "Paris".to_string())
            .with_email("front@sunrise.example".to_string());

        assert_eq!(hostel.city(), Some("Paris"));
        assert_eq!(hostel.email(), Some("front@sunrise.example"));
        assert_eq!(hostel.street.as_deref(), Some("1 rue de la Paix"));
        assert_eq!(hostel.street2, None);
    }
}
