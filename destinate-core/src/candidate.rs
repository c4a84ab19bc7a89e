//! Candidate destinations and their raw ingestion records.
//!
//! Ingestion collaborators hand over [`CandidateRecord`]s whose numeric
//! fields may still be text. Converting a record into a [`Candidate`]
//! coerces and validates every scored attribute, so a malformed value is
//! reported by field instead of silently becoming `NaN`.

use std::fmt;

use thiserror::Error;

use crate::{Location, LocationError};

/// Highest rating accepted on the review scale.
pub const MAX_RATING: f64 = 5.0;

/// A numeric field as supplied by an ingestion collaborator.
///
/// Either an actual number or text expected to contain one.
///
/// # Examples
/// ```
/// use destinate_core::FieldValue;
///
/// assert_eq!(FieldValue::from(4.5).coerce(), Some(4.5));
/// assert_eq!(FieldValue::from(" 25000 ").coerce(), Some(25000.0));
/// assert_eq!(FieldValue::from("n/a").coerce(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum FieldValue {
    /// A value that is already numeric.
    Number(f64),
    /// A textual value to be parsed as a number.
    Text(String),
}

impl FieldValue {
    /// Parse the value as a finite `f64`.
    ///
    /// Text is trimmed before parsing. Returns `None` when the text is not a
    /// number or the value is not finite.
    #[must_use]
    pub fn coerce(&self) -> Option<f64> {
        let value = match self {
            Self::Number(number) => *number,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Identifies a numeric attribute of a candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateField {
    /// Entry price.
    Price,
    /// Review rating.
    Rating,
    /// Review count.
    RatingCount,
    /// Latitude in decimal degrees.
    Latitude,
    /// Longitude in decimal degrees.
    Longitude,
}

impl CandidateField {
    /// Return the field name as used in ingestion records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Rating => "rating",
            Self::RatingCount => "rating_count",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        }
    }
}

impl fmt::Display for CandidateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while validating a candidate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CandidateError {
    /// The candidate name was empty or whitespace.
    #[error("candidate name must not be empty")]
    MissingName,
    /// A required numeric field was absent.
    #[error("{field} is missing")]
    Missing {
        /// Absent field.
        field: CandidateField,
    },
    /// A numeric field could not be parsed as a finite number.
    #[error("{field} value '{raw}' is not a number")]
    Malformed {
        /// Offending field.
        field: CandidateField,
        /// Raw value as supplied.
        raw: String,
    },
    /// A numeric field was outside its domain.
    #[error("{field} value {value} is out of range ({expected})")]
    OutOfRange {
        /// Offending field.
        field: CandidateField,
        /// Parsed value.
        value: f64,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
    /// The coordinates did not form a valid location.
    #[error(transparent)]
    Location(#[from] LocationError),
}

/// A candidate record as supplied by an ingestion collaborator.
///
/// Every numeric field is optional and may be text; use
/// [`Candidate::try_from`] to validate it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateRecord {
    /// Display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Entry price.
    #[cfg_attr(feature = "serde", serde(default))]
    pub price: Option<FieldValue>,
    /// Review rating on a `0..=5` scale.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: Option<FieldValue>,
    /// Number of reviews.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating_count: Option<FieldValue>,
    /// Latitude in decimal degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub latitude: Option<FieldValue>,
    /// Longitude in decimal degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub longitude: Option<FieldValue>,
}

impl CandidateRecord {
    /// Build a record from already-numeric values.
    ///
    /// # Examples
    /// ```
    /// use destinate_core::{Candidate, CandidateRecord};
    ///
    /// let record = CandidateRecord::numeric("Kawah Putih", 30000.0, 4.6, 900.0, -7.166, 107.402);
    /// let candidate = Candidate::try_from(record).expect("valid record");
    /// assert_eq!(candidate.name(), "Kawah Putih");
    /// ```
    #[must_use]
    pub fn numeric(
        name: impl Into<String>,
        price: f64,
        rating: f64,
        rating_count: f64,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            price: Some(price.into()),
            rating: Some(rating.into()),
            rating_count: Some(rating_count.into()),
            latitude: Some(latitude.into()),
            longitude: Some(longitude.into()),
        }
    }
}

/// A validated destination ready to be scored.
///
/// Invariants: `price >= 0`, `0 <= rating <= 5`, `rating_count >= 0`, all
/// finite, and `location` within geographic range.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "CandidateRecord")
)]
pub struct Candidate {
    name: String,
    price: f64,
    rating: f64,
    rating_count: f64,
    #[cfg_attr(feature = "serde", serde(flatten))]
    location: Location,
}

impl Candidate {
    /// Validate and construct a [`Candidate`] from typed values.
    ///
    /// # Errors
    /// Returns [`CandidateError`] when the name is blank or a numeric value
    /// is non-finite or out of its domain.
    ///
    /// # Examples
    /// ```
    /// use destinate_core::{Candidate, CandidateError, Location};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let location = Location::new(-8.34, 115.09)?;
    /// let candidate = Candidate::new("Ubud", 50000.0, 4.7, 1500.0, location)?;
    /// assert_eq!(candidate.rating(), 4.7);
    ///
    /// let err = Candidate::new("Ubud", 50000.0, 5.2, 1500.0, location).unwrap_err();
    /// assert!(matches!(err, CandidateError::OutOfRange { .. }));
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        name: impl Into<String>,
        price: f64,
        rating: f64,
        rating_count: f64,
        location: Location,
    ) -> Result<Self, CandidateError> {
        let label: String = name.into();
        if label.trim().is_empty() {
            return Err(CandidateError::MissingName);
        }
        Ok(Self {
            name: label,
            price: require_non_negative(CandidateField::Price, price)?,
            rating: require_rating(rating)?,
            rating_count: require_non_negative(CandidateField::RatingCount, rating_count)?,
            location,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry price.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Review rating on a `0..=5` scale.
    #[must_use]
    pub const fn rating(&self) -> f64 {
        self.rating
    }

    /// Number of reviews.
    #[must_use]
    pub const fn rating_count(&self) -> f64 {
        self.rating_count
    }

    /// Geographic position.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }
}

impl TryFrom<CandidateRecord> for Candidate {
    type Error = CandidateError;

    fn try_from(record: CandidateRecord) -> Result<Self, Self::Error> {
        Self::try_from(&record)
    }
}

impl TryFrom<&CandidateRecord> for Candidate {
    type Error = CandidateError;

    fn try_from(record: &CandidateRecord) -> Result<Self, Self::Error> {
        let price = coerce_field(CandidateField::Price, record.price.as_ref())?;
        let rating = coerce_field(CandidateField::Rating, record.rating.as_ref())?;
        let rating_count = coerce_field(CandidateField::RatingCount, record.rating_count.as_ref())?;
        let latitude = coerce_field(CandidateField::Latitude, record.latitude.as_ref())?;
        let longitude = coerce_field(CandidateField::Longitude, record.longitude.as_ref())?;
        let location = Location::new(latitude, longitude)?;
        Self::new(record.name.clone(), price, rating, rating_count, location)
    }
}

fn coerce_field(field: CandidateField, value: Option<&FieldValue>) -> Result<f64, CandidateError> {
    let raw = value.ok_or(CandidateError::Missing { field })?;
    raw.coerce().ok_or_else(|| CandidateError::Malformed {
        field,
        raw: raw.to_string(),
    })
}

fn require_non_negative(field: CandidateField, value: f64) -> Result<f64, CandidateError> {
    if !value.is_finite() {
        return Err(CandidateError::Malformed {
            field,
            raw: value.to_string(),
        });
    }
    if value < 0.0 {
        return Err(CandidateError::OutOfRange {
            field,
            value,
            expected: "must be non-negative",
        });
    }
    Ok(value)
}

fn require_rating(value: f64) -> Result<f64, CandidateError> {
    let rating = require_non_negative(CandidateField::Rating, value)?;
    if rating > MAX_RATING {
        return Err(CandidateError::OutOfRange {
            field: CandidateField::Rating,
            value: rating,
            expected: "must be between 0 and 5",
        });
    }
    Ok(rating)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn record() -> CandidateRecord {
        CandidateRecord::numeric("Tanah Lot", 60000.0, 4.6, 3200.0, -8.6212, 115.0868)
    }

    #[rstest]
    fn valid_record_converts(record: CandidateRecord) {
        let candidate = Candidate::try_from(record).expect("valid record");
        assert_eq!(candidate.name(), "Tanah Lot");
        assert_eq!(candidate.price(), 60000.0);
        assert_eq!(candidate.rating_count(), 3200.0);
        assert_eq!(candidate.location().latitude(), -8.6212);
    }

    #[rstest]
    fn numeric_text_is_coerced(mut record: CandidateRecord) {
        record.price = Some(" 45000 ".into());
        record.rating = Some("4.25".into());
        let candidate = Candidate::try_from(record).expect("numeric text");
        assert_eq!(candidate.price(), 45000.0);
        assert_eq!(candidate.rating(), 4.25);
    }

    #[rstest]
    fn malformed_text_names_the_field(mut record: CandidateRecord) {
        record.rating_count = Some("lots".into());
        let err = Candidate::try_from(record).expect_err("malformed count");
        assert_eq!(
            err,
            CandidateError::Malformed {
                field: CandidateField::RatingCount,
                raw: "lots".to_owned(),
            }
        );
    }

    #[rstest]
    fn missing_field_is_reported(mut record: CandidateRecord) {
        record.longitude = None;
        let err = Candidate::try_from(record).expect_err("missing longitude");
        assert_eq!(
            err,
            CandidateError::Missing {
                field: CandidateField::Longitude
            }
        );
    }

    #[rstest]
    #[case::negative_price(CandidateField::Price, -1.0)]
    #[case::rating_above_scale(CandidateField::Rating, 5.5)]
    #[case::negative_rating(CandidateField::Rating, -0.1)]
    #[case::negative_count(CandidateField::RatingCount, -3.0)]
    fn out_of_range_values_are_rejected(
        mut record: CandidateRecord,
        #[case] field: CandidateField,
        #[case] value: f64,
    ) {
        match field {
            CandidateField::Price => record.price = Some(value.into()),
            CandidateField::Rating => record.rating = Some(value.into()),
            CandidateField::RatingCount => record.rating_count = Some(value.into()),
            CandidateField::Latitude | CandidateField::Longitude => {
                panic!("coordinates are covered by location tests")
            }
        }
        let err = Candidate::try_from(record).expect_err("out of range");
        assert!(
            matches!(err, CandidateError::OutOfRange { field: f, .. } if f == field),
            "unexpected error {err:?}"
        );
    }

    #[rstest]
    fn invalid_latitude_is_rejected(mut record: CandidateRecord) {
        record.latitude = Some(95.0.into());
        let err = Candidate::try_from(record).expect_err("latitude > 90");
        assert!(matches!(
            err,
            CandidateError::Location(LocationError::LatitudeOutOfRange { .. })
        ));
    }

    #[rstest]
    fn blank_name_is_rejected(mut record: CandidateRecord) {
        record.name = "   ".to_owned();
        let err = Candidate::try_from(record).expect_err("blank name");
        assert_eq!(err, CandidateError::MissingName);
    }

    #[rstest]
    fn non_finite_number_is_malformed() {
        assert_eq!(FieldValue::Number(f64::NAN).coerce(), None);
        assert_eq!(FieldValue::from("inf").coerce(), None);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialises_mixed_numeric_and_text_fields() {
        let json = r#"{
            "name": "Borobudur",
            "price": "50000",
            "rating": 4.8,
            "rating_count": 12000,
            "latitude": -7.6079,
            "longitude": "110.2038"
        }"#;
        let record: CandidateRecord = serde_json::from_str(json).expect("record json");
        let candidate = Candidate::try_from(record).expect("valid candidate");
        assert_eq!(candidate.price(), 50000.0);
        assert_eq!(candidate.location().longitude(), 110.2038);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serialises_flat_fields(record: CandidateRecord) {
        let candidate = Candidate::try_from(record).expect("valid record");
        let value = serde_json::to_value(&candidate).expect("serialise");
        assert_eq!(value["name"], "Tanah Lot");
        assert_eq!(value["latitude"], -8.6212);
        assert_eq!(value["rating"], 4.6);
    }
}
