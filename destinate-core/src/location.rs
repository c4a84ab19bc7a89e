//! Validated geographic positions.

use geo::{Coord, Point};
use thiserror::Error;

/// A WGS84 position in signed decimal degrees.
///
/// Stored as a [`Coord`] with `x = longitude` and `y = latitude`. Values are
/// validated on construction: both must be finite, latitude must lie in
/// `-90..=90` and longitude in `-180..=180`.
///
/// # Examples
/// ```
/// use destinate_core::Location;
///
/// # fn main() -> Result<(), destinate_core::LocationError> {
/// let jakarta = Location::new(-6.2088, 106.8456)?;
/// assert_eq!(jakarta.latitude(), -6.2088);
/// assert_eq!(jakarta.coord().x, 106.8456);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "LatLon", into = "LatLon")
)]
pub struct Location {
    coord: Coord<f64>,
}

/// Errors returned by [`Location::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LocationError {
    /// Latitude was `NaN` or infinite.
    #[error("latitude must be a finite number, got {value}")]
    NonFiniteLatitude {
        /// Rejected value.
        value: f64,
    },
    /// Longitude was `NaN` or infinite.
    #[error("longitude must be a finite number, got {value}")]
    NonFiniteLongitude {
        /// Rejected value.
        value: f64,
    },
    /// Latitude fell outside `-90..=90`.
    #[error("latitude {value} is outside -90..=90")]
    LatitudeOutOfRange {
        /// Rejected value.
        value: f64,
    },
    /// Longitude fell outside `-180..=180`.
    #[error("longitude {value} is outside -180..=180")]
    LongitudeOutOfRange {
        /// Rejected value.
        value: f64,
    },
}

impl Location {
    /// Validate and construct a [`Location`] from latitude and longitude.
    ///
    /// # Errors
    /// Returns [`LocationError`] when either value is non-finite or outside
    /// its geographic range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !latitude.is_finite() {
            return Err(LocationError::NonFiniteLatitude { value: latitude });
        }
        if !longitude.is_finite() {
            return Err(LocationError::NonFiniteLongitude { value: longitude });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::LatitudeOutOfRange { value: latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::LongitudeOutOfRange { value: longitude });
        }
        Ok(Self {
            coord: Coord {
                x: longitude,
                y: latitude,
            },
        })
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coord.y
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coord.x
    }

    /// The underlying `geo` coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn coord(&self) -> Coord<f64> {
        self.coord
    }
}

impl TryFrom<Coord<f64>> for Location {
    type Error = LocationError;

    fn try_from(coord: Coord<f64>) -> Result<Self, Self::Error> {
        Self::new(coord.y, coord.x)
    }
}

impl From<Location> for Point<f64> {
    fn from(location: Location) -> Self {
        Self::from(location.coord)
    }
}

/// Wire shape for [`Location`]: named latitude and longitude fields.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct LatLon {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<LatLon> for Location {
    type Error = LocationError;

    fn try_from(value: LatLon) -> Result<Self, Self::Error> {
        Self::new(value.latitude, value.longitude)
    }
}

#[cfg(feature = "serde")]
impl From<Location> for LatLon {
    fn from(location: Location) -> Self {
        Self {
            latitude: location.latitude(),
            longitude: location.longitude(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(0.0, 0.0)]
    fn accepts_boundary_coordinates(#[case] latitude: f64, #[case] longitude: f64) {
        let location = Location::new(latitude, longitude).expect("boundary is valid");
        assert_eq!(location.latitude(), latitude);
        assert_eq!(location.longitude(), longitude);
    }

    #[rstest]
    #[case(90.5, 0.0, LocationError::LatitudeOutOfRange { value: 90.5 })]
    #[case(-91.0, 0.0, LocationError::LatitudeOutOfRange { value: -91.0 })]
    #[case(0.0, 180.1, LocationError::LongitudeOutOfRange { value: 180.1 })]
    #[case(0.0, -200.0, LocationError::LongitudeOutOfRange { value: -200.0 })]
    #[case(f64::INFINITY, 0.0, LocationError::NonFiniteLatitude { value: f64::INFINITY })]
    fn rejects_invalid_coordinates(
        #[case] latitude: f64,
        #[case] longitude: f64,
        #[case] expected: LocationError,
    ) {
        let err = Location::new(latitude, longitude).expect_err("invalid coordinates");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn rejects_nan_longitude() {
        let err = Location::new(0.0, f64::NAN).expect_err("NaN longitude");
        assert!(matches!(err, LocationError::NonFiniteLongitude { .. }));
    }

    #[rstest]
    fn converts_from_geo_coordinate() {
        let location = Location::try_from(Coord { x: 115.1707, y: -8.7222 }).expect("valid");
        assert_eq!(location.latitude(), -8.7222);
        let point: Point<f64> = location.into();
        assert_eq!(point.x(), 115.1707);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialising_validates_range() {
        let ok: Location =
            serde_json::from_str(r#"{"latitude":-6.2,"longitude":106.8}"#).expect("valid json");
        assert_eq!(ok.longitude(), 106.8);
        let err = serde_json::from_str::<Location>(r#"{"latitude":120.0,"longitude":0.0}"#);
        assert!(err.is_err());
    }
}
