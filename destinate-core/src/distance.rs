//! Great-circle distance between two geographic positions.
//!
//! Uses the Haversine formula on a sphere of radius
//! [`EARTH_RADIUS_KM`](crate::policy::EARTH_RADIUS_KM). The intermediate term
//! is clamped via [`clamp_haversine`](crate::policy::clamp_haversine) so the
//! result is always finite for validated inputs.

use crate::policy::{EARTH_RADIUS_KM, clamp_haversine};
use crate::{Location, LocationError};

/// Distance in kilometres between two validated locations.
///
/// The result is symmetric and zero for identical points.
///
/// # Examples
/// ```
/// use destinate_core::{Location, haversine_km};
///
/// # fn main() -> Result<(), destinate_core::LocationError> {
/// let london = Location::new(51.5074, -0.1278)?;
/// let paris = Location::new(48.8566, 2.3522)?;
/// let km = haversine_km(london, paris);
/// assert!((km - 343.6).abs() < 1.0);
/// assert_eq!(haversine_km(london, london), 0.0);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the Haversine formula is floating-point trigonometry"
)]
pub fn haversine_km(from: Location, to: Location) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = to.longitude().to_radians() - from.longitude().to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let bounded = clamp_haversine(a);
    let c = 2.0 * bounded.sqrt().atan2((1.0 - bounded).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance in kilometres between two raw `(latitude, longitude)` pairs.
///
/// # Errors
/// Returns [`LocationError`] when any coordinate is non-finite or outside
/// its geographic range, instead of producing `NaN`.
///
/// # Examples
/// ```
/// use destinate_core::try_haversine_km;
///
/// assert!(try_haversine_km(95.0, 0.0, 0.0, 0.0).is_err());
/// let km = try_haversine_km(0.0, 0.0, 0.0, 1.0).expect("valid points");
/// assert!((km - 111.19).abs() < 0.01);
/// ```
pub fn try_haversine_km(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
) -> Result<f64, LocationError> {
    let from = Location::new(lat1, lon1)?;
    let to = Location::new(lat2, lon2)?;
    Ok(haversine_km(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const TOLERANCE_KM: f64 = 1e-9;

    #[fixture]
    fn jakarta() -> Location {
        Location::new(-6.2088, 106.8456).expect("valid coordinates")
    }

    #[fixture]
    fn bali() -> Location {
        Location::new(-8.7222, 115.1707).expect("valid coordinates")
    }

    #[rstest]
    fn jakarta_to_bali_matches_reference(jakarta: Location, bali: Location) {
        let km = haversine_km(jakarta, bali);
        assert!((km - 959.38).abs() < 0.5, "unexpected distance {km}");
    }

    #[rstest]
    fn distance_is_symmetric(jakarta: Location, bali: Location) {
        let there = haversine_km(jakarta, bali);
        let back = haversine_km(bali, jakarta);
        assert!((there - back).abs() < TOLERANCE_KM);
    }

    #[rstest]
    fn identical_points_are_zero_apart(jakarta: Location) {
        assert_eq!(haversine_km(jakarta, jakarta), 0.0);
    }

    #[rstest]
    fn antipodal_points_stay_finite() {
        let north = Location::new(90.0, 0.0).expect("pole");
        let south = Location::new(-90.0, 0.0).expect("pole");
        let km = haversine_km(north, south);
        assert!(km.is_finite());
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((km - half_circumference).abs() < 1e-6);
    }

    #[rstest]
    #[case(91.0, 0.0, 0.0, 0.0)]
    #[case(0.0, 0.0, 0.0, f64::NAN)]
    #[case(0.0, -181.0, 0.0, 0.0)]
    fn raw_distance_rejects_invalid_geometry(
        #[case] lat1: f64,
        #[case] lon1: f64,
        #[case] lat2: f64,
        #[case] lon2: f64,
    ) {
        assert!(try_haversine_km(lat1, lon1, lat2, lon2).is_err());
    }
}
