//! Display-only geographic helpers for waypoint-annotated routes.

use serde::{Deserialize, Serialize};

/// Mean earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `"18.5291, 73.8564"`
    #[must_use]
    pub fn display_short(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Great-circle distance between two points, in metres.
#[must_use]
pub fn haversine_meters(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c * 1000.0
}

/// Device heading in degrees, normalized into `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompassHeading(f64);

impl CompassHeading {
    /// Normalizes a raw orientation `alpha` reading. Non-finite input maps to 0.
    #[must_use]
    pub fn from_alpha(alpha: f64) -> Self {
        if !alpha.is_finite() {
            return Self(0.0);
        }
        Self(alpha.rem_euclid(360.0))
    }

    #[must_use]
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// `"Heading: 12.5°"`
    #[must_use]
    pub fn label(self) -> String {
        format!("Heading: {:.1}°", self.0)
    }
}
