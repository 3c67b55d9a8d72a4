use services::CapabilityState;
use wayfind_core::model::{CompassHeading, GeoPoint, haversine_meters};

/// Latest readings from the location and orientation sensors.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SensorReading {
    pub fix: Option<GeoPoint>,
    pub alpha: Option<f64>,
}

/// GPS panel shown for steps that carry a waypoint.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationPanelVm {
    pub position_label: String,
    pub heading_label: String,
    pub waypoint_label: String,
    pub waypoint_distance_label: Option<String>,
    pub error: Option<String>,
}

impl LocationPanelVm {
    /// `None` when the current step has no waypoint.
    #[must_use]
    pub fn new(
        waypoint: Option<GeoPoint>,
        reading: SensorReading,
        location: &CapabilityState,
    ) -> Option<Self> {
        let waypoint = waypoint?;

        let position_label = match reading.fix {
            Some(fix) => format!("GPS: {}", fix.display_short()),
            None => "Getting your location...".to_string(),
        };
        let heading = reading.alpha.map(CompassHeading::from_alpha).unwrap_or_default();
        let waypoint_distance_label = reading
            .fix
            .map(|fix| format!("{:.0}m to waypoint", haversine_meters(fix, waypoint)));
        let error = match location {
            CapabilityState::Failed(message) => Some(message.clone()),
            _ => None,
        };

        Some(Self {
            position_label,
            heading_label: heading.label(),
            waypoint_label: format!("Waypoint: {}", waypoint.display_short()),
            waypoint_distance_label,
            error,
        })
    }
}
