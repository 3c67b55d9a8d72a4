//! Device capabilities the renderers depend on.
//!
//! The stepper never touches these. Views acquire them through a
//! [`CapabilitySlot`] with an explicit acquire/release lifecycle, so tests and
//! the headless CLI can run against the simulated implementations.

mod simulated;
mod slot;

use async_trait::async_trait;
use wayfind_core::model::GeoPoint;

use crate::error::CapabilityError;

pub use simulated::{SimulatedCamera, SimulatedLocation, SimulatedOrientation, SimulatedXr};
pub use slot::{CapabilitySlot, CapabilityState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Camera,
    Geolocation,
    Orientation,
    ImmersiveXr,
}

impl CapabilityKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CapabilityKind::Camera => "camera",
            CapabilityKind::Geolocation => "location service",
            CapabilityKind::Orientation => "orientation sensor",
            CapabilityKind::ImmersiveXr => "immersive AR session",
        }
    }
}

/// Something that must be acquired before use and released afterwards.
#[async_trait]
pub trait Capability: Send + Sync {
    fn kind(&self) -> CapabilityKind;

    /// Request access (permission prompt, stream start, session start).
    ///
    /// # Errors
    ///
    /// Returns `CapabilityError` when access is unsupported, denied or fails.
    async fn acquire(&self) -> Result<(), CapabilityError>;

    /// Stop using the device. Must be safe to call when not acquired.
    async fn release(&self);
}

/// Device orientation reading, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub gamma: Option<f64>,
}

#[async_trait]
pub trait LocationSource: Capability {
    /// # Errors
    ///
    /// Returns `CapabilityError::NotAcquired` before `acquire`, or the device error.
    async fn current_fix(&self) -> Result<GeoPoint, CapabilityError>;
}

#[async_trait]
pub trait OrientationSource: Capability {
    /// # Errors
    ///
    /// Returns `CapabilityError::NotAcquired` before `acquire`, or the device error.
    async fn current_orientation(&self) -> Result<Orientation, CapabilityError>;
}
