use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use wayfind_core::model::GeoPoint;

use super::{Capability, CapabilityKind, LocationSource, Orientation, OrientationSource};
use crate::error::CapabilityError;

/// Acquire/release bookkeeping shared by the simulated devices.
#[derive(Debug)]
struct Device {
    kind: CapabilityKind,
    failure: Mutex<Option<CapabilityError>>,
    active: AtomicBool,
    acquires: AtomicUsize,
    releases: AtomicUsize,
}

impl Device {
    fn new(kind: CapabilityKind, failure: Option<CapabilityError>) -> Self {
        Self {
            kind,
            failure: Mutex::new(failure),
            active: AtomicBool::new(false),
            acquires: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
        }
    }

    fn acquire(&self) -> Result<(), CapabilityError> {
        self.acquires.fetch_add(1, Ordering::SeqCst);
        let failure = self
            .failure
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();
        if let Some(err) = failure {
            return Err(err);
        }
        self.active.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn release(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn set_failure(&self, failure: Option<CapabilityError>) {
        *self
            .failure
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = failure;
    }

    fn ensure_active(&self) -> Result<(), CapabilityError> {
        if self.active.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(CapabilityError::NotAcquired(self.kind.label()))
        }
    }
}

macro_rules! simulated_common {
    ($ty:ty) => {
        impl $ty {
            /// Make subsequent `acquire` calls fail (or succeed with `None`).
            pub fn set_failure(&self, failure: Option<CapabilityError>) {
                self.device.set_failure(failure);
            }

            #[must_use]
            pub fn is_active(&self) -> bool {
                self.device.active.load(Ordering::SeqCst)
            }

            #[must_use]
            pub fn acquire_count(&self) -> usize {
                self.device.acquires.load(Ordering::SeqCst)
            }

            #[must_use]
            pub fn release_count(&self) -> usize {
                self.device.releases.load(Ordering::SeqCst)
            }
        }
    };
}

/// Camera stand-in. Frames are owned by the renderer, so this only models access.
#[derive(Debug)]
pub struct SimulatedCamera {
    device: Device,
}

impl SimulatedCamera {
    #[must_use]
    pub fn new() -> Self {
        Self {
            device: Device::new(CapabilityKind::Camera, None),
        }
    }

    #[must_use]
    pub fn failing(err: CapabilityError) -> Self {
        Self {
            device: Device::new(CapabilityKind::Camera, Some(err)),
        }
    }
}

impl Default for SimulatedCamera {
    fn default() -> Self {
        Self::new()
    }
}

simulated_common!(SimulatedCamera);

#[async_trait]
impl Capability for SimulatedCamera {
    fn kind(&self) -> CapabilityKind {
        self.device.kind
    }

    async fn acquire(&self) -> Result<(), CapabilityError> {
        self.device.acquire()
    }

    async fn release(&self) {
        self.device.release();
    }
}

/// Location source reporting a settable fix.
#[derive(Debug)]
pub struct SimulatedLocation {
    device: Device,
    fix: Mutex<GeoPoint>,
}

impl SimulatedLocation {
    #[must_use]
    pub fn at(fix: GeoPoint) -> Self {
        Self {
            device: Device::new(CapabilityKind::Geolocation, None),
            fix: Mutex::new(fix),
        }
    }

    #[must_use]
    pub fn unsupported() -> Self {
        Self {
            device: Device::new(
                CapabilityKind::Geolocation,
                Some(CapabilityError::Unsupported("geolocation")),
            ),
            fix: Mutex::new(GeoPoint::new(0.0, 0.0)),
        }
    }

    pub fn move_to(&self, fix: GeoPoint) {
        *self
            .fix
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = fix;
    }
}

simulated_common!(SimulatedLocation);

#[async_trait]
impl Capability for SimulatedLocation {
    fn kind(&self) -> CapabilityKind {
        self.device.kind
    }

    async fn acquire(&self) -> Result<(), CapabilityError> {
        self.device.acquire()
    }

    async fn release(&self) {
        self.device.release();
    }
}

#[async_trait]
impl LocationSource for SimulatedLocation {
    async fn current_fix(&self) -> Result<GeoPoint, CapabilityError> {
        self.device.ensure_active()?;
        Ok(*self
            .fix
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner))
    }
}

/// Orientation sensor reporting a settable reading.
#[derive(Debug)]
pub struct SimulatedOrientation {
    device: Device,
    reading: Mutex<Orientation>,
}

impl SimulatedOrientation {
    #[must_use]
    pub fn new(reading: Orientation) -> Self {
        Self {
            device: Device::new(CapabilityKind::Orientation, None),
            reading: Mutex::new(reading),
        }
    }

    /// Sensor that needs a permission grant the user refuses.
    #[must_use]
    pub fn denied() -> Self {
        Self {
            device: Device::new(
                CapabilityKind::Orientation,
                Some(CapabilityError::PermissionDenied("orientation sensor")),
            ),
            reading: Mutex::new(Orientation::default()),
        }
    }

    pub fn set_reading(&self, reading: Orientation) {
        *self
            .reading
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = reading;
    }
}

simulated_common!(SimulatedOrientation);

#[async_trait]
impl Capability for SimulatedOrientation {
    fn kind(&self) -> CapabilityKind {
        self.device.kind
    }

    async fn acquire(&self) -> Result<(), CapabilityError> {
        self.device.acquire()
    }

    async fn release(&self) {
        self.device.release();
    }
}

#[async_trait]
impl OrientationSource for SimulatedOrientation {
    async fn current_orientation(&self) -> Result<Orientation, CapabilityError> {
        self.device.ensure_active()?;
        Ok(*self
            .reading
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner))
    }
}

/// Immersive AR session. Unsupported unless built with `supported()`.
#[derive(Debug)]
pub struct SimulatedXr {
    device: Device,
}

impl SimulatedXr {
    #[must_use]
    pub fn supported() -> Self {
        Self {
            device: Device::new(CapabilityKind::ImmersiveXr, None),
        }
    }

    #[must_use]
    pub fn unsupported() -> Self {
        Self {
            device: Device::new(
                CapabilityKind::ImmersiveXr,
                Some(CapabilityError::Unsupported("immersive AR")),
            ),
        }
    }
}

simulated_common!(SimulatedXr);

#[async_trait]
impl Capability for SimulatedXr {
    fn kind(&self) -> CapabilityKind {
        self.device.kind
    }

    async fn acquire(&self) -> Result<(), CapabilityError> {
        self.device.acquire()
    }

    async fn release(&self) {
        self.device.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn location_requires_acquire() {
        let location = SimulatedLocation::at(GeoPoint::new(18.5291, 73.8564));
        let err = location.current_fix().await.unwrap_err();
        assert_eq!(err, CapabilityError::NotAcquired("location service"));

        location.acquire().await.unwrap();
        location.move_to(GeoPoint::new(18.53, 73.857));
        assert_eq!(location.current_fix().await.unwrap(), GeoPoint::new(18.53, 73.857));
    }

    #[tokio::test]
    async fn denied_orientation_reports_permission_error() {
        let orientation = SimulatedOrientation::denied();
        let err = orientation.acquire().await.unwrap_err();
        assert_eq!(err, CapabilityError::PermissionDenied("orientation sensor"));
        assert!(!orientation.is_active());
    }

    #[tokio::test]
    async fn orientation_reading_after_acquire() {
        let orientation = SimulatedOrientation::new(Orientation::default());
        orientation.acquire().await.unwrap();
        orientation.set_reading(Orientation {
            alpha: Some(90.0),
            beta: None,
            gamma: None,
        });
        let reading = orientation.current_orientation().await.unwrap();
        assert_eq!(reading.alpha, Some(90.0));
    }

    #[tokio::test]
    async fn xr_unsupported() {
        let xr = SimulatedXr::unsupported();
        assert_eq!(
            xr.acquire().await.unwrap_err().to_string(),
            "immersive AR is not supported on this device"
        );
        assert!(SimulatedXr::supported().acquire().await.is_ok());
    }
}
