use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use super::{Capability, CapabilityKind};
use crate::error::CapabilityError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityState {
    Idle,
    Acquiring,
    Active,
    /// Acquisition failed; the message is shown next to a retry button.
    Failed(String),
}

struct SlotInner {
    capability: Arc<dyn Capability>,
    state: watch::Sender<CapabilityState>,
    /// Bumped by every `release`. An acquisition that started under an older
    /// value gives the device back instead of publishing `Active`.
    releases: AtomicU64,
}

/// Tracks the lifecycle of one capability on behalf of a view.
///
/// `Idle -> Acquiring -> Active | Failed`. A failed slot stays failed until
/// [`retry`](Self::retry) is called; nothing retries on its own. Clones share
/// the same state, and [`subscribe`](Self::subscribe) follows every change.
#[derive(Clone)]
pub struct CapabilitySlot {
    inner: Arc<SlotInner>,
}

impl CapabilitySlot {
    #[must_use]
    pub fn new(capability: Arc<dyn Capability>) -> Self {
        let (state, _) = watch::channel(CapabilityState::Idle);
        Self {
            inner: Arc::new(SlotInner {
                capability,
                state,
                releases: AtomicU64::new(0),
            }),
        }
    }

    #[must_use]
    pub fn kind(&self) -> CapabilityKind {
        self.inner.capability.kind()
    }

    #[must_use]
    pub fn state(&self) -> CapabilityState {
        self.inner.state.borrow().clone()
    }

    /// A receiver notified on every state change, including releases made
    /// through another clone of this slot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CapabilityState> {
        self.inner.state.subscribe()
    }

    /// Acquire the capability unless it is already active or in flight.
    ///
    /// # Errors
    ///
    /// Returns the capability's error; the slot is left in `Failed`. Returns
    /// `CapabilityError::Released` when [`release`](Self::release) ran while
    /// the device was still starting; the device is handed back and the slot
    /// stays `Idle`.
    pub async fn acquire(&self) -> Result<(), CapabilityError> {
        let mut epoch = None;
        self.inner.state.send_if_modified(|state| match *state {
            CapabilityState::Active | CapabilityState::Acquiring => false,
            CapabilityState::Idle | CapabilityState::Failed(_) => {
                epoch = Some(self.inner.releases.load(Ordering::SeqCst));
                *state = CapabilityState::Acquiring;
                true
            }
        });
        let Some(epoch) = epoch else {
            return Ok(());
        };

        let kind = self.kind();
        let result = self.inner.capability.acquire().await;

        // The state lock orders this check against a concurrent `release`.
        let mut current = true;
        self.inner.state.send_if_modified(|state| {
            if self.inner.releases.load(Ordering::SeqCst) != epoch {
                current = false;
                return false;
            }
            *state = match &result {
                Ok(()) => CapabilityState::Active,
                Err(err) => CapabilityState::Failed(err.to_string()),
            };
            true
        });

        if !current {
            if result.is_ok() {
                self.inner.capability.release().await;
            }
            debug!(capability = kind.label(), "capability released while starting");
            return Err(CapabilityError::Released(kind.label()));
        }

        match result {
            Ok(()) => {
                debug!(capability = kind.label(), "capability acquired");
                Ok(())
            }
            Err(err) => {
                warn!(capability = kind.label(), error = %err, "capability acquisition failed");
                Err(err)
            }
        }
    }

    /// Manual retry after a failure. A no-op in any other state.
    ///
    /// # Errors
    ///
    /// Returns the capability's error if the new attempt fails.
    pub async fn retry(&self) -> Result<(), CapabilityError> {
        if !matches!(self.state(), CapabilityState::Failed(_)) {
            return Ok(());
        }
        self.acquire().await
    }

    /// Release the capability and return to `Idle`.
    ///
    /// An acquisition still in flight hands the device back when it finishes.
    pub async fn release(&self) {
        let mut was_active = false;
        self.inner.state.send_if_modified(|state| {
            self.inner.releases.fetch_add(1, Ordering::SeqCst);
            was_active = matches!(state, CapabilityState::Active);
            let changed = *state != CapabilityState::Idle;
            *state = CapabilityState::Idle;
            changed
        });
        if was_active {
            self.inner.capability.release().await;
            debug!(capability = self.kind().label(), "capability released");
        }
    }
}

impl std::fmt::Debug for CapabilitySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilitySlot")
            .field("kind", &self.kind())
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::capabilities::SimulatedCamera;

    /// Camera whose permission prompt takes a while to answer.
    #[derive(Default)]
    struct SlowCamera {
        device: SimulatedCamera,
    }

    #[async_trait]
    impl Capability for SlowCamera {
        fn kind(&self) -> CapabilityKind {
            CapabilityKind::Camera
        }

        async fn acquire(&self) -> Result<(), CapabilityError> {
            tokio::time::sleep(Duration::from_millis(100)).await;
            self.device.acquire().await
        }

        async fn release(&self) {
            self.device.release().await;
        }
    }

    #[tokio::test]
    async fn acquire_success_moves_to_active() {
        let camera = Arc::new(SimulatedCamera::new());
        let slot = CapabilitySlot::new(camera.clone());
        assert_eq!(slot.state(), CapabilityState::Idle);
        slot.acquire().await.unwrap();
        assert_eq!(slot.state(), CapabilityState::Active);
        assert_eq!(camera.acquire_count(), 1);

        slot.acquire().await.unwrap();
        assert_eq!(camera.acquire_count(), 1);
    }

    #[tokio::test]
    async fn failure_is_sticky_until_manual_retry() {
        let camera = Arc::new(SimulatedCamera::failing(CapabilityError::PermissionDenied(
            "camera",
        )));
        let slot = CapabilitySlot::new(camera.clone());

        let err = slot.acquire().await.unwrap_err();
        assert_eq!(err, CapabilityError::PermissionDenied("camera"));
        assert_eq!(
            slot.state(),
            CapabilityState::Failed("permission to use the camera was denied".to_string())
        );
        assert_eq!(camera.acquire_count(), 1);

        camera.set_failure(None);
        slot.retry().await.unwrap();
        assert_eq!(slot.state(), CapabilityState::Active);
        assert_eq!(camera.acquire_count(), 2);
    }

    #[tokio::test]
    async fn retry_is_noop_unless_failed() {
        let camera = Arc::new(SimulatedCamera::new());
        let slot = CapabilitySlot::new(camera.clone());
        slot.retry().await.unwrap();
        assert_eq!(slot.state(), CapabilityState::Idle);
        assert_eq!(camera.acquire_count(), 0);
    }

    #[tokio::test]
    async fn release_returns_to_idle() {
        let camera = Arc::new(SimulatedCamera::new());
        let slot = CapabilitySlot::new(camera.clone());
        slot.acquire().await.unwrap();
        slot.release().await;
        assert_eq!(slot.state(), CapabilityState::Idle);
        assert!(!camera.is_active());

        slot.release().await;
        assert_eq!(camera.release_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn release_during_acquire_hands_device_back() {
        let camera = Arc::new(SlowCamera::default());
        let slot = CapabilitySlot::new(camera.clone());

        let pending = tokio::spawn({
            let slot = slot.clone();
            async move { slot.acquire().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(slot.state(), CapabilityState::Acquiring);

        slot.release().await;
        assert_eq!(slot.state(), CapabilityState::Idle);

        let err = pending.await.unwrap().unwrap_err();
        assert_eq!(err, CapabilityError::Released("camera"));
        assert_eq!(slot.state(), CapabilityState::Idle);
        assert!(!camera.device.is_active());
        assert_eq!(camera.device.acquire_count(), 1);
        assert_eq!(camera.device.release_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn acquire_after_interrupted_one_succeeds() {
        let camera = Arc::new(SlowCamera::default());
        let slot = CapabilitySlot::new(camera.clone());

        let first = tokio::spawn({
            let slot = slot.clone();
            async move { slot.acquire().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        slot.release().await;
        assert!(first.await.unwrap().is_err());

        slot.acquire().await.unwrap();
        assert_eq!(slot.state(), CapabilityState::Active);
        assert!(camera.device.is_active());
    }

    #[tokio::test]
    async fn subscribers_follow_changes_made_by_clones() {
        let camera = Arc::new(SimulatedCamera::new());
        let slot = CapabilitySlot::new(camera.clone());
        let mut states = slot.subscribe();

        let other = slot.clone();
        other.acquire().await.unwrap();
        assert!(states.has_changed().unwrap());
        assert_eq!(*states.borrow_and_update(), CapabilityState::Active);

        other.release().await;
        assert!(states.has_changed().unwrap());
        assert_eq!(*states.borrow_and_update(), CapabilityState::Idle);

        // Releasing an idle slot is silent.
        other.release().await;
        assert!(!states.has_changed().unwrap());
    }
}
