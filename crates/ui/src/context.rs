use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use services::{
    CapabilitySlot, LocationSource, OrientationSource, RouteCatalog, WalkthroughService,
};
use wayfind_core::model::RouteId;

pub trait UiApp: Send + Sync {
    fn walkthroughs(&self) -> Arc<WalkthroughService>;
    fn camera(&self) -> CapabilitySlot;
    fn sensors(&self) -> Sensors;
    /// Immersive AR session; when it cannot start the navigator shows a preview.
    fn xr(&self) -> CapabilitySlot;

    /// Route to open straight away instead of showing the picker.
    fn launch_route(&self) -> Option<RouteId> {
        None
    }
}

/// Location and orientation feeds, each with the slot that gates access to it.
#[derive(Clone)]
pub struct Sensors {
    pub location: Arc<dyn LocationSource>,
    pub location_slot: CapabilitySlot,
    pub orientation: Arc<dyn OrientationSource>,
    pub orientation_slot: CapabilitySlot,
}

impl Sensors {
    #[must_use]
    pub fn new<L, O>(location: Arc<L>, orientation: Arc<O>) -> Self
    where
        L: LocationSource + 'static,
        O: OrientationSource + 'static,
    {
        Self {
            location_slot: CapabilitySlot::new(location.clone()),
            location,
            orientation_slot: CapabilitySlot::new(orientation.clone()),
            orientation,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    walkthroughs: Arc<WalkthroughService>,
    camera: CapabilitySlot,
    sensors: Sensors,
    xr: CapabilitySlot,
    launch_route: Option<RouteId>,
    launch_route_pending: Arc<AtomicBool>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let launch_route = app.launch_route();
        Self {
            walkthroughs: app.walkthroughs(),
            camera: app.camera(),
            sensors: app.sensors(),
            xr: app.xr(),
            launch_route_pending: Arc::new(AtomicBool::new(launch_route.is_some())),
            launch_route,
        }
    }

    #[must_use]
    pub fn walkthroughs(&self) -> Arc<WalkthroughService> {
        Arc::clone(&self.walkthroughs)
    }

    #[must_use]
    pub fn catalog(&self) -> &RouteCatalog {
        self.walkthroughs.catalog()
    }

    #[must_use]
    pub fn camera(&self) -> CapabilitySlot {
        self.camera.clone()
    }

    #[must_use]
    pub fn sensors(&self) -> Sensors {
        self.sensors.clone()
    }

    #[must_use]
    pub fn xr(&self) -> CapabilitySlot {
        self.xr.clone()
    }

    /// The launch route, handed out once so returning to the picker stays there.
    #[must_use]
    pub fn take_launch_route(&self) -> Option<RouteId> {
        if self.launch_route_pending.swap(false, Ordering::AcqRel) {
            self.launch_route.clone()
        } else {
            None
        }
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
