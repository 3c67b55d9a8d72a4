use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    CapabilityError, CapabilitySlot, SimulatedCamera, SimulatedLocation, SimulatedOrientation,
    SimulatedXr, WalkthroughService,
};
use tracing::info;
use ui::{App, Sensors, UiApp, build_app_context};
use wayfind_core::model::{GeoPoint, RouteId};
use wayfind_core::routes;

use crate::cli::UiArgs;

struct DesktopApp {
    walkthroughs: Arc<WalkthroughService>,
    camera: CapabilitySlot,
    sensors: Sensors,
    xr: CapabilitySlot,
    launch_route: Option<RouteId>,
}

impl UiApp for DesktopApp {
    fn walkthroughs(&self) -> Arc<WalkthroughService> {
        Arc::clone(&self.walkthroughs)
    }

    fn camera(&self) -> CapabilitySlot {
        self.camera.clone()
    }

    fn sensors(&self) -> Sensors {
        self.sensors.clone()
    }

    fn xr(&self) -> CapabilitySlot {
        self.xr.clone()
    }

    fn launch_route(&self) -> Option<RouteId> {
        self.launch_route.clone()
    }
}

/// Start position for the simulated GPS: the first waypoint of the GPS demo.
fn simulated_start() -> GeoPoint {
    routes::pune_gps()
        .steps()
        .first()
        .and_then(|step| step.waypoint())
        .unwrap_or(GeoPoint::new(0.0, 0.0))
}

pub fn launch(service: WalkthroughService, args: &UiArgs) -> anyhow::Result<()> {
    let launch_route = args.route.as_deref().map(RouteId::new).transpose()?;
    let camera = if args.deny_camera {
        SimulatedCamera::failing(CapabilityError::PermissionDenied("camera"))
    } else {
        SimulatedCamera::new()
    };
    // A desktop webview has no immersive AR; the navigator shows its preview.
    let xr = if args.simulate_ar {
        SimulatedXr::supported()
    } else {
        SimulatedXr::unsupported()
    };

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        walkthroughs: Arc::new(service),
        camera: CapabilitySlot::new(Arc::new(camera)),
        sensors: Sensors::new(
            Arc::new(SimulatedLocation::at(simulated_start())),
            Arc::new(SimulatedOrientation::new(Default::default())),
        ),
        xr: CapabilitySlot::new(Arc::new(xr)),
        launch_route,
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Wayfind")
            .with_always_on_top(false),
    );

    info!("launching desktop navigator");
    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}
