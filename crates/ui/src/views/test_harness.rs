use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    CapabilitySlot, RouteCatalog, SimulatedCamera, SimulatedLocation, SimulatedOrientation,
    SimulatedXr, SimulationSettings, WalkthroughService,
};
use wayfind_core::model::{GeoPoint, RouteId};
use wayfind_core::time::fixed_clock;

use crate::context::{Sensors, UiApp, build_app_context};
use crate::views::{HomeView, NavigatorView};

struct TestApp {
    walkthroughs: Arc<WalkthroughService>,
    camera: CapabilitySlot,
    xr: CapabilitySlot,
    location: Arc<SimulatedLocation>,
    orientation: Arc<SimulatedOrientation>,
    launch_route: Option<RouteId>,
}

impl UiApp for TestApp {
    fn walkthroughs(&self) -> Arc<WalkthroughService> {
        Arc::clone(&self.walkthroughs)
    }

    fn camera(&self) -> CapabilitySlot {
        self.camera.clone()
    }

    fn xr(&self) -> CapabilitySlot {
        self.xr.clone()
    }

    fn sensors(&self) -> Sensors {
        Sensors::new(self.location.clone(), self.orientation.clone())
    }

    fn launch_route(&self) -> Option<RouteId> {
        self.launch_route.clone()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Navigate(String),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Navigate(route_id) => rsx! { NavigatorView { route_id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub camera: Arc<SimulatedCamera>,
    pub camera_slot: CapabilitySlot,
    pub xr: Arc<SimulatedXr>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        self.dom.process_events();
        self.dom.render_immediate(&mut NoOpMutations);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_xr(view, SimulatedXr::supported())
}

pub fn setup_view_harness_with_xr(view: ViewKind, xr: SimulatedXr) -> ViewHarness {
    let walkthroughs = WalkthroughService::new(
        fixed_clock(),
        Arc::new(RouteCatalog::builtin()),
        SimulationSettings::default(),
    );
    let camera = Arc::new(SimulatedCamera::new());
    let camera_slot = CapabilitySlot::new(camera.clone());
    let xr = Arc::new(xr);
    let app = Arc::new(TestApp {
        walkthroughs: Arc::new(walkthroughs),
        camera: camera_slot.clone(),
        xr: CapabilitySlot::new(xr.clone()),
        location: Arc::new(SimulatedLocation::at(GeoPoint::new(18.5291, 73.8564))),
        orientation: Arc::new(SimulatedOrientation::new(Default::default())),
        launch_route: None,
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness {
        dom,
        camera,
        camera_slot,
        xr,
    }
}
