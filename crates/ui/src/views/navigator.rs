use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::Link;
use tracing::warn;

use services::{
    CapabilitySlot, CapabilityState, WalkthroughError, WalkthroughSession, WalkthroughSnapshot,
};
use wayfind_core::model::RouteId;

use super::overlay::{
    CameraPane, DirectionArrow, DistanceIndicator, LocationPanel, NavigationOverlay, XrNotice,
};
use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{
    CameraPaneVm, LocationPanelVm, NavigationOverlayVm, SensorReading, XrStatusVm, arrival_label,
};

const SENSOR_POLL: Duration = Duration::from_secs(1);

type SessionCell = Rc<RefCell<Option<WalkthroughSession>>>;

/// Shared ownership of the running session between handlers and the drop hook.
#[derive(Clone)]
pub struct SessionHandle(SessionCell);

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl SessionHandle {
    fn snapshot(&self) -> Option<WalkthroughSnapshot> {
        self.0.borrow().as_ref().map(WalkthroughSession::snapshot)
    }

    fn send(&self, command: impl FnOnce(&WalkthroughSession) -> Result<(), WalkthroughError>) {
        if let Some(session) = self.0.borrow().as_ref()
            && let Err(err) = command(session)
        {
            warn!(error = %err, "walkthrough command rejected");
        }
    }

    /// Stop the session without blocking the render thread.
    fn stop(&self) {
        let Some(session) = self.0.borrow_mut().take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(session.stop());
            }
            // Dropping aborts the task.
            Err(_) => drop(session),
        }
    }
}

fn start_session(ctx: &AppContext, route_id: &str) -> Result<SessionHandle, String> {
    let id = RouteId::new(route_id).map_err(|err| err.to_string())?;
    let session = ctx.walkthroughs().start(&id).map_err(|err| err.to_string())?;
    Ok(SessionHandle(Rc::new(RefCell::new(Some(session)))))
}

fn release_all(slots: Vec<CapabilitySlot>) {
    if let Ok(runtime) = tokio::runtime::Handle::try_current() {
        runtime.spawn(async move {
            for slot in slots {
                slot.release().await;
            }
        });
    }
}

/// Mirror a slot's state into a signal, including changes made through other
/// clones of the slot (a release still running for a previous view).
async fn follow_slot(slot: CapabilitySlot, mut target: Signal<CapabilityState>) {
    let mut states = slot.subscribe();
    loop {
        let next = states.borrow_and_update().clone();
        if *target.peek() != next {
            target.set(next);
        }
        if states.changed().await.is_err() {
            break;
        }
    }
}

#[component]
pub fn NavigatorView(route_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let started = use_hook(|| start_session(&ctx, &route_id));

    match started {
        Ok(session) => rsx! { NavigatorSession { session } },
        Err(message) => rsx! {
            div { class: "page page--error",
                h2 { "Could not start route" }
                p { "{message}" }
                Link { to: Route::Home {}, "Back to routes" }
            }
        },
    }
}

#[component]
fn NavigatorSession(session: SessionHandle) -> Element {
    let ctx = use_context::<AppContext>();
    let camera = ctx.camera();
    let xr = ctx.xr();
    let sensors = ctx.sensors();

    let mut snapshot = use_signal({
        let session = session.clone();
        move || session.snapshot()
    });
    let camera_state = use_signal(|| camera.state());
    let xr_state = use_signal(|| xr.state());
    let location_state = use_signal(|| sensors.location_slot.state());
    let mut reading = use_signal(SensorReading::default);
    let wants_location = use_hook(|| {
        snapshot
            .peek()
            .as_ref()
            .is_some_and(|current| current.instruction.waypoint.is_some())
    });

    use_future({
        let session = session.clone();
        move || {
            let receiver = session.0.borrow().as_ref().map(WalkthroughSession::subscribe);
            async move {
                let Some(mut receiver) = receiver else {
                    return;
                };
                while receiver.changed().await.is_ok() {
                    let next = receiver.borrow_and_update().clone();
                    snapshot.set(Some(next));
                }
            }
        }
    });

    use_future({
        let camera = camera.clone();
        move || follow_slot(camera.clone(), camera_state)
    });
    use_future({
        let xr = xr.clone();
        move || follow_slot(xr.clone(), xr_state)
    });
    use_future({
        let location = sensors.location_slot.clone();
        move || follow_slot(location.clone(), location_state)
    });

    // Runs again whenever the slot drops back to Idle.
    use_effect({
        let camera = camera.clone();
        move || {
            let debug_mode = snapshot.read().as_ref().is_some_and(|s| s.debug_mode);
            if debug_mode || *camera_state.read() != CapabilityState::Idle {
                return;
            }
            let camera = camera.clone();
            spawn(async move {
                let _ = camera.acquire().await;
            });
        }
    });

    // A refused session is sticky (`Failed`) and leaves the flat preview up.
    use_effect({
        let xr = xr.clone();
        move || {
            if *xr_state.read() != CapabilityState::Idle {
                return;
            }
            let xr = xr.clone();
            spawn(async move {
                let _ = xr.acquire().await;
            });
        }
    });

    use_future({
        let sensors = sensors.clone();
        move || {
            let sensors = sensors.clone();
            async move {
                if !wants_location {
                    return;
                }
                let _ = sensors.location_slot.acquire().await;
                // Heading is optional; a refused sensor reads as 0°.
                let _ = sensors.orientation_slot.acquire().await;

                let mut ticker = tokio::time::interval(SENSOR_POLL);
                loop {
                    ticker.tick().await;
                    let fix = sensors.location.current_fix().await.ok();
                    let alpha = sensors
                        .orientation
                        .current_orientation()
                        .await
                        .ok()
                        .and_then(|orientation| orientation.alpha);
                    reading.set(SensorReading { fix, alpha });
                }
            }
        }
    });

    use_effect(|| {
        let _ = eval("document.getElementById('navigator')?.focus();");
    });

    use_drop({
        let session = session.clone();
        let camera = camera.clone();
        let xr = xr.clone();
        let sensors = sensors.clone();
        move || {
            session.stop();
            release_all(vec![camera, xr, sensors.location_slot, sensors.orientation_slot]);
        }
    });

    let onkeydown = {
        let session = session.clone();
        move |evt: KeyboardEvent| match evt.data.key() {
            Key::ArrowLeft => {
                evt.prevent_default();
                session.send(WalkthroughSession::previous);
            }
            Key::ArrowRight => {
                evt.prevent_default();
                session.send(WalkthroughSession::next);
            }
            Key::Character(value) if value.eq_ignore_ascii_case("d") => {
                session.send(WalkthroughSession::toggle_debug);
            }
            _ => {}
        }
    };
    let on_previous = {
        let session = session.clone();
        move |_| session.send(WalkthroughSession::previous)
    };
    let on_next = {
        let session = session.clone();
        move |_| session.send(WalkthroughSession::next)
    };
    let on_toggle_debug = {
        let session = session.clone();
        move |_| session.send(WalkthroughSession::toggle_debug)
    };
    let on_retry_camera = {
        let camera = camera.clone();
        move |()| {
            let camera = camera.clone();
            spawn(async move {
                let _ = camera.retry().await;
            });
        }
    };

    let Some(current) = snapshot() else {
        return rsx! {
            div { class: "page page--error",
                p { "This walkthrough has ended." }
                Link { to: Route::Home {}, "Back to routes" }
            }
        };
    };

    let overlay = NavigationOverlayVm::from_snapshot(&current);
    let camera_vm = CameraPaneVm::new(current.debug_mode, &camera_state());
    let xr_vm = XrStatusVm::new(&xr_state());
    let location_vm = LocationPanelVm::new(current.instruction.waypoint, reading(), &location_state());
    let arrived = arrival_label(current.started_at, current.arrived_at);
    let at_first = current.instruction.step_index == 0;
    let at_last = current.instruction.step_index + 1 >= current.instruction.step_count;

    rsx! {
        div { id: "navigator", class: "navigator", tabindex: "0", onkeydown: onkeydown,
            div { class: "navigator__camera",
                CameraPane { vm: camera_vm, on_retry: on_retry_camera }
            }
            XrNotice { vm: xr_vm }
            if overlay.show_arrow {
                DirectionArrow {
                    yaw_transform: overlay.arrow_transform(),
                    markers: overlay.arrow_markers,
                }
            }
            DistanceIndicator {
                label: overlay.indicator_label.clone(),
                rings: overlay.distance_rings,
            }
            {location_vm.map(|vm| rsx! { LocationPanel { vm } })}
            NavigationOverlay { vm: overlay.clone() }
            div { class: "navigator__controls",
                Link { to: Route::Home {}, "Routes" }
                button { class: "btn", disabled: at_first, onclick: on_previous, "Previous" }
                button { class: "btn", disabled: at_last, onclick: on_next, "Next" }
                button { class: "btn btn--debug", onclick: on_toggle_debug,
                    "{overlay.debug_button_label()}"
                }
            }
            span { class: "navigator__route", "{current.route_name}" }
            if let Some(arrived) = arrived {
                span { class: "navigator__arrived", "{arrived}" }
            }
        }
    }
}
