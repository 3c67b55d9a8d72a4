use dioxus::prelude::*;
use services::{CapabilityState, SimulatedXr};
use wayfind_core::routes;
use wayfind_core::stepper::NavigationStepper;

use super::overlay::{CameraPane, NavigationOverlay, NavigationOverlayProps, XrNotice, XrNoticeProps};
use super::test_harness::{ViewHarness, ViewKind, setup_view_harness, setup_view_harness_with_xr};
use crate::vm::{CameraPaneVm, NavigationOverlayVm, XrStatusVm};

async fn settle(harness: &mut ViewHarness) {
    for _ in 0..6 {
        harness.drive_async().await;
    }
}

fn render_overlay(vm: NavigationOverlayVm) -> String {
    let mut dom = VirtualDom::new_with_props(
        NavigationOverlay,
        NavigationOverlayProps::builder().vm(vm).build(),
    );
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

#[component]
fn FailedCameraHarness(message: String) -> Element {
    let vm = CameraPaneVm::Error { message };
    rsx! {
        CameraPane { vm, on_retry: move |()| {} }
    }
}

#[test]
fn overlay_renders_instruction_and_counter() {
    let mut stepper = NavigationStepper::new(routes::short_demo());
    stepper.go_to_step(2).unwrap();
    stepper.tick(5.0);
    let vm = NavigationOverlayVm::from_instruction(&stepper.current_instruction(), false);

    let html = render_overlay(vm);
    assert!(html.contains("Go straight"), "missing headline in {html}");
    assert!(html.contains("5m to next step"), "missing distance in {html}");
    assert!(html.contains("Step 3 of 5"), "missing counter in {html}");
    assert!(html.contains("arrow-path"), "missing icon in {html}");
}

#[test]
fn overlay_renders_arrival() {
    let mut stepper = NavigationStepper::new(routes::short_demo());
    let last = stepper.route().last_index();
    stepper.go_to_step(last).unwrap();
    let vm = NavigationOverlayVm::from_instruction(&stepper.current_instruction(), false);

    let html = render_overlay(vm);
    assert!(html.contains("You have arrived!"), "missing arrival text in {html}");
    assert!(html.contains("accent--arrived"), "missing accent in {html}");
}

#[test]
fn camera_error_offers_retry() {
    let mut dom = VirtualDom::new_with_props(
        FailedCameraHarness,
        FailedCameraHarnessProps::builder()
            .message("permission to use the camera was denied".to_string())
            .build(),
    );
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("Camera Error"), "missing title in {html}");
    assert!(html.contains("Retry Camera"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_lists_routes() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Square walk"), "missing route in {html}");
    assert!(html.contains("Short demo"), "missing route in {html}");
    assert!(html.contains("5 steps"), "missing step count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn navigator_view_starts_on_first_step() {
    let mut harness = setup_view_harness(ViewKind::Navigate("square-walk".to_string()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Start here"), "missing instruction in {html}");
    assert!(html.contains("Step 1 of 9"), "missing counter in {html}");
    assert!(html.contains("Debug"), "missing debug toggle in {html}");
    assert!(html.contains("Square walk"), "missing route name in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn navigator_view_shows_gps_panel_for_waypoint_routes() {
    let mut harness = setup_view_harness(ViewKind::Navigate("pune-gps".to_string()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Waypoint: 18.5291, 73.8564"), "missing waypoint in {html}");
    assert!(html.contains("Getting your location..."), "missing fix placeholder in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn navigator_view_reports_unknown_route() {
    let mut harness = setup_view_harness(ViewKind::Navigate("atlantis".to_string()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Could not start route"), "missing error in {html}");
    assert!(html.contains("unknown route: atlantis"), "missing reason in {html}");
}

#[test]
fn xr_preview_notice_explains_fallback() {
    let vm = XrStatusVm::new(&CapabilityState::Failed(
        "immersive AR is not supported on this device".to_string(),
    ));
    let mut dom = VirtualDom::new_with_props(XrNotice, XrNoticeProps::builder().vm(vm).build());
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("AR Not Supported"), "missing title in {html}");
    assert!(html.contains("3D preview instead"), "missing message in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn navigator_shows_preview_when_ar_is_unsupported() {
    let mut harness = setup_view_harness_with_xr(
        ViewKind::Navigate("short-demo".to_string()),
        SimulatedXr::unsupported(),
    );
    harness.rebuild();
    settle(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("AR Not Supported"), "missing preview notice in {html}");
    assert_eq!(harness.xr.acquire_count(), 1);
    assert!(!harness.xr.is_active());
}

#[tokio::test(flavor = "current_thread")]
async fn navigator_reports_active_ar_session() {
    let mut harness = setup_view_harness(ViewKind::Navigate("short-demo".to_string()));
    harness.rebuild();
    settle(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("AR session active"), "missing AR badge in {html}");
    assert!(harness.xr.is_active());
}

#[tokio::test(flavor = "current_thread")]
async fn navigator_reacquires_camera_released_by_previous_view() {
    let mut harness = setup_view_harness(ViewKind::Navigate("square-walk".to_string()));
    // Still held by a navigator that has just unmounted.
    harness.camera_slot.acquire().await.unwrap();
    harness.rebuild();
    assert!(harness.render().contains("camera--live"));

    // That navigator's release lands after the new one mounted.
    harness.camera_slot.release().await;
    settle(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("camera--live"), "camera pane out of sync in {html}");
    assert_eq!(harness.camera_slot.state(), CapabilityState::Active);
    assert!(harness.camera.is_active());
    assert_eq!(harness.camera.acquire_count(), 2);
}
