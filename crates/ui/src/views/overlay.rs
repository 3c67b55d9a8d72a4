use dioxus::prelude::*;

use crate::vm::{CameraPaneVm, LocationPanelVm, NavigationOverlayVm, PREVIEW_MESSAGE, XrStatusVm};

#[component]
pub fn NavigationOverlay(vm: NavigationOverlayVm) -> Element {
    let accent = vm.accent.class();
    let icon = vm.icon.name();
    let glyph = vm.icon.glyph();
    let progress = vm.progress_percent;

    rsx! {
        div { class: "overlay",
            div { class: "overlay__progress",
                div { class: "overlay__scale",
                    span { "0m" }
                    span { "{vm.leg_label}" }
                }
                div { class: "overlay__track",
                    div { class: "overlay__fill", style: "width: {progress}%;" }
                }
            }
            div { class: "overlay__info",
                div { class: "overlay__icon {accent}", "data-icon": "{icon}", "{glyph}" }
                div { class: "overlay__text",
                    p { class: "overlay__headline", "{vm.headline}" }
                    if let Some(description) = vm.description.as_ref() {
                        p { class: "overlay__description", "{description}" }
                    }
                    p { class: "overlay__distance", "{vm.distance_label}" }
                }
                span { class: "overlay__counter", "{vm.step_counter}" }
            }
        }
    }
}

#[component]
pub fn DirectionArrow(yaw_transform: String, markers: u32) -> Element {
    rsx! {
        div { class: "arrow", style: "transform: {yaw_transform};",
            for i in 0..markers {
                span { key: "{i}", class: "arrow__chevron", "\u{25B2}" }
            }
        }
    }
}

#[component]
pub fn DistanceIndicator(label: String, rings: u32) -> Element {
    rsx! {
        div { class: "indicator",
            for i in 0..rings {
                span { key: "{i}", class: "indicator__ring indicator__ring--{i}" }
            }
            span { class: "indicator__label", "{label}" }
        }
    }
}

#[component]
pub fn CameraPane(vm: CameraPaneVm, on_retry: EventHandler<()>) -> Element {
    match vm {
        CameraPaneVm::Fallback => rsx! {
            div { class: "camera camera--fallback",
                p { "Camera feed loading..." }
                div { class: "camera__frame" }
            }
        },
        CameraPaneVm::Live => rsx! {
            div { class: "camera camera--live", "data-state": "live" }
        },
        CameraPaneVm::Error { message } => rsx! {
            div { class: "camera camera--error",
                p { class: "camera__title", "Camera Error" }
                p { class: "camera__message", "{message}" }
                button { class: "btn", onclick: move |_| on_retry.call(()), "Retry Camera" }
            }
        },
    }
}

#[component]
pub fn XrNotice(vm: XrStatusVm) -> Element {
    match vm {
        XrStatusVm::Preview { reason } => rsx! {
            div { class: "xr xr--preview", title: "{reason}",
                p { class: "xr__title", "AR Not Supported" }
                p { class: "xr__message", "{PREVIEW_MESSAGE}" }
            }
        },
        other => rsx! {
            span { class: "xr xr--badge", "{other.mode_label()}" }
        },
    }
}

#[component]
pub fn LocationPanel(vm: LocationPanelVm) -> Element {
    rsx! {
        div { class: "location",
            h2 { class: "location__title", "Location-Based AR Navigation" }
            p { "{vm.position_label}" }
            p { "{vm.heading_label}" }
            p { "{vm.waypoint_label}" }
            if let Some(distance) = vm.waypoint_distance_label.as_ref() {
                p { class: "location__distance", "{distance}" }
            }
            if let Some(error) = vm.error.as_ref() {
                p { class: "location__error", "{error}" }
            }
        }
    }
}
