use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::map_route_list;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let items = use_hook(|| map_route_list(ctx.catalog()));
    let launch_route = use_hook(|| ctx.take_launch_route());

    use_effect(move || {
        if let Some(route_id) = launch_route.clone() {
            let _ = navigator.replace(Route::Navigate {
                route_id: route_id.to_string(),
            });
        }
    });

    rsx! {
        div { class: "page page--home",
            h1 { "Wayfind" }
            p { class: "muted", "Pick a route to start the simulated walk." }
            if items.is_empty() {
                p { class: "muted", "No routes loaded." }
            }
            ul { class: "route-list",
                for item in items.iter() {
                    li { key: "{item.id}", class: "route-card",
                        Link { to: Route::Navigate { route_id: item.id.clone() },
                            span { class: "route-card__name", "{item.name}" }
                            span { class: "route-card__meta", "{item.steps_label} / {item.distance_label}" }
                        }
                    }
                }
            }
            p { class: "muted hint", "Keys while walking: left / right arrows step, d toggles debug." }
        }
    }
}
