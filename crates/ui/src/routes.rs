use dioxus::prelude::*;
use dioxus_router::Routable;

use crate::views::{HomeView, NavigatorView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/", HomeView)] Home {},
    #[route("/navigate/:route_id", NavigatorView)] Navigate { route_id: String },
}
