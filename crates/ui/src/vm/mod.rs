mod camera_vm;
mod location_vm;
mod overlay_vm;
mod route_list_vm;
mod xr_vm;

pub use camera_vm::CameraPaneVm;
pub use location_vm::{LocationPanelVm, SensorReading};
pub use overlay_vm::{
    MAX_DISTANCE_RINGS, NavigationOverlayVm, OverlayAccent, OverlayIcon, arrival_label,
    distance_rings,
};
pub use route_list_vm::{RouteListItemVm, map_route_list};
pub use xr_vm::{PREVIEW_MESSAGE, XrStatusVm};
