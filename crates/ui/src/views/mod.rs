mod home;
mod navigator;
mod overlay;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use navigator::NavigatorView;
pub use overlay::{
    CameraPane, DirectionArrow, DistanceIndicator, LocationPanel, NavigationOverlay, XrNotice,
};
