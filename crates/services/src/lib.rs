#![forbid(unsafe_code)]

pub mod capabilities;
pub mod catalog;
pub mod config;
pub mod error;
pub mod walkthrough;

pub use wayfind_core::Clock;

pub use capabilities::{
    Capability, CapabilityKind, CapabilitySlot, CapabilityState, LocationSource, Orientation,
    OrientationSource, SimulatedCamera, SimulatedLocation, SimulatedOrientation, SimulatedXr,
};
pub use catalog::{RouteCatalog, RouteDocument};
pub use config::{SimulationSettings, SimulationSettingsDraft};
pub use error::{CapabilityError, CatalogError, ConfigError, WalkthroughError};
pub use walkthrough::{WalkthroughService, WalkthroughSession, WalkthroughSnapshot};
