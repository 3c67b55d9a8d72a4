//! Shared error types for the services crate.

use thiserror::Error;

use wayfind_core::model::{RouteError, RouteId};
use wayfind_core::stepper::StepperError;

/// Errors emitted while acquiring or reading a device capability.
///
/// These are shown to the user with a manual retry action; nothing here is
/// retried automatically.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CapabilityError {
    #[error("{0} is not supported on this device")]
    Unsupported(&'static str),
    #[error("permission to use the {0} was denied")]
    PermissionDenied(&'static str),
    #[error("{0}")]
    Unavailable(String),
    #[error("{0} has not been acquired")]
    NotAcquired(&'static str),
    #[error("{0} was released before it finished starting")]
    Released(&'static str),
}

/// Errors emitted while validating simulation settings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },
    #[error("tick decrement must be a finite number > 0, got {0}")]
    InvalidDecrement(f64),
    #[error("speed factor must be a finite number > 0 that keeps timers in range, got {0}")]
    InvalidSpeed(f64),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors emitted by `RouteCatalog`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("invalid route id: {0}")]
    InvalidId(String),
    #[error("route {id}: {source}")]
    InvalidRoute {
        id: String,
        #[source]
        source: RouteError,
    },
    #[error("failed to read route file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse route file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors emitted by walkthrough sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WalkthroughError {
    #[error("unknown route: {0}")]
    UnknownRoute(RouteId),
    #[error(transparent)]
    Stepper(#[from] StepperError),
    #[error("walkthrough session has stopped")]
    Closed,
}
