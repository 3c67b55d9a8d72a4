use std::sync::Arc;

use tracing::warn;
use wayfind_core::Clock;
use wayfind_core::model::{Route, RouteId};
use wayfind_core::stepper::NavigationStepper;

use super::session::WalkthroughSession;
use crate::catalog::RouteCatalog;
use crate::config::SimulationSettings;
use crate::error::WalkthroughError;

/// Starts walkthrough sessions for routes in a catalog.
#[derive(Clone)]
pub struct WalkthroughService {
    clock: Clock,
    catalog: Arc<RouteCatalog>,
    settings: SimulationSettings,
}

impl WalkthroughService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<RouteCatalog>, settings: SimulationSettings) -> Self {
        Self {
            clock,
            catalog,
            settings,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: SimulationSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> SimulationSettings {
        self.settings
    }

    #[must_use]
    pub fn catalog(&self) -> &RouteCatalog {
        &self.catalog
    }

    /// Look up a route by id.
    ///
    /// # Errors
    ///
    /// Returns `WalkthroughError::UnknownRoute` if the catalog has no such route.
    pub fn route(&self, route_id: &RouteId) -> Result<&Route, WalkthroughError> {
        self.catalog
            .get(route_id)
            .ok_or_else(|| WalkthroughError::UnknownRoute(route_id.clone()))
    }

    /// Start a new walkthrough at step 0 of the given route.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `WalkthroughError::UnknownRoute` if the catalog has no such route.
    pub fn start(&self, route_id: &RouteId) -> Result<WalkthroughSession, WalkthroughError> {
        let route = self.route(route_id).inspect_err(|err| {
            warn!(route = %route_id, error = %err, "cannot start walkthrough");
        })?;
        let stepper = NavigationStepper::new(route.clone());
        Ok(WalkthroughSession::start(stepper, self.settings, self.clock))
    }
}
