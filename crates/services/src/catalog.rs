use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use wayfind_core::model::{Direction, GeoPoint, NavigationStepDraft, Route, RouteId};
use wayfind_core::routes;

use crate::error::CatalogError;

/// One step as written in a route file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDocument {
    pub step: u32,
    pub instruction: String,
    pub direction: Direction,
    pub distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrow_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waypoint: Option<GeoPoint>,
}

/// JSON route file: `{ "id": "...", "name": "...", "steps": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDocument {
    pub id: String,
    pub name: String,
    pub steps: Vec<StepDocument>,
}

impl RouteDocument {
    /// Validate the document into a catalog entry.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidId` or `CatalogError::InvalidRoute`.
    pub fn into_route(self) -> Result<(RouteId, Route), CatalogError> {
        let id = RouteId::new(self.id.clone()).map_err(|_| CatalogError::InvalidId(self.id.clone()))?;
        let drafts = self
            .steps
            .into_iter()
            .map(|step| NavigationStepDraft {
                sequence_index: step.step,
                instruction: step.instruction,
                direction: step.direction,
                leg_distance: step.distance,
                description: step.description,
                marker_count: step.arrow_count,
                waypoint: step.waypoint,
            })
            .collect();
        let route = Route::from_drafts(self.name, drafts).map_err(|source| {
            CatalogError::InvalidRoute {
                id: id.to_string(),
                source,
            }
        })?;
        Ok((id, route))
    }

    #[must_use]
    pub fn from_route(id: &RouteId, route: &Route) -> Self {
        Self {
            id: id.to_string(),
            name: route.name().to_string(),
            steps: route
                .steps()
                .iter()
                .map(|step| StepDocument {
                    step: step.sequence_index(),
                    instruction: step.instruction().to_string(),
                    direction: step.direction(),
                    distance: step.leg_distance(),
                    description: step.description().map(str::to_string),
                    arrow_count: step.marker_count(),
                    waypoint: step.waypoint(),
                })
                .collect(),
        }
    }
}

/// Named routes available to start a walkthrough from.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    routes: BTreeMap<RouteId, Route>,
}

impl RouteCatalog {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog seeded with the built-in routes.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            routes: routes::builtin().into_iter().collect(),
        }
    }

    /// Insert or replace a route. Returns the replaced route, if any.
    pub fn insert(&mut self, id: RouteId, route: Route) -> Option<Route> {
        self.routes.insert(id, route)
    }

    #[must_use]
    pub fn get(&self, id: &RouteId) -> Option<&Route> {
        self.routes.get(id)
    }

    /// Routes sorted by id.
    pub fn list(&self) -> impl Iterator<Item = (&RouteId, &Route)> {
        self.routes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Parse a JSON document holding either one route or an array of routes.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if parsing or validation fails; nothing is
    /// inserted in that case.
    pub fn load_str(&mut self, raw: &str) -> Result<Vec<RouteId>, CatalogError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let documents: Vec<RouteDocument> = if value.is_array() {
            serde_json::from_value(value)?
        } else {
            vec![serde_json::from_value(value)?]
        };

        let parsed = documents
            .into_iter()
            .map(RouteDocument::into_route)
            .collect::<Result<Vec<_>, _>>()?;

        let mut ids = Vec::with_capacity(parsed.len());
        for (id, route) in parsed {
            debug!(route = %id, steps = route.len(), "route loaded");
            ids.push(id.clone());
            self.routes.insert(id, route);
        }
        Ok(ids)
    }

    /// Load routes from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on I/O, parse or validation failures.
    pub fn load_file(&mut self, path: &Path) -> Result<Vec<RouteId>, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        self.load_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "id": "corridor",
        "name": "Corridor",
        "steps": [
            { "step": 1, "instruction": "Go", "direction": "straight", "distance": 12, "arrowCount": 3 },
            { "step": 2, "instruction": "Turn", "direction": "left", "distance": 0 },
            { "step": 3, "instruction": "Here", "direction": "arrival", "distance": 0 }
        ]
    }"#;

    #[test]
    fn builtin_catalog_lists_sorted() {
        let catalog = RouteCatalog::builtin();
        let ids: Vec<&str> = catalog.list().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["hackathon-demo", "pune-gps", "short-demo", "square-walk"]);
    }

    #[test]
    fn load_single_document() {
        let mut catalog = RouteCatalog::empty();
        let ids = catalog.load_str(DOC).unwrap();
        assert_eq!(ids.len(), 1);
        let route = catalog.get(&ids[0]).unwrap();
        assert_eq!(route.name(), "Corridor");
        assert_eq!(route.steps()[0].direction(), Direction::Forward);
        assert_eq!(route.steps()[0].marker_count(), Some(3));
        assert_eq!(route.steps()[2].direction(), Direction::Arrived);
    }

    #[test]
    fn load_array_document() {
        let mut catalog = RouteCatalog::empty();
        let ids = catalog.load_str(&format!("[{DOC}]")).unwrap();
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn invalid_route_is_rejected_without_inserting() {
        let raw = r#"{"id": "bad", "name": "Bad", "steps": []}"#;
        let mut catalog = RouteCatalog::empty();
        let err = catalog.load_str(raw).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRoute { .. }));
        assert!(catalog.is_empty());
    }

    #[test]
    fn invalid_id_is_rejected() {
        let raw = r#"{"id": "Bad Id", "name": "Bad", "steps": [
            { "step": 1, "instruction": "Here", "direction": "arrived", "distance": 0 }
        ]}"#;
        let err = RouteCatalog::empty().load_str(raw).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidId(_)));
    }

    #[test]
    fn unknown_direction_fails_parse() {
        let raw = r#"{"id": "x", "name": "X", "steps": [
            { "step": 1, "instruction": "Fly", "direction": "up", "distance": 0 }
        ]}"#;
        let err = RouteCatalog::empty().load_str(raw).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn document_roundtrips_builtin_route() {
        let (id, route) = routes::builtin().remove(0);
        let json = serde_json::to_string(&RouteDocument::from_route(&id, &route)).unwrap();
        let mut catalog = RouteCatalog::empty();
        catalog.load_str(&json).unwrap();
        assert_eq!(catalog.get(&id), Some(&route));
    }
}
