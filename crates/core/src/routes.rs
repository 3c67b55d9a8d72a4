//! Routes shipped with the app.

use crate::model::{Direction, GeoPoint, NavigationStepDraft, Route, RouteId};

fn step(
    index: u32,
    instruction: &str,
    direction: Direction,
    distance: f64,
    description: &str,
    markers: u32,
) -> NavigationStepDraft {
    NavigationStepDraft::new(index, instruction, direction, distance)
        .with_description(description)
        .with_marker_count(markers)
}

fn build(name: &str, drafts: Vec<NavigationStepDraft>) -> Route {
    Route::from_drafts(name, drafts).expect("built-in route should be valid")
}

/// Nine-step square walk with one-unit legs and 90° turns.
///
/// # Panics
///
/// Never in practice; the data is covered by tests.
#[must_use]
pub fn square_walk() -> Route {
    build(
        "Square walk",
        vec![
            step(1, "Start here", Direction::Forward, 0.0, "Begin your journey from this point", 1),
            step(2, "Walk forward", Direction::Forward, 1.0, "Take 1 step forward", 3),
            step(3, "Turn right", Direction::Right, 0.0, "Turn 90 degrees to your right", 2),
            step(4, "Walk forward", Direction::Forward, 1.0, "Take 1 step forward", 3),
            step(5, "Turn left", Direction::Left, 0.0, "Turn 90 degrees to your left", 2),
            step(6, "Walk forward", Direction::Forward, 1.0, "Take 1 step forward", 3),
            step(7, "Turn right", Direction::Right, 0.0, "Turn 90 degrees to your right", 2),
            step(8, "Walk forward", Direction::Forward, 1.0, "Take 1 step forward", 3),
            step(
                9,
                "Destination reached!",
                Direction::Arrived,
                0.0,
                "Congratulations! You've reached your destination!",
                0,
            ),
        ],
    )
}

/// Demo loop turning right at every corner.
///
/// # Panics
///
/// Never in practice; the data is covered by tests.
#[must_use]
pub fn hackathon_demo() -> Route {
    build(
        "Hackathon demo",
        vec![
            step(1, "Start Demo", Direction::Forward, 0.0, "Welcome to AR Navigation Demo!", 1),
            step(2, "Step forward", Direction::Forward, 1.0, "Take one step forward", 3),
            step(3, "Turn right", Direction::Right, 0.0, "Turn to your right", 2),
            step(4, "Step forward", Direction::Forward, 1.0, "Take one step forward", 3),
            step(5, "Turn right", Direction::Right, 0.0, "Turn to your right", 2),
            step(6, "Step forward", Direction::Forward, 1.0, "Take one step forward", 3),
            step(7, "Turn right", Direction::Right, 0.0, "Turn to your right", 2),
            step(8, "Step forward", Direction::Forward, 1.0, "Take one step forward", 3),
            step(
                9,
                "Demo Complete!",
                Direction::Arrived,
                0.0,
                "You've completed the AR navigation demo!",
                0,
            ),
        ],
    )
}

/// Short five-step route with metre-scale legs.
///
/// # Panics
///
/// Never in practice; the data is covered by tests.
#[must_use]
pub fn short_demo() -> Route {
    build(
        "Short demo",
        vec![
            NavigationStepDraft::new(1, "Start here", Direction::Forward, 0.0),
            NavigationStepDraft::new(2, "Turn right", Direction::Right, 5.0),
            NavigationStepDraft::new(3, "Go straight", Direction::Forward, 10.0),
            NavigationStepDraft::new(4, "Turn left", Direction::Left, 8.0),
            NavigationStepDraft::new(5, "Destination reached", Direction::Arrived, 0.0),
        ],
    )
}

/// City route whose steps carry GPS waypoints.
///
/// # Panics
///
/// Never in practice; the data is covered by tests.
#[must_use]
pub fn pune_gps() -> Route {
    build(
        "Pune GPS walk",
        vec![
            NavigationStepDraft::new(1, "Start from Pune Railway Station", Direction::Forward, 50.0)
                .with_description("Pune Station")
                .with_waypoint(GeoPoint::new(18.5291, 73.8564)),
            NavigationStepDraft::new(2, "Turn right onto FC Road", Direction::Right, 30.0)
                .with_description("FC Road")
                .with_waypoint(GeoPoint::new(18.53, 73.857)),
            NavigationStepDraft::new(3, "Continue straight to Koregaon Park", Direction::Forward, 25.0)
                .with_description("Koregaon Park")
                .with_waypoint(GeoPoint::new(18.531, 73.858)),
            NavigationStepDraft::new(4, "Turn left onto JM Road", Direction::Left, 20.0)
                .with_description("JM Road")
                .with_waypoint(GeoPoint::new(18.532, 73.859)),
            NavigationStepDraft::new(
                5,
                "You've reached your destination in Pune!",
                Direction::Arrived,
                0.0,
            )
            .with_description("Destination")
            .with_waypoint(GeoPoint::new(18.533, 73.86)),
        ],
    )
}

/// All built-in routes keyed by slug. `square-walk` is the default.
#[must_use]
pub fn builtin() -> Vec<(RouteId, Route)> {
    vec![
        (RouteId::from_static("square-walk"), square_walk()),
        (RouteId::from_static("hackathon-demo"), hackathon_demo()),
        (RouteId::from_static("short-demo"), short_demo()),
        (RouteId::from_static("pune-gps"), pune_gps()),
    ]
}

#[must_use]
pub fn default_route_id() -> RouteId {
    RouteId::from_static("square-walk")
}
