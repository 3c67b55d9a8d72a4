mod direction;
pub mod geo;
mod ids;
mod route;
mod step;

pub use direction::{Direction, ParseDirectionError};
pub use geo::{CompassHeading, GeoPoint, haversine_meters};
pub use ids::{ParseIdError, RouteId, SessionId};
pub use route::{Route, RouteError};
pub use step::{NavigationStep, NavigationStepDraft, StepError};
