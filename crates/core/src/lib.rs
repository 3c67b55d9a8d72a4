#![forbid(unsafe_code)]

pub mod model;
pub mod routes;
pub mod stepper;
pub mod time;

pub use time::Clock;
