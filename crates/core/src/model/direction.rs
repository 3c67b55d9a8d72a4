use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown direction: {0}")]
pub struct ParseDirectionError(pub String);

/// Symbolic direction for a navigation step.
///
/// Route files use several spellings for the same cue, so parsing accepts the
/// aliases `straight`/`arrival` and the compass words of GPS routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Direction {
    Forward,
    Left,
    Right,
    Backward,
    Arrived,
}

impl Direction {
    /// Yaw applied to a forward-pointing arrow model, in radians.
    #[must_use]
    pub fn yaw_radians(self) -> f64 {
        match self {
            Direction::Right => -FRAC_PI_2,
            Direction::Left => FRAC_PI_2,
            Direction::Backward => PI,
            Direction::Forward | Direction::Arrived => 0.0,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Direction::Arrived)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Backward => "backward",
            Direction::Arrived => "arrived",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" | "straight" | "north" => Ok(Direction::Forward),
            "left" | "west" => Ok(Direction::Left),
            "right" | "east" => Ok(Direction::Right),
            "backward" | "south" => Ok(Direction::Backward),
            "arrived" | "arrival" => Ok(Direction::Arrived),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = ParseDirectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
