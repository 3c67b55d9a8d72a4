use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Direction, GeoPoint};

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum StepError {
    #[error("instruction cannot be empty")]
    EmptyInstruction,

    #[error("leg distance must be a non-negative number, got {0}")]
    NegativeDistance(f64),
}

/// One entry of a route. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationStep {
    sequence_index: u32,
    instruction: String,
    direction: Direction,
    leg_distance: f64,
    description: Option<String>,
    marker_count: Option<u32>,
    waypoint: Option<GeoPoint>,
}

/// Unvalidated step, as read from a route file or written in code.
#[derive(Debug, Clone, Deserialize)]
pub struct NavigationStepDraft {
    pub sequence_index: u32,
    pub instruction: String,
    pub direction: Direction,
    pub leg_distance: f64,
    pub description: Option<String>,
    pub marker_count: Option<u32>,
    pub waypoint: Option<GeoPoint>,
}

impl NavigationStepDraft {
    #[must_use]
    pub fn new(
        sequence_index: u32,
        instruction: impl Into<String>,
        direction: Direction,
        leg_distance: f64,
    ) -> Self {
        Self {
            sequence_index,
            instruction: instruction.into(),
            direction,
            leg_distance,
            description: None,
            marker_count: None,
            waypoint: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_marker_count(mut self, count: u32) -> Self {
        self.marker_count = Some(count);
        self
    }

    #[must_use]
    pub fn with_waypoint(mut self, waypoint: GeoPoint) -> Self {
        self.waypoint = Some(waypoint);
        self
    }

    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `StepError::EmptyInstruction` for blank instructions and
    /// `StepError::NegativeDistance` for negative or non-finite distances.
    pub fn validate(self) -> Result<NavigationStep, StepError> {
        let instruction = self.instruction.trim().to_string();
        if instruction.is_empty() {
            return Err(StepError::EmptyInstruction);
        }
        if !self.leg_distance.is_finite() || self.leg_distance < 0.0 {
            return Err(StepError::NegativeDistance(self.leg_distance));
        }
        let description = self
            .description
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        Ok(NavigationStep {
            sequence_index: self.sequence_index,
            instruction,
            direction: self.direction,
            leg_distance: self.leg_distance,
            description,
            marker_count: self.marker_count,
            waypoint: self.waypoint,
        })
    }
}

impl NavigationStep {
    #[must_use]
    pub fn sequence_index(&self) -> u32 {
        self.sequence_index
    }

    #[must_use]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Distance to cover before the leg completes. Zero means the step
    /// completes immediately (e.g. a turn).
    #[must_use]
    pub fn leg_distance(&self) -> f64 {
        self.leg_distance
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Number of visual markers a renderer should draw. Not used by the stepper.
    #[must_use]
    pub fn marker_count(&self) -> Option<u32> {
        self.marker_count
    }

    #[must_use]
    pub fn waypoint(&self) -> Option<GeoPoint> {
        self.waypoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_trims_text() {
        let step = NavigationStepDraft::new(1, "  Turn right ", Direction::Right, 0.0)
            .with_description("   ")
            .validate()
            .unwrap();
        assert_eq!(step.instruction(), "Turn right");
        assert_eq!(step.description(), None);
    }

    #[test]
    fn validate_rejects_blank_instruction() {
        let err = NavigationStepDraft::new(1, "  ", Direction::Forward, 1.0)
            .validate()
            .unwrap_err();
        assert_eq!(err, StepError::EmptyInstruction);
    }

    #[test]
    fn validate_rejects_negative_and_nan_distance() {
        let err = NavigationStepDraft::new(1, "Walk", Direction::Forward, -1.0)
            .validate()
            .unwrap_err();
        assert_eq!(err, StepError::NegativeDistance(-1.0));

        let err = NavigationStepDraft::new(1, "Walk", Direction::Forward, f64::NAN).validate();
        assert!(matches!(err, Err(StepError::NegativeDistance(_))));
    }
}
