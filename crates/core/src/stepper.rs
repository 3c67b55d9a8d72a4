use serde::Serialize;
use thiserror::Error;

use crate::model::{Direction, GeoPoint, NavigationStep, NavigationStepDraft, Route, RouteError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum StepperError {
    /// The route cannot start a walkthrough. Fatal to session start.
    #[error("invalid route: {0}")]
    InvalidRoute(#[from] RouteError),

    /// Manual navigation outside `[0, len)`. Existing progress is untouched.
    #[error("step index {index} is out of range for a route of {len} steps")]
    IndexOutOfRange { index: usize, len: usize },
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// Mutable walkthrough state. Owned by exactly one stepper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationProgress {
    current_index: usize,
    remaining_distance: f64,
    debug_mode: bool,
}

impl NavigationProgress {
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn remaining_distance(&self) -> f64 {
        self.remaining_distance
    }

    /// UI toggle choosing between the live and fallback views.
    #[must_use]
    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }
}

/// Where the walkthrough is in its lifecycle.
///
/// `Walking(i)` while the leg has distance left, `LegComplete(i)` once it hit
/// zero on a non-final step, `Arrived` on the final step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepperPhase {
    Walking(usize),
    LegComplete(usize),
    Arrived,
}

impl StepperPhase {
    #[must_use]
    pub fn is_arrived(self) -> bool {
        matches!(self, StepperPhase::Arrived)
    }
}

/// Snapshot of the current step handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instruction {
    pub step_index: usize,
    pub step_count: usize,
    pub instruction: String,
    pub direction: Direction,
    pub remaining_distance: f64,
    pub leg_distance: f64,
    pub is_terminal: bool,
    pub description: Option<String>,
    pub marker_count: Option<u32>,
    pub waypoint: Option<GeoPoint>,
}

impl Instruction {
    /// Percentage of the current leg already covered, in `[0, 100]`.
    ///
    /// A finished (or zero-length) leg reports 100.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.remaining_distance <= 0.0 || self.leg_distance <= 0.0 {
            return 100.0;
        }
        (100.0 - (self.remaining_distance / self.leg_distance) * 100.0).clamp(0.0, 100.0)
    }
}

//
// ─── STEPPER ───────────────────────────────────────────────────────────────────
//

/// Drives a [`NavigationProgress`] along a fixed [`Route`].
///
/// The stepper never advances on its own: `tick` only shrinks the remaining
/// distance, and the caller decides when to call
/// [`advance_if_leg_complete`](Self::advance_if_leg_complete).
///
/// # Examples
///
/// ```
/// # use wayfind_core::model::{Direction, NavigationStepDraft};
/// # use wayfind_core::stepper::NavigationStepper;
/// let mut stepper = NavigationStepper::initialize(vec![
///     NavigationStepDraft::new(1, "Walk", Direction::Forward, 10.0),
///     NavigationStepDraft::new(2, "Done", Direction::Arrived, 0.0),
/// ])
/// .unwrap();
/// assert_eq!(stepper.tick(5.0), 5.0);
/// assert_eq!(stepper.tick(8.0), 0.0);
/// assert!(stepper.advance_if_leg_complete());
/// assert!(stepper.current_instruction().is_terminal);
/// ```
#[derive(Debug, Clone)]
pub struct NavigationStepper {
    route: Route,
    progress: NavigationProgress,
}

impl NavigationStepper {
    /// Start at step 0 of an already-validated route.
    #[must_use]
    pub fn new(route: Route) -> Self {
        let remaining_distance = route.steps()[0].leg_distance();
        Self {
            route,
            progress: NavigationProgress {
                current_index: 0,
                remaining_distance,
                debug_mode: false,
            },
        }
    }

    /// Validate raw steps into an unnamed route and start at step 0.
    ///
    /// # Errors
    ///
    /// Returns `StepperError::InvalidRoute` if the steps are empty or malformed.
    pub fn initialize(steps: Vec<NavigationStepDraft>) -> Result<Self, StepperError> {
        let route = Route::from_drafts("route", steps)?;
        Ok(Self::new(route))
    }

    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    #[must_use]
    pub fn progress(&self) -> &NavigationProgress {
        &self.progress
    }

    fn current_step(&self) -> &NavigationStep {
        &self.route.steps()[self.progress.current_index]
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.progress.current_index == self.route.last_index()
    }

    /// Simulate walking `decrement` units along the current leg.
    ///
    /// Clamps at zero and never advances. Non-positive or non-finite
    /// decrements leave the state unchanged. Returns the remaining distance.
    pub fn tick(&mut self, decrement: f64) -> f64 {
        if decrement.is_finite() && decrement > 0.0 {
            self.progress.remaining_distance = (self.progress.remaining_distance - decrement).max(0.0);
        }
        self.progress.remaining_distance
    }

    /// Move to the next step if the current leg is finished.
    ///
    /// Returns `false` (and changes nothing) while distance remains or on the
    /// final step.
    pub fn advance_if_leg_complete(&mut self) -> bool {
        if self.progress.remaining_distance > 0.0 || self.is_terminal() {
            return false;
        }
        self.progress.current_index += 1;
        self.progress.remaining_distance = self.current_step().leg_distance();
        true
    }

    /// Jump to `index` and restart its leg.
    ///
    /// # Errors
    ///
    /// Returns `StepperError::IndexOutOfRange` without touching progress when
    /// `index >= route.len()`.
    pub fn go_to_step(&mut self, index: usize) -> Result<Instruction, StepperError> {
        let Some(step) = self.route.step(index) else {
            return Err(StepperError::IndexOutOfRange {
                index,
                len: self.route.len(),
            });
        };
        self.progress.remaining_distance = step.leg_distance();
        self.progress.current_index = index;
        Ok(self.current_instruction())
    }

    /// `go_to_step(current + 1)`, saturating at the final step.
    pub fn next_step(&mut self) -> Instruction {
        let index = (self.progress.current_index + 1).min(self.route.last_index());
        self.restart_at(index)
    }

    /// `go_to_step(current - 1)`, saturating at the first step.
    pub fn previous_step(&mut self) -> Instruction {
        let index = self.progress.current_index.saturating_sub(1);
        self.restart_at(index)
    }

    fn restart_at(&mut self, index: usize) -> Instruction {
        self.progress.current_index = index;
        self.progress.remaining_distance = self.current_step().leg_distance();
        self.current_instruction()
    }

    #[must_use]
    pub fn current_instruction(&self) -> Instruction {
        let step = self.current_step();
        Instruction {
            step_index: self.progress.current_index,
            step_count: self.route.len(),
            instruction: step.instruction().to_string(),
            direction: step.direction(),
            remaining_distance: self.progress.remaining_distance,
            leg_distance: step.leg_distance(),
            is_terminal: self.is_terminal(),
            description: step.description().map(str::to_string),
            marker_count: step.marker_count(),
            waypoint: step.waypoint(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> StepperPhase {
        if self.progress.remaining_distance > 0.0 {
            StepperPhase::Walking(self.progress.current_index)
        } else if self.is_terminal() {
            StepperPhase::Arrived
        } else {
            StepperPhase::LegComplete(self.progress.current_index)
        }
    }

    pub fn toggle_debug(&mut self) -> bool {
        self.progress.debug_mode = !self.progress.debug_mode;
        self.progress.debug_mode
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.progress.debug_mode = enabled;
    }
}
