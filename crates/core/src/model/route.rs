use thiserror::Error;

use crate::model::{NavigationStep, NavigationStepDraft, StepError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum RouteError {
    #[error("route name cannot be empty")]
    EmptyName,

    #[error("route must contain at least one step")]
    Empty,

    #[error("step {position}: {source}")]
    InvalidStep {
        position: usize,
        #[source]
        source: StepError,
    },

    #[error("step {position}: leg distance must be non-negative, got {distance}")]
    NegativeDistance { position: usize, distance: f64 },

    #[error("step {position}: sequence index {index} does not follow {previous}")]
    SequenceOutOfOrder {
        position: usize,
        index: u32,
        previous: u32,
    },

    #[error("final step must be an arrival")]
    MissingTerminal,

    #[error("arrival step must have zero distance, got {0}")]
    TerminalDistance(f64),

    #[error("step {position}: arrival is only allowed as the final step")]
    EarlyTerminal { position: usize },
}

//
// ─── ROUTE ─────────────────────────────────────────────────────────────────────
//

/// A validated, non-empty, ordered list of steps ending in an arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    name: String,
    steps: Vec<NavigationStep>,
}

impl Route {
    /// Build a route from already-validated steps.
    ///
    /// # Errors
    ///
    /// Returns `RouteError` when the route is empty, unordered, contains a
    /// negative leg, or does not end in a zero-distance arrival.
    pub fn new(name: impl Into<String>, steps: Vec<NavigationStep>) -> Result<Self, RouteError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(RouteError::EmptyName);
        }

        let Some(last) = steps.last() else {
            return Err(RouteError::Empty);
        };
        if !last.direction().is_terminal() {
            return Err(RouteError::MissingTerminal);
        }
        if last.leg_distance() != 0.0 {
            return Err(RouteError::TerminalDistance(last.leg_distance()));
        }

        let last_position = steps.len() - 1;
        let mut previous: Option<u32> = None;
        for (position, step) in steps.iter().enumerate() {
            if !step.leg_distance().is_finite() || step.leg_distance() < 0.0 {
                return Err(RouteError::NegativeDistance {
                    position,
                    distance: step.leg_distance(),
                });
            }
            if let Some(prev) = previous {
                if step.sequence_index() <= prev {
                    return Err(RouteError::SequenceOutOfOrder {
                        position,
                        index: step.sequence_index(),
                        previous: prev,
                    });
                }
            }
            if position != last_position && step.direction().is_terminal() {
                return Err(RouteError::EarlyTerminal { position });
            }
            previous = Some(step.sequence_index());
        }

        Ok(Self { name, steps })
    }

    /// Validate every draft, then the route as a whole.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::InvalidStep` with the offending position if a draft
    /// fails validation, otherwise the errors of [`Route::new`].
    pub fn from_drafts(
        name: impl Into<String>,
        drafts: Vec<NavigationStepDraft>,
    ) -> Result<Self, RouteError> {
        let steps = drafts
            .into_iter()
            .enumerate()
            .map(|(position, draft)| {
                draft
                    .validate()
                    .map_err(|source| RouteError::InvalidStep { position, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, steps)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn steps(&self) -> &[NavigationStep] {
        &self.steps
    }

    #[must_use]
    pub fn step(&self, index: usize) -> Option<&NavigationStep> {
        self.steps.get(index)
    }

    /// Number of steps. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// Sum of all leg distances.
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        self.steps.iter().map(NavigationStep::leg_distance).sum()
    }
}
