use chrono::{DateTime, Utc};
use serde::Serialize;

use wayfind_core::model::SessionId;
use wayfind_core::stepper::{Instruction, NavigationStepper, StepperPhase};

/// What a renderer needs to draw one frame of the walkthrough.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkthroughSnapshot {
    pub session_id: SessionId,
    pub route_name: String,
    pub instruction: Instruction,
    pub phase: StepperPhase,
    pub debug_mode: bool,
    pub started_at: DateTime<Utc>,
    pub arrived_at: Option<DateTime<Utc>>,
}

impl WalkthroughSnapshot {
    pub(crate) fn capture(
        session_id: SessionId,
        stepper: &NavigationStepper,
        started_at: DateTime<Utc>,
        arrived_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            session_id,
            route_name: stepper.route().name().to_string(),
            instruction: stepper.current_instruction(),
            phase: stepper.phase(),
            debug_mode: stepper.progress().debug_mode(),
            started_at,
            arrived_at,
        }
    }

    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.instruction.progress_percent()
    }

    #[must_use]
    pub fn is_arrived(&self) -> bool {
        self.phase.is_arrived()
    }
}
