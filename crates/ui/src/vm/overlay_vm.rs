use chrono::{DateTime, Utc};
use services::WalkthroughSnapshot;
use wayfind_core::model::Direction;
use wayfind_core::stepper::Instruction;
use wayfind_core::time::format_elapsed;

/// Rings drawn around the distance indicator never exceed this.
pub const MAX_DISTANCE_RINGS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayIcon {
    ArrowLeft,
    ArrowRight,
    ArrowPath,
    CheckCircle,
}

impl OverlayIcon {
    #[must_use]
    pub fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Left => Self::ArrowLeft,
            Direction::Right => Self::ArrowRight,
            Direction::Arrived => Self::CheckCircle,
            Direction::Forward | Direction::Backward => Self::ArrowPath,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ArrowLeft => "arrow-left",
            Self::ArrowRight => "arrow-right",
            Self::ArrowPath => "arrow-path",
            Self::CheckCircle => "check-circle",
        }
    }

    /// Glyph used by the desktop renderer in place of an icon font.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::ArrowLeft => "\u{2190}",
            Self::ArrowRight => "\u{2192}",
            Self::ArrowPath => "\u{21BB}",
            Self::CheckCircle => "\u{2714}",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayAccent {
    Active,
    Arrived,
}

impl OverlayAccent {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Active => "accent--active",
            Self::Arrived => "accent--arrived",
        }
    }
}

/// Everything the navigation overlay renders for one instruction.
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationOverlayVm {
    pub icon: OverlayIcon,
    pub accent: OverlayAccent,
    pub headline: String,
    pub description: Option<String>,
    pub distance_label: String,
    pub indicator_label: String,
    pub leg_label: String,
    pub progress_percent: f64,
    pub step_counter: String,
    pub show_arrow: bool,
    pub arrow_yaw: f64,
    /// Chevrons stacked in the arrow; zero when the arrow is hidden.
    pub arrow_markers: u32,
    pub distance_rings: u32,
    pub debug_mode: bool,
}

impl NavigationOverlayVm {
    #[must_use]
    pub fn from_instruction(instruction: &Instruction, debug_mode: bool) -> Self {
        let remaining = instruction.remaining_distance;
        let arrived = instruction.direction == Direction::Arrived;

        let (distance_label, indicator_label) = if remaining > 0.0 {
            (format!("{remaining}m to next step"), format!("{remaining}m"))
        } else {
            ("You have arrived!".to_string(), "Arrived!".to_string())
        };

        Self {
            icon: OverlayIcon::for_direction(instruction.direction),
            accent: if arrived {
                OverlayAccent::Arrived
            } else {
                OverlayAccent::Active
            },
            headline: instruction.instruction.clone(),
            description: instruction.description.clone(),
            distance_label,
            indicator_label,
            leg_label: format!("{}m", instruction.leg_distance),
            progress_percent: instruction.progress_percent(),
            step_counter: format!(
                "Step {} of {}",
                instruction.step_index + 1,
                instruction.step_count
            ),
            show_arrow: !instruction.is_terminal,
            arrow_yaw: instruction.direction.yaw_radians(),
            arrow_markers: if instruction.is_terminal {
                0
            } else {
                instruction.marker_count.unwrap_or(1).max(1)
            },
            distance_rings: distance_rings(remaining),
            debug_mode,
        }
    }

    #[must_use]
    pub fn from_snapshot(snapshot: &WalkthroughSnapshot) -> Self {
        Self::from_instruction(&snapshot.instruction, snapshot.debug_mode)
    }

    /// Label of the debug toggle: it names the mode the button switches to.
    #[must_use]
    pub fn debug_button_label(&self) -> &'static str {
        if self.debug_mode { "Live" } else { "Debug" }
    }

    /// `rotate(..)` value for the arrow element. Screen yaw grows clockwise.
    #[must_use]
    pub fn arrow_transform(&self) -> String {
        format!("rotate({:.4}rad)", -self.arrow_yaw)
    }
}

/// `"Arrived in m:ss"` once the walkthrough has reached its destination.
#[must_use]
pub fn arrival_label(started_at: DateTime<Utc>, arrived_at: Option<DateTime<Utc>>) -> Option<String> {
    arrived_at.map(|arrived| format!("Arrived in {}", format_elapsed(arrived - started_at)))
}

#[must_use]
pub fn distance_rings(remaining: f64) -> u32 {
    if !remaining.is_finite() || remaining <= 0.0 {
        return 0;
    }
    let rings = remaining.ceil();
    if rings >= f64::from(MAX_DISTANCE_RINGS) {
        MAX_DISTANCE_RINGS
    } else {
        // Bounded by the check above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rings = rings as u32;
        rings
    }
}
