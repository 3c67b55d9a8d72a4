use services::CapabilityState;

pub const PREVIEW_MESSAGE: &str =
    "Your device doesn't support WebXR AR. You'll see a 3D preview instead.";

/// Whether the overlay runs inside an immersive AR session or a flat preview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XrStatusVm {
    Checking,
    Immersive,
    /// AR is unavailable; `reason` is the capability error, kept for the tooltip.
    Preview { reason: String },
}

impl XrStatusVm {
    #[must_use]
    pub fn new(xr: &CapabilityState) -> Self {
        match xr {
            CapabilityState::Idle | CapabilityState::Acquiring => Self::Checking,
            CapabilityState::Active => Self::Immersive,
            CapabilityState::Failed(reason) => Self::Preview {
                reason: reason.clone(),
            },
        }
    }

    #[must_use]
    pub fn mode_label(&self) -> &'static str {
        match self {
            Self::Checking => "Checking AR support...",
            Self::Immersive => "AR session active",
            Self::Preview { .. } => "3D preview mode",
        }
    }

    #[must_use]
    pub fn is_preview(&self) -> bool {
        matches!(self, Self::Preview { .. })
    }
}
