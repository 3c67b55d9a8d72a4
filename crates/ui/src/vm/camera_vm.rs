use services::CapabilityState;

/// What the camera pane behind the overlay shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CameraPaneVm {
    /// Placeholder frame: debug mode, or the camera is still starting.
    Fallback,
    Live,
    Error { message: String },
}

impl CameraPaneVm {
    #[must_use]
    pub fn new(debug_mode: bool, camera: &CapabilityState) -> Self {
        if debug_mode {
            return Self::Fallback;
        }
        match camera {
            CapabilityState::Failed(message) => Self::Error {
                message: message.clone(),
            },
            CapabilityState::Active => Self::Live,
            CapabilityState::Idle | CapabilityState::Acquiring => Self::Fallback,
        }
    }

    #[must_use]
    pub fn can_retry(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
