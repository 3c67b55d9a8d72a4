mod service;
mod session;
mod snapshot;

// Public API of the walkthrough subsystem.
pub use crate::error::WalkthroughError;
pub use service::WalkthroughService;
pub use session::WalkthroughSession;
pub use snapshot::WalkthroughSnapshot;
