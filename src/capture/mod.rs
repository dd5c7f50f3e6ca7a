mod config;
mod controller;
mod state;

pub use config::CaptureConfig;
pub use controller::{CaptureController, DetectionOutcome};
pub use state::{CapturePhase, CaptureSnapshot};
