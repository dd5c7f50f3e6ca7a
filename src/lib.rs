//! Emotion-capture session core for the HealthCue wellness client.
//!
//! Coordinates a media source (live camera or uploaded still) with an
//! external face/expression detector, keeps a bounded rolling history of
//! observations, and records captures on the backend fire-and-forget.

mod capture;
mod detector;
mod emotion;
mod error;
mod media;
mod overlay;
mod persist;

pub use capture::{
    CaptureConfig, CaptureController, CapturePhase, CaptureSnapshot, DetectionOutcome,
};
pub use detector::{Detection, ExpressionDetector, FaceBox};
pub use emotion::display::{display_for, display_for_label, ColorCategory, EmotionDisplay};
pub use emotion::history::EmotionHistory;
pub use emotion::{dominant_emotion, Emotion, EmotionObservation};
pub use error::CaptureError;
pub use media::{CameraFeed, Frame, MediaSourceManager, SourceKind};
pub use overlay::{plan_overlay, OverlayLabel, OverlayPlan, Rect};
pub use persist::{EmotionSink, HttpEmotionSink};
