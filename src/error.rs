use thiserror::Error;

/// Everything the capture session can report to the interface layer.
///
/// Persistence failures are deliberately absent: the backend being down is
/// logged and swallowed, never shown to the user.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Camera access failed (permission denied, no device). Still-image
    /// capture remains available.
    #[error("camera unavailable: {0}")]
    MediaUnavailable(String),

    /// Uploaded bytes could not be decoded into an image.
    #[error("could not decode the uploaded image: {0}")]
    InvalidImage(String),

    /// The detector ran but found no face in the frame.
    #[error("no face detected, try better lighting or another image")]
    NoFaceDetected,

    /// The detection call itself errored or timed out.
    #[error("emotion detection failed: {0}")]
    DetectionFailed(String),

    /// Model loading failed; detection stays unavailable for this session.
    #[error("could not load detection models: {0}")]
    ModelLoad(String),

    /// A detection is already in flight; requests are rejected, not queued.
    #[error("a detection is already in progress")]
    DetectionInFlight,

    /// The session has not finished initializing.
    #[error("session is still initializing")]
    NotReady,

    /// Detection was requested with no camera or image attached.
    #[error("no media source is attached")]
    NoSource,

    /// The session was shut down.
    #[error("capture session is closed")]
    SessionClosed,
}

impl CaptureError {
    /// Whether the user can recover within the same session (retry the
    /// detection, re-upload, or fall back to a still image).
    pub fn retryable(&self) -> bool {
        !matches!(self, Self::ModelLoad(_) | Self::SessionClosed)
    }
}
