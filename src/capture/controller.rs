use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{info, warn};
use tokio::sync::Mutex;
use tokio::time::timeout;
use uuid::Uuid;

use crate::detector::ExpressionDetector;
use crate::emotion::display::display_for;
use crate::emotion::{dominant_emotion, EmotionObservation};
use crate::error::CaptureError;
use crate::media::CameraFeed;
use crate::overlay::{plan_overlay, OverlayPlan};
use crate::persist::EmotionSink;

use super::config::CaptureConfig;
use super::state::{CapturePhase, CaptureSnapshot, SessionState};

/// What a successful detection hands back: the recorded observation plus
/// ready-to-draw overlay geometry for the caller's display surface.
#[derive(Debug, Clone)]
pub struct DetectionOutcome {
    pub observation: EmotionObservation,
    pub overlay: OverlayPlan,
}

/// The capture session state machine.
///
/// Drives initialization (models, then camera), explicit detection requests,
/// the rolling history, and fire-and-forget persistence. One session maps to
/// one mounted capture screen; teardown requires a fresh controller.
#[derive(Clone)]
pub struct CaptureController {
    session_id: String,
    state: Arc<Mutex<SessionState>>,
    detector: Arc<dyn ExpressionDetector>,
    sink: Arc<dyn EmotionSink>,
    auth_token: String,
    config: CaptureConfig,
}

impl CaptureController {
    pub fn new(
        detector: Arc<dyn ExpressionDetector>,
        sink: Arc<dyn EmotionSink>,
        auth_token: impl Into<String>,
        config: CaptureConfig,
    ) -> Self {
        let state = SessionState::new(config.history_capacity);
        Self {
            session_id: Uuid::new_v4().to_string(),
            state: Arc::new(Mutex::new(state)),
            detector,
            sink,
            auth_token: auth_token.into(),
            config,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Loads the detector models, then tries to bind the camera.
    ///
    /// Model-load failure puts the session in `Error` with detection
    /// unavailable until a fresh session. Camera failure is soft: the session
    /// reports `MediaUnavailable` but still accepts an uploaded image. With
    /// no camera supplied the session goes straight to `Ready` for
    /// still-image-only capture. Valid once, from `Initializing`.
    pub async fn initialize(&self, camera: Option<Box<dyn CameraFeed>>) -> CaptureSnapshot {
        {
            let state = self.state.lock().await;
            if state.phase != CapturePhase::Initializing || state.closed {
                warn!("session {}: initialize called twice, ignoring", self.session_id);
                return self.snapshot_locked(&state);
            }
        }

        if let Err(err) = self.detector.load_models().await {
            let reason = CaptureError::ModelLoad(format!("{err:#}"));
            warn!("session {}: {reason}", self.session_id);
            let mut state = self.state.lock().await;
            state.enter_error(reason.to_string());
            return self.snapshot_locked(&state);
        }
        info!("session {}: detection models loaded", self.session_id);

        let mut state = self.state.lock().await;
        state.models_loaded = true;
        match camera {
            Some(feed) => match state.media.attach_camera(feed) {
                Ok(()) => {
                    info!("session {}: camera bound", self.session_id);
                    state.enter_ready();
                }
                Err(err) => {
                    warn!(
                        "session {}: {err}; still-image capture remains available",
                        self.session_id
                    );
                    state.enter_error(err.to_string());
                }
            },
            // Readiness does not require a camera; the user may only ever
            // upload stills.
            None => state.enter_ready(),
        }
        self.snapshot_locked(&state)
    }

    /// Makes an uploaded image the current source. Rejected mid-detection;
    /// a good upload clears a prior camera/detection error.
    pub async fn attach_image(&self, bytes: &[u8]) -> Result<CaptureSnapshot, CaptureError> {
        let mut state = self.state.lock().await;
        if state.closed {
            return Err(CaptureError::SessionClosed);
        }
        if state.phase == CapturePhase::Detecting {
            return Err(CaptureError::DetectionInFlight);
        }

        state.media.attach_image(bytes)?;
        info!(
            "session {}: still image attached ({} bytes)",
            self.session_id,
            bytes.len()
        );
        if state.models_loaded {
            state.enter_ready();
        }
        Ok(self.snapshot_locked(&state))
    }

    /// Binds a (already constructed) camera feed as the current source.
    /// Rejected mid-detection.
    pub async fn attach_camera(
        &self,
        feed: Box<dyn CameraFeed>,
    ) -> Result<CaptureSnapshot, CaptureError> {
        let mut state = self.state.lock().await;
        if state.closed {
            return Err(CaptureError::SessionClosed);
        }
        if state.phase == CapturePhase::Detecting {
            return Err(CaptureError::DetectionInFlight);
        }

        match state.media.attach_camera(feed) {
            Ok(()) => {
                info!("session {}: camera bound", self.session_id);
                if state.models_loaded {
                    state.enter_ready();
                }
                Ok(self.snapshot_locked(&state))
            }
            Err(err) => {
                warn!("session {}: {err}", self.session_id);
                state.enter_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Runs one detection against the current frame and returns the recorded
    /// observation plus overlay geometry scaled to `display` dimensions.
    ///
    /// At most one detection is in flight per session; a request arriving
    /// while one is running is rejected, never queued. A prior detection
    /// error is not sticky: the next request is accepted. No-face and
    /// detector failures move the session to `Error` with the reason; the
    /// bounded timeout surfaces as a detection failure.
    pub async fn request_detection(
        &self,
        display: (u32, u32),
    ) -> Result<DetectionOutcome, CaptureError> {
        let frame = {
            let mut state = self.state.lock().await;
            if state.closed {
                return Err(CaptureError::SessionClosed);
            }
            match state.phase {
                CapturePhase::Detecting => return Err(CaptureError::DetectionInFlight),
                CapturePhase::Initializing => return Err(CaptureError::NotReady),
                CapturePhase::Ready | CapturePhase::Error => {}
            }
            if !state.models_loaded {
                return Err(CaptureError::ModelLoad(
                    "models did not load for this session".into(),
                ));
            }
            let Some(frame) = state.media.current_frame() else {
                return Err(CaptureError::NoSource);
            };
            state.phase = CapturePhase::Detecting;
            state.last_error = None;
            frame
        };

        info!(
            "session {}: detection started on {}x{} frame",
            self.session_id,
            frame.width(),
            frame.height()
        );

        let deadline = Duration::from_secs(self.config.detect_timeout_secs);
        let detection = match timeout(deadline, self.detector.detect_expression(&frame)).await {
            Err(_) => {
                return self
                    .fail_detection(CaptureError::DetectionFailed(format!(
                        "timed out after {}s",
                        self.config.detect_timeout_secs
                    )))
                    .await;
            }
            Ok(Err(err)) => {
                return self
                    .fail_detection(CaptureError::DetectionFailed(format!("{err:#}")))
                    .await;
            }
            Ok(Ok(None)) => return self.fail_detection(CaptureError::NoFaceDetected).await,
            Ok(Ok(Some(detection))) => detection,
        };

        let Some((emotion, confidence)) = dominant_emotion(&detection.expressions) else {
            // A face with no vocabulary expression is nothing we can present.
            return self.fail_detection(CaptureError::NoFaceDetected).await;
        };

        let observation = EmotionObservation {
            emotion,
            confidence,
            observed_at: Utc::now(),
        };
        let label = format!("{} {:.0}%", display_for(emotion).label, confidence * 100.0);
        let overlay = plan_overlay(
            detection.face_box,
            (frame.width(), frame.height()),
            display,
            &label,
        );

        {
            let mut state = self.state.lock().await;
            if state.closed {
                return Err(CaptureError::SessionClosed);
            }
            state.history.record(observation.clone());
            state.enter_ready();
        }
        self.spawn_persist(observation.clone());
        info!(
            "session {}: detected {} at {:.1}%",
            self.session_id,
            emotion.label(),
            confidence * 100.0
        );

        Ok(DetectionOutcome {
            observation,
            overlay,
        })
    }

    pub async fn snapshot(&self) -> CaptureSnapshot {
        let state = self.state.lock().await;
        self.snapshot_locked(&state)
    }

    /// Newest-first copy of the rolling history.
    pub async fn history(&self) -> Vec<EmotionObservation> {
        self.state.lock().await.history.newest_first()
    }

    /// Releases the media source (camera stopped) and closes the session.
    /// A closed session rejects every further operation.
    pub async fn shutdown(&self) {
        let mut state = self.state.lock().await;
        state.media.release();
        state.closed = true;
        info!("session {}: shut down", self.session_id);
    }

    async fn fail_detection(
        &self,
        err: CaptureError,
    ) -> Result<DetectionOutcome, CaptureError> {
        warn!("session {}: {err}", self.session_id);
        let mut state = self.state.lock().await;
        if !state.closed {
            state.enter_error(err.to_string());
        }
        Err(err)
    }

    fn spawn_persist(&self, observation: EmotionObservation) {
        let sink = Arc::clone(&self.sink);
        let token = self.auth_token.clone();
        let session_id = self.session_id.clone();
        // Storage is fire-and-forget: an unreachable backend must never
        // block or degrade the capture experience.
        tokio::spawn(async move {
            if let Err(err) = sink
                .record_emotion(&token, observation.emotion.label(), observation.confidence)
                .await
            {
                warn!("session {session_id}: failed to record emotion upstream: {err:#}");
            }
        });
    }

    fn snapshot_locked(&self, state: &SessionState) -> CaptureSnapshot {
        CaptureSnapshot {
            session_id: self.session_id.clone(),
            phase: state.phase,
            last_error: state.last_error.clone(),
            source: state.media.source_kind(),
        }
    }
}
