use serde::Serialize;

use crate::emotion::history::EmotionHistory;
use crate::media::{MediaSourceManager, SourceKind};

/// Where the session is in its lifecycle. There is no terminal phase; the
/// session is torn down externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CapturePhase {
    Initializing,
    Ready,
    Detecting,
    Error,
}

/// Mutable session state, guarded by the controller's mutex. Keeping the
/// media source and history behind the same lock makes phase decisions and
/// source switches atomic.
pub(crate) struct SessionState {
    pub phase: CapturePhase,
    pub last_error: Option<String>,
    pub models_loaded: bool,
    pub closed: bool,
    pub media: MediaSourceManager,
    pub history: EmotionHistory,
}

impl SessionState {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            phase: CapturePhase::Initializing,
            last_error: None,
            models_loaded: false,
            closed: false,
            media: MediaSourceManager::new(),
            history: EmotionHistory::new(history_capacity),
        }
    }

    pub fn enter_ready(&mut self) {
        self.phase = CapturePhase::Ready;
        self.last_error = None;
    }

    pub fn enter_error(&mut self, reason: impl Into<String>) {
        self.phase = CapturePhase::Error;
        self.last_error = Some(reason.into());
    }
}

/// UI-facing view of the session. `phase` tells the interface whether to
/// show loading, ready, detecting, or an error with `lastError`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSnapshot {
    pub session_id: String,
    pub phase: CapturePhase,
    pub last_error: Option<String>,
    pub source: SourceKind,
}
