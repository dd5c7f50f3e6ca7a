use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::media::Frame;

/// Face bounding box in the frame's native pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FaceBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One detected face: a probability per expression label plus its geometry.
/// Labels are raw strings because the provider is external; anything outside
/// the vocabulary is ignored by the arg-max and only surfaces through the
/// display mapping's fallback entry.
#[derive(Debug, Clone)]
pub struct Detection {
    pub expressions: HashMap<String, f64>,
    pub face_box: FaceBox,
}

/// External face/expression capability. Models load once per process and are
/// read-only afterwards; detection returns zero or one face per frame.
#[async_trait]
pub trait ExpressionDetector: Send + Sync {
    /// Asynchronous and idempotent; must complete before detection.
    async fn load_models(&self) -> Result<()>;

    async fn detect_expression(&self, frame: &Frame) -> Result<Option<Detection>>;
}
