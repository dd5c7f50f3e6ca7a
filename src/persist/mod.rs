use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;

/// Backend recording of a captured emotion. The session treats this as
/// fire-and-forget: failures are logged by the caller and never surface to
/// the user.
#[async_trait]
pub trait EmotionSink: Send + Sync {
    async fn record_emotion(&self, token: &str, emotion: &str, confidence: f64) -> Result<()>;
}

#[derive(Serialize)]
struct EmotionCapturePayload<'a> {
    emotion: &'a str,
    confidence: f64,
}

/// Posts captures to the HealthCue backend. The bearer token comes from the
/// auth subsystem and is forwarded unchanged.
pub struct HttpEmotionSink {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEmotionSink {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn capture_url(&self) -> String {
        format!(
            "{}/api/v1/emotion/capture",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl EmotionSink for HttpEmotionSink {
    async fn record_emotion(&self, token: &str, emotion: &str, confidence: f64) -> Result<()> {
        let response = self
            .client
            .post(self.capture_url())
            .bearer_auth(token)
            .json(&EmotionCapturePayload {
                emotion,
                confidence,
            })
            .send()
            .await
            .context("emotion capture request failed")?;

        response
            .error_for_status()
            .context("emotion capture request rejected")?;
        Ok(())
    }
}
