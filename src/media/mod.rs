use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use log::warn;
use serde::Serialize;

use crate::error::CaptureError;

/// One still image or camera snapshot submitted for detection. Cheap to
/// clone; the decoded pixels are shared.
#[derive(Clone)]
pub struct Frame {
    image: Arc<image::DynamicImage>,
}

impl Frame {
    pub fn new(image: image::DynamicImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    /// Decodes user-supplied bytes; any decode failure is an invalid upload.
    pub fn decode(bytes: &[u8]) -> Result<Self, CaptureError> {
        let image = image::load_from_memory(bytes)
            .map_err(|err| CaptureError::InvalidImage(err.to_string()))?;
        Ok(Self::new(image))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &image::DynamicImage {
        &self.image
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Which kind of source is currently feeding frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceKind {
    Camera,
    StillImage,
    None,
}

/// Live camera stream behind a narrow boundary so the platform capture layer
/// stays out of the session core (and tests can supply a fake device).
pub trait CameraFeed: Send {
    /// Request device access and start the stream.
    fn open(&mut self) -> Result<()>;

    /// Most recent frame from the stream.
    fn latest_frame(&mut self) -> Result<Frame>;

    /// Stop the stream and release the device.
    fn stop(&mut self);
}

enum MediaSource {
    Camera(Box<dyn CameraFeed>),
    Still(Frame),
}

/// Owns whichever source is feeding frames. One source is active at a time;
/// attaching a new one stops the previous one first, and teardown always
/// releases the camera.
pub struct MediaSourceManager {
    source: Option<MediaSource>,
}

impl MediaSourceManager {
    pub fn new() -> Self {
        Self { source: None }
    }

    /// Binds a camera stream. Open failure leaves no source attached and is
    /// reported as `MediaUnavailable`; the caller keeps the still-image path.
    pub fn attach_camera(&mut self, mut feed: Box<dyn CameraFeed>) -> Result<(), CaptureError> {
        self.release();
        if let Err(err) = feed.open() {
            return Err(CaptureError::MediaUnavailable(format!("{err:#}")));
        }
        self.source = Some(MediaSource::Camera(feed));
        Ok(())
    }

    /// Decodes an uploaded image and makes it the current source. A bad
    /// upload keeps the previous source so the user can simply re-upload.
    pub fn attach_image(&mut self, bytes: &[u8]) -> Result<(), CaptureError> {
        let frame = Frame::decode(bytes)?;
        self.release();
        self.source = Some(MediaSource::Still(frame));
        Ok(())
    }

    /// The present frame, regardless of source kind.
    pub fn current_frame(&mut self) -> Option<Frame> {
        match self.source.as_mut()? {
            MediaSource::Camera(feed) => match feed.latest_frame() {
                Ok(frame) => Some(frame),
                Err(err) => {
                    warn!("camera frame read failed: {err:#}");
                    None
                }
            },
            MediaSource::Still(frame) => Some(frame.clone()),
        }
    }

    pub fn source_kind(&self) -> SourceKind {
        match &self.source {
            Some(MediaSource::Camera(_)) => SourceKind::Camera,
            Some(MediaSource::Still(_)) => SourceKind::StillImage,
            None => SourceKind::None,
        }
    }

    /// Stops the camera track (if any) and detaches the source.
    pub fn release(&mut self) {
        if let Some(MediaSource::Camera(mut feed)) = self.source.take() {
            feed.stop();
        }
    }
}

impl Default for MediaSourceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MediaSourceManager {
    fn drop(&mut self) {
        self.release();
    }
}
