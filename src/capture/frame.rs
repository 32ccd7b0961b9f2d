//! Frame data structures for camera analysis ticks

use std::fmt;
use std::time::Instant;

use crate::geometry::{Rotation, ViewportFit};

/// A camera image handed to the recognizer
#[derive(Debug)]
pub struct CapturedFrame {
    /// Raw pixel data, opaque to the engine
    pub data: Vec<u8>,
    /// Frame width in sensor pixels
    pub width: u32,
    /// Frame height in sensor pixels
    pub height: u32,
    /// Timestamp when frame was captured
    pub timestamp: Instant,
}

impl CapturedFrame {
    /// Create a new captured frame
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp: Instant::now(),
        }
    }

    /// Get frame dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// A frame with no pixels or a zero dimension
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() || self.width == 0 || self.height == 0
    }
}

/// Per-tick geometry reported alongside a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetadata {
    pub image_width: u32,
    pub image_height: u32,
    pub rotation: Rotation,
    /// Current display viewport size in pixels
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl FrameMetadata {
    /// Fit of this frame into its viewport, `None` for an empty image
    pub fn viewport_fit(&self) -> Option<ViewportFit> {
        ViewportFit::compute(
            self.image_width,
            self.image_height,
            self.rotation,
            self.viewport_width,
            self.viewport_height,
        )
    }
}

type ReleaseFn = Box<dyn FnOnce() + Send>;

/// Scoped ownership of one camera buffer.
///
/// The buffer is handed back to the camera pipeline exactly once, when the
/// lease is dropped, whichever path the analysis took.
pub struct FrameLease {
    image: Option<CapturedFrame>,
    metadata: FrameMetadata,
    release: Option<ReleaseFn>,
}

impl FrameLease {
    /// Wrap a camera buffer; `release` runs when the lease is dropped
    pub fn new(
        image: Option<CapturedFrame>,
        metadata: FrameMetadata,
        release: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            image,
            metadata,
            release: Some(Box::new(release)),
        }
    }

    /// The image, if the camera delivered one
    pub fn image(&self) -> Option<&CapturedFrame> {
        self.image.as_ref()
    }

    pub fn metadata(&self) -> &FrameMetadata {
        &self.metadata
    }
}

impl fmt::Debug for FrameLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameLease")
            .field("has_image", &self.image.is_some())
            .field("metadata", &self.metadata)
            .field("released", &self.release.is_none())
            .finish()
    }
}

impl Drop for FrameLease {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}
