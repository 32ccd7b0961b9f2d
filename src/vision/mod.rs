//! Vision Layer
//!
//! Types exchanged with the external text recognizer and the per-line
//! processing that turns recognized lines into per-character regions.
//! The recognizer itself is an opaque collaborator behind [`Recognizer`].

pub mod partition;
pub mod segment;

pub use partition::partition_line;
pub use segment::{filter_known, readings_for, segment, Unit};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capture::frame::CapturedFrame;
use crate::geometry::{DisplayRect, PixelRect};

/// One detected line of text in sensor-image coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedRegion {
    /// Recognized text content
    pub text: String,
    /// Line bounding box
    pub bounds: PixelRect,
}

impl RecognizedRegion {
    pub fn new(text: impl Into<String>, bounds: PixelRect) -> Self {
        Self {
            text: text.into(),
            bounds,
        }
    }
}

/// A single known character sliced out of its line's box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterRegion {
    pub character: char,
    pub bounds: PixelRect,
}

/// A character region mapped into display pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformedRegion {
    pub character: char,
    pub bounds: DisplayRect,
}

/// Why a recognition pass produced no result
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecognitionFailure {
    /// The camera delivered a frame lease without an image
    #[error("no image available in frame")]
    NoImage,
    /// The recognition engine reported an error
    #[error("recognition engine failed: {0}")]
    Engine(String),
}

/// External text recognizer
pub trait Recognizer: Send + Sync {
    /// Recognize text lines in a frame, in reading order
    fn recognize(&self, frame: &CapturedFrame) -> Result<Vec<RecognizedRegion>, RecognitionFailure>;
}

impl<F> Recognizer for F
where
    F: Fn(&CapturedFrame) -> Result<Vec<RecognizedRegion>, RecognitionFailure> + Send + Sync,
{
    fn recognize(
        &self,
        frame: &CapturedFrame,
    ) -> Result<Vec<RecognizedRegion>, RecognitionFailure> {
        self(frame)
    }
}
