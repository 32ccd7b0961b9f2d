//! Recorded recognition fixtures
//!
//! Stands in for the camera and the recognizer so the engine can be driven
//! from a JSON file:
//!
//! ```json
//! {
//!   "camera": { "image_width": 480, "image_height": 640, "rotation": 90,
//!               "viewport_width": 1080, "viewport_height": 1920 },
//!   "ticks": [
//!     { "lines": [ { "text": "我愛你", "bounds": { "left": 10, "top": 20, "right": 310, "bottom": 120 } } ] },
//!     { "error": "engine busy" },
//!     { "no_image": true }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use zhuyin_lens::capture::{CapturedFrame, FrameLease, FrameMetadata};
use zhuyin_lens::geometry::Rotation;
use zhuyin_lens::vision::{RecognitionFailure, RecognizedRegion, Recognizer};

/// A recorded session
#[derive(Debug, Deserialize)]
pub struct ReplayFixture {
    pub camera: CameraSettings,
    pub ticks: Vec<ReplayTick>,
}

/// Camera geometry shared by every tick
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CameraSettings {
    pub image_width: u32,
    pub image_height: u32,
    #[serde(default)]
    pub rotation: Rotation,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

/// One recorded analysis tick
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReplayTick {
    /// Recognized lines
    pub lines: Vec<RecognizedRegion>,
    /// Recognizer error for this tick
    pub error: Option<String>,
    /// The camera delivered no image
    pub no_image: bool,
}

impl ReplayTick {
    /// Lease a synthetic camera frame for this tick
    pub fn lease(
        &self,
        camera: &CameraSettings,
        release: impl FnOnce() + Send + 'static,
    ) -> FrameLease {
        let metadata = FrameMetadata {
            image_width: camera.image_width,
            image_height: camera.image_height,
            rotation: camera.rotation,
            viewport_width: camera.viewport_width,
            viewport_height: camera.viewport_height,
        };
        let image = (!self.no_image).then(|| {
            let pixels = (camera.image_width * camera.image_height) as usize;
            CapturedFrame::new(vec![0; pixels], camera.image_width, camera.image_height)
        });
        FrameLease::new(image, metadata, release)
    }
}

impl Recognizer for ReplayTick {
    fn recognize(
        &self,
        _frame: &CapturedFrame,
    ) -> Result<Vec<RecognizedRegion>, RecognitionFailure> {
        match &self.error {
            Some(message) => Err(RecognitionFailure::Engine(message.clone())),
            None => Ok(self.lines.clone()),
        }
    }
}

/// Read a fixture file
pub fn load_fixture(path: &Path) -> Result<ReplayFixture> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read replay fixture {:?}", path))?;
    let fixture = serde_json::from_str(&content)
        .with_context(|| format!("Invalid replay fixture {:?}", path))?;
    Ok(fixture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixture() {
        let fixture: ReplayFixture = serde_json::from_str(
            r#"{
                "camera": { "image_width": 480, "image_height": 640, "rotation": 90,
                            "viewport_width": 1080, "viewport_height": 1920 },
                "ticks": [
                    { "lines": [ { "text": "愛", "bounds": { "left": 1, "top": 2, "right": 3, "bottom": 4 } } ] },
                    { "error": "busy" },
                    { "no_image": true }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(fixture.camera.rotation, Rotation::Deg90);
        assert_eq!(fixture.ticks.len(), 3);
        assert_eq!(fixture.ticks[0].lines[0].text, "愛");
        assert!(fixture.ticks[1].recognize(&CapturedFrame::new(vec![], 1, 1)).is_err());
        assert!(fixture.ticks[2].lease(&fixture.camera, || {}).image().is_none());

        let lease = fixture.ticks[0].lease(&fixture.camera, || {});
        assert_eq!(lease.image().unwrap().dimensions(), (480, 640));
        assert!(!lease.image().unwrap().is_empty());
    }
}
