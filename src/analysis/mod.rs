//! Analysis Pipeline
//!
//! One tick: recognized lines, dictionary filter, per-character partition,
//! sensor to display transform. The result replaces the previous live frame.

pub mod worker;

pub use worker::{Analyzer, Offer};

use tracing::{debug, warn};

use crate::capture::{FrameLease, FrameMetadata};
use crate::dictionary::PhoneticDictionary;
use crate::geometry::{transform, Rotation};
use crate::overlay::{Annotation, OverlayFrame};
use crate::vision::{
    partition_line, RecognitionFailure, RecognizedRegion, Recognizer, TransformedRegion,
};

/// Options applied to every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Refuse new frames while the overlay is frozen
    pub skip_while_frozen: bool,
    /// Treat every frame as unrotated
    pub ignore_sensor_rotation: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            skip_while_frozen: true,
            ignore_sensor_rotation: false,
        }
    }
}

/// Build the live frame for recognized lines.
///
/// Ordering follows the recognizer: lines in order, characters in line order.
pub fn annotate(
    lines: &[RecognizedRegion],
    dict: &PhoneticDictionary,
    metadata: &FrameMetadata,
) -> OverlayFrame {
    let Some(fit) = metadata.viewport_fit() else {
        debug!("Skipping tick with empty image dimensions");
        return OverlayFrame::empty();
    };

    let mut annotations = Vec::new();
    for line in lines {
        for character in partition_line(line, dict) {
            let Some(reading) = dict.lookup(character.character) else {
                continue;
            };
            let bounds = transform(
                character.bounds,
                metadata.image_width,
                metadata.image_height,
                metadata.rotation,
                &fit,
            );
            annotations.push(Annotation {
                region: TransformedRegion {
                    character: character.character,
                    bounds,
                },
                reading: reading.to_string(),
            });
        }
    }

    OverlayFrame::live(annotations)
}

/// Run recognition on a leased frame and annotate the result.
///
/// The lease is consumed, so the camera buffer is released before this
/// returns on every path. When the image and its metadata disagree on size,
/// the image dimensions are used for the transform.
pub fn analyze_frame(
    lease: FrameLease,
    recognizer: &dyn Recognizer,
    dict: &PhoneticDictionary,
    options: &AnalysisOptions,
) -> Result<OverlayFrame, RecognitionFailure> {
    let mut metadata = *lease.metadata();
    if options.ignore_sensor_rotation {
        metadata.rotation = Rotation::Deg0;
    }

    let image = lease
        .image()
        .filter(|image| !image.is_empty())
        .ok_or(RecognitionFailure::NoImage)?;

    let (width, height) = image.dimensions();
    if (width, height) != (metadata.image_width, metadata.image_height) {
        warn!(
            "Frame is {}x{} but metadata reports {}x{}",
            width, height, metadata.image_width, metadata.image_height
        );
        metadata.image_width = width;
        metadata.image_height = height;
    }

    let lines = recognizer.recognize(image)?;
    debug!(
        "Recognized {} lines in {:?}",
        lines.len(),
        image.timestamp.elapsed()
    );
    drop(lease);

    Ok(annotate(&lines, dict, &metadata))
}

/// [`analyze_frame`], with failures turned into an empty frame
pub fn run_tick(
    lease: FrameLease,
    recognizer: &dyn Recognizer,
    dict: &PhoneticDictionary,
    options: &AnalysisOptions,
) -> OverlayFrame {
    analyze_frame(lease, recognizer, dict, options).unwrap_or_else(|e| {
        warn!("Recognition failed, clearing annotations: {}", e);
        OverlayFrame::empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CapturedFrame;
    use crate::geometry::{DisplayRect, PixelRect};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn dict() -> PhoneticDictionary {
        PhoneticDictionary::from_tsv("愛\tㄞˋ\n你\tㄋㄧˇ\n")
    }

    fn metadata(rotation: Rotation) -> FrameMetadata {
        FrameMetadata {
            image_width: 640,
            image_height: 480,
            rotation,
            viewport_width: 640.0,
            viewport_height: 480.0,
        }
    }

    fn counted_lease(
        image: Option<CapturedFrame>,
        metadata: FrameMetadata,
    ) -> (FrameLease, Arc<AtomicUsize>) {
        let released = Arc::new(AtomicUsize::new(0));
        let counter = released.clone();
        let lease = FrameLease::new(image, metadata, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (lease, released)
    }

    type Recognition = Result<Vec<RecognizedRegion>, RecognitionFailure>;

    fn frame() -> Option<CapturedFrame> {
        Some(CapturedFrame::new(vec![0; 16], 640, 480))
    }

    #[test]
    fn test_annotate_line() {
        let lines = vec![RecognizedRegion::new("我愛你", PixelRect::new(0, 10, 100, 60))];
        let frame = annotate(&lines, &dict(), &metadata(Rotation::Deg0));

        assert_eq!(frame.len(), 2);
        assert_eq!(frame.annotations[0].region.character, '愛');
        assert_eq!(frame.annotations[0].reading, "ㄞˋ");
        assert!(frame.annotations[0]
            .region
            .bounds
            .approx_eq(&DisplayRect::new(0.0, 10.0, 50.0, 60.0), 0.001));
        assert_eq!(frame.annotations[1].region.character, '你');
    }

    #[test]
    fn test_annotate_preserves_line_order() {
        let lines = vec![
            RecognizedRegion::new("你", PixelRect::new(0, 100, 50, 150)),
            RecognizedRegion::new("愛", PixelRect::new(0, 0, 50, 50)),
        ];
        let frame = annotate(&lines, &dict(), &metadata(Rotation::Deg0));
        let characters: Vec<char> = frame.annotations.iter().map(|a| a.region.character).collect();
        assert_eq!(characters, vec!['你', '愛']);
    }

    #[test]
    fn test_annotate_empty_image() {
        let lines = vec![RecognizedRegion::new("愛", PixelRect::new(0, 0, 50, 50))];
        let meta = FrameMetadata {
            image_width: 0,
            ..metadata(Rotation::Deg0)
        };
        assert!(annotate(&lines, &dict(), &meta).is_empty());
    }

    #[test]
    fn test_analyze_success_releases_frame() {
        let recognizer = |_: &CapturedFrame| -> Recognition {
            Ok(vec![RecognizedRegion::new("愛你", PixelRect::new(0, 0, 100, 50))])
        };
        let (lease, released) = counted_lease(frame(), metadata(Rotation::Deg0));

        let result = analyze_frame(lease, &recognizer, &dict(), &AnalysisOptions::default());

        assert_eq!(result.unwrap().len(), 2);
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_analyze_failure_releases_frame() {
        let recognizer = |_: &CapturedFrame| -> Recognition {
            Err(RecognitionFailure::Engine("model not ready".into()))
        };
        let (lease, released) = counted_lease(frame(), metadata(Rotation::Deg0));

        let frame = run_tick(lease, &recognizer, &dict(), &AnalysisOptions::default());

        assert!(frame.is_empty());
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_analyze_no_image_releases_frame() {
        let recognizer = |_: &CapturedFrame| -> Recognition {
            panic!("recognizer must not run without an image")
        };
        let (lease, released) = counted_lease(None, metadata(Rotation::Deg0));

        let result = analyze_frame(lease, &recognizer, &dict(), &AnalysisOptions::default());

        assert_eq!(result, Err(RecognitionFailure::NoImage));
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_analyze_empty_image_is_no_image() {
        let recognizer = |_: &CapturedFrame| -> Recognition {
            panic!("recognizer must not run on an empty buffer")
        };
        let empty = Some(CapturedFrame::new(Vec::new(), 640, 480));
        let (lease, released) = counted_lease(empty, metadata(Rotation::Deg0));

        let result = analyze_frame(lease, &recognizer, &dict(), &AnalysisOptions::default());

        assert_eq!(result, Err(RecognitionFailure::NoImage));
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_image_dimensions_override_metadata() {
        let recognizer = |_: &CapturedFrame| -> Recognition {
            Ok(vec![RecognizedRegion::new("愛", PixelRect::new(10, 20, 60, 70))])
        };
        // Metadata claims 640x480, the buffer is half that in a 640x480 viewport
        let image = Some(CapturedFrame::new(vec![0; 16], 320, 240));
        let (lease, released) = counted_lease(image, metadata(Rotation::Deg0));

        let frame =
            analyze_frame(lease, &recognizer, &dict(), &AnalysisOptions::default()).unwrap();

        assert_eq!(released.load(Ordering::SeqCst), 1);
        assert!(frame.annotations[0]
            .region
            .bounds
            .approx_eq(&DisplayRect::new(20.0, 40.0, 120.0, 140.0), 0.001));
    }

    #[test]
    fn test_ignore_sensor_rotation() {
        let recognizer = |_: &CapturedFrame| -> Recognition {
            Ok(vec![RecognizedRegion::new("愛", PixelRect::new(10, 20, 60, 70))])
        };
        let options = AnalysisOptions {
            ignore_sensor_rotation: true,
            ..Default::default()
        };
        let (lease, _) = counted_lease(frame(), metadata(Rotation::Deg90));

        let frame = analyze_frame(lease, &recognizer, &dict(), &options).unwrap();
        assert!(frame.annotations[0]
            .region
            .bounds
            .approx_eq(&DisplayRect::new(10.0, 20.0, 60.0, 70.0), 0.001));
    }
}
