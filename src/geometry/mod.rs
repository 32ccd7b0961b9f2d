//! Frame Geometry
//!
//! Maps rectangles from sensor-image pixel space into display space.
//! A mapping is always one rotation case followed by one uniform scale
//! and one translation, so the logical box keeps its aspect ratio.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Geometry errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// Rotation metadata outside of the four supported quarter turns
    #[error("unsupported rotation: {0} degrees")]
    UnsupportedRotation(i32),
}

/// Clockwise sensor rotation reported with each camera frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Rotation in degrees
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// The rotation that undoes this one, `(360 - r) mod 360`
    pub fn inverse(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg0,
            Rotation::Deg90 => Rotation::Deg270,
            Rotation::Deg180 => Rotation::Deg180,
            Rotation::Deg270 => Rotation::Deg90,
        }
    }

    /// Whether this rotation swaps the image axes
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Image dimensions as seen after rotation.
    ///
    /// Both quarter turns use the same swap; half and zero turns keep the pair.
    pub fn adjusted_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Rotate a rectangle from sensor space into display orientation.
    ///
    /// `image_width`/`image_height` are the dimensions of the space `rect` lives in.
    pub fn rotate(self, rect: DisplayRect, image_width: f32, image_height: f32) -> DisplayRect {
        match self {
            Rotation::Deg0 => rect,
            Rotation::Deg90 => DisplayRect {
                left: rect.top,
                top: image_width - rect.right,
                right: rect.bottom,
                bottom: image_width - rect.left,
            },
            Rotation::Deg180 => DisplayRect {
                left: image_width - rect.right,
                top: image_height - rect.bottom,
                right: image_width - rect.left,
                bottom: image_height - rect.top,
            },
            Rotation::Deg270 => DisplayRect {
                left: image_height - rect.bottom,
                top: rect.left,
                right: image_height - rect.top,
                bottom: rect.right,
            },
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = GeometryError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(GeometryError::UnsupportedRotation(degrees)),
        }
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Integer rectangle in sensor-image pixels (`left <= right`, `top <= bottom`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Convert to floating point coordinates
    pub fn to_display(self) -> DisplayRect {
        DisplayRect {
            left: self.left as f32,
            top: self.top as f32,
            right: self.right as f32,
            bottom: self.bottom as f32,
        }
    }
}

/// Floating point rectangle in display pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl DisplayRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// Whether both sides reach `min_size` display pixels
    pub fn meets_min_size(&self, min_size: f32) -> bool {
        self.width() >= min_size && self.height() >= min_size
    }

    /// Compare with another rect within `tolerance` per edge
    pub fn approx_eq(&self, other: &DisplayRect, tolerance: f32) -> bool {
        (self.left - other.left).abs() < tolerance
            && (self.top - other.top).abs() < tolerance
            && (self.right - other.right).abs() < tolerance
            && (self.bottom - other.bottom).abs() < tolerance
    }
}

/// Uniform fit of the (rotation-adjusted) image into a display viewport.
///
/// The image is centered without cropping; the unused band is split evenly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFit {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl ViewportFit {
    /// Compute the fit for an image of `image_width` x `image_height` sensor pixels.
    ///
    /// Returns `None` when either image dimension is zero.
    pub fn compute(
        image_width: u32,
        image_height: u32,
        rotation: Rotation,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Option<Self> {
        if image_width == 0 || image_height == 0 {
            return None;
        }

        let (adj_width, adj_height) = rotation.adjusted_dimensions(image_width, image_height);
        let adj_width = adj_width as f32;
        let adj_height = adj_height as f32;

        let scale = (viewport_width / adj_width).min(viewport_height / adj_height);
        let offset_x = (viewport_width - adj_width * scale) / 2.0;
        let offset_y = (viewport_height - adj_height * scale) / 2.0;

        Some(Self {
            scale,
            offset_x,
            offset_y,
        })
    }

    /// Apply scale then offset to an already rotated rect
    pub fn apply(&self, rect: DisplayRect) -> DisplayRect {
        DisplayRect {
            left: rect.left * self.scale + self.offset_x,
            top: rect.top * self.scale + self.offset_y,
            right: rect.right * self.scale + self.offset_x,
            bottom: rect.bottom * self.scale + self.offset_y,
        }
    }
}

/// Map a sensor-space rect into display space
pub fn transform(
    rect: PixelRect,
    image_width: u32,
    image_height: u32,
    rotation: Rotation,
    fit: &ViewportFit,
) -> DisplayRect {
    let rotated = rotation.rotate(rect.to_display(), image_width as f32, image_height as f32);
    fit.apply(rotated)
}
