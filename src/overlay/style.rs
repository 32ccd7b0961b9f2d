//! Colors and styling carried by draw commands

use serde::Serialize;

/// RGBA color with components in 0.0 - 1.0
pub type Rgba = [f32; 4];

pub const RED: Rgba = [1.0, 0.0, 0.0, 1.0];
pub const GREEN: Rgba = [0.0, 1.0, 0.0, 1.0];
pub const YELLOW: Rgba = [1.0, 1.0, 0.0, 1.0];
pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];

/// Style for region boxes and zhuyin glyphs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationStyle {
    /// Box stroke color while live
    pub live_stroke: Rgba,
    /// Box stroke color while frozen
    pub frozen_stroke: Rgba,
    /// Box stroke width in pixels
    pub stroke_width: f32,
    /// Glyph fill color
    pub glyph_color: Rgba,
    /// Draw glyphs bold with a drop shadow
    pub glyph_emphasis: bool,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            live_stroke: RED,
            frozen_stroke: GREEN,
            stroke_width: 1.0,
            glyph_color: YELLOW,
            glyph_emphasis: true,
        }
    }
}

/// Style for the paused status banner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BannerStyle {
    /// Background color (RGBA)
    pub background: Rgba,
    /// Text color (RGBA)
    pub text_color: Rgba,
    /// Border radius
    pub corner_radius: f32,
    /// Padding
    pub padding: f32,
}

impl Default for BannerStyle {
    fn default() -> Self {
        Self {
            background: [0.0, 0.0, 0.0, 0.7],
            text_color: WHITE,
            corner_radius: 8.0,
            padding: 12.0,
        }
    }
}
