//! Draw command generation
//!
//! Turns the active overlay frame into renderer-agnostic draw commands:
//! one box stroke per region followed by that region's zhuyin glyphs.

use serde::Serialize;

use super::style::{AnnotationStyle, BannerStyle, Rgba};
use super::{FrameTag, OverlayFrame};
use crate::geometry::DisplayRect;
use crate::layout::{layout, place, LayoutMetrics};

/// One drawing instruction for the rendering collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Outline a recognized character
    StrokeRect {
        rect: DisplayRect,
        color: Rgba,
        width: f32,
    },
    /// Draw one zhuyin symbol centered on `x` with its baseline at `y`
    Glyph {
        symbol: char,
        x: f32,
        y: f32,
        font_size: f32,
        is_tone_mark: bool,
        color: Rgba,
        emphasis: bool,
    },
    /// Status banner shown at the top center while frozen
    Banner { text: String, style: BannerStyle },
}

/// Everything render_frame needs besides the frame itself
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub metrics: LayoutMetrics,
    pub style: AnnotationStyle,
    /// Regions narrower or shorter than this (display pixels) are dropped
    pub min_box_size: f32,
    /// Banner text while frozen, `None` to hide it
    pub paused_banner: Option<String>,
    pub banner_style: BannerStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            metrics: LayoutMetrics::default(),
            style: AnnotationStyle::default(),
            min_box_size: 30.0,
            paused_banner: Some("已暫停 - 放開手指恢復".to_string()),
            banner_style: BannerStyle::default(),
        }
    }
}

/// Build draw commands for a frame
pub fn render_frame(frame: &OverlayFrame, options: &RenderOptions) -> Vec<DrawCommand> {
    let stroke = match frame.tag {
        FrameTag::Live => options.style.live_stroke,
        FrameTag::Frozen => options.style.frozen_stroke,
    };

    let mut commands = Vec::new();

    for annotation in &frame.annotations {
        let rect = annotation.region.bounds;
        if !rect.meets_min_size(options.min_box_size) {
            continue;
        }

        commands.push(DrawCommand::StrokeRect {
            rect,
            color: stroke,
            width: options.style.stroke_width,
        });

        let glyphs = place(&layout(&annotation.reading), &rect, &options.metrics);
        commands.extend(glyphs.into_iter().map(|g| DrawCommand::Glyph {
            symbol: g.symbol,
            x: g.x,
            y: g.y,
            font_size: g.font_size,
            is_tone_mark: g.is_tone_mark,
            color: options.style.glyph_color,
            emphasis: options.style.glyph_emphasis,
        }));
    }

    if frame.tag == FrameTag::Frozen {
        if let Some(text) = &options.paused_banner {
            commands.push(DrawCommand::Banner {
                text: text.clone(),
                style: options.banner_style.clone(),
            });
        }
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::style::{GREEN, RED};
    use crate::overlay::Annotation;
    use crate::vision::TransformedRegion;

    fn annotation(character: char, reading: &str, bounds: DisplayRect) -> Annotation {
        Annotation {
            region: TransformedRegion { character, bounds },
            reading: reading.to_string(),
        }
    }

    #[test]
    fn test_box_then_glyphs() {
        let frame = OverlayFrame::live(vec![annotation(
            '愛',
            "ㄞˋ",
            DisplayRect::new(0.0, 0.0, 60.0, 60.0),
        )]);
        let commands = render_frame(&frame, &RenderOptions::default());

        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], DrawCommand::StrokeRect { color, .. } if color == RED));
        assert!(matches!(commands[1], DrawCommand::Glyph { symbol: 'ㄞ', is_tone_mark: false, .. }));
        assert!(matches!(commands[2], DrawCommand::Glyph { symbol: 'ˋ', is_tone_mark: true, .. }));
    }

    #[test]
    fn test_small_regions_dropped() {
        let frame = OverlayFrame::live(vec![
            annotation('愛', "ㄞˋ", DisplayRect::new(0.0, 0.0, 29.0, 60.0)),
            annotation('你', "ㄋㄧˇ", DisplayRect::new(0.0, 0.0, 60.0, 20.0)),
            annotation('我', "ㄨㄛˇ", DisplayRect::new(0.0, 0.0, 30.0, 30.0)),
        ]);
        let commands = render_frame(&frame, &RenderOptions::default());

        let boxes = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeRect { .. }))
            .count();
        assert_eq!(boxes, 1);
    }

    #[test]
    fn test_empty_reading_draws_box_only() {
        let bounds = DisplayRect::new(0.0, 0.0, 60.0, 60.0);
        let frame = OverlayFrame::live(vec![annotation('愛', "", bounds)]);
        let commands = render_frame(&frame, &RenderOptions::default());
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_frozen_frame_styling_and_banner() {
        let bounds = DisplayRect::new(0.0, 0.0, 60.0, 60.0);
        let live = OverlayFrame::live(vec![annotation('愛', "ㄞˋ", bounds)]);
        let commands = render_frame(&live.frozen(), &RenderOptions::default());

        assert!(matches!(commands[0], DrawCommand::StrokeRect { color, .. } if color == GREEN));
        assert!(matches!(commands.last(), Some(DrawCommand::Banner { .. })));

        let options = RenderOptions {
            paused_banner: None,
            ..Default::default()
        };
        let commands = render_frame(&live.frozen(), &options);
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Banner { .. })));
    }

    #[test]
    fn test_live_frame_has_no_banner() {
        let commands = render_frame(&OverlayFrame::empty(), &RenderOptions::default());
        assert!(commands.is_empty());
    }

    #[test]
    fn test_draw_command_json_shape() {
        let command = DrawCommand::StrokeRect {
            rect: DisplayRect::new(1.0, 2.0, 3.0, 4.0),
            color: RED,
            width: 1.0,
        };
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["kind"], "stroke_rect");
        assert_eq!(json["rect"]["right"], 3.0);
    }
}
