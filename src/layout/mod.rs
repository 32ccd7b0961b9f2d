//! Zhuyin Layout Engine
//!
//! Decomposes a transcription into glyph components on a normalized grid
//! and places them in pixels inside a display rectangle.
//!
//! Base symbols stack top to bottom in column 0. Tone marks sit in column 1:
//! the neutral-tone dot floats half a row above the first symbol, the other
//! marks sit at the middle row.

use serde::Serialize;

use crate::geometry::DisplayRect;

/// Tone marks recognized in a transcription. First tone has no glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneMark {
    /// ˊ
    Second,
    /// ˇ
    Third,
    /// ˋ
    Fourth,
    /// ˙
    Neutral,
}

impl ToneMark {
    pub fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            'ˊ' => Some(ToneMark::Second),
            'ˇ' => Some(ToneMark::Third),
            'ˋ' => Some(ToneMark::Fourth),
            '˙' => Some(ToneMark::Neutral),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            ToneMark::Second => 'ˊ',
            ToneMark::Third => 'ˇ',
            ToneMark::Fourth => 'ˋ',
            ToneMark::Neutral => '˙',
        }
    }
}

/// One glyph of a transcription in layout units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlyphComponent {
    pub symbol: char,
    pub column: f32,
    pub row: f32,
    pub is_tone_mark: bool,
}

/// Column used by tone marks
const TONE_COLUMN: f32 = 1.0;
/// Row used by the neutral tone mark
const NEUTRAL_TONE_ROW: f32 = -0.5;

/// Lay out a transcription on the normalized grid
pub fn layout(transcription: &str) -> Vec<GlyphComponent> {
    let (tones, base): (Vec<char>, Vec<char>) = transcription
        .chars()
        .partition(|c| ToneMark::from_char(*c).is_some());

    let middle_row = base.len() as f32 / 2.0;

    let base_glyphs = base.iter().enumerate().map(|(i, &symbol)| GlyphComponent {
        symbol,
        column: 0.0,
        row: i as f32,
        is_tone_mark: false,
    });

    let tone_glyphs = tones.iter().map(|&symbol| GlyphComponent {
        symbol,
        column: TONE_COLUMN,
        row: match ToneMark::from_char(symbol) {
            Some(ToneMark::Neutral) => NEUTRAL_TONE_ROW,
            _ => middle_row,
        },
        is_tone_mark: true,
    });

    base_glyphs.chain(tone_glyphs).collect()
}

/// Pixel metrics for turning grid positions into draw positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Smallest font size ever used
    pub min_font_size: f32,
    /// Font size is the shorter box side divided by this
    pub font_divisor: f32,
    /// Tone glyph size relative to base glyphs
    pub tone_scale: f32,
    /// Horizontal advance per column, in font sizes
    pub column_advance: f32,
    /// Baseline drop of the first row, in line heights
    pub baseline_ratio: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            min_font_size: 10.0,
            font_divisor: 3.0,
            tone_scale: 0.8,
            column_advance: 0.6,
            baseline_ratio: 0.8,
        }
    }
}

impl LayoutMetrics {
    /// Font size for annotations inside `rect`
    pub fn font_size(&self, rect: &DisplayRect) -> f32 {
        (rect.width().min(rect.height()) / self.font_divisor).max(self.min_font_size)
    }
}

/// A glyph at an absolute display position (baseline, horizontally centered)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedGlyph {
    pub symbol: char,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub is_tone_mark: bool,
}

/// Place components inside `rect`, centered on both axes
pub fn place(
    components: &[GlyphComponent],
    rect: &DisplayRect,
    metrics: &LayoutMetrics,
) -> Vec<PlacedGlyph> {
    if components.is_empty() {
        return Vec::new();
    }

    let font_size = metrics.font_size(rect);
    let line_height = font_size;

    let min_row = components.iter().map(|c| c.row).fold(f32::INFINITY, f32::min);
    let max_row = components.iter().map(|c| c.row).fold(f32::NEG_INFINITY, f32::max);

    let total_height = (max_row - min_row + 1.0) * line_height;
    let padding_top = (rect.height() - total_height) / 2.0;
    let start_y = rect.top + line_height * metrics.baseline_ratio + padding_top;
    let center_x = rect.center_x();

    components
        .iter()
        .map(|c| PlacedGlyph {
            symbol: c.symbol,
            x: center_x + c.column * font_size * metrics.column_advance,
            y: start_y + (c.row - min_row) * line_height,
            font_size: if c.is_tone_mark {
                font_size * metrics.tone_scale
            } else {
                font_size
            },
            is_tone_mark: c.is_tone_mark,
        })
        .collect()
}
