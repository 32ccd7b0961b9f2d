//! Application Configuration
//!
//! User settings and preferences stored in TOML format.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis::AnalysisOptions;
use crate::layout::LayoutMetrics;
use crate::overlay::render::RenderOptions;
use crate::overlay::style::{self, AnnotationStyle, Rgba};

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Dictionary settings
    pub dictionary: DictionarySettings,
    /// Zhuyin layout settings
    pub layout: LayoutSettings,
    /// Overlay drawing settings
    pub overlay: OverlaySettings,
    /// Recognition pipeline settings
    pub analysis: AnalysisSettings,
}

impl AppConfig {
    /// Layout metrics for the layout engine
    pub fn layout_metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            min_font_size: self.layout.min_font_size,
            font_divisor: self.layout.font_divisor,
            tone_scale: self.layout.tone_scale,
            column_advance: self.layout.column_advance,
            baseline_ratio: self.layout.baseline_ratio,
        }
    }

    /// Options for building draw commands
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            metrics: self.layout_metrics(),
            style: AnnotationStyle {
                live_stroke: self.overlay.live_color,
                frozen_stroke: self.overlay.frozen_color,
                stroke_width: self.overlay.stroke_width,
                glyph_color: self.overlay.glyph_color,
                glyph_emphasis: self.overlay.glyph_emphasis,
            },
            min_box_size: self.overlay.min_box_size,
            paused_banner: self
                .overlay
                .show_paused_banner
                .then(|| self.overlay.paused_banner_text.clone()),
            ..Default::default()
        }
    }

    /// Options for the recognition pipeline
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            skip_while_frozen: self.analysis.skip_while_frozen,
            ignore_sensor_rotation: self.analysis.ignore_sensor_rotation,
        }
    }
}

/// Dictionary settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionarySettings {
    /// Path to the character to zhuyin TSV table
    pub path: Option<PathBuf>,
}

/// Zhuyin layout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Minimum font size in pixels
    pub min_font_size: f32,
    /// Shorter box side divided by this gives the font size
    pub font_divisor: f32,
    /// Tone mark size relative to base symbols
    pub tone_scale: f32,
    /// Tone column offset in font sizes
    pub column_advance: f32,
    /// First baseline offset in line heights
    pub baseline_ratio: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let metrics = LayoutMetrics::default();
        Self {
            min_font_size: metrics.min_font_size,
            font_divisor: metrics.font_divisor,
            tone_scale: metrics.tone_scale,
            column_advance: metrics.column_advance,
            baseline_ratio: metrics.baseline_ratio,
        }
    }
}

/// Overlay drawing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Boxes smaller than this on either side are not drawn
    pub min_box_size: f32,
    /// Box stroke width
    pub stroke_width: f32,
    /// Box color while live (RGBA)
    pub live_color: Rgba,
    /// Box color while frozen (RGBA)
    pub frozen_color: Rgba,
    /// Zhuyin glyph color (RGBA)
    pub glyph_color: Rgba,
    /// Bold glyphs with drop shadow
    pub glyph_emphasis: bool,
    /// Show a status banner while frozen
    pub show_paused_banner: bool,
    /// Banner text
    pub paused_banner_text: String,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            min_box_size: 30.0,
            stroke_width: 1.0,
            live_color: style::RED,
            frozen_color: style::GREEN,
            glyph_color: style::YELLOW,
            glyph_emphasis: true,
            show_paused_banner: true,
            paused_banner_text: "已暫停 - 放開手指恢復".to_string(),
        }
    }
}

/// Recognition pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Skip recognition entirely while the overlay is frozen
    pub skip_while_frozen: bool,
    /// Ignore camera rotation metadata
    pub ignore_sensor_rotation: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        let options = AnalysisOptions::default();
        Self {
            skip_while_frozen: options.skip_while_frozen,
            ignore_sensor_rotation: options.ignore_sensor_rotation,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
