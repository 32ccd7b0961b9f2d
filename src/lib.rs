//! Zhuyin Lens - live zhuyin annotations over recognized Chinese text
//!
//! The geometry and annotation-layout engine behind a camera overlay: takes
//! recognized text lines in sensor-image coordinates plus a zhuyin
//! dictionary, and produces display-space boxes and per-glyph positions
//! for the base symbols and tone marks of each character's reading.
//!
//! Camera capture, the text recognizer and the actual drawing stay outside
//! the engine; see [`capture::FrameLease`], [`vision::Recognizer`] and
//! [`overlay::DrawCommand`] for the boundaries.

pub mod analysis;
pub mod capture;
pub mod config;
pub mod dictionary;
pub mod geometry;
pub mod layout;
pub mod overlay;
pub mod storage;
pub mod vision;

pub use analysis::{analyze_frame, annotate, run_tick, AnalysisOptions, Analyzer, Offer};
pub use dictionary::PhoneticDictionary;
pub use overlay::{render_frame, DrawCommand, OverlayController, OverlayFrame, RenderOptions};
