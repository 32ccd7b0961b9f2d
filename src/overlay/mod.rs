//! Overlay State
//!
//! Holds the annotation set the renderer draws. A hold gesture freezes a
//! snapshot of the live set; releasing it goes back to tracking live results.
//!
//! Two contexts touch this state: the recognition worker publishes frames and
//! reads the pause flag, the gesture handler presses and releases. The pause
//! flag only needs eventual visibility: a stale read costs at most one tick.

pub mod render;
pub mod style;

pub use render::{render_frame, DrawCommand, RenderOptions};
pub use style::{AnnotationStyle, BannerStyle, Rgba};

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

use crate::vision::TransformedRegion;

/// Whether a frame tracks live results or is a held snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameTag {
    Live,
    Frozen,
}

/// A display-space region with its zhuyin reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub region: TransformedRegion,
    pub reading: String,
}

/// The annotation set for one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayFrame {
    pub tag: FrameTag,
    pub annotations: Vec<Annotation>,
}

impl OverlayFrame {
    pub fn live(annotations: Vec<Annotation>) -> Self {
        Self {
            tag: FrameTag::Live,
            annotations,
        }
    }

    /// Empty live frame, used when a tick produced nothing
    pub fn empty() -> Self {
        Self::live(Vec::new())
    }

    /// Immutable frozen copy of this frame
    pub fn frozen(&self) -> Self {
        Self {
            tag: FrameTag::Frozen,
            annotations: self.annotations.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Live,
    Frozen,
}

/// Freeze flag shared with the recognition worker.
///
/// Uses relaxed ordering: readers may observe a change one tick late.
#[derive(Debug, Clone, Default)]
pub struct PauseFlag(Arc<AtomicBool>);

impl PauseFlag {
    pub fn is_paused(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn set(&self, paused: bool) {
        self.0.store(paused, Ordering::Relaxed);
    }
}

/// Selects which annotation set is displayed
#[derive(Debug)]
pub struct OverlayController {
    live: RwLock<Arc<OverlayFrame>>,
    snapshot: RwLock<Option<Arc<OverlayFrame>>>,
    paused: PauseFlag,
}

impl Default for OverlayController {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayController {
    /// Create a controller in the live state with an empty frame
    pub fn new() -> Self {
        Self {
            live: RwLock::new(Arc::new(OverlayFrame::empty())),
            snapshot: RwLock::new(None),
            paused: PauseFlag::default(),
        }
    }

    /// Handle for the recognition side
    pub fn pause_flag(&self) -> PauseFlag {
        self.paused.clone()
    }

    pub fn state(&self) -> OverlayState {
        if self.snapshot.read().is_some() {
            OverlayState::Frozen
        } else {
            OverlayState::Live
        }
    }

    /// Replace the live frame; the previous one is discarded
    pub fn publish(&self, frame: OverlayFrame) {
        *self.live.write() = Arc::new(frame);
    }

    /// Latest live frame, regardless of state
    pub fn live_frame(&self) -> Arc<OverlayFrame> {
        self.live.read().clone()
    }

    /// Hold gesture started: freeze the current live frame.
    ///
    /// Pressing while already frozen keeps the original snapshot.
    pub fn press(&self) {
        let mut snapshot = self.snapshot.write();
        if snapshot.is_some() {
            return;
        }

        let frozen = Arc::new(self.live.read().frozen());
        info!("Overlay frozen with {} annotations", frozen.len());
        *snapshot = Some(frozen);
        self.paused.set(true);
    }

    /// Hold gesture ended: drop the snapshot and resume live updates
    pub fn release(&self) {
        let mut snapshot = self.snapshot.write();
        if snapshot.take().is_some() {
            info!("Overlay resumed live updates");
        }
        self.paused.set(false);
    }

    /// The frame the renderer should draw now
    pub fn active_frame(&self) -> Arc<OverlayFrame> {
        if let Some(frozen) = self.snapshot.read().as_ref() {
            return frozen.clone();
        }
        self.live_frame()
    }
}
