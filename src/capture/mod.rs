//! Camera Capture Boundary
//!
//! The camera pipeline lives outside the engine. It hands over one
//! [`FrameLease`] per analysis tick and gets the buffer back when the lease
//! is dropped.

pub mod frame;

pub use frame::{CapturedFrame, FrameLease, FrameMetadata};
