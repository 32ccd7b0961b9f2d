//! Background recognition worker
//!
//! Recognition runs off the render thread on a single worker. At most one
//! frame is in flight; a frame offered while the worker is busy is dropped
//! (and its buffer released) instead of queued.

use anyhow::{Context, Result};
use crossbeam_channel::{bounded, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, info};

use super::{run_tick, AnalysisOptions};
use crate::capture::FrameLease;
use crate::dictionary::PhoneticDictionary;
use crate::overlay::{OverlayController, PauseFlag};
use crate::vision::Recognizer;

/// What happened to an offered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// Handed to the worker
    Accepted,
    /// A recognition was already in flight
    Dropped,
    /// The overlay is frozen and analysis is suspended
    Paused,
}

/// Owns the recognition worker thread
pub struct Analyzer {
    sender: Option<Sender<FrameLease>>,
    in_flight: Arc<AtomicBool>,
    paused: PauseFlag,
    options: AnalysisOptions,
    handle: Option<JoinHandle<()>>,
}

impl Analyzer {
    /// Start the worker; results are published to `controller`
    pub fn spawn(
        recognizer: Arc<dyn Recognizer>,
        dict: Arc<PhoneticDictionary>,
        controller: Arc<OverlayController>,
        options: AnalysisOptions,
    ) -> Result<Self> {
        let (sender, receiver) = bounded::<FrameLease>(1);
        let in_flight = Arc::new(AtomicBool::new(false));
        let paused = controller.pause_flag();

        let worker_in_flight = in_flight.clone();
        let handle = std::thread::Builder::new()
            .name("zhuyin-analyzer".to_string())
            .spawn(move || {
                info!("Analyzer thread starting...");
                for lease in receiver.iter() {
                    let frame = run_tick(lease, recognizer.as_ref(), &dict, &options);
                    debug!("Publishing {} annotations", frame.len());
                    controller.publish(frame);
                    worker_in_flight.store(false, Ordering::Release);
                }
                info!("Analyzer thread exiting...");
            })
            .context("Failed to spawn analyzer thread")?;

        Ok(Self {
            sender: Some(sender),
            in_flight,
            paused,
            options,
            handle: Some(handle),
        })
    }

    /// Whether a recognition is currently running
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Offer a camera frame for analysis.
    ///
    /// Rejected frames are released before this returns.
    pub fn offer(&self, lease: FrameLease) -> Offer {
        if self.options.skip_while_frozen && self.paused.is_paused() {
            return Offer::Paused;
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            debug!("Recognition in flight, dropping frame");
            return Offer::Dropped;
        }

        let Some(sender) = &self.sender else {
            self.in_flight.store(false, Ordering::Release);
            return Offer::Dropped;
        };

        if sender.try_send(lease).is_err() {
            self.in_flight.store(false, Ordering::Release);
            return Offer::Dropped;
        }

        Offer::Accepted
    }
}

impl Drop for Analyzer {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop
        self.sender.take();

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
