//! WatchScheduler: rebuild on specification changes.
//!
//! The loop runs on the caller's thread and performs every rebuild there,
//! one at a time. The notify observer thread only decides when a rebuild
//! should start.

mod observer;
mod scheduler;

use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver, Sender},
    time::Duration,
};

use eyre::Result;

pub use observer::{WatchMessage, observe, qualifying_path};
pub use scheduler::{CycleOutcome, MIN_DEBOUNCE, WatchScheduler, WatchState};

use crate::status::{Stage, StatusLine};

/// Totals for a finished watch session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchSummary {
    pub cycles: usize,
    pub failures: usize,
}

/// A watch session over one flows directory.
pub struct Watch {
    flows_dir: PathBuf,
    scheduler: WatchScheduler,
    tx: Sender<WatchMessage>,
    rx: Receiver<WatchMessage>,
}

impl Watch {
    pub fn new(flows_dir: impl Into<PathBuf>, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            flows_dir: flows_dir.into(),
            scheduler: WatchScheduler::new(debounce),
            tx,
            rx,
        }
    }

    /// A handle for sending [`WatchMessage::Interrupt`] from a signal
    /// handler.
    pub fn sender(&self) -> Sender<WatchMessage> {
        self.tx.clone()
    }

    pub fn flows_dir(&self) -> &Path {
        &self.flows_dir
    }

    /// Observe the flows directory and rebuild on qualifying changes until
    /// interrupted.
    ///
    /// `build` runs one full cycle; an error or panic from it is reported
    /// through `on_status` and the loop carries on. The observer is dropped
    /// (and its thread joined) before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the observer cannot be started.
    pub fn run<B, S>(self, build: B, on_status: S) -> Result<WatchSummary>
    where
        B: FnMut() -> Result<()>,
        S: FnMut(StatusLine),
    {
        let observer = observe(&self.flows_dir, self.tx.clone())?;
        let summary = self.drain(build, on_status);
        drop(observer);
        tracing::info!(cycles = summary.cycles, failures = summary.failures, "watch stopped");
        Ok(summary)
    }

    /// Process messages until [`WatchMessage::Interrupt`].
    fn drain<B, S>(mut self, mut build: B, mut on_status: S) -> WatchSummary
    where
        B: FnMut() -> Result<()>,
        S: FnMut(StatusLine),
    {
        // Keep only the senders held by the observer and signal handlers.
        drop(self.tx);

        for message in self.rx.iter() {
            match message {
                WatchMessage::Changed { path, at } => {
                    let Some(outcome) = self.scheduler.trigger(at, &mut build) else {
                        continue;
                    };
                    let subject = path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    on_status(match outcome {
                        CycleOutcome::Succeeded => StatusLine::ok(Stage::Watch, subject),
                        CycleOutcome::Failed(reason) => {
                            StatusLine::failed(Stage::Watch, subject, reason)
                        }
                    });
                }
                WatchMessage::Error(err) => {
                    tracing::warn!("filesystem observer error: {}", err);
                }
                WatchMessage::Interrupt => break,
            }
        }

        WatchSummary {
            cycles: self.scheduler.cycles(),
            failures: self.scheduler.failures(),
        }
    }
}
