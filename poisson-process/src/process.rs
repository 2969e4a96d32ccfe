// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::stream::EventStream;
use futures::StreamExt;
use log::{debug, trace};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

type Trigger = Box<dyn FnMut() + Send>;

/// Handle to a recurring trigger whose invocations form a temporal Poisson
/// process with the configured mean interval.
///
/// The handle starts out stopped. [`start`](Process::start) arms the first
/// delay and spawns a worker chain that keeps re-arming itself; the next
/// firing is always scheduled *before* the trigger runs, so a slow trigger
/// cannot skew the schedule and a trigger stopping its own process cancels
/// the upcoming firing rather than a stale one.
///
/// Handles are cheap to clone and clones control the same process, which is
/// how a trigger gets hold of something it can call `stop` on. Once the last
/// handle is dropped the chain is cancelled, as nothing could ever stop it
/// otherwise.
pub struct Process {
    average_interval: Duration,

    /// Invoked once per event; shared so that every handle drives the same
    /// callback across restarts.
    trigger: Arc<Mutex<Trigger>>,

    /// Cancellation handle of the pending chain. `Some` iff running.
    /// At most one chain is ever live per process; starting anew replaces
    /// (and cancels) whatever was armed before.
    pending: Arc<Mutex<Option<CancellationToken>>>,
}

impl Process {
    /// Creates a new process in the stopped state.
    ///
    /// A zero interval is valid and produces a process firing as fast as the
    /// runtime can schedule it.
    pub fn new<F>(average_interval: Duration, trigger: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let trigger: Trigger = Box::new(trigger);
        Process {
            average_interval,
            trigger: Arc::new(Mutex::new(trigger)),
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Mean interval between trigger invocations.
    pub fn average_interval(&self) -> Duration {
        self.average_interval
    }

    pub fn is_running(&self) -> bool {
        self.pending.lock().is_some()
    }

    /// Arms the first delay and transitions to running. Returns immediately;
    /// the trigger is never invoked synchronously from here.
    ///
    /// Starting an already running process replaces the pending chain instead
    /// of stacking a second one. Must be called within a tokio runtime.
    pub fn start(&self) {
        let token = CancellationToken::new();
        if let Some(previous) = self.pending.lock().replace(token.clone()) {
            previous.cancel();
        }

        debug!(
            "starting poisson process with an average interval of {:?}",
            self.average_interval
        );

        let mut events = EventStream::new(self.average_interval);
        let trigger = Arc::clone(&self.trigger);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        trace!("poisson process: received stop");
                        break;
                    }
                    next = events.next() => {
                        if next.is_none() {
                            break;
                        }
                        trace!("poisson process: next trigger!");
                        (*trigger.lock())();
                        // keep a zero-interval process cooperative
                        tokio::task::yield_now().await;
                    }
                }
            }
            trace!("poisson process: exiting");
        });
    }

    /// Cancels the pending firing, if any, and transitions to stopped.
    ///
    /// A trigger invocation already in progress is not interrupted. Callable
    /// from anywhere, including from inside the trigger itself via a clone of
    /// the handle.
    pub fn stop(&self) {
        if let Some(token) = self.pending.lock().take() {
            debug!("stopping poisson process");
            token.cancel();
        }
    }
}

impl Clone for Process {
    fn clone(&self) -> Self {
        Process {
            average_interval: self.average_interval,
            trigger: Arc::clone(&self.trigger),
            pending: Arc::clone(&self.pending),
        }
    }
}

impl Drop for Process {
    fn drop(&mut self) {
        // last handle going away: nothing could call `stop` anymore
        if Arc::strong_count(&self.pending) == 1 {
            self.stop();
        }
    }
}

impl fmt::Debug for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Process")
            .field("average_interval", &self.average_interval)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}
