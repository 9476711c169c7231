//! The reveal animator.
//!
//! A run is a spawned tokio task that emits one tick per step interval until
//! every content-bearing cell has been counted, sleeps for the settle delay,
//! and then emits a settle pulse. The animator owns the task handle and the
//! receiving end of the channel, so it alone decides which pulses count:
//!
//! - starting a new run aborts the previous task and bumps the run number;
//! - pulses carrying an older run number are discarded, including any that
//!   were already queued before the abort;
//! - completion is reported once per run, strictly after the final tick.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::domain::cadence::RevealCadence;
use crate::domain::target::RevealTarget;

/// Identifies one `start` call on an animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub u64);

/// What the animator reports to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealSignal {
    /// One more cell is visible.
    Progress {
        /// Cells visible after this tick.
        revealed: usize,
        /// Content-bearing cells in the target.
        total: usize,
    },
    /// Every cell is visible and the settle delay has elapsed.
    Completed,
}

#[derive(Debug, Clone, Copy)]
enum Pulse {
    Tick,
    Settled,
}

#[derive(Debug, Clone, Copy)]
struct Message {
    run: RunId,
    pulse: Pulse,
}

#[derive(Debug)]
struct ActiveRun {
    id: RunId,
    total: usize,
    revealed: usize,
    completed: bool,
    handle: JoinHandle<()>,
}

/// Drives one reveal target at a time.
#[derive(Debug)]
pub struct RevealAnimator {
    cadence: RevealCadence,
    sender: mpsc::UnboundedSender<Message>,
    receiver: mpsc::UnboundedReceiver<Message>,
    active: Option<ActiveRun>,
    runs_started: u64,
}

impl RevealAnimator {
    /// Creates an idle animator.
    #[must_use]
    pub fn new(cadence: RevealCadence) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            cadence,
            sender,
            receiver,
            active: None,
            runs_started: 0,
        }
    }

    /// The cadence every run uses.
    #[must_use]
    pub fn cadence(&self) -> RevealCadence {
        self.cadence
    }

    /// Starts revealing `target`, cancelling any run in flight.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start(&mut self, target: &RevealTarget) -> RunId {
        self.cancel();

        self.runs_started += 1;
        let id = RunId(self.runs_started);
        let total = target.total();
        let handle = tokio::spawn(drive(id, total, self.cadence, self.sender.clone()));

        debug!(run = id.0, total, "reveal started");
        self.active = Some(ActiveRun {
            id,
            total,
            revealed: 0,
            completed: false,
            handle,
        });
        id
    }

    /// Stops the current run. Nothing it produced is reported afterwards.
    pub fn cancel(&mut self) {
        if let Some(run) = self.active.take() {
            run.handle.abort();
            if !run.completed {
                debug!(run = run.id.0, revealed = run.revealed, "reveal cancelled");
            }
        }
    }

    /// The current run, if any.
    #[must_use]
    pub fn run_id(&self) -> Option<RunId> {
        self.active.as_ref().map(|run| run.id)
    }

    /// Cells visible in the current run.
    #[must_use]
    pub fn revealed(&self) -> usize {
        self.active.as_ref().map_or(0, |run| run.revealed)
    }

    /// Content-bearing cells in the current run's target.
    #[must_use]
    pub fn total(&self) -> usize {
        self.active.as_ref().map_or(0, |run| run.total)
    }

    /// Whether a run is in flight and has not yet completed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(|run| !run.completed)
    }

    /// Ticker tasks still holding this animator's channel. An aborted task
    /// is counted until the runtime has dropped it.
    #[must_use]
    pub fn live_tickers(&self) -> usize {
        self.sender.strong_count().saturating_sub(1)
    }

    /// Whether the current run has completed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.active.as_ref().is_some_and(|run| run.completed)
    }

    /// Waits for the next signal of the current run.
    ///
    /// Never resolves while the animator is idle, which makes it safe to
    /// poll inside `tokio::select!`. Cancel-safe.
    pub async fn next_signal(&mut self) -> RevealSignal {
        loop {
            // The animator holds a sender, so the channel never closes.
            let Some(message) = self.receiver.recv().await else {
                return std::future::pending().await;
            };
            if let Some(signal) = self.apply(message) {
                return signal;
            }
        }
    }

    fn apply(&mut self, message: Message) -> Option<RevealSignal> {
        let Some(run) = self.active.as_mut().filter(|run| run.id == message.run) else {
            trace!(run = message.run.0, "discarding stale reveal pulse");
            return None;
        };

        match message.pulse {
            Pulse::Tick if run.revealed < run.total => {
                run.revealed += 1;
                Some(RevealSignal::Progress {
                    revealed: run.revealed,
                    total: run.total,
                })
            }
            Pulse::Settled if run.revealed == run.total && !run.completed => {
                run.completed = true;
                debug!(run = run.id.0, total = run.total, "reveal completed");
                Some(RevealSignal::Completed)
            }
            Pulse::Tick | Pulse::Settled => None,
        }
    }
}

impl Drop for RevealAnimator {
    fn drop(&mut self) {
        if let Some(run) = self.active.take() {
            run.handle.abort();
        }
    }
}

async fn drive(
    run: RunId,
    total: usize,
    cadence: RevealCadence,
    sender: mpsc::UnboundedSender<Message>,
) {
    if total > 0 {
        let mut ticker = time::interval_at(Instant::now() + cadence.step(), cadence.step());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        for _ in 0..total {
            ticker.tick().await;
            if sender
                .send(Message {
                    run,
                    pulse: Pulse::Tick,
                })
                .is_err()
            {
                return;
            }
        }
    }

    if !cadence.settle().is_zero() {
        time::sleep(cadence.settle()).await;
    }
    let _ = sender.send(Message {
        run,
        pulse: Pulse::Settled,
    });
}
