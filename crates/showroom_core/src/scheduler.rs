//! Deferred transition steps
//!
//! Navigation transitions are sequences of timed, cancellable steps, not
//! threads: the controller arms a step with a delay, and the driving loop
//! fires it back into the controller when due. `TokioStepTimer` backs the
//! real application; `ManualStepTimer` lets tests fire steps by hand.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;

/// A deferred phase advance of an in-flight navigation transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStep {
    /// Fade-out finished: commit the display-set swap while hidden
    CommitSwap,
    /// Fade-in finished: release the transition lock
    FinishFadeIn,
}

/// Handle to an armed timer, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Timer/task-queue seam for deferred steps
pub trait StepTimer {
    /// Arrange for `step` to fire after `delay`
    fn arm(&mut self, delay: Duration, step: TransitionStep) -> TimerToken;

    /// Cancel an armed step; firing a disarmed token is not possible
    fn disarm(&mut self, token: TimerToken);
}

/// Tokio-backed timer: each armed step is a spawned sleep that sends the
/// step back over a channel to the driving loop. Disarm aborts the task.
pub struct TokioStepTimer {
    tx: mpsc::UnboundedSender<TransitionStep>,
    tasks: HashMap<TimerToken, tokio::task::JoinHandle<()>>,
    next_token: u64,
}

impl TokioStepTimer {
    /// Create the timer and the step feed the driving loop must drain
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TransitionStep>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                tasks: HashMap::new(),
                next_token: 0,
            },
            rx,
        )
    }
}

impl StepTimer for TokioStepTimer {
    fn arm(&mut self, delay: Duration, step: TransitionStep) -> TimerToken {
        // Drop handles of steps that already fired
        self.tasks.retain(|_, handle| !handle.is_finished());

        let token = TimerToken(self.next_token);
        self.next_token += 1;

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session is shutting down
            let _ = tx.send(step);
        });
        self.tasks.insert(token, handle);
        token
    }

    fn disarm(&mut self, token: TimerToken) {
        if let Some(handle) = self.tasks.remove(&token) {
            handle.abort();
        }
    }
}

/// Manual timer for tests: arming queues the step, nothing fires until
/// the test pops it.
#[derive(Default)]
pub struct ManualStepTimer {
    pending: Vec<(TimerToken, Duration, TransitionStep)>,
    next_token: u64,
}

impl ManualStepTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the next due step, as the driving loop would
    pub fn fire_next(&mut self) -> Option<TransitionStep> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0).2)
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Delay the most recently armed step was given
    pub fn last_delay(&self) -> Option<Duration> {
        self.pending.last().map(|(_, d, _)| *d)
    }
}

impl StepTimer for ManualStepTimer {
    fn arm(&mut self, delay: Duration, step: TransitionStep) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending.push((token, delay, step));
        token
    }

    fn disarm(&mut self, token: TimerToken) {
        self.pending.retain(|(t, _, _)| *t != token);
    }
}
