//! Virtual clock and one-shot timers.

use std::time::Duration;

use crate::types::NodeId;

/// Work deferred until a timer is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Splash timeout elapsed.
    DismissSplash,
    /// Splash fade finished; detach the node.
    RemoveSplash,
    /// Hide a form message node.
    HideFormMessage(NodeId),
}

/// A scheduled action.
#[derive(Debug, Clone, Copy)]
struct Timer {
    /// Clock value at which the action fires.
    due: Duration,
    /// Scheduling order, breaks ties between equal due times.
    sequence: u64,
    /// What to do when due.
    action: TimerAction,
}

/// One-shot timers over a clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    /// Current clock value.
    now: Duration,
    /// Pending timers, unordered.
    pending: Vec<Timer>,
    /// Next sequence number.
    next_sequence: u64,
}

impl TimerQueue {
    /// Creates an empty queue at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending timers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedules `action` to fire `delay` after the current clock value.
    pub fn schedule(&mut self, delay: Duration, action: TimerAction) {
        let timer =
            Timer { due: self.now.saturating_add(delay), sequence: self.next_sequence, action };
        self.next_sequence += 1;
        tracing::debug!(?action, due = ?timer.due, "Timer scheduled");
        self.pending.push(timer);
    }

    /// Removes and returns the earliest timer due at or before `until`.
    ///
    /// The clock moves to the timer's due time, so timers scheduled while
    /// handling it count from that instant.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerAction> {
        let position = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(_, timer)| (timer.due, timer.sequence))
            .map(|(position, _)| position)?;

        let timer = self.pending.swap_remove(position);
        self.now = self.now.max(timer.due);
        Some(timer.action)
    }

    /// Moves the clock forward to `until` without firing anything.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
