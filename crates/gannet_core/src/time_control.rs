//! Search limits and the move clock.
//!
//! The driver is single-threaded: it starts the clock once before iterative
//! deepening, blocks on each search, and consults the clock between
//! iterations. The search recursion itself never polls. A cloned control
//! snapshots the running clock; expiry is recomputed from the start instant
//! and the fixed limit, so every snapshot of one search agrees on when time
//! is up.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Limits for one `go` command: a depth ceiling and an optional move time.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies.
    pub depth: u8,
    /// Maximum time for this move (None = infinite).
    pub move_time: Option<Duration>,
    pub time_control: TimeControl,
}

impl SearchLimits {
    pub fn new(depth: u8, move_time: Option<Duration>) -> Self {
        Self {
            depth,
            move_time,
            time_control: TimeControl::new(move_time),
        }
    }

    /// Depth-only limits, no clock.
    pub fn depth(depth: u8) -> Self {
        Self::new(depth, None)
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.check_time()
    }

    /// Start the clock. Call once when the search begins.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// A stop flag plus the clock it latches from. Interior mutability keeps
/// `start`/`stop` callable through shared references; nothing here is
/// shared across threads.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Cell<bool>,
    started_at: Cell<Option<Instant>>,
    time_limit: Option<Duration>,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Cell::new(false),
            started_at: Cell::new(None),
            time_limit,
        }
    }

    pub fn start(&self) {
        self.started_at.set(Some(Instant::now()));
        self.stopped.set(false);
    }

    /// Force an immediate stop.
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    /// Check the clock, latching the stop flag if the limit has passed.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }

        if let Some(limit) = self.time_limit
            && let Some(start) = self.started_at.get()
            && start.elapsed() >= limit
        {
            self.stop();
            return true;
        }

        false
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at
            .get()
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
