//! Search limits and cooperative cancellation.
//!
//! A [`TimeControl`] is a cloneable token: the host keeps one clone to abort a
//! search running on another thread, the search polls its own clone.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Limits that control when an engine should stop searching.
///
/// Engines stop at whichever of depth or time is reached first. When time runs
/// out the engine returns the best fully searched move so far.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies
    pub depth: u8,
    /// Maximum time allowed for this move (None = unbounded)
    pub move_time: Option<Duration>,
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Depth constraint only.
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }

    /// Depth and wall-clock constraint.
    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Depth limit sharing an externally owned cancellation token.
    pub fn with_control(depth: u8, time_control: TimeControl) -> Self {
        Self {
            depth,
            move_time: time_control.limit(),
            time_control,
        }
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.is_stopped()
    }

    /// Start the clock. Call when the search begins.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(2)
    }
}

/// Shared stop flag plus an optional deadline measured from [`TimeControl::start`].
///
/// `is_stopped()` is a relaxed atomic load and is cheap enough to call on
/// every node; `check_time()` reads the clock as well.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    start_time: Arc<Mutex<Option<Instant>>>,
    time_limit: Option<Duration>,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start_time: Arc::new(Mutex::new(None)),
            time_limit,
        }
    }

    /// Start (or restart) the clock. A stop requested earlier stays in effect.
    pub fn start(&self) {
        *self.start_time.lock().unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
    }

    /// Clear the stop flag so the token can drive another search.
    pub fn reset(&self) {
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Force stop the search immediately.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Stop flag or expired deadline. Sets the flag when the deadline passes.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }

        if let Some(limit) = self.time_limit
            && let Some(start) = self.started_at()
            && start.elapsed() >= limit
        {
            self.stop();
            return true;
        }

        false
    }

    pub fn limit(&self) -> Option<Duration> {
        self.time_limit
    }

    fn started_at(&self) -> Option<Instant> {
        *self.start_time.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Elapsed time since the search started (zero before `start`).
    pub fn elapsed(&self) -> Duration {
        self.started_at()
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Remaining time (None if no limit).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
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
