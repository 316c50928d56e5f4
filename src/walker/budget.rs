//! IOPS budget enforcement
//!
//! [`RateLimiter`] is the single chokepoint for filesystem operations. It
//! uses a fixed one-second window: once `budget` operations have run in the
//! current window, the caller sleeps until the window is over and a fresh
//! one starts.

use std::thread;
use std::time::{Duration, Instant};
use tracing::trace;

/// Length of one budget window
pub const WINDOW: Duration = Duration::from_secs(1);

/// Extra wait past the window boundary so the next window is strictly new
const WINDOW_EPSILON: Duration = Duration::from_nanos(1);

/// Source of monotonic time and blocking sleeps
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by `Instant` and `thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Fixed-window limiter on the number of operations per second
///
/// Not thread-safe by design: a scan owns exactly one limiter.
#[derive(Debug)]
pub struct RateLimiter<C: Clock = SystemClock> {
    clock: C,
    budget: u32,
    window_start: Instant,
    ops_in_window: u32,
    ops_executed: u64,
    throttled: u64,
}

impl RateLimiter<SystemClock> {
    /// Create a limiter allowing `budget` operations per second
    pub fn new(budget: u32) -> Self {
        Self::with_clock(budget, SystemClock)
    }
}

impl<C: Clock> RateLimiter<C> {
    /// Create a limiter driven by a custom clock
    pub fn with_clock(budget: u32, clock: C) -> Self {
        let window_start = clock.now();
        Self {
            clock,
            budget,
            window_start,
            ops_in_window: 0,
            ops_executed: 0,
            throttled: 0,
        }
    }

    /// Run one filesystem operation, waiting first if the budget for the
    /// current window is spent
    ///
    /// The operation's result is returned untouched.
    pub fn execute<T>(&mut self, op: impl FnOnce() -> T) -> T {
        let elapsed = self.clock.now().saturating_duration_since(self.window_start);
        if elapsed > WINDOW {
            self.reset_window();
        }

        if self.ops_in_window >= self.budget {
            let elapsed = self.clock.now().saturating_duration_since(self.window_start);
            let wait = (WINDOW + WINDOW_EPSILON).saturating_sub(elapsed);
            trace!(
                budget = self.budget,
                wait_ms = wait.as_millis() as u64,
                "IOPS budget exhausted, waiting for next window"
            );
            self.clock.sleep(wait);
            self.throttled += 1;
            self.reset_window();
        }

        let result = op();
        self.ops_in_window += 1;
        self.ops_executed += 1;
        result
    }

    fn reset_window(&mut self) {
        self.window_start = self.clock.now();
        self.ops_in_window = 0;
    }

    /// Operations allowed per window
    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Total operations executed through this limiter
    pub fn ops_executed(&self) -> u64 {
        self.ops_executed
    }

    /// Number of times a caller was made to wait
    pub fn throttle_count(&self) -> u64 {
        self.throttled
    }
}

#[cfg(test)]
pub(crate) mod test_clock {
    use super::Clock;
    use std::cell::{Cell, RefCell};
    use std::time::{Duration, Instant};

    /// Manual clock: time only moves on `advance` or `sleep`
    #[derive(Debug)]
    pub struct ManualClock {
        now: Cell<Instant>,
        pub sleeps: RefCell<Vec<Duration>>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                now: Cell::new(Instant::now()),
                sleeps: RefCell::new(Vec::new()),
            }
        }

        pub fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for &ManualClock {
        fn now(&self) -> Instant {
            self.now.get()
        }

        fn sleep(&self, duration: Duration) {
            self.sleeps.borrow_mut().push(duration);
            self.advance(duration);
        }
    }
}
