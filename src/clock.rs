//! Wall-clock time source
//!
//! The engine only needs two timers (level start and level complete), both
//! measured in real time rather than ticks. Reads go through [`Clock`] so
//! tests and replays can drive time by hand.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Monotonic time source. `now` is the time elapsed since the clock's origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Real time: `Instant` on native, `Date.now()` in the browser
#[derive(Debug, Clone)]
pub struct SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
    #[cfg(target_arch = "wasm32")]
    origin_ms: f64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            origin: std::time::Instant::now(),
            #[cfg(target_arch = "wasm32")]
            origin_ms: js_sys::Date::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    #[cfg(target_arch = "wasm32")]
    fn now(&self) -> Duration {
        let elapsed_ms = (js_sys::Date::now() - self.origin_ms).max(0.0);
        Duration::from_secs_f64(elapsed_ms / 1000.0)
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// handle and give another to the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `dt`
    pub fn advance(&self, dt: Duration) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
