//! Time source for pause windows and accident auto-reset
//!
//! Wall-clock behaviour lives behind this abstraction so tests can advance
//! time explicitly instead of sleeping.

use std::time::Instant;

/// Monotonic time source measured in seconds since simulation start
pub enum SimClock {
    /// Real wall-clock time for interactive runs
    System { start: Instant },
    /// Explicitly advanced time for deterministic runs and tests
    Manual { now_secs: f64 },
}

impl SimClock {
    pub fn system() -> Self {
        SimClock::System {
            start: Instant::now(),
        }
    }

    pub fn manual() -> Self {
        SimClock::Manual { now_secs: 0.0 }
    }

    /// Seconds elapsed since the clock was created
    pub fn now_secs(&self) -> f64 {
        match self {
            SimClock::System { start } => start.elapsed().as_secs_f64(),
            SimClock::Manual { now_secs } => *now_secs,
        }
    }

    /// Advance a manual clock; has no effect on a system clock
    pub fn advance_secs(&mut self, secs: f64) {
        if let SimClock::Manual { now_secs } = self {
            *now_secs += secs;
        }
    }
}
