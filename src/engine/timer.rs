use std::time::{Duration, Instant};

const FORMATION_BASE_MS: u64 = 500;
const FORMATION_STEP_MS: u64 = 50;
const FORMATION_FLOOR_MS: u64 = 50;

const FIRE_BASE_MS: u64 = 1500;
const FIRE_STEP_MS: u64 = 100;
const FIRE_FLOOR_MS: u64 = 100;

fn level_period(base: u64, step: u64, floor: u64, level: u32) -> Duration {
    let ms = base.saturating_sub(step.saturating_mul(level as u64)).max(floor);
    Duration::from_millis(ms)
}

/// Sweep cadence: 500 - 50 * level ms, never below 50 ms.
pub fn formation_period(level: u32) -> Duration {
    level_period(FORMATION_BASE_MS, FORMATION_STEP_MS, FORMATION_FLOOR_MS, level)
}

/// Enemy volley cadence: 1500 - 100 * level ms, never below 100 ms.
pub fn fire_period(level: u32) -> Duration {
    level_period(FIRE_BASE_MS, FIRE_STEP_MS, FIRE_FLOOR_MS, level)
}

/// Repeating deadline polled by the frame loop.
#[derive(Clone, Copy, Debug)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Instant,
}

impl IntervalTimer {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Fires at most once per call. A stalled caller gets one tick, not a
    /// burst of catch-up ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        if self.next_due <= now {
            self.next_due = now + self.period;
        }
        true
    }
}

/// The two controller cadences of one round. Dropping this cancels both.
#[derive(Clone, Copy, Debug)]
pub struct RoundTimers {
    pub formation: IntervalTimer,
    pub fire: IntervalTimer,
}

impl RoundTimers {
    pub fn arm(level: u32, now: Instant) -> Self {
        Self {
            formation: IntervalTimer::new(formation_period(level), now),
            fire: IntervalTimer::new(fire_period(level), now),
        }
    }
}
