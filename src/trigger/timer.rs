//! Interval timer for trigger polling
//!
//! Triggers check their condition once per interval rather than every tick.
//! The timer becomes ready at most once per `tick` call and resets to zero
//! on firing, so a long frame spanning several interval-lengths never
//! queues multiple fires.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalTimer {
    interval: f32,
    elapsed: f32,
}

impl IntervalTimer {
    pub fn new(interval: f32) -> Self {
        Self { interval: interval.max(0.0), elapsed: 0.0 }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Accumulate elapsed time; true when the interval has been reached.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
