//! Tick-rate measurement
//!
//! Episode thresholds are expressed in game seconds, but the controller only
//! counts ticks. The measured ticks-per-second divided by the game speed
//! converts one into the other.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Source of the current ticks-per-second estimate.
pub trait TickRate {
    /// Record one tick and return the current estimate.
    fn sample(&mut self) -> f32;
}

/// Ticks per game second.
///
/// A game speed of 0 (paused or unreported) is treated as 1.
pub fn tps_ratio(tps: f32, game_speed: f32) -> f32 {
    let game_speed = if game_speed == 0.0 { 1.0 } else { game_speed };
    tps / game_speed
}

/// Wall-clock tick rate over a sliding window.
#[derive(Debug, Clone)]
pub struct TickMonitor {
    window: VecDeque<Instant>,
    window_len: Duration,
    nominal_tps: f32,
}

impl TickMonitor {
    pub fn new(nominal_tps: f32) -> Self {
        Self::with_window(nominal_tps, Duration::from_secs(1))
    }

    pub fn with_window(nominal_tps: f32, window_len: Duration) -> Self {
        Self { window: VecDeque::new(), window_len, nominal_tps }
    }

    /// Record a tick observed at `now`.
    pub fn record(&mut self, now: Instant) -> f32 {
        self.window.push_back(now);
        while let Some(&oldest) = self.window.front() {
            if now.duration_since(oldest) > self.window_len {
                self.window.pop_front();
            } else {
                break;
            }
        }
        self.current_rate()
    }

    /// Falls back to the nominal rate until two ticks span a non-zero interval.
    pub fn current_rate(&self) -> f32 {
        match (self.window.front(), self.window.back()) {
            (Some(first), Some(last)) if self.window.len() >= 2 => {
                let span = last.duration_since(*first).as_secs_f32();
                if span > 0.0 {
                    (self.window.len() - 1) as f32 / span
                } else {
                    self.nominal_tps
                }
            }
            _ => self.nominal_tps,
        }
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }
}

impl TickRate for TickMonitor {
    fn sample(&mut self) -> f32 {
        self.record(Instant::now())
    }
}

/// Constant rate, for hosts that run the simulation offline at a known speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTickRate(pub f32);

impl TickRate for FixedTickRate {
    fn sample(&mut self) -> f32 {
        self.0
    }
}
