//! EpisodeController - drill episode lifecycle
//!
//! ## State machine
//!
//! ```text
//! NOT_RUNNING --reset()--> RUNNING --step() sees an end condition--> NOT_RUNNING
//! ```
//!
//! The controller starts NOT_RUNNING and is reused for every episode.
//!
//! ## End conditions (checked every `step()`)
//!
//! - timeout: more than `timeout_seconds` worth of ticks elapsed
//! - boost exhausted: car at 0 boost and no top-up budget left
//! - ball grounded: ball below `ground_height`
//! - ball touched: `touch_grace_seconds` passed since a new touch was seen
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut controller = EpisodeController::new(car_index);
//! let state = controller.reset(DrillKind::MidField, None, &mut rng);
//! host.set_game_state(&state);
//!
//! // every tick
//! controller.step(&snapshot);
//! if controller.is_finished() { /* reset again */ }
//! ```

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::TrainingConfig;
use crate::error::{Result, TrainingError};
use crate::models::{GameSnapshot, GameStateDesc};

use super::boost::boost_top_up;
use super::drills::DrillKind;
use super::tick_monitor::{tps_ratio, TickMonitor, TickRate};

// ============================================================================
// TerminationReason
// ============================================================================

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    Timeout,
    BoostExhausted,
    BallGrounded,
    BallTouched,
}

impl TerminationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationReason::Timeout => "timeout",
            TerminationReason::BoostExhausted => "boost_exhausted",
            TerminationReason::BallGrounded => "ball_grounded",
            TerminationReason::BallTouched => "ball_touched",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// EpisodeController
// ============================================================================

#[derive(Debug, Clone)]
pub struct EpisodeController<T: TickRate = TickMonitor> {
    car_index: usize,
    config: TrainingConfig,
    tick_rate: T,

    /// Automatic variation counter, always < `config.variation_count`
    variation: u8,
    /// Ticks since the last reset
    tick_count: u32,
    /// `is_done()` calls since the last reset
    settle_count: u32,
    running: bool,

    /// Latest ball touch time seen in a snapshot
    last_touch_time: f32,
    /// Tick after which a seen touch ends the episode
    touch_deadline: Option<f32>,

    /// Boost still grantable this episode
    boost_budget: u32,

    last_termination: Option<TerminationReason>,
    episodes: u64,
}

impl EpisodeController<TickMonitor> {
    pub fn new(car_index: usize) -> Self {
        Self::with_config(car_index, TrainingConfig::default())
    }

    pub fn with_config(car_index: usize, config: TrainingConfig) -> Self {
        let tick_rate = TickMonitor::new(config.nominal_tps);
        Self::with_tick_rate(car_index, config, tick_rate)
    }
}

impl<T: TickRate> EpisodeController<T> {
    pub fn with_tick_rate(car_index: usize, config: TrainingConfig, tick_rate: T) -> Self {
        let boost_budget = config.boost_budget;
        Self {
            car_index,
            config,
            tick_rate,
            variation: 0,
            tick_count: 0,
            settle_count: 0,
            running: false,
            last_touch_time: 0.0,
            touch_deadline: None,
            boost_budget,
            last_termination: None,
            episodes: 0,
        }
    }

    /// Advance one tick and evaluate every end condition.
    ///
    /// Returns the first condition that held this tick, if any. The episode
    /// stops running as soon as one holds.
    pub fn step(&mut self, snapshot: &GameSnapshot) -> Option<TerminationReason> {
        self.tick_count = self.tick_count.saturating_add(1);
        let tick = self.tick_count as f32;
        let ratio = tps_ratio(self.tick_rate.sample(), snapshot.game_speed);

        let mut reason = None;

        if tick > self.config.timeout_seconds * ratio {
            reason = reason.or(Some(TerminationReason::Timeout));
        }

        match snapshot.car(self.car_index) {
            Some(car) => {
                if car.boost == 0 && self.boost_budget == 0 {
                    reason = reason.or(Some(TerminationReason::BoostExhausted));
                }
            }
            None => log::warn!("car {} missing from snapshot", self.car_index),
        }

        if snapshot.ball.location.z < self.config.ground_height {
            reason = reason.or(Some(TerminationReason::BallGrounded));
        }

        let touch_time = snapshot.ball.latest_touch_time;
        if touch_time != self.last_touch_time {
            self.touch_deadline = Some(tick + self.config.touch_grace_seconds * ratio);
            self.last_touch_time = touch_time;
        }
        if let Some(deadline) = self.touch_deadline {
            if deadline > 0.0 && tick > deadline {
                reason = reason.or(Some(TerminationReason::BallTouched));
            }
        }

        if let Some(reason) = reason {
            if self.running {
                log::debug!(
                    "episode {} ended at tick {}: {} (tps ratio {:.1})",
                    self.episodes,
                    self.tick_count,
                    reason,
                    ratio
                );
                self.last_termination = Some(reason);
            }
            self.running = false;
        }
        reason
    }

    /// Car is low on boost and the episode budget can still cover a top-up.
    pub fn need_boost(&self, snapshot: &GameSnapshot) -> bool {
        match snapshot.car(self.car_index) {
            Some(car) => car.boost < self.config.low_boost_threshold && self.boost_budget > 0,
            None => false,
        }
    }

    /// Spend up to one grant from the budget and return the top-up state.
    pub fn add_boost(&mut self, snapshot: &GameSnapshot) -> Result<GameStateDesc> {
        let car = snapshot
            .car(self.car_index)
            .ok_or(TrainingError::CarNotFound { index: self.car_index })?;

        let granted = self.config.boost_grant.min(self.boost_budget);
        self.boost_budget -= granted;
        let new_amount = car.boost.saturating_add(granted);
        log::debug!(
            "boost top-up for car {}: +{} -> {} ({} left)",
            self.car_index,
            granted,
            new_amount,
            self.boost_budget
        );
        Ok(boost_top_up(self.car_index, new_amount as f32))
    }

    /// Start a new episode.
    ///
    /// `variation: None` advances the automatic counter and uses its new value.
    pub fn reset(
        &mut self,
        drill: DrillKind,
        variation: Option<u8>,
        rng: &mut dyn RngCore,
    ) -> GameStateDesc {
        self.touch_deadline = None;
        self.boost_budget = self.config.boost_budget;
        self.tick_count = 0;
        self.settle_count = 0;
        self.running = true;
        self.episodes += 1;

        let variation = match variation {
            Some(v) => v,
            None => {
                self.variation = (self.variation + 1) % self.config.variation_count.max(1);
                self.variation
            }
        };

        log::info!("episode {}: {} (variation {})", self.episodes, drill, variation);
        drill.build(self.car_index, variation, rng)
    }

    /// `reset` by drill name; unknown or empty names use the default drill.
    pub fn reset_named(
        &mut self,
        name: &str,
        variation: Option<u8>,
        rng: &mut dyn RngCore,
    ) -> GameStateDesc {
        self.reset(DrillKind::from_name_or_default(name), variation, rng)
    }

    /// Debounce after a reset: true once called more than `settle_ticks` times.
    pub fn is_done(&mut self) -> bool {
        self.settle_count = self.settle_count.saturating_add(1);
        self.settle_count > self.config.settle_ticks
    }

    pub fn is_finished(&self) -> bool {
        !self.running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn car_index(&self) -> usize {
        self.car_index
    }

    pub fn variation(&self) -> u8 {
        self.variation
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    pub fn boost_budget(&self) -> u32 {
        self.boost_budget
    }

    pub fn last_termination(&self) -> Option<TerminationReason> {
        self.last_termination
    }

    /// Number of resets so far
    pub fn episode_count(&self) -> u64 {
        self.episodes
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }
}

// ============================================================================
// Tests
// ============================================================================
