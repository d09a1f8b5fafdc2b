//! Per-tick driver around `EpisodeController`
//!
//! A host only forwards every snapshot to `tick()` and applies whatever state
//! comes back. Order of precedence each tick:
//!
//! 1. episode finished → reset into the selected drill
//! 2. new state not settled yet → wait
//! 3. car low on boost → top up
//! 4. otherwise → step the episode

use rand::RngCore;

use crate::config::TrainingConfig;
use crate::models::{GameSnapshot, GameStateDesc};

use super::controller::{EpisodeController, TerminationReason};
use super::drills::DrillKind;
use super::tick_monitor::{TickMonitor, TickRate};

/// What the host should do after a tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickAction {
    /// Force-set this state
    Apply(GameStateDesc),
    /// Reset was just applied, waiting for it to take effect
    Settling,
    /// Episode still running
    Continue,
    /// Episode ended this tick
    Finished(TerminationReason),
}

#[derive(Debug, Clone)]
pub struct TrainingSession<T: TickRate = TickMonitor> {
    controller: EpisodeController<T>,
    drill: DrillKind,
    /// Fixed variation, or `None` to cycle
    variation: Option<u8>,
}

impl TrainingSession<TickMonitor> {
    pub fn new(car_index: usize, drill: DrillKind) -> Self {
        Self::from_controller(EpisodeController::new(car_index), drill)
    }

    pub fn with_config(car_index: usize, drill: DrillKind, config: TrainingConfig) -> Self {
        Self::from_controller(EpisodeController::with_config(car_index, config), drill)
    }
}

impl<T: TickRate> TrainingSession<T> {
    pub fn from_controller(controller: EpisodeController<T>, drill: DrillKind) -> Self {
        Self { controller, drill, variation: None }
    }

    /// Takes effect at the next reset.
    pub fn set_drill(&mut self, drill: DrillKind) {
        self.drill = drill;
    }

    pub fn set_variation(&mut self, variation: Option<u8>) {
        self.variation = variation;
    }

    pub fn drill(&self) -> DrillKind {
        self.drill
    }

    pub fn controller(&self) -> &EpisodeController<T> {
        &self.controller
    }

    pub fn tick(&mut self, snapshot: &GameSnapshot, rng: &mut dyn RngCore) -> TickAction {
        if self.controller.is_finished() {
            return TickAction::Apply(self.controller.reset(self.drill, self.variation, rng));
        }

        if !self.controller.is_done() {
            return TickAction::Settling;
        }

        if self.controller.need_boost(snapshot) {
            match self.controller.add_boost(snapshot) {
                Ok(state) => return TickAction::Apply(state),
                Err(err) => log::warn!("boost top-up skipped: {}", err),
            }
        }

        match self.controller.step(snapshot) {
            Some(reason) => TickAction::Finished(reason),
            None => TickAction::Continue,
        }
    }
}
