//! # aerial_training - Scripted aerial drills for a car-soccer bot
//!
//! Watches the host's per-tick snapshots, decides when the current drill
//! episode is over and produces the force-set state for the next one.
//!
//! ## Features
//! - Four randomized aerial drill layouts with preset variations
//! - Episode end on timeout, grounded ball, ball touch or empty boost
//! - Per-episode boost top-up budget
//! - Injected random source and tick-rate source for reproducible runs
//! - JSON in/out for hosts that bridge over text
//!
//! ## Usage
//!
//! ```rust
//! use aerial_training::{DrillKind, GameSnapshot, TickAction, TrainingSession};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let mut session = TrainingSession::new(0, DrillKind::MidField);
//!
//! let snapshot = GameSnapshot::default();
//! if let TickAction::Apply(state) = session.tick(&snapshot, &mut rng) {
//!     assert!(state.car(0).is_some());
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod training;

pub use config::TrainingConfig;
pub use error::{Result, TrainingError};
pub use models::{
    BallSnapshot, BallStateDesc, CarSnapshot, CarStateDesc, GameSnapshot, GameStateDesc,
    PhysicsDesc, Rotator,
};
pub use training::{
    DrillKind, EpisodeController, FixedTickRate, TerminationReason, TickAction, TickMonitor,
    TickRate, TrainingSession,
};
