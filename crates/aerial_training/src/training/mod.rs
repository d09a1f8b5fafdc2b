//! Aerial drill training: episode control, drill layouts and boost top-ups.

pub mod boost;
pub mod controller;
pub mod drills;
pub mod session;
pub mod tick_monitor;

pub use boost::{boost_top_up, boost_top_up_full, FULL_BOOST};
pub use controller::{EpisodeController, TerminationReason};
pub use drills::{
    aerial_mid_field, aerial_mid_field_frozen_ball, aerial_side_field, aerial_straight_up,
    DrillBuilder, DrillKind,
};
pub use session::{TickAction, TrainingSession};
pub use tick_monitor::{tps_ratio, FixedTickRate, TickMonitor, TickRate};
