//! Host-facing data: the per-tick snapshot coming in and the force-set state
//! going out.

pub mod game_state;
pub mod snapshot;

pub use game_state::{BallStateDesc, CarStateDesc, GameStateDesc, PhysicsDesc, Rotator};
pub use snapshot::{BallSnapshot, CarSnapshot, GameSnapshot};
