//! Read-only world state delivered by the host once per tick.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Per-car view (only what the drills look at)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CarSnapshot {
    /// Boost amount (0-100)
    pub boost: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub location: Vector3<f32>,
    /// Game time (seconds) of the most recent touch by any car
    #[serde(default)]
    pub latest_touch_time: f32,
}

impl Default for BallSnapshot {
    fn default() -> Self {
        Self { location: Vector3::zeros(), latest_touch_time: 0.0 }
    }
}

/// Tick snapshot supplied by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Indexed by car index
    #[serde(default)]
    pub cars: Vec<CarSnapshot>,
    pub ball: BallSnapshot,
    /// Simulation speed multiplier (1.0 = real time)
    #[serde(default = "default_game_speed")]
    pub game_speed: f32,
}

fn default_game_speed() -> f32 {
    1.0
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self { cars: Vec::new(), ball: BallSnapshot::default(), game_speed: default_game_speed() }
    }
}

impl GameSnapshot {
    pub fn car(&self, index: usize) -> Option<&CarSnapshot> {
        self.cars.get(index)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_lookup() {
        let snapshot = GameSnapshot {
            cars: vec![CarSnapshot { boost: 33 }, CarSnapshot { boost: 0 }],
            ..GameSnapshot::default()
        };
        assert_eq!(snapshot.car(0).map(|c| c.boost), Some(33));
        assert_eq!(snapshot.car(1).map(|c| c.boost), Some(0));
        assert!(snapshot.car(2).is_none());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "cars": [{"boost": 80}],
            "ball": {"location": [0.0, 10.0, 250.0], "latest_touch_time": 12.5},
            "game_speed": 2.0
        }"#;
        let snapshot = GameSnapshot::from_json(json).expect("valid snapshot");
        assert_eq!(snapshot.cars[0].boost, 80);
        assert_eq!(snapshot.ball.location.z, 250.0);
        assert_eq!(snapshot.ball.latest_touch_time, 12.5);
        assert_eq!(snapshot.game_speed, 2.0);
    }

    #[test]
    fn test_from_json_defaults() {
        let snapshot =
            GameSnapshot::from_json(r#"{"ball": {"location": [1.0, 2.0, 3.0]}}"#).expect("valid");
        assert!(snapshot.cars.is_empty());
        assert_eq!(snapshot.game_speed, 1.0);
        assert_eq!(snapshot.ball.latest_touch_time, 0.0);
    }
}
