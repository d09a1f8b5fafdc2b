//! GameStateDesc - Force-set payload handed back to the host
//!
//! Every field is optional: `None` means "leave whatever the simulation has".
//! A drill reset fills in the whole car and ball, a boost top-up touches only
//! one car's boost amount.
//!
//! ## JSON
//!
//! ```text
//! {
//!   "cars": { "0": { "boost_amount": 100.0, "physics": { "location": [-300.0, -500.0, 20.0], ... } } },
//!   "ball": { "physics": { "location": [0.0, 0.0, 200.0], ... } }
//! }
//! ```

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;

/// Orientation in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhysicsDesc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Vector3<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<Vector3<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angular_velocity: Option<Vector3<f32>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CarStateDesc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost_amount: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physics: Option<PhysicsDesc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BallStateDesc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physics: Option<PhysicsDesc>,
}

impl BallStateDesc {
    pub fn new(physics: PhysicsDesc) -> Self {
        Self { physics: Some(physics) }
    }
}

/// Desired world state for the host's state-setting API
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameStateDesc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ball: Option<BallStateDesc>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cars: BTreeMap<usize, CarStateDesc>,
}

impl GameStateDesc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ball(mut self, ball: BallStateDesc) -> Self {
        self.ball = Some(ball);
        self
    }

    pub fn with_car(mut self, index: usize, car: CarStateDesc) -> Self {
        self.cars.insert(index, car);
        self
    }

    pub fn car(&self, index: usize) -> Option<&CarStateDesc> {
        self.cars.get(&index)
    }

    /// Car location, if this state places the car
    pub fn car_location(&self, index: usize) -> Option<Vector3<f32>> {
        self.car(index).and_then(|c| c.physics).and_then(|p| p.location)
    }

    pub fn ball_physics(&self) -> Option<&PhysicsDesc> {
        self.ball.as_ref().and_then(|b| b.physics.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.ball.is_none() && self.cars.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
