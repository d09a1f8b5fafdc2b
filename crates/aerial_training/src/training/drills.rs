//! Aerial drill layouts
//!
//! Each drill is a pure function of (car index, variation, rng) that returns
//! the force-set state for the start of an episode. The car always starts on
//! the ground at full boost, at rest, facing +y; only the ball's placement and
//! motion differ between drills. The rng only picks the car's lateral offset.
//!
//! ## Layouts (k = uniform integer in -3..=3, v = variation)
//!
//! | Drill | Car | Ball | Ball velocity |
//! |-------|-----|------|---------------|
//! | mid field | (100k, -500(1+v), 20) | (0, 0, 200) | (0, 600, 1500) |
//! | side field | (100k, -3000, 20) | (-300(1+v), 0, 200) | (100(1+v), 300, 1500) |
//! | straight up | (50k, -300(1+v), 20) | (0, 0, 1500) | 0 |
//! | mid field frozen ball | (500k, -1000(1+v), 20) | (0, 0, 1500) | 0 |

use nalgebra::Vector3;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use crate::error::TrainingError;
use crate::models::{BallStateDesc, CarStateDesc, GameStateDesc, PhysicsDesc, Rotator};

use super::boost::FULL_BOOST;

/// Car spawn height (resting on the ground)
pub const CAR_SPAWN_Z: f32 = 20.0;

/// Builder signature shared by every drill.
pub type DrillBuilder = fn(usize, u8, &mut dyn RngCore) -> GameStateDesc;

// ============================================================================
// DrillKind
// ============================================================================

/// Closed set of drills the controller can reset into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillKind {
    /// Ball launched forward and up from center
    #[default]
    MidField,
    /// Ball launched across the field from one side
    SideField,
    /// Ball dropped straight down from above center
    StraightUp,
    /// Ball hanging still above center, car far back
    MidFieldFrozenBall,
}

/// Indexed by `DrillKind as usize`.
const DRILL_TABLE: [(DrillKind, DrillBuilder); 4] = [
    (DrillKind::MidField, aerial_mid_field),
    (DrillKind::SideField, aerial_side_field),
    (DrillKind::StraightUp, aerial_straight_up),
    (DrillKind::MidFieldFrozenBall, aerial_mid_field_frozen_ball),
];

impl DrillKind {
    pub const ALL: [DrillKind; 4] = [
        DrillKind::MidField,
        DrillKind::SideField,
        DrillKind::StraightUp,
        DrillKind::MidFieldFrozenBall,
    ];

    /// Human-readable name, also accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            DrillKind::MidField => "mid field",
            DrillKind::SideField => "side field",
            DrillKind::StraightUp => "straight up",
            DrillKind::MidFieldFrozenBall => "mid field frozen ball",
        }
    }

    pub fn builder(self) -> DrillBuilder {
        DRILL_TABLE[self as usize].1
    }

    /// Straight up always resets at variation 0.
    pub fn uses_variation(self) -> bool {
        !matches!(self, DrillKind::StraightUp)
    }

    /// Lenient lookup: unknown or empty names select the default drill.
    pub fn from_name_or_default(name: &str) -> Self {
        match name.parse() {
            Ok(kind) => kind,
            Err(_) => {
                if !name.is_empty() {
                    log::debug!("unknown drill {:?}, using {}", name, DrillKind::default());
                }
                DrillKind::default()
            }
        }
    }

    pub fn build(self, car_index: usize, variation: u8, rng: &mut dyn RngCore) -> GameStateDesc {
        let variation = if self.uses_variation() { variation } else { 0 };
        (self.builder())(car_index, variation, rng)
    }
}

impl fmt::Display for DrillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DrillKind {
    type Err = TrainingError;

    /// Accepts the display name ("mid field") or the snake_case id ("mid_field").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', " ");
        DrillKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| TrainingError::UnknownDrill(s.to_string()))
    }
}

// ============================================================================
// Builders
// ============================================================================

fn lateral_jitter(rng: &mut dyn RngCore, step: f32) -> f32 {
    rng.gen_range(-3..=3) as f32 * step
}

fn variation_scale(variation: u8) -> f32 {
    1.0 + variation as f32
}

fn drill_car(location: Vector3<f32>) -> CarStateDesc {
    CarStateDesc {
        boost_amount: Some(FULL_BOOST),
        physics: Some(PhysicsDesc {
            location: Some(location),
            rotation: Some(Rotator::new(0.0, FRAC_PI_2, 0.0)),
            velocity: Some(Vector3::zeros()),
            angular_velocity: Some(Vector3::zeros()),
        }),
    }
}

fn drill_ball(location: Vector3<f32>, velocity: Vector3<f32>) -> BallStateDesc {
    BallStateDesc::new(PhysicsDesc {
        location: Some(location),
        rotation: None,
        velocity: Some(velocity),
        angular_velocity: Some(Vector3::zeros()),
    })
}

pub fn aerial_mid_field(car_index: usize, variation: u8, rng: &mut dyn RngCore) -> GameStateDesc {
    let y_car = variation_scale(variation) * -500.0;
    let x_car = lateral_jitter(rng, 100.0);
    GameStateDesc::new()
        .with_ball(drill_ball(Vector3::new(0.0, 0.0, 200.0), Vector3::new(0.0, 600.0, 1500.0)))
        .with_car(car_index, drill_car(Vector3::new(x_car, y_car, CAR_SPAWN_Z)))
}

pub fn aerial_side_field(car_index: usize, variation: u8, rng: &mut dyn RngCore) -> GameStateDesc {
    let x_ball = variation_scale(variation) * -100.0;
    let x_car = lateral_jitter(rng, 100.0);
    GameStateDesc::new()
        .with_ball(drill_ball(
            Vector3::new(3.0 * x_ball, 0.0, 200.0),
            Vector3::new(-x_ball, 300.0, 1500.0),
        ))
        .with_car(car_index, drill_car(Vector3::new(x_car, -3000.0, CAR_SPAWN_Z)))
}

pub fn aerial_straight_up(car_index: usize, variation: u8, rng: &mut dyn RngCore) -> GameStateDesc {
    let y_car = variation_scale(variation) * -300.0;
    let x_car = lateral_jitter(rng, 50.0);
    GameStateDesc::new()
        .with_ball(drill_ball(Vector3::new(0.0, 0.0, 1500.0), Vector3::zeros()))
        .with_car(car_index, drill_car(Vector3::new(x_car, y_car, CAR_SPAWN_Z)))
}

pub fn aerial_mid_field_frozen_ball(
    car_index: usize,
    variation: u8,
    rng: &mut dyn RngCore,
) -> GameStateDesc {
    let y_car = variation_scale(variation) * -1000.0;
    let x_car = lateral_jitter(rng, 500.0);
    GameStateDesc::new()
        .with_ball(drill_ball(Vector3::new(0.0, 0.0, 1500.0), Vector3::zeros()))
        .with_car(car_index, drill_car(Vector3::new(x_car, y_car, CAR_SPAWN_Z)))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Always yields 0, which maps to the lowest jitter step (-3).
    fn low_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    struct Fixture {
        car: [f32; 3],
        ball: [f32; 3],
        ball_velocity: [f32; 3],
    }

    fn assert_fixture(state: &GameStateDesc, car_index: usize, expected: &Fixture) {
        let car = state.car(car_index).expect("car placed");
        assert_eq!(car.boost_amount, Some(100.0));

        let physics = car.physics.expect("car physics");
        assert_eq!(physics.location, Some(Vector3::from(expected.car)));
        assert_eq!(physics.rotation, Some(Rotator::new(0.0, FRAC_PI_2, 0.0)));
        assert_eq!(physics.velocity, Some(Vector3::zeros()));
        assert_eq!(physics.angular_velocity, Some(Vector3::zeros()));

        let ball = state.ball_physics().expect("ball physics");
        assert_eq!(ball.location, Some(Vector3::from(expected.ball)));
        assert_eq!(ball.velocity, Some(Vector3::from(expected.ball_velocity)));
        assert_eq!(ball.angular_velocity, Some(Vector3::zeros()));
    }

    #[test]
    fn test_mid_field_fixture() {
        let state = aerial_mid_field(0, 0, &mut low_rng());
        assert_fixture(
            &state,
            0,
            &Fixture {
                car: [-300.0, -500.0, 20.0],
                ball: [0.0, 0.0, 200.0],
                ball_velocity: [0.0, 600.0, 1500.0],
            },
        );
    }

    #[test]
    fn test_side_field_fixture() {
        let state = aerial_side_field(1, 0, &mut low_rng());
        assert_fixture(
            &state,
            1,
            &Fixture {
                car: [-300.0, -3000.0, 20.0],
                ball: [-300.0, 0.0, 200.0],
                ball_velocity: [100.0, 300.0, 1500.0],
            },
        );
    }

    #[test]
    fn test_straight_up_fixture() {
        let state = aerial_straight_up(0, 0, &mut low_rng());
        assert_fixture(
            &state,
            0,
            &Fixture {
                car: [-150.0, -300.0, 20.0],
                ball: [0.0, 0.0, 1500.0],
                ball_velocity: [0.0, 0.0, 0.0],
            },
        );
    }

    #[test]
    fn test_frozen_ball_fixture() {
        let state = aerial_mid_field_frozen_ball(0, 0, &mut low_rng());
        assert_fixture(
            &state,
            0,
            &Fixture {
                car: [-1500.0, -1000.0, 20.0],
                ball: [0.0, 0.0, 1500.0],
                ball_velocity: [0.0, 0.0, 0.0],
            },
        );
    }

    #[test]
    fn test_variation_moves_car_back() {
        let state = aerial_mid_field(0, 3, &mut low_rng());
        assert_eq!(state.car_location(0).map(|l| l.y), Some(-2000.0));

        let state = aerial_side_field(0, 2, &mut low_rng());
        let ball = state.ball_physics().expect("ball");
        assert_eq!(ball.location, Some(Vector3::new(-900.0, 0.0, 200.0)));
        assert_eq!(ball.velocity, Some(Vector3::new(300.0, 300.0, 1500.0)));
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        for kind in DrillKind::ALL {
            let a = kind.build(0, 1, &mut ChaCha8Rng::seed_from_u64(42));
            let b = kind.build(0, 1, &mut ChaCha8Rng::seed_from_u64(42));
            assert_eq!(a, b, "{} differs for the same seed", kind);
        }
    }

    #[test]
    fn test_jitter_stays_on_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let x = aerial_mid_field(0, 0, &mut rng).car_location(0).expect("car").x;
            assert!((-300.0..=300.0).contains(&x));
            assert_eq!(x % 100.0, 0.0);

            let x = aerial_straight_up(0, 0, &mut rng).car_location(0).expect("car").x;
            assert!((-150.0..=150.0).contains(&x));
            assert_eq!(x % 50.0, 0.0);

            let x = aerial_mid_field_frozen_ball(0, 0, &mut rng).car_location(0).expect("car").x;
            assert!((-1500.0..=1500.0).contains(&x));
            assert_eq!(x % 500.0, 0.0);
        }
    }

    #[test]
    fn test_drill_table_order() {
        for (i, (kind, _)) in DRILL_TABLE.iter().enumerate() {
            assert_eq!(*kind as usize, i);
        }
    }

    #[test]
    fn test_straight_up_ignores_variation() {
        let state = DrillKind::StraightUp.build(0, 4, &mut low_rng());
        assert_eq!(state.car_location(0).map(|l| l.y), Some(-300.0));

        let state = DrillKind::MidField.build(0, 4, &mut low_rng());
        assert_eq!(state.car_location(0).map(|l| l.y), Some(-2500.0));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("mid field".parse::<DrillKind>().ok(), Some(DrillKind::MidField));
        assert_eq!("side_field".parse::<DrillKind>().ok(), Some(DrillKind::SideField));
        assert_eq!("Straight Up".parse::<DrillKind>().ok(), Some(DrillKind::StraightUp));
        assert_eq!(
            "mid field frozen ball".parse::<DrillKind>().ok(),
            Some(DrillKind::MidFieldFrozenBall)
        );
        assert!(matches!("kickoff".parse::<DrillKind>(), Err(TrainingError::UnknownDrill(_))));
    }

    #[test]
    fn test_unknown_name_falls_back() {
        assert_eq!(DrillKind::from_name_or_default(""), DrillKind::MidField);
        assert_eq!(DrillKind::from_name_or_default("ceiling shot"), DrillKind::MidField);
        assert_eq!(DrillKind::from_name_or_default("side field"), DrillKind::SideField);
    }
}
