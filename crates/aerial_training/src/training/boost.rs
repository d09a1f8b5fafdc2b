//! Boost top-up state

use crate::models::{CarStateDesc, GameStateDesc};

/// Maximum boost a car can hold
pub const FULL_BOOST: f32 = 100.0;

/// State that sets only `car_index`'s boost to `amount`.
pub fn boost_top_up(car_index: usize, amount: f32) -> GameStateDesc {
    GameStateDesc::new()
        .with_car(car_index, CarStateDesc { boost_amount: Some(amount), physics: None })
}

pub fn boost_top_up_full(car_index: usize) -> GameStateDesc {
    boost_top_up(car_index, FULL_BOOST)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_up_touches_only_boost() {
        let state = boost_top_up(3, 42.0);
        assert!(state.ball.is_none());
        assert_eq!(state.cars.len(), 1);

        let car = state.car(3).expect("car 3");
        assert_eq!(car.boost_amount, Some(42.0));
        assert!(car.physics.is_none());
    }

    #[test]
    fn test_top_up_full() {
        let state = boost_top_up_full(0);
        assert_eq!(state.car(0).and_then(|c| c.boost_amount), Some(FULL_BOOST));
    }
}
