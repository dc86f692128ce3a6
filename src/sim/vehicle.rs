//! Single-track kinematic model
//!
//! The car is a point with a heading. Steering sets a virtual front-wheel
//! angle, and the turning radius follows the Ackermann relation
//! `r = wheelbase / tan(angle)` with a wheelbase of 2 m.

use super::control::ControlInput;
use super::state::VehicleState;

/// Simulated seconds per tick
pub const DT: f64 = 0.1;

/// Distance between the axles used for the turning radius
pub const WHEELBASE: f64 = 2.0;

/// Gains mapping control input onto the car
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleGains {
    pub acceleration: f64,
    pub steering: f64,
}

impl Default for VehicleGains {
    fn default() -> Self {
        Self {
            acceleration: 1.0,
            steering: 0.1,
        }
    }
}

/// Advance the car by one tick of [`DT`].
///
/// Speed is integrated first and the new speed moves the car along the old
/// heading; the heading is turned afterwards. Speed is never clamped.
pub fn advance(state: &mut VehicleState, control: ControlInput, gains: VehicleGains) {
    state.previous_position = state.position;

    state.wheel_angle = control.steering * gains.steering;
    state.speed += (control.gas - control.brake) * gains.acceleration * DT;

    state.position.x -= state.speed * state.heading.sin() * DT;
    state.position.y += state.speed * state.heading.cos() * DT;

    // An exactly straight wheel has an infinite turning radius
    let angular_velocity = if state.wheel_angle != 0.0 {
        let turning_radius = WHEELBASE / state.wheel_angle.tan();
        state.speed / turning_radius
    } else {
        0.0
    };
    state.heading += angular_velocity * DT;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Position;

    fn moving(speed: f64, heading: f64) -> VehicleState {
        VehicleState {
            speed,
            heading,
            ..VehicleState::new()
        }
    }

    #[test]
    fn test_neutral_control_at_rest() {
        let mut state = VehicleState::new();
        advance(&mut state, ControlInput::neutral(), VehicleGains::default());

        assert_eq!(state.position, Position::new(0.0, 0.0));
        assert_eq!(state.speed, 0.0);
        assert_eq!(state.heading, 0.0);
    }

    #[test]
    fn test_neutral_control_keeps_speed_and_heading() {
        let mut state = moving(3.0, 0.4);
        for _ in 0..20 {
            let before = state;
            advance(&mut state, ControlInput::neutral(), VehicleGains::default());

            assert_eq!(state.speed, before.speed);
            assert_eq!(state.heading, before.heading);
            assert_eq!(state.previous_position, before.position);
            let dx = state.position.x - before.position.x;
            let dy = state.position.y - before.position.y;
            assert!((dx - (-3.0 * 0.4_f64.sin() * DT)).abs() < 1e-12);
            assert!((dy - 3.0 * 0.4_f64.cos() * DT).abs() < 1e-12);
        }
    }

    #[test]
    fn test_gas_accelerates_linearly() {
        let gains = VehicleGains::default();
        let mut state = VehicleState::new();
        for _ in 0..500 {
            advance(&mut state, ControlInput::new(0.0, 1.0, 0.0), gains);
        }

        let expected = 500.0 * DT * gains.acceleration;
        assert!((state.speed - expected).abs() < 1e-9);
        assert_eq!(state.heading, 0.0);
        assert_eq!(state.position.x, 0.0);
    }

    #[test]
    fn test_new_speed_moves_the_car() {
        let mut state = VehicleState::new();
        advance(&mut state, ControlInput::new(0.0, 1.0, 0.0), VehicleGains::default());

        assert!((state.speed - 0.1).abs() < 1e-12);
        assert!((state.position.y - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_brake_goes_negative() {
        let mut state = VehicleState::new();
        advance(&mut state, ControlInput::new(0.0, 0.0, 1.0), VehicleGains::default());

        assert!(state.speed < 0.0);
        assert!(state.position.y < 0.0);
    }

    #[test]
    fn test_positive_steering_turns_left() {
        let gains = VehicleGains::default();
        let mut state = moving(10.0, 0.0);
        advance(&mut state, ControlInput::new(1.0, 0.0, 0.0), gains);

        let expected = 10.0 / (WHEELBASE / 0.1_f64.tan()) * DT;
        assert!((state.heading - expected).abs() < 1e-12);
        assert!(state.heading > 0.0);
        assert_eq!(state.wheel_angle, 0.1);

        // The new heading only affects the next move
        assert_eq!(state.position.x, 0.0);
        advance(&mut state, ControlInput::neutral(), gains);
        assert!(state.position.x < 0.0);
    }

    #[test]
    fn test_tiny_steering_uses_full_formula() {
        let mut state = moving(10.0, 0.0);
        advance(
            &mut state,
            ControlInput::new(1e-300, 0.0, 0.0),
            VehicleGains::default(),
        );
        assert!(state.heading > 0.0);
    }

    #[test]
    fn test_nan_propagates() {
        let mut state = VehicleState::new();
        advance(
            &mut state,
            ControlInput::new(0.0, f64::NAN, 0.0),
            VehicleGains::default(),
        );
        assert!(state.speed.is_nan());
        assert!(state.position.y.is_nan());
    }
}
