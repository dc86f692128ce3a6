//! Whole-episode scenarios through the public API

use race_car_env::sim::{
    ControlInput, DoneReason, EnvConfig, EnvError, EpisodeController, Position, StepOutcome,
};
use std::f64::consts::PI;

fn controller() -> EpisodeController {
    let mut controller = EpisodeController::new(EnvConfig::default());
    controller.reset();
    controller
}

/// Place the car and roll it forward one tick at 1 m/s
fn roll_through(
    controller: &mut EpisodeController,
    from: (f64, f64),
    heading: f64,
) -> StepOutcome {
    let episode = controller.episode_mut().unwrap();
    episode.vehicle.position = Position::new(from.0, from.1);
    episode.vehicle.heading = heading;
    episode.vehicle.speed = 1.0;
    controller.step(ControlInput::neutral()).unwrap()
}

#[test]
fn test_scripted_lap_through_every_gate() {
    let mut controller = controller();

    // Checkpoint 1: leave the first straight upward
    let outcome = roll_through(&mut controller, (0.0, 49.95), 0.0);
    assert!(!outcome.done);
    assert!(outcome.reward > 999.0 && outcome.reward < 1001.0);

    // Checkpoint 2: enter the second straight heading down
    let outcome = roll_through(&mut controller, (-40.0, 50.05), PI);
    assert!(!outcome.done);
    assert!(outcome.reward > 999.0 && outcome.reward < 1001.0);

    // Checkpoint 3: leave the second straight downward. The polar angle
    // around the second curve jumps across the +-pi seam here, which pays
    // close to 2pi of curve progress on top of the bonus.
    let outcome = roll_through(&mut controller, (-40.0, 0.05), PI);
    assert!(!outcome.done);
    assert!(outcome.reward > 1600.0 && outcome.reward < 1650.0);

    let checkpoints = controller.episode().unwrap().checkpoints;
    assert_eq!(checkpoints.checkpoint_passed, [true, true, true]);
    assert!(!checkpoints.finish_line_reached);

    // Finish line
    let outcome = roll_through(&mut controller, (0.0, -0.05), 0.0);
    assert!(outcome.done);
    assert_eq!(outcome.done_reasons, vec![DoneReason::FinishLine]);
    assert!(outcome.reward > 9999.0 && outcome.reward < 10001.0);
    assert!(outcome.info.contains("crossed finish line"));
}

#[test]
fn test_gates_out_of_order_are_ignored() {
    let mut controller = controller();

    // Finish line and checkpoint 3 before checkpoint 1
    roll_through(&mut controller, (-40.0, 0.05), PI);
    let outcome = roll_through(&mut controller, (0.0, -0.05), 0.0);
    assert!(!outcome.done);

    let checkpoints = controller.episode().unwrap().checkpoints;
    assert_eq!(checkpoints.checkpoint_passed, [false, false, false]);
    assert!(!checkpoints.finish_line_reached);
    assert!(outcome.reward < 1.0);
}

#[test]
fn test_checkpoint_bonus_paid_once() {
    let mut controller = controller();

    let first = roll_through(&mut controller, (0.0, 49.95), 0.0);
    assert!(first.reward > 999.0);

    // Crossing the same gate again pays no bonus
    let again = roll_through(&mut controller, (0.0, 49.95), 0.0);
    assert!(again.reward < 1.0);
    assert_eq!(controller.episode().unwrap().checkpoints.passed_count(), 1);
}

#[test]
fn test_idle_car_hits_time_limit() {
    let mut controller = controller();

    loop {
        let outcome = controller.step(ControlInput::neutral()).unwrap();
        let time = controller.episode().unwrap().time_elapsed;
        if outcome.done {
            assert!(time > 500.0);
            assert_eq!(outcome.done_reasons, vec![DoneReason::TimeLimit]);
            assert!(outcome.reward < -9999.0);
            break;
        }
        assert!(time <= 500.0);
        assert!((outcome.reward - (-0.1)).abs() < 1e-12);
    }

    let steps = controller.episode().unwrap().steps;
    assert!((5000..=5002).contains(&steps));
}

#[test]
fn test_off_track_ends_episode() {
    let mut controller = controller();
    controller.episode_mut().unwrap().vehicle.position = Position::new(100.0, 100.0);

    let outcome = controller.step(ControlInput::neutral()).unwrap();
    assert!(outcome.done);
    assert_eq!(outcome.done_reasons, vec![DoneReason::OutOfTrack]);
    assert!(outcome.reward < -9999.0);
}

#[test]
fn test_reset_clears_episode() {
    let mut controller = controller();
    roll_through(&mut controller, (0.0, 49.95), 0.0);
    for _ in 0..10 {
        controller.step(ControlInput::new(0.3, 1.0, 0.0)).unwrap();
    }

    let frame = controller.reset();
    assert_eq!((frame.x, frame.y), (0.0, 0.0));
    assert_eq!(frame.speed, 0.0);
    assert_eq!(frame.time_elapsed, 0.0);
    assert_eq!(frame.episode_id, 2);

    let episode = controller.episode().unwrap();
    assert_eq!(episode.checkpoints.passed_count(), 0);
    assert_eq!(episode.steps, 0);
}

#[test]
fn test_step_before_reset_is_an_error() {
    let mut controller = EpisodeController::new(EnvConfig::default());
    let result = controller.step(ControlInput::neutral());
    assert_eq!(result.unwrap_err(), EnvError::NotReset);
}

#[test]
fn test_gas_only_run_leaves_track_at_first_curve() {
    let mut controller = controller();

    let outcome = loop {
        let outcome = controller.step(ControlInput::new(0.0, 1.0, 0.0)).unwrap();
        if outcome.done {
            break outcome;
        }
    };

    // Straight ahead past checkpoint 1, then off the outside of the curve
    assert_eq!(outcome.done_reasons, vec![DoneReason::OutOfTrack]);
    let episode = controller.episode().unwrap();
    assert!(episode.checkpoints.checkpoint_passed[0]);
    assert!(episode.vehicle.position.y > 50.0);
}
