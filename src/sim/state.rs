/// A position in world coordinates (metres)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pose and speed of the car
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VehicleState {
    pub position: Position,
    /// Heading in radians; 0 faces +y, positive turns toward -x
    pub heading: f64,
    /// Signed speed, forward positive
    pub speed: f64,
    /// Position at the previous tick
    pub previous_position: Position,
    /// Virtual front-wheel angle applied on the last tick
    pub wheel_angle: f64,
}

impl VehicleState {
    /// Car parked on the start line facing +y
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading_degrees(&self) -> f64 {
        self.heading.to_degrees()
    }
}

/// Number of checkpoints on a lap
pub const NUM_CHECKPOINTS: usize = 3;

/// Lap progress flags.
///
/// Every flag is monotonic within an episode, and `checkpoint_passed[i]`
/// implies `checkpoint_passed[i - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckpointState {
    pub checkpoint_passed: [bool; NUM_CHECKPOINTS],
    pub reward_collected: [bool; NUM_CHECKPOINTS],
    pub finish_line_reached: bool,
    pub finish_reward_collected: bool,
}

impl CheckpointState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passed_count(&self) -> usize {
        self.checkpoint_passed.iter().filter(|&&passed| passed).count()
    }
}

/// Everything that lives for exactly one episode
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EpisodeState {
    pub vehicle: VehicleState,
    pub checkpoints: CheckpointState,
    /// Simulated seconds since reset
    pub time_elapsed: f64,
    pub steps: u32,
}

impl EpisodeState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_episode_is_zeroed() {
        let episode = EpisodeState::new();
        assert_eq!(episode.vehicle.position, Position::new(0.0, 0.0));
        assert_eq!(episode.vehicle.heading, 0.0);
        assert_eq!(episode.vehicle.speed, 0.0);
        assert_eq!(episode.time_elapsed, 0.0);
        assert_eq!(episode.steps, 0);
        assert_eq!(episode.checkpoints, CheckpointState::new());
    }

    #[test]
    fn test_heading_degrees() {
        let vehicle = VehicleState {
            heading: std::f64::consts::FRAC_PI_2,
            ..VehicleState::new()
        };
        assert!((vehicle.heading_degrees() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_passed_count() {
        let mut checkpoints = CheckpointState::new();
        assert_eq!(checkpoints.passed_count(), 0);
        checkpoints.checkpoint_passed[0] = true;
        checkpoints.checkpoint_passed[1] = true;
        assert_eq!(checkpoints.passed_count(), 2);
    }
}
