use super::observation::create_observation;
use crate::render::{RasterRenderer, Renderer};
use crate::sim::{
    ControlInput, DoneReason, EnvConfig, EnvError, EpisodeController, action_from_index,
};
use burn::tensor::{Tensor, backend::Backend};

/// Race car environment for reinforcement learning
///
/// Wraps the episode controller and the raster camera and provides a
/// Burn-compatible RL interface with:
/// - Tensor observations (1-channel 96x96 top-down image in [-1, 1])
/// - Discrete action space (5 actions, see [`crate::sim::DISCRETE_ACTIONS`])
///   or raw continuous controls
/// - Standard RL interface (reset, step)
pub struct RaceCarEnvironment<B: Backend> {
    controller: EpisodeController,
    renderer: RasterRenderer,
    device: B::Device,
    last_done_reasons: Vec<DoneReason>,
}

impl<B: Backend> RaceCarEnvironment<B> {
    /// Create a new environment. Call [`RaceCarEnvironment::reset`] before
    /// the first step.
    pub fn new(config: EnvConfig, device: B::Device) -> Self {
        let controller = EpisodeController::new(config);
        let renderer = RasterRenderer::new(*controller.track());
        Self {
            controller,
            renderer,
            device,
            last_done_reasons: Vec::new(),
        }
    }

    /// Reset the environment and return the initial observation
    ///
    /// Returns: Tensor<B, 3> with shape [1, 96, 96]
    pub fn reset(&mut self) -> Tensor<B, 3> {
        let frame = self.controller.reset();
        self.last_done_reasons.clear();
        let image = self.renderer.render(&frame);
        create_observation(&image, &self.device)
    }

    /// Step the environment with a discrete action index
    ///
    /// Returns: (observation, reward, done)
    pub fn step(&mut self, action_idx: usize) -> Result<(Tensor<B, 3>, f32, bool), EnvError> {
        self.step_control(action_from_index(action_idx))
    }

    /// Step the environment with raw steering, gas and brake values
    pub fn step_control(
        &mut self,
        control: ControlInput,
    ) -> Result<(Tensor<B, 3>, f32, bool), EnvError> {
        let outcome = self.controller.step(control)?;
        let image = self.renderer.render(&outcome.frame);
        let observation = create_observation(&image, &self.device);
        self.last_done_reasons = outcome.done_reasons;

        Ok((observation, outcome.reward as f32, outcome.done))
    }

    /// Termination reasons reported by the most recent step
    pub fn last_done_reasons(&self) -> &[DoneReason] {
        &self.last_done_reasons
    }

    pub fn set_validation_mode(&mut self, validation: bool) {
        self.controller.set_validation_mode(validation);
    }

    /// Get the device used by this environment
    pub fn device(&self) -> &B::Device {
        &self.device
    }

    /// Get the underlying controller (for testing/debugging)
    pub fn controller(&self) -> &EpisodeController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut EpisodeController {
        &mut self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Position, VALIDATION_EPISODE};
    use burn::backend::NdArray;
    use burn::backend::ndarray::NdArrayDevice;

    type TestBackend = NdArray<f32>;

    fn env() -> RaceCarEnvironment<TestBackend> {
        RaceCarEnvironment::new(EnvConfig::default(), NdArrayDevice::default())
    }

    #[test]
    fn test_step_before_reset() {
        let mut env = env();
        assert!(matches!(env.step(1), Err(EnvError::NotReset)));
    }

    #[test]
    fn test_reset_returns_valid_observation() {
        let mut env = env();
        let obs = env.reset();
        assert_eq!(obs.shape().dims, [1, 96, 96]);
        assert_eq!(env.controller().episode_counter(), 1);
    }

    #[test]
    fn test_gas_action() {
        let mut env = env();
        env.reset();

        let (obs, reward, done) = env.step(1).unwrap();
        assert_eq!(obs.shape().dims, [1, 96, 96]);
        assert!(!done);
        // Step penalty plus 0.01 m of progress
        assert!((reward - (-0.09)).abs() < 1e-5);
    }

    #[test]
    fn test_brake_from_rest_terminates() {
        let mut env = env();
        env.reset();
        let (_obs, reward, done) = env.step(2).unwrap();
        assert!(done);
        assert!(reward < -9999.0);
        assert_eq!(env.last_done_reasons(), &[DoneReason::Reversing]);

        env.reset();
        assert!(env.last_done_reasons().is_empty());
    }

    #[test]
    fn test_off_track_terminates() {
        let mut env = env();
        env.reset();
        env.controller_mut().episode_mut().unwrap().vehicle.position = Position::new(100.0, 100.0);

        let (_obs, _reward, done) = env.step(3).unwrap();
        assert!(done);
    }

    #[test]
    fn test_observation_changes_after_moving() {
        let mut env = env();
        let first = env.reset();
        env.controller_mut().episode_mut().unwrap().vehicle.speed = 20.0;
        let (second, _, _) = env.step(3).unwrap();

        let data1 = first.to_data();
        let data2 = second.to_data();
        assert_ne!(
            data1.as_slice::<f32>().unwrap(),
            data2.as_slice::<f32>().unwrap()
        );
    }

    #[test]
    fn test_continuous_control() {
        let mut env = env();
        env.reset();
        env.step_control(ControlInput::new(1.0, 1.0, 0.0)).unwrap();
        let vehicle = env.controller().episode().unwrap().vehicle;
        assert!(vehicle.heading > 0.0);
    }

    #[test]
    fn test_validation_mode() {
        let mut env = env();
        env.set_validation_mode(true);
        env.reset();
        assert_eq!(env.controller().episode_counter(), VALIDATION_EPISODE);
    }

    #[test]
    fn test_device_access() {
        let env = env();
        let _env_device = env.device();
    }
}
