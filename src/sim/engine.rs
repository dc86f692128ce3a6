use tracing::{debug, info, warn};

use super::{
    checkpoints::CheckpointTracker,
    config::EnvConfig,
    control::ControlInput,
    error::EnvError,
    reward::{DoneReason, RewardPolicy},
    state::EpisodeState,
    track::Track,
    vehicle::{self, DT, VehicleGains},
};

/// Episode id reported while validation mode is on
pub const VALIDATION_EPISODE: i64 = -1;

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRequest {
    pub x: f64,
    pub y: f64,
    pub heading_degrees: f64,
    pub episode_id: i64,
    pub speed: f64,
    pub time_elapsed: f64,
}

impl FrameRequest {
    fn from_episode(episode: &EpisodeState, episode_id: i64) -> Self {
        let vehicle = &episode.vehicle;
        Self {
            x: vehicle.position.x,
            y: vehicle.position.y,
            heading_degrees: vehicle.heading_degrees(),
            episode_id,
            speed: vehicle.speed,
            time_elapsed: episode.time_elapsed,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.episode_id == VALIDATION_EPISODE
    }
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Pose to hand to the renderer
    pub frame: FrameRequest,
    pub reward: f64,
    /// The episode is over and must be reset to continue
    pub done: bool,
    /// Human-readable diagnostic
    pub info: String,
    /// Termination conditions that hold after this tick
    pub done_reasons: Vec<DoneReason>,
}

/// Owns one episode at a time and advances it tick by tick
#[derive(Debug, Clone)]
pub struct EpisodeController {
    track: Track,
    tracker: CheckpointTracker,
    policy: RewardPolicy,
    gains: VehicleGains,
    episode: Option<EpisodeState>,
    episode_counter: i64,
    validation: bool,
}

impl EpisodeController {
    /// Create a controller on the standard oval. No episode exists until
    /// [`EpisodeController::reset`] is called.
    pub fn new(config: EnvConfig) -> Self {
        let track = Track::oval();
        let gains = VehicleGains {
            acceleration: config.acceleration_gain,
            steering: config.steering_gain,
        };
        Self {
            tracker: CheckpointTracker::new(&track),
            policy: RewardPolicy::new(track, config),
            track,
            gains,
            episode: None,
            episode_counter: 0,
            validation: false,
        }
    }

    /// Start a fresh episode with the car parked on the start line
    pub fn reset(&mut self) -> FrameRequest {
        self.episode_counter += 1;
        if self.validation {
            self.episode_counter = VALIDATION_EPISODE;
        }

        let episode = EpisodeState::new();
        let frame = FrameRequest::from_episode(&episode, self.episode_counter);
        self.episode = Some(episode);
        debug!(episode = self.episode_counter, "episode reset");
        frame
    }

    /// Advance the current episode by one tick.
    ///
    /// Stepping a finished episode is allowed and keeps simulating; deciding
    /// when to reset is up to the caller.
    pub fn step(&mut self, control: ControlInput) -> Result<StepOutcome, EnvError> {
        let Some(episode) = self.episode.as_mut() else {
            warn!("step called before reset");
            return Err(EnvError::NotReset);
        };

        episode.time_elapsed += DT;
        episode.steps += 1;

        vehicle::advance(&mut episode.vehicle, control, self.gains);

        let gates = self.tracker.update(&episode.vehicle, &mut episode.checkpoints);
        for (i, fired) in gates.checkpoints.iter().enumerate() {
            if *fired {
                debug!(
                    episode = self.episode_counter,
                    checkpoint = i + 1,
                    "checkpoint reached"
                );
            }
        }
        if gates.finish_line {
            debug!(episode = self.episode_counter, "finish line reached");
        }

        let reward = self.policy.compute_reward(episode);
        let done_reasons = self.policy.evaluate_done(episode);
        let done = !done_reasons.is_empty();

        let info = if done {
            let reasons: Vec<String> = done_reasons.iter().map(|r| r.to_string()).collect();
            info!(
                episode = self.episode_counter,
                steps = episode.steps,
                time = episode.time_elapsed,
                "episode done: {}",
                reasons.join(", ")
            );
            format!("episode done: {}", reasons.join(", "))
        } else {
            String::from("running")
        };

        Ok(StepOutcome {
            frame: FrameRequest::from_episode(episode, self.episode_counter),
            reward,
            done,
            info,
            done_reasons,
        })
    }

    /// In validation mode every reset reports [`VALIDATION_EPISODE`] instead
    /// of advancing the episode counter
    pub fn set_validation_mode(&mut self, validation: bool) {
        self.validation = validation;
    }

    pub fn is_validation_mode(&self) -> bool {
        self.validation
    }

    pub fn episode_counter(&self) -> i64 {
        self.episode_counter
    }

    /// Current episode, if one has been started
    pub fn episode(&self) -> Option<&EpisodeState> {
        self.episode.as_ref()
    }

    /// Mutable access to the current episode, for scripted scenarios
    pub fn episode_mut(&mut self) -> Option<&mut EpisodeState> {
        self.episode.as_mut()
    }

    /// Pose of the current episode without stepping
    pub fn frame(&self) -> Option<FrameRequest> {
        self.episode
            .as_ref()
            .map(|episode| FrameRequest::from_episode(episode, self.episode_counter))
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn config(&self) -> &EnvConfig {
        self.policy.config()
    }
}

impl Default for EpisodeController {
    fn default() -> Self {
        Self::new(EnvConfig::default())
    }
}
