use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reward shaping and vehicle gains.
///
/// Track geometry and the time step are fixed and deliberately not part of
/// this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    // Rewards
    /// Added every tick
    pub step_penalty: f64,
    /// Reward per metre advanced along a straight
    pub straight_reward_scale: f64,
    /// Reward per radian swept along a curve
    pub curve_reward_scale: f64,
    /// Paid once per checkpoint
    pub checkpoint_reward: f64,
    /// Paid once when the finish line is crossed after all checkpoints
    pub finish_reward: f64,
    pub out_of_track_penalty: f64,
    /// Applied while the car rolls backwards
    pub reverse_penalty: f64,
    pub time_limit_penalty: f64,
    /// Simulated seconds before the episode is cut off
    pub time_limit: f64,

    // Vehicle
    pub acceleration_gain: f64,
    /// Maps steering input to virtual front-wheel angle (radians)
    pub steering_gain: f64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            step_penalty: -0.1,
            straight_reward_scale: 1.0,
            curve_reward_scale: 100.0,
            checkpoint_reward: 1000.0,
            finish_reward: 10000.0,
            out_of_track_penalty: -10000.0,
            reverse_penalty: -10000.0,
            time_limit_penalty: -10000.0,
            time_limit: 500.0,
            acceleration_gain: 1.0,
            steering_gain: 0.1,
        }
    }
}

impl EnvConfig {
    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config
            .validate()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }

    /// Check that every parameter is usable
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("step_penalty", self.step_penalty),
            ("straight_reward_scale", self.straight_reward_scale),
            ("curve_reward_scale", self.curve_reward_scale),
            ("checkpoint_reward", self.checkpoint_reward),
            ("finish_reward", self.finish_reward),
            ("out_of_track_penalty", self.out_of_track_penalty),
            ("reverse_penalty", self.reverse_penalty),
            ("time_limit_penalty", self.time_limit_penalty),
            ("acceleration_gain", self.acceleration_gain),
            ("steering_gain", self.steering_gain),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("{} must be finite, got {}", name, value));
            }
        }

        if self.time_limit.is_nan() || self.time_limit <= 0.0 {
            return Err(format!(
                "time_limit must be positive, got {}",
                self.time_limit
            ));
        }

        Ok(())
    }
}
