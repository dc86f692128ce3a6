//! Reward shaping and termination.
//!
//! Both are evaluated after the checkpoint tracker has run for the tick.

use std::fmt;

use super::config::EnvConfig;
use super::state::{EpisodeState, VehicleState};
use super::track::{Segment, Track};

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoneReason {
    TimeLimit,
    OutOfTrack,
    FinishLine,
    /// Speed went negative
    Reversing,
}

impl fmt::Display for DoneReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DoneReason::TimeLimit => "time limit exceeded",
            DoneReason::OutOfTrack => "car out of track",
            DoneReason::FinishLine => "crossed finish line",
            DoneReason::Reversing => "stopped moving forward",
        };
        f.write_str(text)
    }
}

/// Scores ticks and decides when an episode is over
#[derive(Debug, Clone, PartialEq)]
pub struct RewardPolicy {
    track: Track,
    config: EnvConfig,
}

impl RewardPolicy {
    pub fn new(track: Track, config: EnvConfig) -> Self {
        Self { track, config }
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Progress made along the track since the previous tick.
    ///
    /// Straights pay for distance along the driving direction. Curves pay for
    /// the absolute change of polar angle around the curve center, without
    /// wrapping, so a jump across the +-pi seam pays close to 2pi.
    pub fn progress_reward(&self, vehicle: &VehicleState) -> f64 {
        let previous = vehicle.previous_position;
        let current = vehicle.position;
        match self.track.progress_region(current) {
            Some(Segment::FirstStraight) => {
                (current.y - previous.y) * self.config.straight_reward_scale
            }
            Some(Segment::SecondStraight) => {
                (previous.y - current.y) * self.config.straight_reward_scale
            }
            Some(Segment::FirstCurve) => {
                let curve = &self.track.first_curve;
                (curve.angle_of(current) - curve.angle_of(previous)).abs()
                    * self.config.curve_reward_scale
            }
            Some(Segment::SecondCurve) => {
                let curve = &self.track.second_curve;
                (curve.angle_of(current) - curve.angle_of(previous)).abs()
                    * self.config.curve_reward_scale
            }
            None => 0.0,
        }
    }

    /// Total reward for the tick. Marks checkpoint and finish bonuses as
    /// collected so each is paid at most once per episode.
    pub fn compute_reward(&self, episode: &mut EpisodeState) -> f64 {
        let mut reward = self.config.step_penalty;
        reward += self.progress_reward(&episode.vehicle);

        let checkpoints = &mut episode.checkpoints;
        for (passed, collected) in checkpoints
            .checkpoint_passed
            .iter()
            .zip(checkpoints.reward_collected.iter_mut())
        {
            if *passed && !*collected {
                reward += self.config.checkpoint_reward;
                *collected = true;
            }
        }

        if checkpoints.finish_line_reached && !checkpoints.finish_reward_collected {
            reward += self.config.finish_reward;
            checkpoints.finish_reward_collected = true;
        }

        if self.is_out_of_track(&episode.vehicle) {
            reward += self.config.out_of_track_penalty;
        }
        if Self::is_reversing(&episode.vehicle) {
            reward += self.config.reverse_penalty;
        }
        if self.time_limit_exceeded(episode) {
            reward += self.config.time_limit_penalty;
        }

        reward
    }

    /// Every termination condition that currently holds; empty while the
    /// episode is still running
    pub fn evaluate_done(&self, episode: &EpisodeState) -> Vec<DoneReason> {
        let mut reasons = Vec::new();
        if self.time_limit_exceeded(episode) {
            reasons.push(DoneReason::TimeLimit);
        }
        if self.is_out_of_track(&episode.vehicle) {
            reasons.push(DoneReason::OutOfTrack);
        }
        if episode.checkpoints.finish_line_reached {
            reasons.push(DoneReason::FinishLine);
        }
        if Self::is_reversing(&episode.vehicle) {
            reasons.push(DoneReason::Reversing);
        }
        reasons
    }

    pub fn is_out_of_track(&self, vehicle: &VehicleState) -> bool {
        !self.track.is_on_track(vehicle.position)
    }

    pub fn is_reversing(vehicle: &VehicleState) -> bool {
        vehicle.speed < 0.0
    }

    pub fn time_limit_exceeded(&self, episode: &EpisodeState) -> bool {
        episode.time_elapsed > self.config.time_limit
    }
}
