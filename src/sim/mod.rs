//! Core race car simulation
//!
//! Track geometry, vehicle kinematics, lap tracking and reward shaping, with
//! no I/O or rendering dependencies. [`EpisodeController`] is the entry point
//! for both manual driving and agent training.

pub mod checkpoints;
pub mod config;
pub mod control;
pub mod engine;
pub mod error;
pub mod reward;
pub mod state;
pub mod track;
pub mod vehicle;

// Re-export commonly used types
pub use checkpoints::{CheckpointTracker, GateEvents};
pub use config::EnvConfig;
pub use control::{ControlInput, DISCRETE_ACTIONS, action_from_index};
pub use engine::{EpisodeController, FrameRequest, StepOutcome, VALIDATION_EPISODE};
pub use error::EnvError;
pub use reward::{DoneReason, RewardPolicy};
pub use state::{CheckpointState, EpisodeState, Position, VehicleState};
pub use track::{Segment, Track};
pub use vehicle::{DT, VehicleGains};
