//! Reinforcement learning interface for the race car environment
//!
//! Provides:
//! - 1-channel grayscale observations from the top-down camera
//! - Burn-compatible RL environment interface
//! - Baseline policies over the discrete action map

pub mod backend;
pub mod environment;
pub mod observation;
pub mod policy;

pub use backend::{ObservationBackend, default_device};
pub use environment::RaceCarEnvironment;
pub use observation::{create_observation, grayscale};
pub use policy::{FixedPolicy, Policy, WeightedRandomPolicy};
