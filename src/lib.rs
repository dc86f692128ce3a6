//! Race Car Env - an oval-track driving environment for reinforcement learning
//!
//! This library provides:
//! - Core simulation: track geometry, vehicle kinematics, checkpoints,
//!   rewards and episode control (sim module)
//! - Camera observations and a terminal dashboard (render module)
//! - Burn tensor environment wrapper and baseline policies (rl module)
//! - Keyboard input for manual driving (input module)
//! - Episode statistics and results files (metrics module)
//! - Execution modes: manual driving and agent sessions (modes module)

pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;
pub mod sim;
