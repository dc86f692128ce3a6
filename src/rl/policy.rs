//! Action selection over the discrete action map
//!
//! Learning agents live outside this crate; they plug in through [`Policy`].
//! The policies here are baselines for driving sessions and smoke tests.

use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::rngs::StdRng;

use crate::sim::{DISCRETE_ACTIONS, control::is_gas_action};

/// Picks a discrete action index for an observation
pub trait Policy<O> {
    fn select_action(&mut self, observation: &O) -> usize;
}

/// Random exploration biased toward the gas action (weight 15 against 1 for
/// every other action), so random rollouts actually leave the start line
pub struct WeightedRandomPolicy {
    rng: StdRng,
    distribution: WeightedIndex<f64>,
}

impl WeightedRandomPolicy {
    pub const GAS_WEIGHT: f64 = 14.0;

    pub fn new(seed: u64) -> Result<Self, WeightedError> {
        let weights = (0..DISCRETE_ACTIONS.len()).map(|i| {
            if is_gas_action(i) {
                Self::GAS_WEIGHT + 1.0
            } else {
                1.0
            }
        });
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            distribution: WeightedIndex::new(weights)?,
        })
    }
}

impl<O> Policy<O> for WeightedRandomPolicy {
    fn select_action(&mut self, _observation: &O) -> usize {
        self.distribution.sample(&mut self.rng)
    }
}

/// Always returns the same action
#[derive(Debug, Clone, Copy)]
pub struct FixedPolicy {
    pub action: usize,
}

impl<O> Policy<O> for FixedPolicy {
    fn select_action(&mut self, _observation: &O) -> usize {
        self.action
    }
}
