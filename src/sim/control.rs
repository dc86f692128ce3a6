/// Per-tick driver command.
///
/// Values are not validated: anything outside the nominal ranges
/// (`steering` in [-1, 1], `gas` and `brake` in [0, 1]) is fed straight into
/// the kinematics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlInput {
    /// Positive steers left (toward -x when facing +y)
    pub steering: f64,
    pub gas: f64,
    pub brake: f64,
}

impl ControlInput {
    pub fn new(steering: f64, gas: f64, brake: f64) -> Self {
        Self {
            steering,
            gas,
            brake,
        }
    }

    /// No steering, no pedals
    pub fn neutral() -> Self {
        Self::default()
    }
}

impl From<[f64; 3]> for ControlInput {
    /// `[steering, gas, brake]`
    fn from(action: [f64; 3]) -> Self {
        Self::new(action[0], action[1], action[2])
    }
}

impl From<[f32; 3]> for ControlInput {
    fn from(action: [f32; 3]) -> Self {
        Self::new(action[0] as f64, action[1] as f64, action[2] as f64)
    }
}

/// Discrete actions used by the image-based agent: hard left, full gas,
/// half brake, coast, hard right.
pub const DISCRETE_ACTIONS: [[f64; 3]; 5] = [
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 0.5],
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
];

/// Map a discrete action index to a control input; unknown indices coast
pub fn action_from_index(idx: usize) -> ControlInput {
    DISCRETE_ACTIONS
        .get(idx)
        .copied()
        .map(ControlInput::from)
        .unwrap_or_default()
}

/// True for actions that press the gas without braking
pub fn is_gas_action(idx: usize) -> bool {
    DISCRETE_ACTIONS
        .get(idx)
        .is_some_and(|a| a[1] == 1.0 && a[2] == 0.0)
}
