//! Backend type alias and device management
//!
//! Observations are built on the CPU NdArray backend. Agents that train on a
//! different backend can construct [`crate::rl::RaceCarEnvironment`] with
//! their own backend type instead.

use burn::backend::ndarray::{NdArray, NdArrayDevice};

/// Backend used for observation tensors
pub type ObservationBackend = NdArray<f32>;

/// Get the default device for computation
///
/// # Example
///
/// ```rust
/// use race_car_env::rl::default_device;
///
/// let device = default_device();
/// ```
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}
