use burn::tensor::{Tensor, TensorData, backend::Backend};

use crate::render::RgbImage;

/// Luminance weights for RGB to gray
const LUMA: [f32; 3] = [0.2125, 0.7154, 0.0721];

/// Gray level of every pixel in [0, 1], row-major
pub fn grayscale(image: &RgbImage) -> Vec<f32> {
    image
        .pixels
        .chunks_exact(3)
        .map(|rgb| {
            rgb.iter()
                .zip(LUMA)
                .map(|(&c, w)| c as f32 / 255.0 * w)
                .sum::<f32>()
        })
        .collect()
}

/// Create a single-channel observation tensor from a rendered frame
///
/// Gray levels are rescaled to [-1, 1]: white floor is 1, the black car is -1.
///
/// Returns: Tensor<B, 3> with shape [1, height, width]
pub fn create_observation<B: Backend>(image: &RgbImage, device: &B::Device) -> Tensor<B, 3> {
    let data: Vec<f32> = grayscale(image)
        .into_iter()
        .map(|gray| 2.0 * gray - 1.0)
        .collect();

    let tensor_data = TensorData::new(data, [1, image.height, image.width]);

    Tensor::<B, 3>::from_data(tensor_data, device)
}
