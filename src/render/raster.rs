//! Top-down software camera producing image observations
//!
//! The camera hangs above the car looking straight down, with +y up in the
//! image and no rotation: the track moves under a car that turns in place.

use crate::sim::{FrameRequest, Position, Track};

/// Something that turns a car pose into an observation.
///
/// The simulation never reads the observation back; renderers are free to
/// keep their own state between frames.
pub trait Renderer {
    type Observation;

    fn render(&mut self, frame: &FrameRequest) -> Self::Observation;
}

/// Row-major RGB image, row 0 at the top
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl RgbImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 3],
        }
    }

    pub fn pixel(&self, col: usize, row: usize) -> [u8; 3] {
        let idx = (row * self.width + col) * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    fn put(&mut self, col: usize, row: usize, rgb: [u8; 3]) {
        let idx = (row * self.width + col) * 3;
        self.pixels[idx..idx + 3].copy_from_slice(&rgb);
    }
}

const FLOOR: [u8; 3] = [255, 255, 255];
const TRACK: [u8; 3] = [128, 128, 128];
const CAR: [u8; 3] = [0, 0, 0];

/// Rasterizes the track and car around the current pose
#[derive(Debug, Clone)]
pub struct RasterRenderer {
    track: Track,
    width: usize,
    height: usize,
    /// Half of the visible world height, in metres
    half_extent: f64,
    car_length: f64,
    car_width: f64,
}

impl RasterRenderer {
    /// Observation side length in pixels
    pub const SIZE: usize = 96;

    const CAMERA_HEIGHT: f64 = 50.0;
    const CAMERA_VERTICAL_FOV_DEG: f64 = 45.0;

    pub fn new(track: Track) -> Self {
        Self::with_size(track, Self::SIZE, Self::SIZE)
    }

    pub fn with_size(track: Track, width: usize, height: usize) -> Self {
        let half_extent =
            Self::CAMERA_HEIGHT * (Self::CAMERA_VERTICAL_FOV_DEG.to_radians() / 2.0).tan();
        Self {
            track,
            width,
            height,
            half_extent,
            car_length: 2.0,
            car_width: 1.0,
        }
    }

    pub fn half_extent(&self) -> f64 {
        self.half_extent
    }

    /// World position under the center of a pixel
    fn world_at(&self, frame: &FrameRequest, col: usize, row: usize) -> Position {
        let aspect = self.width as f64 / self.height as f64;
        let u = (col as f64 + 0.5) / self.width as f64 * 2.0 - 1.0;
        let v = 1.0 - (row as f64 + 0.5) / self.height as f64 * 2.0;
        Position::new(
            frame.x + u * self.half_extent * aspect,
            frame.y + v * self.half_extent,
        )
    }

    fn is_car(&self, frame: &FrameRequest, pos: Position) -> bool {
        let heading = frame.heading_degrees.to_radians();
        let (sin, cos) = heading.sin_cos();
        let dx = pos.x - frame.x;
        let dy = pos.y - frame.y;
        let forward = -dx * sin + dy * cos;
        let side = dx * cos + dy * sin;
        forward.abs() <= self.car_length / 2.0 && side.abs() <= self.car_width / 2.0
    }
}

impl Renderer for RasterRenderer {
    type Observation = RgbImage;

    fn render(&mut self, frame: &FrameRequest) -> RgbImage {
        let mut image = RgbImage::new(self.width, self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                let pos = self.world_at(frame, col, row);
                let rgb = if self.is_car(frame, pos) {
                    CAR
                } else if self.track.is_on_track(pos) {
                    TRACK
                } else {
                    FLOOR
                };
                image.put(col, row, rgb);
            }
        }
        image
    }
}
