//! Oval track geometry
//!
//! The track is a closed loop of four pieces: a straight along x = 0 driven
//! towards +y, a semicircle above y = 50, a straight along x = -40 driven
//! towards -y, and a semicircle below y = 0. All queries are pure functions of
//! a position.

use std::f64::consts::PI;

use super::state::Position;

/// One of the four regions of the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Straight along x = 0, driven in the +y direction
    FirstStraight,
    /// Semicircle centered on (-20, 50), spanning y > 50
    FirstCurve,
    /// Straight along x = -40, driven in the -y direction
    SecondStraight,
    /// Semicircle centered on (-20, 0), spanning y < 0
    SecondCurve,
}

/// A straight lane band around a vertical centerline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Straight {
    pub center_x: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Straight {
    /// True if `x` lies strictly inside the lane band
    pub fn in_lane(&self, x: f64, half_thickness: f64) -> bool {
        self.center_x - half_thickness < x && x < self.center_x + half_thickness
    }

    pub fn contains(&self, pos: Position, half_thickness: f64) -> bool {
        self.in_lane(pos.x, half_thickness) && self.y_min <= pos.y && pos.y <= self.y_max
    }
}

/// Which side of the curve center's horizontal line the arc occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfPlane {
    Above,
    Below,
}

/// A semicircular lane band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    pub center: Position,
    pub radius: f64,
    pub side: HalfPlane,
}

impl Curve {
    /// True if `pos` is strictly on the arc's side of the center line
    pub fn in_half_plane(&self, pos: Position) -> bool {
        match self.side {
            HalfPlane::Above => pos.y > self.center.y,
            HalfPlane::Below => pos.y < self.center.y,
        }
    }

    pub fn contains(&self, pos: Position, half_thickness: f64) -> bool {
        if !self.in_half_plane(pos) {
            return false;
        }
        let dx = pos.x - self.center.x;
        let dy = pos.y - self.center.y;
        let distance = (dx * dx + dy * dy).sqrt();
        self.radius - half_thickness < distance && distance < self.radius + half_thickness
    }

    /// Polar angle of `pos` around the curve center, in (-pi, pi]
    pub fn angle_of(&self, pos: Position) -> f64 {
        (pos.y - self.center.y).atan2(pos.x - self.center.x)
    }

    /// Points along the arc at the given radius, from angle 0 to pi (or pi to 2pi)
    pub fn arc_points(&self, radius: f64, samples: usize) -> Vec<(f64, f64)> {
        let offset = match self.side {
            HalfPlane::Above => 0.0,
            HalfPlane::Below => PI,
        };
        (0..=samples)
            .map(|i| {
                let angle = offset + PI * i as f64 / samples as f64;
                (
                    self.center.x + radius * angle.cos(),
                    self.center.y + radius * angle.sin(),
                )
            })
            .collect()
    }
}

/// The closed oval track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub first_straight: Straight,
    pub first_curve: Curve,
    pub second_straight: Straight,
    pub second_curve: Curve,
    /// Half of the lane width, shared by every segment
    pub half_thickness: f64,
}

impl Track {
    /// Half of the 10 m track thickness
    pub const HALF_THICKNESS: f64 = 5.0;

    /// The fixed oval used by the environment
    pub fn oval() -> Self {
        Self {
            first_straight: Straight {
                center_x: 0.0,
                y_min: 0.0,
                y_max: 50.0,
            },
            first_curve: Curve {
                center: Position::new(-20.0, 50.0),
                radius: 20.0,
                side: HalfPlane::Above,
            },
            second_straight: Straight {
                center_x: -40.0,
                y_min: 0.0,
                y_max: 50.0,
            },
            second_curve: Curve {
                center: Position::new(-20.0, 0.0),
                radius: 20.0,
                side: HalfPlane::Below,
            },
            half_thickness: Self::HALF_THICKNESS,
        }
    }

    /// Classify a position, checking the first straight, both curves, then
    /// the second straight. `None` means the car is off the track.
    pub fn segment_of(&self, pos: Position) -> Option<Segment> {
        let hf = self.half_thickness;
        if self.first_straight.contains(pos, hf) {
            Some(Segment::FirstStraight)
        } else if self.first_curve.contains(pos, hf) {
            Some(Segment::FirstCurve)
        } else if self.second_curve.contains(pos, hf) {
            Some(Segment::SecondCurve)
        } else if self.second_straight.contains(pos, hf) {
            Some(Segment::SecondStraight)
        } else {
            None
        }
    }

    pub fn is_on_track(&self, pos: Position) -> bool {
        self.segment_of(pos).is_some()
    }

    /// Region used to score progress.
    ///
    /// Unlike [`Track::segment_of`], the curve regions are whole half-planes
    /// (any `y > 50` or `y < 0`) with no annulus check, and the second
    /// straight is tested before the curves.
    pub fn progress_region(&self, pos: Position) -> Option<Segment> {
        let hf = self.half_thickness;
        if self.first_straight.contains(pos, hf) {
            Some(Segment::FirstStraight)
        } else if self.second_straight.contains(pos, hf) {
            Some(Segment::SecondStraight)
        } else if self.first_curve.in_half_plane(pos) {
            Some(Segment::FirstCurve)
        } else if self.second_curve.in_half_plane(pos) {
            Some(Segment::SecondCurve)
        } else {
            None
        }
    }
}

impl Default for Track {
    fn default() -> Self {
        Self::oval()
    }
}
