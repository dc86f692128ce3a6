//! Ordered checkpoint gates and the finish line.
//!
//! A gate fires when the car moves from one side of a horizontal line to the
//! other, in the driving direction, with both the previous and current
//! positions inside the lane band. Gates are armed strictly in order.

use super::state::{CheckpointState, Position, VehicleState};
use super::track::{Straight, Track};

/// Which gates fired on a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GateEvents {
    pub checkpoints: [bool; 3],
    pub finish_line: bool,
}

impl GateEvents {
    pub fn any(&self) -> bool {
        self.finish_line || self.checkpoints.iter().any(|&fired| fired)
    }
}

/// Direction a gate must be crossed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Crossing {
    /// From below the line to above it
    Upward,
    /// From above the line to below it
    Downward,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Gate {
    lane: Straight,
    line_y: f64,
    crossing: Crossing,
}

impl Gate {
    fn crossed(&self, previous: Position, current: Position, half_thickness: f64) -> bool {
        if !self.lane.in_lane(previous.x, half_thickness)
            || !self.lane.in_lane(current.x, half_thickness)
        {
            return false;
        }
        match self.crossing {
            Crossing::Upward => previous.y < self.line_y && current.y > self.line_y,
            Crossing::Downward => previous.y > self.line_y && current.y < self.line_y,
        }
    }
}

/// Sequential lap tracker for one track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckpointTracker {
    gates: [Gate; 3],
    finish: Gate,
    half_thickness: f64,
}

impl CheckpointTracker {
    pub fn new(track: &Track) -> Self {
        let first = track.first_straight;
        let second = track.second_straight;
        Self {
            gates: [
                // End of the first straight, into the first curve
                Gate {
                    lane: first,
                    line_y: first.y_max,
                    crossing: Crossing::Upward,
                },
                // Out of the first curve onto the second straight
                Gate {
                    lane: second,
                    line_y: second.y_max,
                    crossing: Crossing::Downward,
                },
                // End of the second straight, into the second curve
                Gate {
                    lane: second,
                    line_y: second.y_min,
                    crossing: Crossing::Downward,
                },
            ],
            finish: Gate {
                lane: first,
                line_y: first.y_min,
                crossing: Crossing::Upward,
            },
            half_thickness: track.half_thickness,
        }
    }

    /// Run one tick of gate checks, in order: checkpoints 1, 2, 3, then the
    /// finish line. A gate is skipped entirely while its predecessor is
    /// unpassed. Flags are only ever set.
    pub fn update(&self, vehicle: &VehicleState, state: &mut CheckpointState) -> GateEvents {
        let previous = vehicle.previous_position;
        let current = vehicle.position;
        let mut events = GateEvents::default();

        for (i, gate) in self.gates.iter().enumerate() {
            if i > 0 && !state.checkpoint_passed[i - 1] {
                continue;
            }
            if gate.crossed(previous, current, self.half_thickness) {
                if !state.checkpoint_passed[i] {
                    events.checkpoints[i] = true;
                }
                state.checkpoint_passed[i] = true;
            }
        }

        if state.checkpoint_passed[2]
            && self.finish.crossed(previous, current, self.half_thickness)
        {
            if !state.finish_line_reached {
                events.finish_line = true;
            }
            state.finish_line_reached = true;
        }

        events
    }
}
