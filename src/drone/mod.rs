/*!
## Rust Drone Module

The capability interface the virtual machine flies through, with a
simulated drone and a UDP driver for the Tello.

*/

mod mailbox;
mod simulated;
mod tello;

pub use mailbox::Mailbox;
pub use simulated::SimulatedDrone;
pub use tello::{parse_state, TelloConfig, TelloDrone};

use crate::vision::Picture;
use std::collections::BTreeMap;

/// Last telemetry report, key to value.
pub type State = BTreeMap<String, String>;

/// Dead reckoned location in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", tidy(self.x), tidy(self.y), tidy(self.z))
    }
}

/// Round to the printed precision so tiny negatives show as `0.0`.
fn tidy(v: f64) -> f64 {
    (v * 10.0).round() / 10.0 + 0.0
}

/// Movement commands return `false` when the vehicle refused or failed.
pub trait Drone {
    fn connect(&mut self) -> bool;
    fn shutdown(&mut self);
    fn takeoff(&mut self) -> bool;
    fn land(&mut self) -> bool;
    fn forward(&mut self, distance: i64) -> bool;
    fn backward(&mut self, distance: i64) -> bool;
    fn left(&mut self, distance: i64) -> bool;
    fn right(&mut self, distance: i64) -> bool;
    fn up(&mut self, distance: i64) -> bool;
    fn down(&mut self, distance: i64) -> bool;
    fn rotate_cw(&mut self, degrees: i64) -> bool;
    fn rotate_ccw(&mut self, degrees: i64) -> bool;
    /// Latest camera frame, if one has arrived.
    fn get_frame(&mut self) -> Option<Picture>;
    fn get_state(&self) -> State;
}

/// Motion commands shared by the vehicle and the shadow tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    RotateCw,
    RotateCcw,
}

impl Motion {
    pub fn apply(self, drone: &mut dyn Drone, amount: i64) -> bool {
        use Motion::*;
        match self {
            Forward => drone.forward(amount),
            Backward => drone.backward(amount),
            Left => drone.left(amount),
            Right => drone.right(amount),
            Up => drone.up(amount),
            Down => drone.down(amount),
            RotateCw => drone.rotate_cw(amount),
            RotateCcw => drone.rotate_ccw(amount),
        }
    }
}

impl std::fmt::Display for Motion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Motion::*;
        match self {
            Forward => write!(f, "forward"),
            Backward => write!(f, "back"),
            Left => write!(f, "left"),
            Right => write!(f, "right"),
            Up => write!(f, "up"),
            Down => write!(f, "down"),
            RotateCw => write!(f, "cw"),
            RotateCcw => write!(f, "ccw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        let p = Position {
            x: -9.2e-15,
            y: 50.04,
            z: -0.04,
        };
        assert_eq!(p.to_string(), "(0.0, 50.0, 0.0)");
        let p = Position {
            x: -12.25,
            y: 0.0,
            z: 3.0,
        };
        assert_eq!(p.to_string(), "(-12.3, 0.0, 3.0)");
    }
}
