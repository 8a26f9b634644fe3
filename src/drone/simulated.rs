use super::{Drone, Position, State};
use crate::vision::Picture;

const FRAME_SIZE: u32 = 100;

/// ## Dead reckoning flight model
///
/// Heading 0 points along +X. Left is heading + 90 degrees.
#[derive(Debug, Clone, Default)]
pub struct SimulatedDrone {
    location: Position,
    facing: f64,
    connected: bool,
    flying: bool,
}

impl SimulatedDrone {
    pub fn new() -> SimulatedDrone {
        SimulatedDrone::default()
    }

    pub fn position(&self) -> Position {
        self.location
    }

    /// Heading in radians.
    pub fn facing(&self) -> f64 {
        self.facing
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_flying(&self) -> bool {
        self.flying
    }

    fn travel(&mut self, distance: f64, angle: f64) {
        self.location.x += distance * angle.cos();
        self.location.y += distance * angle.sin();
    }
}

impl Drone for SimulatedDrone {
    fn connect(&mut self) -> bool {
        self.connected = true;
        true
    }

    fn shutdown(&mut self) {
        self.connected = false;
        self.flying = false;
    }

    fn takeoff(&mut self) -> bool {
        self.flying = true;
        true
    }

    fn land(&mut self) -> bool {
        self.flying = false;
        true
    }

    fn forward(&mut self, distance: i64) -> bool {
        self.travel(distance as f64, self.facing);
        true
    }

    fn backward(&mut self, distance: i64) -> bool {
        self.travel(-(distance as f64), self.facing);
        true
    }

    fn left(&mut self, distance: i64) -> bool {
        self.travel(distance as f64, self.facing + 90f64.to_radians());
        true
    }

    fn right(&mut self, distance: i64) -> bool {
        self.travel(distance as f64, self.facing - 90f64.to_radians());
        true
    }

    fn up(&mut self, distance: i64) -> bool {
        self.location.z += distance as f64;
        true
    }

    fn down(&mut self, distance: i64) -> bool {
        self.location.z -= distance as f64;
        true
    }

    fn rotate_cw(&mut self, degrees: i64) -> bool {
        self.facing -= (degrees as f64).to_radians();
        true
    }

    fn rotate_ccw(&mut self, degrees: i64) -> bool {
        self.facing += (degrees as f64).to_radians();
        true
    }

    fn get_frame(&mut self) -> Option<Picture> {
        Some(Picture::blank(FRAME_SIZE, FRAME_SIZE))
    }

    fn get_state(&self) -> State {
        let mut state = State::new();
        state.insert("x".into(), format!("{}", self.location.x));
        state.insert("y".into(), format!("{}", self.location.y));
        state.insert("z".into(), format!("{}", self.location.z));
        state.insert("yaw".into(), format!("{}", -self.facing.to_degrees()));
        state
    }
}
