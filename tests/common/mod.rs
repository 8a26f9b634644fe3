#![allow(dead_code)]
use drone_asm::drone::{Drone, Position, SimulatedDrone, State};
use drone_asm::mach::{compile, Event, Runtime, Vehicle};
use drone_asm::vision::{cosine_similarity, Detection, Encoding, Picture, Vision};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn exec(runtime: &mut Runtime) -> String {
    exec_n(runtime, 5000)
}

pub fn exec_n(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(cycles);
        match &event {
            Event::Stopped => break,
            Event::Error(error) => s.push_str(&format!("{}\n", error)),
            Event::Running => {
                if prev_running {
                    s.push_str(&format!("\n{} Execution cycles exceeded.\n", cycles));
                    break;
                }
            }
            Event::Print(ps) => s.push_str(&format!("{}\n", ps)),
            Event::Show(picture) => s.push_str(&format!("{}\n", picture)),
            Event::Moved(_) => {}
        }
        prev_running = matches!(event, Event::Running);
    }
    s
}

/// Compile and run against the simulator.
pub fn run(lines: &[&str]) -> (Runtime, String) {
    let mut r = Runtime::default();
    r.start(compile(lines).unwrap(), Vehicle::Simulated).unwrap();
    let s = exec(&mut r);
    (r, s)
}

pub fn close(p: Position, x: f64, y: f64, z: f64) -> bool {
    (p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9 && (p.z - z).abs() < 1e-9
}

/// Simulated drone that counts shutdowns and can be told to misbehave.
pub struct CountingDrone {
    inner: SimulatedDrone,
    pub shutdowns: Arc<AtomicUsize>,
    pub refuse_connect: bool,
    pub refuse_moves: bool,
    pub no_frames: bool,
}

impl CountingDrone {
    pub fn new() -> (CountingDrone, Arc<AtomicUsize>) {
        let shutdowns = Arc::new(AtomicUsize::new(0));
        let drone = CountingDrone {
            inner: SimulatedDrone::new(),
            shutdowns: shutdowns.clone(),
            refuse_connect: false,
            refuse_moves: false,
            no_frames: false,
        };
        (drone, shutdowns)
    }

    pub fn count(shutdowns: &Arc<AtomicUsize>) -> usize {
        shutdowns.load(Ordering::SeqCst)
    }
}

impl Drone for CountingDrone {
    fn connect(&mut self) -> bool {
        !self.refuse_connect && self.inner.connect()
    }
    fn shutdown(&mut self) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        self.inner.shutdown()
    }
    fn takeoff(&mut self) -> bool {
        !self.refuse_moves && self.inner.takeoff()
    }
    fn land(&mut self) -> bool {
        !self.refuse_moves && self.inner.land()
    }
    fn forward(&mut self, distance: i64) -> bool {
        !self.refuse_moves && self.inner.forward(distance)
    }
    fn backward(&mut self, distance: i64) -> bool {
        !self.refuse_moves && self.inner.backward(distance)
    }
    fn left(&mut self, distance: i64) -> bool {
        !self.refuse_moves && self.inner.left(distance)
    }
    fn right(&mut self, distance: i64) -> bool {
        !self.refuse_moves && self.inner.right(distance)
    }
    fn up(&mut self, distance: i64) -> bool {
        !self.refuse_moves && self.inner.up(distance)
    }
    fn down(&mut self, distance: i64) -> bool {
        !self.refuse_moves && self.inner.down(distance)
    }
    fn rotate_cw(&mut self, degrees: i64) -> bool {
        !self.refuse_moves && self.inner.rotate_cw(degrees)
    }
    fn rotate_ccw(&mut self, degrees: i64) -> bool {
        !self.refuse_moves && self.inner.rotate_ccw(degrees)
    }
    fn get_frame(&mut self) -> Option<Picture> {
        if self.no_frames {
            None
        } else {
            self.inner.get_frame()
        }
    }
    fn get_state(&self) -> State {
        self.inner.get_state()
    }
}

/// Finds `faces` in every picture. The encoding of a face is its rect.
pub struct ScriptedVision {
    pub faces: Vec<Detection>,
}

impl ScriptedVision {
    pub fn one_face(left: f32) -> ScriptedVision {
        let mut raw = vec![0.0f32; 15];
        raw[0] = left;
        raw[1] = 1.0;
        raw[14] = 0.9;
        ScriptedVision {
            faces: vec![Detection::from_raw(&raw).unwrap()],
        }
    }
}

impl Vision for ScriptedVision {
    fn find_faces(&self, _picture: &Picture) -> Vec<Detection> {
        self.faces.clone()
    }
    fn encode_face(&self, _picture: &Picture, detection: &Detection) -> Option<Encoding> {
        Some(Encoding(detection.rect.to_vec()))
    }
    fn face_similarity(&self, a: &Encoding, b: &Encoding) -> f64 {
        cosine_similarity(a, b)
    }
}
