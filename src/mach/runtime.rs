use super::{
    Address, Displayable, Opcode, Operand, Operation, Program, Stack, Val, FACE_REGISTERS,
    NUM_REGISTERS, PIC_REGISTERS,
};
use crate::drone::{Drone, Position, SimulatedDrone, State, TelloConfig, TelloDrone};
use crate::error;
use crate::lang::Error;
use crate::vision::{Blind, Face, Picture, Vision};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

type Result<T> = std::result::Result<T, Error>;

const FRAME_POLL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone)]
pub struct Config {
    /// How long TAKE_PIC waits for the vehicle to deliver a frame.
    pub frame_timeout: Duration,
    pub tello: TelloConfig,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            frame_timeout: Duration::from_secs(10),
            tello: TelloConfig::default(),
        }
    }
}

/// Which vehicle `start` connects to.
pub enum Vehicle {
    Simulated,
    Live,
    Custom(Box<dyn Drone>),
}

/// ## Events for the user interface
///
/// `step` and `execute` return one of these. `Running` means nothing
/// needs attention and the caller should keep stepping.
#[derive(Debug)]
pub enum Event {
    Running,
    Stopped,
    Print(String),
    Show(Picture),
    Moved(Position),
    Error(Error),
}

/// ## Register machine
///
/// State lives for one run: `start` resets everything before connecting,
/// and after the run ends the registers and path stay readable.
pub struct Runtime {
    config: Config,
    program: Program,
    pc: Address,
    running: bool,
    failed: bool,
    interrupted: Arc<AtomicBool>,
    num_registers: Vec<Val>,
    pic_registers: Vec<Option<Picture>>,
    face_registers: Vec<Face>,
    num_stack: Stack<Val>,
    pic_stack: Stack<Option<Picture>>,
    return_stack: Stack<Address>,
    return_register: Address,
    drone: Box<dyn Drone>,
    tracker: SimulatedDrone,
    path: Vec<Position>,
    vision: Box<dyn Vision>,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new(Config::default())
    }
}

impl Runtime {
    pub fn new(config: Config) -> Runtime {
        let tracker = SimulatedDrone::new();
        Runtime {
            config,
            program: Program::new(),
            pc: 0,
            running: false,
            failed: false,
            interrupted: Arc::new(AtomicBool::new(false)),
            num_registers: vec![Val::default(); NUM_REGISTERS],
            pic_registers: vec![None; PIC_REGISTERS],
            face_registers: vec![Face::default(); FACE_REGISTERS],
            num_stack: Stack::new("NUMBER"),
            pic_stack: Stack::new("PICTURE"),
            return_stack: Stack::new("RETURN"),
            return_register: 0,
            drone: Box::new(SimulatedDrone::new()),
            path: vec![tracker.position()],
            tracker,
            vision: Box::new(Blind),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Install the face recognition backend.
    pub fn set_vision(&mut self, vision: Box<dyn Vision>) {
        self.vision = vision;
    }

    /// Shut down any live run and return to the initial state.
    pub fn reset(&mut self) {
        self.stop();
        self.program.clear();
        self.pc = 0;
        self.failed = false;
        self.interrupted.store(false, Ordering::SeqCst);
        self.num_registers = vec![Val::default(); NUM_REGISTERS];
        self.pic_registers = vec![None; PIC_REGISTERS];
        self.face_registers = vec![Face::default(); FACE_REGISTERS];
        self.num_stack.clear();
        self.pic_stack.clear();
        self.return_stack.clear();
        self.return_register = 0;
        self.drone = Box::new(SimulatedDrone::new());
        self.tracker = SimulatedDrone::new();
        self.path = vec![self.tracker.position()];
    }

    pub fn start(&mut self, program: Program, vehicle: Vehicle) -> Result<()> {
        self.reset();
        self.program = program;
        self.drone = match vehicle {
            Vehicle::Simulated => Box::new(SimulatedDrone::new()),
            Vehicle::Live => Box::new(TelloDrone::new(self.config.tello.clone())),
            Vehicle::Custom(drone) => drone,
        };
        if !self.drone.connect() {
            warn!("unable to connect to drone");
            self.drone.shutdown();
            return Err(error!(HardwareError; "UNABLE TO CONNECT TO DRONE"));
        }
        debug!("run started with {} lines", self.program.line_count());
        self.running = true;
        Ok(())
    }

    /// Request cooperative cancellation. Observed before the next instruction.
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    /// Shared cancellation flag, for signal handlers.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        self.interrupted.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True when the last run ended with a runtime error.
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn pc(&self) -> Address {
        self.pc
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn num_register(&self, index: usize) -> Option<Val> {
        self.num_registers.get(index).copied()
    }

    pub fn pic_register(&self, index: usize) -> Option<&Picture> {
        self.pic_registers.get(index).and_then(Option::as_ref)
    }

    pub fn face_register(&self, index: usize) -> Option<&Face> {
        self.face_registers.get(index)
    }

    pub fn return_register(&self) -> Address {
        self.return_register
    }

    pub fn telemetry(&self) -> State {
        self.drone.get_state()
    }

    /// Step until something other than `Running` happens or `cycles`
    /// instructions have executed.
    pub fn execute(&mut self, cycles: usize) -> Event {
        for _ in 0..cycles {
            match self.step() {
                Event::Running => continue,
                event => return event,
            }
        }
        Event::Running
    }

    /// Run a whole program and return the flight path.
    pub fn run_program(&mut self, program: Program, vehicle: Vehicle) -> Result<&[Position]> {
        self.start(program, vehicle)?;
        loop {
            match self.step() {
                Event::Running | Event::Moved(_) => {}
                Event::Print(s) => tracing::info!("{}", s),
                Event::Show(picture) => tracing::info!("{}", picture),
                Event::Stopped => break,
                Event::Error(error) => return Err(error),
            }
        }
        Ok(&self.path)
    }

    /// Execute at most one instruction.
    pub fn step(&mut self) -> Event {
        if !self.running {
            return Event::Stopped;
        }
        if self.interrupted.swap(false, Ordering::SeqCst) {
            debug!("run interrupted at line {}", self.pc + 1);
            self.stop();
            return Event::Stopped;
        }
        if self.pc >= self.program.line_count() {
            debug!("run complete");
            self.stop();
            return Event::Stopped;
        }
        match self.execute_line() {
            Ok(event) => event,
            Err(error) => {
                let error = error.in_line_number(Some(self.pc + 1));
                warn!("{}", error);
                self.failed = true;
                self.stop();
                Event::Error(error)
            }
        }
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.drone.shutdown();
        }
    }

    fn execute_line(&mut self) -> Result<Event> {
        let opcode = match self.program.get_line(self.pc) {
            Some(tokens) => Opcode::decode(tokens)?,
            None => return Err(error!(SoftwareError; "PROGRAM COUNTER OUT OF RANGE")),
        };
        trace!("{:>4} {:?}", self.pc + 1, opcode);
        let mut next = self.pc + 1;
        let event = match opcode {
            Opcode::Nop => Event::Running,
            Opcode::Halt => {
                debug!("halted at line {}", self.pc + 1);
                self.stop();
                Event::Stopped
            }
            Opcode::Jump(label) => {
                next = self.program.label_lookup(&label)?;
                Event::Running
            }
            Opcode::JumpReturn => {
                next = self.return_register;
                Event::Running
            }
            Opcode::PushReturn(label) => {
                let addr = self.program.label_lookup(&label)?;
                self.return_stack.push(addr)?;
                Event::Running
            }
            Opcode::PopReturn => {
                self.return_register = self.return_stack.pop()?;
                Event::Running
            }
            Opcode::Branch(relation, lhs, rhs, label) => {
                let ordering = Operation::compare(self.value(lhs), self.value(rhs));
                if relation.holds(ordering) {
                    next = self.program.label_lookup(&label)?;
                }
                Event::Running
            }
            Opcode::Store(operand, reg) => {
                self.num_registers[reg] = self.value(operand);
                Event::Running
            }
            Opcode::Copy(from, to) => {
                self.num_registers[to] = self.num_registers[from];
                Event::Running
            }
            Opcode::CopyPic(from, to) => {
                self.pic_registers[to] = self.pic_registers[from].clone();
                Event::Running
            }
            Opcode::PushNum(operand) => {
                let val = self.value(operand);
                self.num_stack.push(val)?;
                Event::Running
            }
            Opcode::PushPic(reg) => {
                let picture = self.pic_registers[reg].clone();
                self.pic_stack.push(picture)?;
                Event::Running
            }
            Opcode::PopNum(reg) => {
                self.num_registers[reg] = self.num_stack.pop()?;
                Event::Running
            }
            Opcode::PopPic(reg) => {
                self.pic_registers[reg] = self.pic_stack.pop()?;
                Event::Running
            }
            Opcode::Arithmetic(arith, lhs, rhs, reg) => {
                self.num_registers[reg] = arith.apply(self.value(lhs), self.value(rhs))?;
                Event::Running
            }
            Opcode::Takeoff => {
                if !self.drone.takeoff() {
                    return Err(maneuver_failed());
                }
                self.tracker.takeoff();
                Event::Running
            }
            Opcode::Land => {
                if !self.drone.land() {
                    return Err(maneuver_failed());
                }
                self.tracker.land();
                Event::Running
            }
            Opcode::Move(motion, operand) => {
                let amount = self.value(operand).truncate();
                if !motion.apply(self.drone.as_mut(), amount) {
                    return Err(maneuver_failed());
                }
                motion.apply(&mut self.tracker, amount);
                let position = self.tracker.position();
                self.path.push(position);
                Event::Moved(position)
            }
            Opcode::Display(Displayable::Text(s)) => Event::Print(s),
            Opcode::Display(Displayable::Number(operand)) => {
                Event::Print(self.value(operand).to_string())
            }
            Opcode::Display(Displayable::Picture(reg)) => Event::Show(self.picture(reg)?),
            Opcode::TakePic(reg) => {
                self.pic_registers[reg] = Some(self.wait_for_frame()?);
                Event::Running
            }
            Opcode::LoadPic(file, reg) => {
                self.pic_registers[reg] = Some(load_picture(&file)?);
                Event::Running
            }
            Opcode::DetectFace(pic, face, reg) => {
                let picture = self.picture(pic)?;
                match self.vision.find_faces(&picture).into_iter().next() {
                    Some(detection) => {
                        let encoding = self.vision.encode_face(&picture, &detection);
                        self.face_registers[face] = Face {
                            detection: Some(detection),
                            encoding,
                        };
                        self.num_registers[reg] = Val::Integer(1);
                    }
                    None => self.num_registers[reg] = Val::Integer(0),
                }
                Event::Running
            }
            Opcode::MatchFace(a, b, reg) => {
                let similarity = match (
                    &self.face_registers[a].encoding,
                    &self.face_registers[b].encoding,
                ) {
                    (Some(a), Some(b)) => self.vision.face_similarity(a, b),
                    _ => return Err(error!(SoftwareError; "EMPTY FACE REGISTER")),
                };
                self.num_registers[reg] = Val::Float(similarity);
                Event::Running
            }
        };
        self.pc = next;
        Ok(event)
    }

    fn value(&self, operand: Operand) -> Val {
        match operand {
            Operand::Register(reg) => self.num_registers[reg],
            Operand::Literal(val) => val,
        }
    }

    fn picture(&self, reg: usize) -> Result<Picture> {
        match &self.pic_registers[reg] {
            Some(picture) => Ok(picture.clone()),
            None => Err(error!(SoftwareError; "EMPTY PICTURE REGISTER")),
        }
    }

    fn wait_for_frame(&mut self) -> Result<Picture> {
        let deadline = Instant::now() + self.config.frame_timeout;
        loop {
            if let Some(picture) = self.drone.get_frame() {
                return Ok(picture);
            }
            if Instant::now() >= deadline {
                return Err(error!(HardwareError; "NO FRAME RECEIVED FROM DRONE"));
            }
            std::thread::sleep(FRAME_POLL);
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.stop();
    }
}

fn maneuver_failed() -> Error {
    error!(HardwareError; "COULD NOT COMPLETE MANEUVER")
}

/// Source text is upper cased, so fall back to the lower case file name.
fn load_picture(file: &str) -> Result<Picture> {
    match Picture::load(file) {
        Ok(picture) => Ok(picture),
        Err(error) => {
            let lower = file.to_lowercase();
            if lower != file {
                if let Ok(picture) = Picture::load(&lower) {
                    return Ok(picture);
                }
            }
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mach::compile;

    fn run(lines: &[&str]) -> (Runtime, Vec<Event>) {
        let mut r = Runtime::default();
        r.start(compile(lines).unwrap(), Vehicle::Simulated).unwrap();
        let mut events = vec![];
        loop {
            match r.step() {
                Event::Running => {}
                Event::Stopped => break,
                event => events.push(event),
            }
        }
        (r, events)
    }

    #[test]
    fn test_subroutine() {
        let (r, _) = run(&[
            "PUSH_RETURN BACK",
            "POP_RETURN",
            "JUMP ROUTINE",
            "BACK: HALT",
            "ROUTINE: STORE 7 $R1",
            "JUMP_RETURN",
        ]);
        assert_eq!(r.num_register(1), Some(Val::Integer(7)));
        assert_eq!(r.return_register(), 3);
        assert!(!r.has_failed());
    }

    #[test]
    fn test_loop_with_branch() {
        let (r, _) = run(&[
            "STORE 0 $R0",
            "LOOP: ADD $R0 1 $R0",
            "BRANCH_LT $R0 5 LOOP",
        ]);
        assert_eq!(r.num_register(0), Some(Val::Integer(5)));
    }

    #[test]
    fn test_stacks() {
        let (r, _) = run(&[
            "PUSH_NUM 1.5",
            "PUSH_NUM $R2",
            "POP_NUM $R3",
            "POP_NUM $R4",
            "TAKE_PIC $P0",
            "PUSH_PIC $P0",
            "POP_PIC $P5",
        ]);
        assert_eq!(r.num_register(3), Some(Val::Integer(0)));
        assert_eq!(r.num_register(4), Some(Val::Float(1.5)));
        let (a, b) = (r.pic_register(0).unwrap(), r.pic_register(5).unwrap());
        assert!(a.same(b));
    }

    #[test]
    fn test_underflow_is_annotated() {
        let (mut r, events) = run(&["NOP", "POP_NUM $R0"]);
        match &events[..] {
            [Event::Error(e)] => {
                assert_eq!(e.to_string(), "SOFTWARE ERROR IN 2; NUMBER STACK UNDERFLOW")
            }
            _ => panic!("{:?}", events),
        }
        assert!(r.has_failed());
        assert!(matches!(r.step(), Event::Stopped));
    }

    #[test]
    fn test_display_events() {
        let (_, events) = run(&["DISPLAY \"HI\"", "DIV 1 4 $R0", "DISPLAY $R0"]);
        let printed: Vec<String> = events
            .iter()
            .filter_map(|e| match e {
                Event::Print(s) => Some(s.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(printed, vec!["HI", "0.25"]);
    }

    #[test]
    fn test_interrupt() {
        let mut r = Runtime::default();
        r.start(compile(&["LOOP: JUMP LOOP"]).unwrap(), Vehicle::Simulated)
            .unwrap();
        assert!(matches!(r.execute(100), Event::Running));
        r.interrupt();
        assert!(matches!(r.execute(100), Event::Stopped));
        assert!(!r.is_running());
    }

    #[test]
    fn test_empty_picture_register() {
        let (_, events) = run(&["DISPLAY $P3"]);
        match &events[..] {
            [Event::Error(e)] => assert_eq!(e.text(), "EMPTY PICTURE REGISTER"),
            _ => panic!("{:?}", events),
        }
    }
}
