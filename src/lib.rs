//! # DroneASM
//!
//! A small assembly language for flying quadcopters.
//!
//! Programs are tokenized, validated and compiled into a program table,
//! then executed one instruction at a time by a register machine that
//! drives either a simulated drone or a Tello over UDP.
//!
//! ```
//! use drone_asm::mach::{compile, Runtime, Vehicle};
//!
//! let program = compile(vec!["TAKEOFF", "FORWARD 50", "LAND"]).unwrap();
//! let mut runtime = Runtime::default();
//! let path = runtime.run_program(program, Vehicle::Simulated).unwrap();
//! assert_eq!(path.len(), 2);
//! ```
//!
//! Running `droneasm` with no arguments opens an interactive session.

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/instruction_set.rs"]
#[allow(non_snake_case)]
pub mod __Instruction_Set;

pub mod lang;
pub mod mach;

pub mod drone;
pub mod vision;
