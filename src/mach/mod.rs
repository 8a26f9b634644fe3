/*!
## Rust Machine Module

This Rust module is a compiler and register machine for DroneASM.

*/

pub type Address = usize;

pub const NUM_REGISTERS: usize = 16;
pub const PIC_REGISTERS: usize = 8;
pub const FACE_REGISTERS: usize = 8;

mod compile;
mod listing;
mod opcode;
mod operation;
mod program;
mod runtime;
mod stack;
mod val;

pub use compile::compile;
pub use listing::Listing;
pub use opcode::{Arith, Displayable, Opcode, Operand, Relation};
pub use operation::Operation;
pub use program::Program;
pub use runtime::{Config, Event, Runtime, Vehicle};
pub use stack::Stack;
pub use val::Val;
