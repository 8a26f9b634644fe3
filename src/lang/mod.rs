/*!
# Rust Language Module

This Rust module provides lexical analysis and validation of DroneASM.

*/

pub type LineNumber = Option<usize>;

#[macro_use]
mod error;
mod lex;
mod line;
mod validate;

pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use line::preprocess;
pub use line::Line;
pub use validate::validate;
