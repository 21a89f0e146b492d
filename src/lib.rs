//! A small line-oriented command interpreter.
//!
//! A line is split into tokens by [`eval::tokenize`], then handed to [`exec::Executor`], which
//! runs the commands it contains left to right, connecting them with pipes (`|`), sequencing
//! them (`&&`) and appending their output to files (`>`).

#[macro_use]
pub mod errors;
pub mod eval;
pub mod exec;
pub mod state;
