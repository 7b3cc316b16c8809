//! A tiny line-oriented command interpreter.
//!
//! Every line is split into words, `$NAME` words are replaced by variable values,
//! and the result is either handled by a builtin (`alias`, `export`, `unset`) or,
//! after one level of alias substitution and optional `> file` redirection, run as
//! an external program that the interpreter waits for.
//!
//! The main entry point is [`Interpreter`], which owns the session state (variables
//! and aliases, see [`env::Environment`]) and executes one line at a time. The
//! [`repl`] module provides the interactive and batch read loops around it.

pub mod alias;
mod builtin;
pub mod command;
pub mod env;
pub mod error;
pub mod expand;
pub mod external;
mod interpreter;
pub mod lexer;
pub mod redirect;
pub mod repl;

/// Just a convenient re-export of the command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
