//! Command-line interface.

pub mod command;
pub mod run;

pub use command::{Cli, ColorChoice};
